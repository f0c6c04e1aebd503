//! Core types and logic for the Caffeinated intake tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the entity types, the pharmacokinetic decay model, the [`IntakeStore`]
//! abstraction implemented by storage backends, and the [`Tracker`] that turns
//! stored intake into limit and crash warnings.
//!
//! [`IntakeStore`]: store::IntakeStore
//! [`Tracker`]: tracker::Tracker

// Native `async fn` in traits; `Send` bounds are spelled out on the trait.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod decay;
pub mod error;
pub mod history;
pub mod intake;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
