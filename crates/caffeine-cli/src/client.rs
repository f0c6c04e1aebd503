//! Async HTTP client for the drink catalog.
//!
//! The catalog is read-only and lives outside this program. Any failure to
//! fetch or decode it is logged and treated as an empty catalog.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use caffeine_core::intake::{Category, IntakeEvent};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

/// One drink as served by the catalog endpoint.
#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
  #[serde(rename = "Caffeine (mg)")]
  pub caffeine_mg: u32,
  #[serde(rename = "Calories")]
  pub calories:    u32,
  #[serde(rename = "Volume (ml)")]
  pub volume_ml:   String,
  #[serde(rename = "drink")]
  pub name:        String,
  #[serde(rename = "type")]
  pub category:    String,
}

impl From<CatalogEntry> for IntakeEvent {
  fn from(e: CatalogEntry) -> Self {
    IntakeEvent::new(
      e.name,
      Category::parse(&e.category),
      e.caffeine_mg,
      e.calories,
      e.volume_ml,
    )
  }
}

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct CatalogClient {
  client: Client,
  url:    String,
}

impl CatalogClient {
  pub fn new(base_url: &str) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(15))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      client,
      url: format!("{}/.json", base_url.trim_end_matches('/')),
    })
  }

  /// `GET <base>/.json`
  async fn try_fetch(&self) -> Result<Vec<IntakeEvent>> {
    let resp = self
      .client
      .get(&self.url)
      .send()
      .await
      .with_context(|| format!("GET {} failed", self.url))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {} → {}", self.url, resp.status()));
    }
    let entries: Vec<CatalogEntry> =
      resp.json().await.context("deserialising catalog")?;
    Ok(entries.into_iter().map(IntakeEvent::from).collect())
  }

  /// The full catalog, or nothing if it cannot be fetched.
  pub async fn fetch_all(&self) -> Vec<IntakeEvent> {
    match self.try_fetch().await {
      Ok(drinks) => drinks,
      Err(e) => {
        warn!(error = %format!("{e:#}"), "drink catalog unavailable");
        Vec::new()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn catalog_entry_decodes_source_keys() {
    let raw = r#"[
      {"Caffeine (mg)": 185, "Calories": 150, "Volume (ml)": "354.88",
       "drink": "Costa Coffee Latte", "type": "Coffee"},
      {"Caffeine (mg)": 80, "Calories": 110, "Volume (ml)": "250",
       "drink": "Red Bull", "type": "Energy Drinks"}
    ]"#;

    let entries: Vec<CatalogEntry> = serde_json::from_str(raw).unwrap();
    let drinks: Vec<IntakeEvent> = entries.into_iter().map(Into::into).collect();

    assert_eq!(drinks.len(), 2);
    assert_eq!(drinks[0].volume_ml, "354.88");
    assert_eq!(drinks[0].consumed_at, None);
    assert_eq!(drinks[1].category, Category::EnergyDrinks);
  }

  #[test]
  fn url_points_at_json_root() {
    let c = CatalogClient::new("https://example.invalid/").unwrap();
    assert_eq!(c.url, "https://example.invalid/.json");
  }

  #[tokio::test]
  async fn unreachable_catalog_is_empty() {
    let c = CatalogClient::new("http://127.0.0.1:9").unwrap();
    assert!(c.fetch_all().await.is_empty());
  }
}
