//! Filtering over the drink catalog.
//!
//! The catalog itself is fetched elsewhere and handed in as plain
//! [`IntakeEvent`]s with no consumption time. Name matching is a
//! case-insensitive substring test.

use crate::intake::{Category, IntakeEvent};

/// Which slice of the catalog to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogTab {
  /// Only drinks whose names appear in the given recent list.
  Recent(Vec<String>),
  #[default]
  All,
  Category(Category),
}

impl CatalogTab {
  fn admits(&self, drink: &IntakeEvent) -> bool {
    match self {
      Self::Recent(names) => names.iter().any(|n| *n == drink.name),
      Self::All => true,
      Self::Category(c) => drink.category.as_str().eq_ignore_ascii_case(c.as_str()),
    }
  }
}

/// A search query combined with a tab.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
  pub query: String,
  pub tab:   CatalogTab,
}

impl CatalogFilter {
  pub fn matches(&self, drink: &IntakeEvent) -> bool {
    name_contains(&drink.name, &self.query) && self.tab.admits(drink)
  }

  pub fn apply<'a>(&self, drinks: &'a [IntakeEvent]) -> Vec<&'a IntakeEvent> {
    drinks.iter().filter(|d| self.matches(d)).collect()
  }
}

fn name_contains(name: &str, query: &str) -> bool {
  name.to_lowercase().contains(&query.to_lowercase())
}

pub fn search<'a>(drinks: &'a [IntakeEvent], query: &str) -> Vec<&'a IntakeEvent> {
  CatalogFilter { query: query.to_owned(), tab: CatalogTab::All }.apply(drinks)
}

pub fn filter_by_category<'a>(
  drinks: &'a [IntakeEvent],
  category: &Category,
) -> Vec<&'a IntakeEvent> {
  CatalogFilter {
    query: String::new(),
    tab:   CatalogTab::Category(category.clone()),
  }
  .apply(drinks)
}

pub fn search_and_filter<'a>(
  drinks: &'a [IntakeEvent],
  query: &str,
  category: Option<&Category>,
) -> Vec<&'a IntakeEvent> {
  let tab = category.cloned().map_or(CatalogTab::All, CatalogTab::Category);
  CatalogFilter { query: query.to_owned(), tab }.apply(drinks)
}

/// Exact, case-insensitive lookup by drink name.
pub fn find_by_name<'a>(drinks: &'a [IntakeEvent], name: &str) -> Option<&'a IntakeEvent> {
  drinks.iter().find(|d| d.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog() -> Vec<IntakeEvent> {
    vec![
      IntakeEvent::new("Costa Coffee Latte", Category::Coffee, 185, 150, "354"),
      IntakeEvent::new("Espresso", Category::Coffee, 64, 1, "30"),
      IntakeEvent::new("Green Tea", Category::Tea, 28, 0, "237"),
      IntakeEvent::new("Red Bull", Category::EnergyDrinks, 80, 110, "250"),
      IntakeEvent::new("Coca-Cola", Category::SoftDrinks, 34, 140, "355"),
    ]
  }

  fn names(drinks: Vec<&IntakeEvent>) -> Vec<&str> {
    drinks.into_iter().map(|d| d.name.as_str()).collect()
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let c = catalog();
    assert_eq!(names(search(&c, "costa coffee")), vec!["Costa Coffee Latte"]);
    assert_eq!(names(search(&c, "co")).len(), 2);
    assert_eq!(search(&c, "").len(), 5);
    assert!(search(&c, "NonExistentDrink").is_empty());
  }

  #[test]
  fn filter_by_category_keeps_only_that_category() {
    let c = catalog();
    let coffee = filter_by_category(&c, &Category::Coffee);
    assert_eq!(coffee.len(), 2);
    assert!(coffee.iter().all(|d| d.category == Category::Coffee));
  }

  #[test]
  fn search_and_filter_combines_both() {
    let c = catalog();
    assert_eq!(
      names(search_and_filter(&c, "espresso", Some(&Category::Coffee))),
      vec!["Espresso"]
    );
    assert!(search_and_filter(&c, "espresso", Some(&Category::Tea)).is_empty());
    assert_eq!(search_and_filter(&c, "", None).len(), 5);
  }

  #[test]
  fn recent_tab_uses_exact_names() {
    let c = catalog();
    let filter = CatalogFilter {
      query: String::new(),
      tab:   CatalogTab::Recent(vec!["Red Bull".into(), "Green".into()]),
    };
    assert_eq!(names(filter.apply(&c)), vec!["Red Bull"]);
  }

  #[test]
  fn find_by_name_ignores_case() {
    let c = catalog();
    assert_eq!(find_by_name(&c, " red bull").map(|d| d.caffeine_mg), Some(80));
    assert!(find_by_name(&c, "Red").is_none());
  }
}
