//! Page-local filtering.
//!
//! A deliberate scope limit carried over from the product: predicates run
//! over the currently loaded page only, never trigger a different server
//! fetch, and produce a derived, non-authoritative view.

use crate::model::Apartment;

/// Client-local criteria. All set predicates must hold (conjunction).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against name or description.
    pub text: Option<String>,
    pub min_rooms: Option<i64>,
    pub available_only: bool,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        !self.available_only
            && self.min_rooms.is_none()
            && self.text.as_deref().is_none_or(str::is_empty)
    }

    fn matches(&self, apartment: &Apartment) -> bool {
        if let Some(text) = self.text.as_deref() {
            if !text.is_empty() {
                let needle = text.to_lowercase();
                let hit = apartment.name.to_lowercase().contains(&needle)
                    || apartment.description.to_lowercase().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }
        if let Some(min) = self.min_rooms {
            if apartment.number_of_rooms < min {
                return false;
            }
        }
        if self.available_only && !apartment.availability {
            return false;
        }
        true
    }
}

/// Holds the active criteria and recomputes the derived view on demand.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    criteria: FilterCriteria,
}

impl ListFilter {
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Ordered subsequence of `items` passing all criteria. Synchronous,
    /// idempotent, never mutates the source page.
    pub fn apply(&self, items: &[Apartment]) -> Vec<Apartment> {
        items.iter().filter(|a| self.criteria.matches(a)).cloned().collect()
    }
}
