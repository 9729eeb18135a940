//! Food record type definitions.
//!
//! [`FoodRecordEntry`] is the storage-internal shape (metric units only),
//! [`FoodFilter`] selects a subset of one user's entries, and [`FoodRecord`] /
//! [`GetFoodFilter`] are the external representations handed to and received
//! from callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored food diary entry. Energy, mass and volume are kept in metric units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoodRecordEntry {
    /// Backend-assigned sequence number. Not part of the record's identity.
    pub storage_id: i64,
    /// Public identity of the record.
    pub id: Uuid,
    /// Owner of the record.
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub energy_kj: f64,
    pub mass_grams: f64,
    pub volume_ml: f64,
    /// `None` until the record has been persisted.
    pub created_at: Option<DateTime<Utc>>,
}

/// Predicates used to select a user's records.
///
/// `user_id` is always enforced. Every other field restricts the result set
/// only when it is present; all present predicates must hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FoodFilter {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    /// Substring match on the record name.
    pub name: Option<String>,
    /// Substring match on the record description.
    pub description: Option<String>,
    /// Inclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
}

impl FoodFilter {
    /// Filter that returns every record owned by `user_id`.
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Returns `true` if `entry` satisfies every supplied predicate.
    pub fn matches(&self, entry: &FoodRecordEntry) -> bool {
        if entry.user_id != self.user_id {
            return false;
        }

        if let Some(id) = self.id {
            if entry.id != id {
                return false;
            }
        }

        if let Some(name) = non_empty(&self.name) {
            if !entry.name.contains(name) {
                return false;
            }
        }

        if let Some(description) = non_empty(&self.description) {
            if !entry.description.contains(description) {
                return false;
            }
        }

        if self.created_after.is_some() || self.created_before.is_some() {
            let Some(created) = entry.created_at else {
                return false;
            };
            if let Some(after) = self.created_after {
                if created < after {
                    return false;
                }
            }
            if let Some(before) = self.created_before {
                if created > before {
                    return false;
                }
            }
        }

        true
    }
}

/// Treat `Some("")` the same as `None`.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// External food record. Carries both metric and imperial fields so a client
/// can read whichever unit system it prefers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kj: f64,
    #[serde(default)]
    pub grams: f64,
    #[serde(default)]
    pub ml: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub oz: f64,
    #[serde(default)]
    pub fl_oz: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

/// External filter for `GetFoodRecords`. The owning user is supplied alongside
/// it by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetFoodFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_time: Option<DateTime<Utc>>,
}
