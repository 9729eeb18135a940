//! Conversions between the external [`FoodRecord`] / [`GetFoodFilter`] shapes
//! and the storage-internal [`FoodRecordEntry`] / [`FoodFilter`].

use uuid::Uuid;

use super::types::{non_empty, FoodFilter, FoodRecord, FoodRecordEntry, GetFoodFilter};
use super::units;
use crate::error::ReapError;

/// Parse a UUID, treating an empty or malformed value as nil.
pub fn parse_uuid_regardless(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap_or(Uuid::nil())
}

/// Map an external record into a storage entry.
///
/// The user id must be a valid UUID. A missing or malformed record id maps to
/// [`Uuid::nil`], which the create path replaces with a freshly generated id.
/// A non-zero metric field always overrides its imperial counterpart.
pub fn record_to_entry(record: &FoodRecord) -> Result<FoodRecordEntry, ReapError> {
    let user_id = Uuid::parse_str(&record.user_id)
        .map_err(|_| ReapError::BadUserId(record.user_id.clone()))?;

    Ok(FoodRecordEntry {
        storage_id: 0,
        id: parse_uuid_regardless(&record.id),
        user_id,
        name: record.name.clone(),
        description: record.description.clone(),
        energy_kj: units::prefer_metric(record.kj, record.calories, units::calories_to_kj),
        mass_grams: units::prefer_metric(record.grams, record.oz, units::oz_to_grams),
        volume_ml: units::prefer_metric(record.ml, record.fl_oz, units::fl_oz_to_ml),
        created_at: record.time,
    })
}

/// Map a storage entry into an external record, deriving the imperial fields
/// from the canonical metric values.
pub fn entry_to_record(entry: &FoodRecordEntry) -> FoodRecord {
    FoodRecord {
        id: entry.id.to_string(),
        user_id: entry.user_id.to_string(),
        name: entry.name.clone(),
        description: entry.description.clone(),
        kj: entry.energy_kj,
        grams: entry.mass_grams,
        ml: entry.volume_ml,
        calories: units::kj_to_calories(entry.energy_kj),
        oz: units::grams_to_oz(entry.mass_grams),
        fl_oz: units::ml_to_fl_oz(entry.volume_ml),
        time: entry.created_at,
    }
}

/// Build a storage filter scoped to `user_id` from an external filter.
pub fn filter_from_request(
    filter: &GetFoodFilter,
    user_id: &str,
) -> Result<FoodFilter, ReapError> {
    let user_id =
        Uuid::parse_str(user_id).map_err(|_| ReapError::BadUserId(user_id.to_string()))?;

    let id = match non_empty(&filter.id) {
        Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
            ReapError::InvalidRequest(format!("filter id is not a valid uuid: {raw}"))
        })?),
        None => None,
    };

    Ok(FoodFilter {
        id,
        user_id,
        name: non_empty(&filter.name).map(str::to_string),
        description: non_empty(&filter.description).map(str::to_string),
        created_before: filter.before_time,
        created_after: filter.after_time,
    })
}
