//! Metric/imperial conversions for energy, mass and volume.
//!
//! Metric values are canonical. The factors are fixed so that conversions are
//! deterministic: `4184 kJ` is exactly `1000 kcal`.

/// Kilojoules per kilocalorie.
pub const KJ_PER_CALORIE: f64 = 4.184;

/// Grams per avoirdupois ounce.
pub const GRAMS_PER_OZ: f64 = 28.35;

/// Millilitres per US fluid ounce.
pub const ML_PER_FL_OZ: f64 = 29.574;

pub fn calories_to_kj(calories: f64) -> f64 {
    calories * KJ_PER_CALORIE
}

pub fn kj_to_calories(kj: f64) -> f64 {
    kj / KJ_PER_CALORIE
}

pub fn oz_to_grams(oz: f64) -> f64 {
    oz * GRAMS_PER_OZ
}

pub fn grams_to_oz(grams: f64) -> f64 {
    grams / GRAMS_PER_OZ
}

pub fn fl_oz_to_ml(fl_oz: f64) -> f64 {
    fl_oz * ML_PER_FL_OZ
}

pub fn ml_to_fl_oz(ml: f64) -> f64 {
    ml / ML_PER_FL_OZ
}

/// Resolve a metric value from a metric/imperial pair.
///
/// A non-zero metric value always wins; otherwise the imperial value is
/// converted with `convert`.
pub fn prefer_metric(metric: f64, imperial: f64, convert: fn(f64) -> f64) -> f64 {
    if metric != 0.0 {
        metric
    } else {
        convert(imperial)
    }
}
