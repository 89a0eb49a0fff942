//! MET-based calorie estimation.
//!
//! Lookups that fail or come back empty resolve to fixed defaults rather than
//! errors; the resolution values record which path was taken.

mod estimator;
mod units;

pub use estimator::{
    calories_for, estimate_calories, resolve_met, resolve_weight_kg, MetLookup, MetResolution,
    MetSource, WeightLookup, WeightResolution, WeightSample, WeightSource, DEFAULT_MET,
    DEFAULT_WEIGHT_KG, SENTINEL_EXERCISE,
};
pub use units::{DurationUnit, WeightUnit, LBS_TO_KG};
