use async_trait::async_trait;
use time::Date;
use tracing::{debug, warn};
use uuid::Uuid;

use super::units::{DurationUnit, WeightUnit};

pub const DEFAULT_MET: f64 = 2.0;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const SENTINEL_EXERCISE: &str = "Miscellaneous";

/// Read access to the exercise catalogue.
#[async_trait]
pub trait MetLookup: Send + Sync {
    /// Case-insensitive exact match on the exercise name.
    async fn met_by_name(&self, name: &str) -> anyhow::Result<Option<f64>>;

    /// MET of the definition named exactly [`SENTINEL_EXERCISE`].
    async fn sentinel_met(&self) -> anyhow::Result<Option<f64>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightSample {
    pub weight: f64,
    pub weight_units: Option<String>,
    pub date: Date,
}

/// Read access to a user's weight history.
#[async_trait]
pub trait WeightLookup: Send + Sync {
    /// Most recent sample with a weight on or before `as_of`.
    async fn latest_weight(&self, user_id: Uuid, as_of: Date)
        -> anyhow::Result<Option<WeightSample>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetSource {
    Exact,
    Sentinel,
    Default,
    /// The catalogue could not be read.
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetResolution {
    pub met: f64,
    pub source: MetSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightSource {
    Sample,
    NoSample,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightResolution {
    pub kg: f64,
    pub source: WeightSource,
}

pub async fn resolve_met(lookup: &dyn MetLookup, activity_type: &str) -> MetResolution {
    match lookup_met(lookup, activity_type).await {
        Ok(resolution) => resolution,
        Err(e) => {
            warn!(error = %e, activity_type, "MET lookup failed; using default MET");
            MetResolution {
                met: DEFAULT_MET,
                source: MetSource::Degraded,
            }
        }
    }
}

async fn lookup_met(lookup: &dyn MetLookup, activity_type: &str) -> anyhow::Result<MetResolution> {
    if let Some(met) = lookup.met_by_name(activity_type).await? {
        return Ok(MetResolution {
            met,
            source: MetSource::Exact,
        });
    }
    debug!(activity_type, "no exercise definition; trying sentinel");
    Ok(match lookup.sentinel_met().await? {
        Some(met) => MetResolution {
            met,
            source: MetSource::Sentinel,
        },
        None => MetResolution {
            met: DEFAULT_MET,
            source: MetSource::Default,
        },
    })
}

/// `MET × kg × hours`, truncated toward zero.
pub fn calories_for(met: f64, weight_kg: f64, hours: f64) -> i32 {
    (met * weight_kg * hours) as i32
}

/// Returns `None` when there is no positive duration to estimate from.
pub async fn estimate_calories(
    lookup: &dyn MetLookup,
    activity_type: &str,
    weight_kg: f64,
    duration: Option<f64>,
    duration_unit: Option<&str>,
) -> Option<i32> {
    let duration = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    if activity_type.trim().is_empty() {
        return None;
    }

    let hours = DurationUnit::parse(duration_unit).to_hours(duration);
    let met = resolve_met(lookup, activity_type).await;
    let calories = calories_for(met.met, weight_kg, hours);
    debug!(
        activity_type,
        met = met.met,
        source = ?met.source,
        weight_kg,
        hours,
        calories,
        "calories estimated"
    );
    Some(calories)
}

pub async fn resolve_weight_kg(
    lookup: &dyn WeightLookup,
    user_id: Uuid,
    as_of: Date,
) -> WeightResolution {
    match lookup.latest_weight(user_id, as_of).await {
        Ok(Some(sample)) if sample.weight.is_finite() && sample.weight > 0.0 => WeightResolution {
            kg: WeightUnit::parse(sample.weight_units.as_deref()).to_kg(sample.weight),
            source: WeightSource::Sample,
        },
        Ok(_) => WeightResolution {
            kg: DEFAULT_WEIGHT_KG,
            source: WeightSource::NoSample,
        },
        Err(e) => {
            warn!(error = %e, %user_id, %as_of, "weight lookup failed; using default weight");
            WeightResolution {
                kg: DEFAULT_WEIGHT_KG,
                source: WeightSource::Degraded,
            }
        }
    }
}
