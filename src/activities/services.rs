use tracing::debug;

use super::repo_types::NewActivity;
use crate::calories::{estimate_calories, resolve_weight_kg, MetLookup, WeightLookup};

/// Calories to store for a new activity: estimated when a positive duration is
/// given, otherwise whatever the client supplied.
pub async fn calories_for_activity(
    mets: &dyn MetLookup,
    weights: &dyn WeightLookup,
    activity: &NewActivity,
) -> Option<i32> {
    let has_duration = activity.duration.is_some_and(|d| d.is_finite() && d > 0.0);
    if !has_duration || activity.activity_type.trim().is_empty() {
        return activity.calories_burned;
    }

    let weight = resolve_weight_kg(weights, activity.user_id, activity.activity_date).await;
    debug!(user_id = %activity.user_id, kg = weight.kg, source = ?weight.source, "weight resolved");

    estimate_calories(
        mets,
        &activity.activity_type,
        weight.kg,
        activity.duration,
        activity.duration_units.as_deref(),
    )
    .await
    .or(activity.calories_burned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calories::WeightSample;
    use async_trait::async_trait;
    use time::{macros::date, Date};
    use uuid::Uuid;

    struct Fixed {
        met: Option<f64>,
        sentinel: Option<f64>,
        weight: Option<(f64, &'static str)>,
    }

    #[async_trait]
    impl MetLookup for Fixed {
        async fn met_by_name(&self, _name: &str) -> anyhow::Result<Option<f64>> {
            Ok(self.met)
        }
        async fn sentinel_met(&self) -> anyhow::Result<Option<f64>> {
            Ok(self.sentinel)
        }
    }

    #[async_trait]
    impl WeightLookup for Fixed {
        async fn latest_weight(&self, _u: Uuid, as_of: Date) -> anyhow::Result<Option<WeightSample>> {
            Ok(self.weight.map(|(w, unit)| WeightSample {
                weight: w,
                weight_units: Some(unit.into()),
                date: as_of,
            }))
        }
    }

    struct Down;

    #[async_trait]
    impl MetLookup for Down {
        async fn met_by_name(&self, _name: &str) -> anyhow::Result<Option<f64>> {
            anyhow::bail!("pool timed out")
        }
        async fn sentinel_met(&self) -> anyhow::Result<Option<f64>> {
            anyhow::bail!("pool timed out")
        }
    }

    #[async_trait]
    impl WeightLookup for Down {
        async fn latest_weight(&self, _u: Uuid, _d: Date) -> anyhow::Result<Option<WeightSample>> {
            anyhow::bail!("pool timed out")
        }
    }

    fn activity(json: serde_json::Value) -> NewActivity {
        serde_json::from_value(json).expect("valid activity")
    }

    fn run(duration: serde_json::Value, units: &str, supplied: Option<i32>) -> NewActivity {
        activity(serde_json::json!({
            "user_id": Uuid::nil(),
            "activity_date": "2024-06-01",
            "activity_type": "Running",
            "time": duration,
            "time_units": units,
            "calories_burned": supplied
        }))
    }

    #[tokio::test]
    async fn estimate_overrides_supplied_calories() {
        let lookups = Fixed { met: Some(9.8), sentinel: None, weight: Some((80.0, "kg")) };
        let a = run(serde_json::json!(30), "min", Some(999));
        // 9.8 * 80 * 0.5 = 392
        assert_eq!(calories_for_activity(&lookups, &lookups, &a).await, Some(392));
        assert_eq!(a.activity_date, date!(2024 - 06 - 01));
    }

    #[tokio::test]
    async fn supplied_calories_kept_without_duration() {
        let lookups = Fixed { met: Some(9.8), sentinel: None, weight: None };
        let a = run(serde_json::Value::Null, "min", Some(250));
        assert_eq!(calories_for_activity(&lookups, &lookups, &a).await, Some(250));

        let a = run(serde_json::json!(0), "min", None);
        assert_eq!(calories_for_activity(&lookups, &lookups, &a).await, None);
    }

    #[tokio::test]
    async fn defaults_apply_when_nothing_is_known() {
        let lookups = Fixed { met: None, sentinel: None, weight: None };
        let a = run(serde_json::json!(1.5), "hours", None);
        // 2.0 * 70 * 1.5
        assert_eq!(calories_for_activity(&lookups, &lookups, &a).await, Some(210));
    }

    #[tokio::test]
    async fn storage_outage_degrades_silently() {
        let a = run(serde_json::json!(3600), "seconds", None);
        assert_eq!(calories_for_activity(&Down, &Down, &a).await, Some(140));
    }

    #[tokio::test]
    async fn pounds_are_converted_before_estimating() {
        let lookups = Fixed { met: None, sentinel: Some(3.0), weight: Some((220.0, "lbs")) };
        let a = run(serde_json::json!(60), "minutes", None);
        // 3.0 * 99.79024 * 1.0 = 299.37
        assert_eq!(calories_for_activity(&lookups, &lookups, &a).await, Some(299));
    }
}
