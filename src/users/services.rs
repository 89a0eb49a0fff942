use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::http::StatusCode;
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::warn;
use uuid::Uuid;

use crate::calories::{WeightSample, WeightUnit};
use crate::errors::{internal, not_found};

use super::dto::LatestWeightResponse;
use super::repo::{User, UserDirectory};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Hash to store for an optional account password; blank means no password.
pub(crate) fn stored_password(password: Option<&str>) -> anyhow::Result<Option<String>> {
    let Some(plain) = password.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash account password: {e}"))?;
    Ok(Some(hash.to_string()))
}

/// Accounts without a password, or with an unreadable stored hash, never match.
pub(crate) fn credentials_match(user: &User, candidate: &str) -> bool {
    let Some(stored) = user.password_hash.as_deref() else {
        return false;
    };
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "stored password hash is unreadable");
            false
        }
    }
}

/// 404 unless the user exists.
pub(crate) async fn require_user(
    users: &dyn UserDirectory,
    user_id: Uuid,
) -> Result<(), (StatusCode, String)> {
    if users.user_exists(user_id).await.map_err(internal)? {
        Ok(())
    } else {
        warn!(%user_id, "unknown user");
        Err(not_found("User not found"))
    }
}

/// Sample as reported to clients; a missing or blank unit is reported as lbs.
pub(crate) fn latest_weight_view(sample: Option<(WeightSample, Option<String>)>) -> LatestWeightResponse {
    match sample {
        Some((s, notes)) => {
            let units = s
                .weight_units
                .clone()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| "lbs".into());
            let kg = WeightUnit::parse(Some(&units)).to_kg(s.weight);
            LatestWeightResponse {
                weight: Some(s.weight),
                weight_units: Some(units),
                weight_kg: Some((kg * 100.0).round() / 100.0),
                date: Some(s.date),
                notes,
                found: true,
            }
        }
        None => LatestWeightResponse::default(),
    }
}

#[cfg(test)]
mod credential_tests {
    use super::*;

    fn member(password: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Priya".into(),
            email: "priya@example.com".into(),
            weight_goal: Some("run a half marathon".into()),
            password_hash: stored_password(password).expect("hash"),
            created_at: time::OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn signup_password_logs_in() {
        let user = member(Some("tempo-run-42"));
        let stored = user.password_hash.as_deref().unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(credentials_match(&user, "tempo-run-42"));
        assert!(!credentials_match(&user, "Tempo-run-42"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = stored_password(Some("hill-repeats")).unwrap().unwrap();
        let b = stored_password(Some("hill-repeats")).unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn account_without_password_never_matches() {
        assert!(stored_password(Some("")).unwrap().is_none());
        let user = member(None);
        assert!(!credentials_match(&user, ""));
        assert!(!credentials_match(&user, "anything"));
    }

    #[test]
    fn unreadable_stored_hash_never_matches() {
        let mut user = member(None);
        user.password_hash = Some("plaintext-from-an-old-import".into());
        assert!(!credentials_match(&user, "plaintext-from-an-old-import"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("runner@example.com"));
        assert!(!is_valid_email("runner@example"));
        assert!(!is_valid_email("run ner@example.com"));
    }
}

#[cfg(test)]
mod directory_tests {
    use super::*;
    use async_trait::async_trait;

    struct Known(Vec<Uuid>);

    #[async_trait]
    impl UserDirectory for Known {
        async fn user_exists(&self, id: Uuid) -> anyhow::Result<bool> {
            Ok(self.0.contains(&id))
        }
    }

    struct Offline;

    #[async_trait]
    impl UserDirectory for Offline {
        async fn user_exists(&self, _id: Uuid) -> anyhow::Result<bool> {
            anyhow::bail!("connection reset")
        }
    }

    #[tokio::test]
    async fn require_user_maps_unknown_to_not_found() {
        let id = Uuid::new_v4();
        let users = Known(vec![id]);
        assert!(require_user(&users, id).await.is_ok());

        let (status, msg) = require_user(&users, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "User not found");
    }

    #[tokio::test]
    async fn require_user_reports_storage_failure() {
        let (status, _) = require_user(&Offline, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[cfg(test)]
mod weight_view_tests {
    use super::*;
    use time::macros::date;

    fn sample(weight: f64, units: Option<&str>) -> WeightSample {
        WeightSample {
            weight,
            weight_units: units.map(str::to_string),
            date: date!(2024 - 05 - 01),
        }
    }

    #[test]
    fn converts_and_rounds_pounds() {
        let view = latest_weight_view(Some((sample(220.0, Some("lbs")), Some("after vacation".into()))));
        assert!(view.found);
        assert_eq!(view.weight_kg, Some(99.79));
        assert_eq!(view.weight_units.as_deref(), Some("lbs"));
        assert_eq!(view.notes.as_deref(), Some("after vacation"));
    }

    #[test]
    fn missing_or_blank_unit_is_reported_as_lbs() {
        for units in [None, Some(""), Some("  ")] {
            let view = latest_weight_view(Some((sample(100.0, units), None)));
            assert_eq!(view.weight_units.as_deref(), Some("lbs"), "{units:?}");
            assert_eq!(view.weight_kg, Some(45.36));
        }
    }

    #[test]
    fn no_sample_is_not_found() {
        let view = latest_weight_view(None);
        assert!(!view.found);
        assert!(view.weight.is_none() && view.weight_kg.is_none() && view.date.is_none());
    }
}
