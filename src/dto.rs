use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::bad_request;

pub(crate) const MAX_LIMIT: i64 = 1000;

pub(crate) fn default_limit() -> i64 {
    100
}

/// Rejects negative paging values; limits above [`MAX_LIMIT`] are capped.
pub(crate) fn page_bounds(limit: i64, offset: i64) -> Result<(i64, i64), (StatusCode, String)> {
    if limit < 0 {
        return Err(bad_request("limit must not be negative"));
    }
    if offset < 0 {
        return Err(bad_request("offset must not be negative"));
    }
    Ok((limit.min(MAX_LIMIT), offset))
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl Pagination {
    pub fn bounds(&self) -> Result<(i64, i64), (StatusCode, String)> {
        page_bounds(self.limit, self.offset)
    }
}

/// Query for list endpoints that can be narrowed to one user.
#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub user_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl UserFilter {
    pub fn bounds(&self) -> Result<(i64, i64), (StatusCode, String)> {
        page_bounds(self.limit, self.offset)
    }
}

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_rejects_negatives_and_caps_limit() {
        assert_eq!(page_bounds(100, 0).unwrap(), (100, 0));
        assert_eq!(page_bounds(0, 20).unwrap(), (0, 20));
        assert_eq!(page_bounds(50_000, 5).unwrap(), (MAX_LIMIT, 5));
        assert_eq!(page_bounds(-1, 0).unwrap_err().0, StatusCode::BAD_REQUEST);
        assert!(page_bounds(10, -3).unwrap_err().1.contains("offset"));
    }
}
