use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::StoreError;

pub fn parse_datetime(value: &str, field: &'static str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| StoreError::Corrupt {
            field,
            reason: format!("{value:?}: {err}"),
        })
}

pub fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| StoreError::Corrupt {
        field,
        reason: format!("{value:?}: {err}"),
    })
}

pub fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(value).map_err(|err| StoreError::Corrupt {
        field,
        reason: format!("{value:?}: {err}"),
    })
}

pub fn to_u64(value: i64, field: &'static str) -> Result<u64, StoreError> {
    u64::try_from(value).map_err(|_| StoreError::Corrupt {
        field,
        reason: format!("contains negative value {value}"),
    })
}
