//! Conversion between a set of weekdays and its persisted representation:
//! a list of decimal index tokens, stored as one JSON array per tracker.

use std::collections::BTreeSet;

use log::warn;

use crate::error::StoreError;
use crate::models::WeekDay;

/// Encodes a schedule as decimal tokens, ascending by weekday index.
pub fn encode(days: &BTreeSet<WeekDay>) -> Vec<String> {
    days.iter().map(|day| day.index().to_string()).collect()
}

/// Decodes persisted tokens back into a schedule.
///
/// Tokens that do not parse, or that fall outside the weekday range, are
/// dropped rather than failing the caller; a schedule written by this crate
/// always round-trips losslessly.
pub fn decode(tokens: &[String]) -> BTreeSet<WeekDay> {
    tokens
        .iter()
        .filter_map(|token| {
            let day = token
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(WeekDay::from_index);
            if day.is_none() {
                warn!("dropping invalid schedule token {token:?}");
            }
            day
        })
        .collect()
}

/// Serializes a schedule to the TEXT column form.
pub(crate) fn to_storage(days: &BTreeSet<WeekDay>) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&encode(days))?)
}

/// Parses the TEXT column form; a column that is not a JSON string array
/// decodes as the empty schedule.
pub(crate) fn from_storage(raw: &str) -> BTreeSet<WeekDay> {
    let tokens: Vec<String> = match serde_json::from_str(raw) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!("unreadable stored schedule {raw:?}: {err}");
            return BTreeSet::new();
        }
    };
    decode(&tokens)
}
