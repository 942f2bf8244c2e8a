use serde::{Deserialize, Serialize};

/// A weekday with a stable persisted index: 0 = Monday … 6 = Sunday.
///
/// The index is the wire format for stored schedules and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn index(self) -> u8 {
        match self {
            WeekDay::Monday => 0,
            WeekDay::Tuesday => 1,
            WeekDay::Wednesday => 2,
            WeekDay::Thursday => 3,
            WeekDay::Friday => 4,
            WeekDay::Saturday => 5,
            WeekDay::Sunday => 6,
        }
    }

    pub fn from_index(value: u8) -> Option<WeekDay> {
        match value {
            0 => Some(WeekDay::Monday),
            1 => Some(WeekDay::Tuesday),
            2 => Some(WeekDay::Wednesday),
            3 => Some(WeekDay::Thursday),
            4 => Some(WeekDay::Friday),
            5 => Some(WeekDay::Saturday),
            6 => Some(WeekDay::Sunday),
            _ => None,
        }
    }

    /// Maps calendar weekday numbering (1 = Sunday … 7 = Saturday) onto our
    /// Monday-first index.
    pub fn from_calendar_weekday(value: u32) -> WeekDay {
        let index = (value + 5) % 7;
        WeekDay::from_index(index as u8).unwrap_or(WeekDay::Monday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_all_days() {
        for day in WeekDay::ALL {
            assert_eq!(WeekDay::from_index(day.index()), Some(day));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(WeekDay::from_index(7), None);
        assert_eq!(WeekDay::from_index(255), None);
    }

    #[test]
    fn calendar_weekday_maps_sunday_first_to_monday_first() {
        assert_eq!(WeekDay::from_calendar_weekday(1), WeekDay::Sunday);
        assert_eq!(WeekDay::from_calendar_weekday(2), WeekDay::Monday);
        assert_eq!(WeekDay::from_calendar_weekday(3), WeekDay::Tuesday);
        assert_eq!(WeekDay::from_calendar_weekday(7), WeekDay::Saturday);
    }
}
