use crate::model::Moon;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure of the ephemeris to produce positions for an instant.
#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum ComputationError {
    #[error("clock reads {at}, outside the supported years {min_year}..={max_year}")]
    ClockOutOfRange {
        at: DateTime<Utc>,
        min_year: i32,
        max_year: i32,
    },

    #[error("ephemeris produced a non-finite position for {moon}")]
    NonFinite { moon: Moon },
}

impl ComputationError {
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            ComputationError::ClockOutOfRange { .. } => {
                "Make sure the system clock is set correctly (UTC)."
            }
            ComputationError::NonFinite { .. } => {
                "The ephemeris model failed for this instant; try another time with --at."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn message_names_the_failure() {
        let at = Utc.with_ymd_and_hms(1700, 1, 1, 0, 0, 0).unwrap();
        let e = ComputationError::ClockOutOfRange {
            at,
            min_year: 1800,
            max_year: 2200,
        };
        let msg = e.to_string();
        assert!(msg.contains("1700-01-01"));
        assert!(msg.contains("1800..=2200"));
        assert!(e.hint().contains("clock"));

        let e = ComputationError::NonFinite { moon: Moon::Europa };
        assert!(e.to_string().contains("Europa"));
    }
}
