//! Calendar features derived from message timestamps.
//!
//! Every [`Record`](crate::table::Record) carries one [`TemporalFeatures`],
//! computed once when the table is built and never modified afterwards.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Calendar attributes of a single timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    pub year: i32,
    /// Full English month name, e.g. `"January"`.
    pub month: String,
    /// 1-based month number.
    pub month_num: u32,
    pub day: u32,
    /// Full English weekday name, e.g. `"Monday"`.
    pub day_name: String,
    pub hour: u32,
    pub minute: u32,
    /// Hour bucket label, see [`hour_bucket`].
    pub period: String,
}

impl TemporalFeatures {
    /// Derives all features from a timestamp.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month: ts.format("%B").to_string(),
            month_num: ts.month(),
            day: ts.day(),
            day_name: ts.format("%A").to_string(),
            hour: ts.hour(),
            minute: ts.minute(),
            period: hour_bucket(ts.hour()),
        }
    }
}

/// Labels the one-hour bucket starting at `hour`.
///
/// The scheme is irregular and heatmap columns depend on it:
/// `0` → `"00-1"`, `12` → `"12-00"`, otherwise `"H-H+1"` (so `23` → `"23-24"`).
pub fn hour_bucket(hour: u32) -> String {
    match hour {
        0 => "00-1".to_string(),
        12 => "12-00".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hour_bucket_labels() {
        assert_eq!(hour_bucket(0), "00-1");
        assert_eq!(hour_bucket(5), "5-6");
        assert_eq!(hour_bucket(11), "11-12");
        assert_eq!(hour_bucket(12), "12-00");
        assert_eq!(hour_bucket(13), "13-14");
        assert_eq!(hour_bucket(23), "23-24");
    }

    #[test]
    fn test_features_from_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let f = TemporalFeatures::from_timestamp(ts);
        assert_eq!(f.year, 2024);
        assert_eq!(f.month, "May");
        assert_eq!(f.month_num, 5);
        assert_eq!(f.day, 1);
        assert_eq!(f.day_name, "Wednesday");
        assert_eq!((f.hour, f.minute), (14, 30));
        assert_eq!(f.period, "14-15");
    }
}
