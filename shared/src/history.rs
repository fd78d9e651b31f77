//! Trip history: the activity catalog split into Upcoming, Completed and
//! Cancelled tabs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub u32);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActivityStatus {
    #[default]
    Upcoming,
    Completed,
    Cancelled,
}

impl ActivityStatus {
    pub const ALL: [Self; 3] = [Self::Upcoming, Self::Completed, Self::Cancelled];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Label colour used on history cards.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Upcoming => "#F09E00",
            Self::Completed => "green",
            Self::Cancelled => "red",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub status: ActivityStatus,
    /// Local wall-clock time, ISO 8601 without offset.
    pub date_time: String,
    pub pick_location: String,
    pub drop_location: String,
    pub rider_name: String,
    pub vehicle_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("invalid activity timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityCard {
    pub id: ActivityId,
    pub status: ActivityStatus,
    pub status_label: String,
    pub status_color: String,
    pub date_label: String,
    pub pick_location: String,
    pub drop_location: String,
    pub rider_name: String,
    pub vehicle_name: String,
}

/// Records whose status is exactly `status`, in catalog order.
pub fn partition(records: &[ActivityRecord], status: ActivityStatus) -> Vec<&ActivityRecord> {
    records.iter().filter(|r| r.status == status).collect()
}

/// Formats as "Fri, Oct 18, 2024".
pub fn format_activity_date(value: &str) -> Result<String, HistoryError> {
    let parsed = value
        .parse::<NaiveDateTime>()
        .map_err(|e| HistoryError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    Ok(parsed.format("%a, %b %-d, %Y").to_string())
}

pub fn card(record: &ActivityRecord) -> ActivityCard {
    let date_label = match format_activity_date(&record.date_time) {
        Ok(label) => label,
        Err(e) => {
            tracing::warn!(activity_id = %record.id, error = %e, "showing raw activity timestamp");
            record.date_time.clone()
        }
    };

    ActivityCard {
        id: record.id,
        status: record.status,
        status_label: record.status.as_str().to_string(),
        status_color: record.status.color().to_string(),
        date_label,
        pick_location: record.pick_location.clone(),
        drop_location: record.drop_location.clone(),
        rider_name: record.rider_name.clone(),
        vehicle_name: record.vehicle_name.clone(),
    }
}

pub fn cards(records: &[ActivityRecord], status: ActivityStatus) -> Vec<ActivityCard> {
    partition(records, status).into_iter().map(card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::collections::HashSet;

    #[test]
    fn partitions_only_hold_their_status() {
        let catalog = Catalog::builtin();
        for status in ActivityStatus::ALL {
            let records = partition(&catalog.activities, status);
            assert!(!records.is_empty(), "{status} partition should not be empty");
            assert!(records.iter().all(|r| r.status == status));
        }
    }

    #[test]
    fn partitions_are_disjoint_and_cover_catalog() {
        let catalog = Catalog::builtin();
        let mut seen = HashSet::new();
        let mut total = 0;

        for status in ActivityStatus::ALL {
            for record in partition(&catalog.activities, status) {
                assert!(seen.insert(record.id), "{} appears twice", record.id);
                total += 1;
            }
        }

        assert_eq!(total, catalog.activities.len());
    }

    #[test]
    fn partition_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<u32> = partition(&catalog.activities, ActivityStatus::Completed)
            .iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, vec![2, 4, 7, 9]);
    }

    #[test]
    fn formats_short_weekday_month_day_year() {
        assert_eq!(
            format_activity_date("2024-10-18T08:10:00").unwrap(),
            "Fri, Oct 18, 2024"
        );
        assert_eq!(
            format_activity_date("2024-11-02T09:30:00").unwrap(),
            "Sat, Nov 2, 2024"
        );
    }

    #[test]
    fn bad_timestamp_is_an_error_and_card_falls_back() {
        assert!(matches!(
            format_activity_date("yesterday"),
            Err(HistoryError::InvalidTimestamp { .. })
        ));

        let record = ActivityRecord {
            id: ActivityId(99),
            status: ActivityStatus::Cancelled,
            date_time: "yesterday".into(),
            pick_location: "A".into(),
            drop_location: "B".into(),
            rider_name: "R".into(),
            vehicle_name: "V".into(),
        };
        let view = card(&record);
        assert_eq!(view.date_label, "yesterday");
        assert_eq!(view.status_color, "red");
    }
}
