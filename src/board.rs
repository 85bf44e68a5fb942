//! Display-ready arrival records: destination and detail resolution,
//! countdown formatting, ordering, and the board size cap.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decode::RawArrival;
use crate::routes;

/// Most arrivals the board shows at once.
pub const MAX_ARRIVALS: usize = 4;

/// A reported delay beyond this many seconds marks the arrival delayed.
const DELAY_THRESHOLD_SECS: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrivalStatus {
    OnTime,
    Delayed,
}

impl fmt::Display for ArrivalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalStatus::OnTime => write!(f, "On Time"),
            ArrivalStatus::Delayed => write!(f, "Delayed"),
        }
    }
}

/// One row of the board, immutable once produced, valid for one refresh cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Arrival {
    pub route_id: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub arrival_time: DateTime<Utc>,
    pub status: ArrivalStatus,
}

impl Arrival {
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        format_time_remaining(now, self.arrival_time)
    }
}

/// Headsign wins when the feed supplies one; otherwise the static per-route
/// terminal, otherwise "Unknown".
pub fn resolve_destination(headsign: Option<&str>, route_id: &str) -> String {
    if let Some(sign) = headsign {
        let sign = sign.trim();
        if !sign.is_empty() {
            let stripped = sign
                .strip_prefix("To ")
                .or_else(|| sign.strip_prefix("TO "))
                .unwrap_or(sign);
            return stripped.to_string();
        }
    }
    routes::fallback_destination(route_id)
        .unwrap_or("Unknown")
        .to_string()
}

/// "Now" for anything due or overdue, seconds under a minute, whole minutes
/// after that.
pub fn format_time_remaining(now: DateTime<Utc>, arrival: DateTime<Utc>) -> String {
    let secs = (arrival - now).num_seconds();
    if secs <= 0 {
        "Now".to_string()
    } else if secs < 60 {
        format!("{secs}s")
    } else {
        format!("{}m", secs / 60)
    }
}

/// Turns filtered raw entries into the final board: resolve names, derive
/// status, sort ascending by arrival time, cap at [`MAX_ARRIVALS`].
pub fn normalize(mut raw: Vec<RawArrival>) -> Vec<Arrival> {
    raw.sort_by_key(|entry| entry.arrival);
    raw.truncate(MAX_ARRIVALS);
    raw.into_iter()
        .map(|entry| Arrival {
            destination: resolve_destination(entry.headsign.as_deref(), &entry.route_id),
            detail: routes::route_detail(&entry.route_id).map(str::to_string),
            arrival_time: entry.arrival,
            status: if entry.delay.unwrap_or(0) > DELAY_THRESHOLD_SECS {
                ArrivalStatus::Delayed
            } else {
                ArrivalStatus::OnTime
            },
            route_id: entry.route_id,
        })
        .collect()
}
