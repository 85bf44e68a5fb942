//! Station lookup and the station/time-window filter.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::decode::RawArrival;

/// Arrivals further out than this are dropped as too far future to display.
const ARRIVAL_WINDOW_MIN: i64 = 30;

/// Which routes serve which station code. Keys are exact GTFS parent-station
/// codes; matching is never done by substring, so a stop like "R30N" can only
/// ever resolve to station "R30".
pub struct StationRouteMap {
    entries: HashMap<String, HashSet<String>>,
}

impl StationRouteMap {
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(station, routes)| {
                    (
                        station.to_string(),
                        routes.iter().map(|r| r.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// The NYCT stations this kiosk knows out of the box: both Atlantic
    /// Av-Barclays Ctr platforms plus the Times Sq complex.
    pub fn nyct() -> Self {
        Self::from_entries(&[
            ("A42", &["2", "3", "4", "5"]),
            ("R30", &["B", "D", "N", "Q", "R"]),
            ("127", &["1", "2", "3"]),
            ("725", &["7"]),
            ("902", &["S"]),
            ("R16", &["N", "Q", "R", "W"]),
        ])
    }

    pub fn serves(&self, station: &str, route: &str) -> bool {
        self.entries
            .get(station)
            .is_some_and(|routes| routes.contains(route))
    }
}

/// Strips the NYCT direction suffix from a platform stop id ("A42N" -> "A42").
pub fn station_of(stop_id: &str) -> &str {
    stop_id.strip_suffix(['N', 'S']).unwrap_or(stop_id)
}

/// Keeps entries at a configured station, on a route that station serves,
/// arriving within (now, now + 30 min).
pub fn filter_arrivals(
    raw: Vec<RawArrival>,
    stations: &[String],
    map: &StationRouteMap,
    now: DateTime<Utc>,
) -> Vec<RawArrival> {
    let cutoff = now + Duration::minutes(ARRIVAL_WINDOW_MIN);
    raw.into_iter()
        .filter(|entry| {
            let station = station_of(&entry.stop_id);
            stations.iter().any(|s| s == station)
                && map.serves(station, &entry.route_id)
                && entry.arrival > now
                && entry.arrival < cutoff
        })
        .collect()
}
