//! Kiosk configuration: feed endpoints and environment-driven settings.

use std::time::Duration;

/// Where the MTA publishes the NYCT GTFS-RT feeds.
pub const DEFAULT_FEED_BASE: &str =
    "https://api-endpoint.mta.info/Dataservice/mtagtfsrealtime/nyct%2Fgtfs";

/// Line groups and their endpoint suffixes, one realtime feed per group.
const FEED_GROUPS: [(&str, &str); 8] = [
    ("123456", "-123456"),
    ("ACE", "-ace"),
    ("BDFM", "-bdfm"),
    ("G", "-g"),
    ("JZ", "-jz"),
    ("L", "-l"),
    ("NQRW", "-nqrw"),
    ("SIR", "-sir"),
];

/// One line group's feed endpoint, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub group: &'static str,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub api_key: Option<String>,
    pub station_ids: Vec<String>,
    pub station_name: String,
    pub refresh_interval: Duration,
    pub feed_base: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            station_ids: vec!["A42".to_string(), "R30".to_string()],
            station_name: "Atlantic Av-Barclays Ctr".to_string(),
            refresh_interval: Duration::from_secs(30),
            feed_base: DEFAULT_FEED_BASE.to_string(),
        }
    }
}

impl BoardConfig {
    /// Reads configuration from the environment, falling back to the Atlantic
    /// Av-Barclays Ctr defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = std::env::var("MTA_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let station_ids = std::env::var("STATION_IDS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|ids| !ids.is_empty())
            .unwrap_or(defaults.station_ids);

        let station_name = std::env::var("STATION_NAME").unwrap_or(defaults.station_name);

        let refresh_interval = std::env::var("REFRESH_INTERVAL")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);

        let feed_base = std::env::var("MTA_FEED_BASE").unwrap_or(defaults.feed_base);

        Self {
            api_key,
            station_ids,
            station_name,
            refresh_interval,
            feed_base,
        }
    }

    /// One [`FeedSource`] per NYCT line group, against the configured base.
    pub fn feed_sources(&self) -> Vec<FeedSource> {
        FEED_GROUPS
            .iter()
            .map(|&(group, suffix)| FeedSource {
                group,
                url: format!("{}{}", self.feed_base, suffix),
            })
            .collect()
    }
}
