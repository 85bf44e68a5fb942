//! One refresh cycle: fetch every feed, decode, filter, normalize.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, error, info};

use crate::board::{self, Arrival};
use crate::config::BoardConfig;
use crate::decode;
use crate::fetch::{self, HttpClient};
use crate::stations::{self, StationRouteMap};

/// Runs one refresh. Feeds are fetched sequentially, each bounded by the
/// fetch timeout; a failing feed is logged and skipped, never fatal. Total
/// failure is an empty board, and the caller decides how to show that.
pub async fn refresh_board<C: HttpClient>(
    client: &C,
    config: &BoardConfig,
    map: &StationRouteMap,
) -> Vec<Arrival> {
    let mut raw = Vec::new();

    for source in config.feed_sources() {
        match fetch::fetch_bytes(client, &source.url).await {
            Ok(bytes) => {
                debug!(group = source.group, bytes = bytes.len(), "feed fetched");
                raw.extend(decode::decode_arrivals(source.group, &bytes));
            }
            Err(e) => {
                error!(group = source.group, error = %e, "feed fetch failed, skipping");
            }
        }
    }

    let now = Utc::now();
    let filtered = stations::filter_arrivals(raw, &config.station_ids, map, now);
    let arrivals = board::normalize(filtered);

    info!(count = arrivals.len(), "refresh complete");
    arrivals
}

/// The previous cycle's board, shown until the next refresh is due. Only
/// [`store`](Self::store) mutates it; everything else reads.
#[derive(Debug, Default)]
pub struct BoardCache {
    last_refresh: Option<Instant>,
    arrivals: Vec<Arrival>,
}

impl BoardCache {
    pub fn is_due(&self, interval: Duration) -> bool {
        self.last_refresh
            .is_none_or(|last| last.elapsed() >= interval)
    }

    pub fn store(&mut self, arrivals: Vec<Arrival>) {
        self.last_refresh = Some(Instant::now());
        self.arrivals = arrivals;
    }

    pub fn arrivals(&self) -> &[Arrival] {
        &self.arrivals
    }
}
