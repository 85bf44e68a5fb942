//! Protobuf decoding of GTFS-Realtime trip updates into raw arrival records.

use chrono::{DateTime, Utc};
use prost::Message;
use tracing::{debug, warn};

use crate::gtfs_rt::{FeedMessage, trip_descriptor, trip_update::stop_time_update};

/// Payloads below this size are an error page, not feed data. The real NYCT
/// feeds run hundreds of kilobytes even at night.
pub const MIN_FEED_BYTES: usize = 1000;

/// One stop-time prediction pulled out of a trip update.
#[derive(Debug, Clone)]
pub struct RawArrival {
    pub route_id: String,
    pub stop_id: String,
    pub headsign: Option<String>,
    pub arrival: DateTime<Utc>,
    pub delay: Option<i32>,
}

/// Decodes one feed's payload. Never errors: an implausibly small or
/// malformed payload logs a warning and yields no arrivals, so a bad feed
/// costs the board nothing but its own entries.
pub fn decode_arrivals(group: &str, bytes: &[u8]) -> Vec<RawArrival> {
    if bytes.len() < MIN_FEED_BYTES {
        warn!(
            group,
            bytes = bytes.len(),
            "payload too small to be feed data, skipping"
        );
        return Vec::new();
    }

    let feed = match FeedMessage::decode(bytes) {
        Ok(feed) => feed,
        Err(e) => {
            warn!(group, error = %e, "feed failed to decode, skipping");
            return Vec::new();
        }
    };

    let mut arrivals = Vec::new();

    for entity in &feed.entity {
        let Some(update) = &entity.trip_update else {
            continue;
        };

        let trip = &update.trip;
        if trip.schedule_relationship() == trip_descriptor::ScheduleRelationship::Canceled {
            continue;
        }
        let Some(route_id) = &trip.route_id else {
            continue;
        };

        let headsign = update
            .trip_properties
            .as_ref()
            .and_then(|p| p.trip_headsign.clone());

        for stu in &update.stop_time_update {
            use stop_time_update::ScheduleRelationship as Rel;
            match stu.schedule_relationship() {
                Rel::Skipped | Rel::NoData => continue,
                Rel::Scheduled => {}
            }

            let Some(stop_id) = &stu.stop_id else {
                continue;
            };
            let Some(time) = stu.arrival.as_ref().and_then(|ev| ev.time) else {
                continue;
            };
            let Some(arrival) = DateTime::from_timestamp(time, 0) else {
                continue;
            };

            arrivals.push(RawArrival {
                route_id: route_id.clone(),
                stop_id: stop_id.clone(),
                headsign: headsign.clone(),
                arrival,
                delay: update.delay,
            });
        }
    }

    debug!(group, count = arrivals.len(), "decoded arrivals");
    arrivals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs_rt::{
        FeedEntity, FeedHeader, FeedMessage, TripDescriptor, TripUpdate,
        trip_update::{StopTimeEvent, StopTimeUpdate, TripProperties},
    };

    // Padded so encoded output clears the plausibility threshold.
    fn header() -> FeedHeader {
        FeedHeader {
            gtfs_realtime_version: "2.0".to_string(),
            incrementality: None,
            timestamp: Some(1_700_000_000),
            feed_version: Some("x".repeat(2000)),
        }
    }

    fn stop_update(stop_id: &str, time: i64) -> StopTimeUpdate {
        StopTimeUpdate {
            stop_sequence: None,
            arrival: Some(StopTimeEvent {
                delay: None,
                time: Some(time),
                uncertainty: None,
            }),
            departure: None,
            stop_id: Some(stop_id.to_string()),
            schedule_relationship: None,
        }
    }

    fn trip_entity(id: &str, route_id: &str, updates: Vec<StopTimeUpdate>) -> FeedEntity {
        FeedEntity {
            id: id.to_string(),
            is_deleted: None,
            trip_update: Some(TripUpdate {
                trip: TripDescriptor {
                    trip_id: Some(format!("trip-{id}")),
                    start_time: None,
                    start_date: None,
                    schedule_relationship: None,
                    route_id: Some(route_id.to_string()),
                    direction_id: None,
                },
                stop_time_update: updates,
                timestamp: None,
                delay: None,
                trip_properties: None,
            }),
        }
    }

    #[test]
    fn undersized_payload_yields_nothing() {
        let bytes = vec![0u8; MIN_FEED_BYTES - 1];
        assert!(decode_arrivals("ACE", &bytes).is_empty());
    }

    #[test]
    fn garbage_payload_yields_nothing() {
        let bytes = vec![0xFF; 2000];
        assert!(decode_arrivals("ACE", &bytes).is_empty());
    }

    #[test]
    fn extracts_route_stop_and_arrival_time() {
        let feed = FeedMessage {
            header: header(),
            entity: vec![trip_entity(
                "1",
                "A",
                vec![stop_update("A42N", 1_700_000_120), stop_update("A42S", 1_700_000_300)],
            )],
        };

        let arrivals = decode_arrivals("ACE", &feed.encode_to_vec());
        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].route_id, "A");
        assert_eq!(arrivals[0].stop_id, "A42N");
        assert_eq!(arrivals[0].arrival.timestamp(), 1_700_000_120);
    }

    #[test]
    fn carries_headsign_from_trip_properties() {
        let mut entity = trip_entity("1", "A", vec![stop_update("A42N", 1_700_000_120)]);
        if let Some(update) = entity.trip_update.as_mut() {
            update.trip_properties = Some(TripProperties {
                trip_id: None,
                start_date: None,
                start_time: None,
                shape_id: None,
                trip_headsign: Some("To Far Rockaway".to_string()),
                trip_short_name: None,
            });
        }
        let feed = FeedMessage {
            header: header(),
            entity: vec![entity],
        };

        let arrivals = decode_arrivals("ACE", &feed.encode_to_vec());
        assert_eq!(arrivals[0].headsign.as_deref(), Some("To Far Rockaway"));
    }

    #[test]
    fn canceled_trip_is_dropped() {
        use crate::gtfs_rt::trip_descriptor::ScheduleRelationship;

        let mut entity = trip_entity("1", "A", vec![stop_update("A42N", 1_700_000_120)]);
        if let Some(update) = entity.trip_update.as_mut() {
            update.trip.schedule_relationship = Some(ScheduleRelationship::Canceled as i32);
        }
        let feed = FeedMessage {
            header: header(),
            entity: vec![entity],
        };

        assert!(decode_arrivals("ACE", &feed.encode_to_vec()).is_empty());
    }

    #[test]
    fn skipped_stop_update_is_dropped() {
        use stop_time_update::ScheduleRelationship;

        let mut skipped = stop_update("A42N", 1_700_000_120);
        skipped.schedule_relationship = Some(ScheduleRelationship::Skipped as i32);
        let feed = FeedMessage {
            header: header(),
            entity: vec![trip_entity(
                "1",
                "A",
                vec![skipped, stop_update("A42S", 1_700_000_300)],
            )],
        };

        let arrivals = decode_arrivals("ACE", &feed.encode_to_vec());
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].stop_id, "A42S");
    }

    #[test]
    fn stop_update_without_arrival_time_is_dropped() {
        let mut no_arrival = stop_update("A42N", 0);
        no_arrival.arrival = None;
        let feed = FeedMessage {
            header: header(),
            entity: vec![trip_entity("1", "A", vec![no_arrival])],
        };

        assert!(decode_arrivals("ACE", &feed.encode_to_vec()).is_empty());
    }
}
