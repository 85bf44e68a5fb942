pub mod board;
pub mod config;
pub mod decode;
pub mod fetch;
pub mod pipeline;
pub mod routes;
pub mod stations;

pub mod gtfs_rt {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}
