//! Nearest-station fine dust readings for Korea.
//!
//! Pipeline: geographic coordinate → Kakao TM transcoding → AirKorea
//! nearest monitoring station → latest realtime measurements → report.

pub mod air;
pub mod config;
pub mod location;
pub mod report;
pub mod server;
