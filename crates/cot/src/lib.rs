//! # CoT
//!
//! Pure Cursor-on-Target encoding: `TrackRecord` → timed event, deterministic
//! XML rendering, and a parser for line validation and round-trips.
//!
//! No async, no I/O, just the wire format. This crate is the shared core
//! used by both source variants and by the test suites.

mod encoder;
mod event;
mod parser;

pub use encoder::encode_track;
pub use event::{
    CotDetail, CotEvent, CotPoint, COT_VERSION, HOW_MACHINE_GPS, STALE_OFFSET_SECS,
    TRACK_EVENT_TYPE, UNKNOWN_ACCURACY,
};
pub use parser::{parse_cot, CotParseError};
