//! Track record → CoT event conversion
//!
//! Pure and total: no record field causes failure, missing optionals take
//! their documented defaults upstream in `TrackRecord` deserialization.

use chrono::{DateTime, Duration, Utc};
use contracts::TrackRecord;

use crate::event::{
    CotDetail, CotEvent, CotPoint, HOW_MACHINE_GPS, STALE_OFFSET_SECS, TRACK_EVENT_TYPE,
    UNKNOWN_ACCURACY,
};

/// Convert one raw track record into a timed event.
///
/// The identity is derived as `adsb-{hex}`, the validity window starts at
/// `now` and ends exactly [`STALE_OFFSET_SECS`] later.
pub fn encode_track(record: &TrackRecord, now: DateTime<Utc>) -> CotEvent {
    CotEvent {
        uid: format!("adsb-{}", record.hex),
        event_type: TRACK_EVENT_TYPE.to_string(),
        how: HOW_MACHINE_GPS.to_string(),
        time: now,
        start: now,
        stale: now + Duration::seconds(STALE_OFFSET_SECS),
        point: CotPoint {
            lat: record.lat,
            lon: record.lon,
            hae: record.alt_baro,
            ce: UNKNOWN_ACCURACY,
            le: UNKNOWN_ACCURACY,
        },
        detail: CotDetail {
            callsign: record.flight.clone(),
            speed: record.vel,
            course: record.track,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(hex: &str) -> TrackRecord {
        TrackRecord {
            hex: hex.to_string(),
            lat: 40.0,
            lon: -73.0,
            alt_baro: 1000.0,
            track: 90.0,
            vel: 200.0,
            flight: "UAL1".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_identity_prefix() {
        let event = encode_track(&record("abc123"), now());
        assert_eq!(event.uid, "adsb-abc123");
        assert!(!event.uid.is_empty());
    }

    #[test]
    fn test_validity_window_is_exactly_sixty_seconds() {
        let event = encode_track(&record("abc123"), now());
        assert_eq!(event.start, event.time);
        assert_eq!(event.stale - event.start, Duration::seconds(60));
        assert!(event.stale > event.start);
    }

    #[test]
    fn test_position_and_motion_carried_over() {
        let event = encode_track(&record("abc123"), now());
        assert_eq!(event.point.lat, 40.0);
        assert_eq!(event.point.lon, -73.0);
        assert_eq!(event.point.hae, 1000.0);
        assert_eq!(event.detail.speed, 200.0);
        assert_eq!(event.detail.course, 90.0);
        assert_eq!(event.detail.callsign, "UAL1");
    }

    #[test]
    fn test_defaults_for_missing_optionals() {
        let bare = TrackRecord {
            hex: "def456".to_string(),
            lat: 1.0,
            lon: 2.0,
            alt_baro: 0.0,
            track: 0.0,
            vel: 0.0,
            flight: String::new(),
        };
        let event = encode_track(&bare, now());
        assert_eq!(event.point.hae, 0.0);
        assert_eq!(event.detail.speed, 0.0);
        assert_eq!(event.detail.course, 0.0);
        assert_eq!(event.detail.callsign, "");
    }

    #[test]
    fn test_accuracy_sentinels() {
        let event = encode_track(&record("abc123"), now());
        assert_eq!(event.point.ce, UNKNOWN_ACCURACY);
        assert_eq!(event.point.le, UNKNOWN_ACCURACY);
    }
}
