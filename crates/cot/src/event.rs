//! CotEvent - one timed, positioned observation with a validity window
//!
//! The rendered form is a format contract other systems parse, not a display
//! string: single-line XML, fixed attribute order, ISO-8601 UTC instants.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// CoT schema version tag
pub const COT_VERSION: &str = "2.0";

/// Event type tag for an ADS-B derived air track
pub const TRACK_EVENT_TYPE: &str = "a-n-A-C-F";

/// How tag: machine-generated, GPS-derived
pub const HOW_MACHINE_GPS: &str = "m-g";

/// Validity window length: stale = start + this many seconds
pub const STALE_OFFSET_SECS: i64 = 60;

/// Sentinel circular/linear error radius signifying "unknown accuracy"
pub const UNKNOWN_ACCURACY: f64 = 9_999_999.0;

/// One situational-awareness event.
///
/// Invariants: `stale` is strictly after `start`, `start == time`, and `uid`
/// is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CotEvent {
    /// Event identity, `adsb-{hex}` for generated events
    pub uid: String,

    /// Event kind tag
    pub event_type: String,

    /// Generation method tag
    pub how: String,

    /// Generation instant
    pub time: DateTime<Utc>,

    /// Validity window start (== generation instant)
    pub start: DateTime<Utc>,

    /// Validity window end
    pub stale: DateTime<Utc>,

    /// Position block
    pub point: CotPoint,

    /// Contact and motion block
    pub detail: CotDetail,
}

/// Position with companion error radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CotPoint {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Height above ellipsoid (altitude)
    pub hae: f64,

    /// Circular error radius
    pub ce: f64,

    /// Linear error radius
    pub le: f64,
}

/// Contact and motion sub-record
#[derive(Debug, Clone, PartialEq)]
pub struct CotDetail {
    /// Callsign, empty when unreported
    pub callsign: String,

    /// Ground speed
    pub speed: f64,

    /// Ground course in degrees
    pub course: f64,
}

impl CotEvent {
    /// Render the deterministic single-line wire format
    pub fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<event version="{}" uid="{}" type="{}" how="{}" time="{}" start="{}" stale="{}">"#,
            COT_VERSION,
            Escaped(&self.uid),
            Escaped(&self.event_type),
            Escaped(&self.how),
            format_instant(&self.time),
            format_instant(&self.start),
            format_instant(&self.stale),
        )?;
        write!(
            f,
            r#"<point lat="{}" lon="{}" hae="{}" ce="{}" le="{}"/>"#,
            self.point.lat, self.point.lon, self.point.hae, self.point.ce, self.point.le,
        )?;
        write!(
            f,
            r#"<detail><contact callsign="{}"/><track speed="{}" course="{}"/></detail>"#,
            Escaped(&self.detail.callsign),
            self.detail.speed,
            self.detail.course,
        )?;
        f.write_str("</event>")
    }
}

/// ISO-8601 UTC instant with millisecond precision
fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// XML attribute-value escaping for interpolated text fields
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                other => fmt::Write::write_char(f, other)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> CotEvent {
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        CotEvent {
            uid: "adsb-abc123".to_string(),
            event_type: TRACK_EVENT_TYPE.to_string(),
            how: HOW_MACHINE_GPS.to_string(),
            time,
            start: time,
            stale: time + chrono::Duration::seconds(STALE_OFFSET_SECS),
            point: CotPoint {
                lat: 40.0,
                lon: -73.0,
                hae: 1000.0,
                ce: UNKNOWN_ACCURACY,
                le: UNKNOWN_ACCURACY,
            },
            detail: CotDetail {
                callsign: "UAL1".to_string(),
                speed: 200.0,
                course: 90.0,
            },
        }
    }

    #[test]
    fn test_render_fixed_field_order() {
        let xml = sample_event().to_xml();
        assert_eq!(
            xml,
            r#"<event version="2.0" uid="adsb-abc123" type="a-n-A-C-F" how="m-g" time="2024-01-15T10:30:00.000Z" start="2024-01-15T10:30:00.000Z" stale="2024-01-15T10:31:00.000Z"><point lat="40" lon="-73" hae="1000" ce="9999999" le="9999999"/><detail><contact callsign="UAL1"/><track speed="200" course="90"/></detail></event>"#
        );
    }

    #[test]
    fn test_render_is_single_line() {
        let xml = sample_event().to_xml();
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn test_callsign_escaped() {
        let mut event = sample_event();
        event.detail.callsign = "A<B>&\"C\"".to_string();
        let xml = event.to_xml();
        assert!(xml.contains(r#"callsign="A&lt;B&gt;&amp;&quot;C&quot;""#));
    }
}
