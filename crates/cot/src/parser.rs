//! CoT event parser
//!
//! Recovers identity, time, position, and motion fields from rendered event
//! text. Used to validate pass-through stream lines and by round-trip tests.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;
use thiserror::Error;

use crate::event::{CotDetail, CotEvent, CotPoint, UNKNOWN_ACCURACY};

/// Parse failure for one event record
#[derive(Debug, Error)]
pub enum CotParseError {
    /// Not well-formed XML
    #[error("malformed event xml: {0}")]
    Xml(String),

    /// No `<event>` element present
    #[error("missing <event> element")]
    MissingEvent,

    /// No `<point>` element present
    #[error("missing <point> element")]
    MissingPoint,

    /// Required attribute absent
    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// Attribute is not a number
    #[error("invalid number in '{attribute}': {value}")]
    InvalidNumber { attribute: &'static str, value: String },

    /// Attribute is not an ISO-8601 instant
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
}

#[derive(Default)]
struct EventAttrs {
    uid: Option<String>,
    event_type: Option<String>,
    how: Option<String>,
    time: Option<DateTime<Utc>>,
    start: Option<DateTime<Utc>>,
    stale: Option<DateTime<Utc>>,
}

/// Parse one rendered event record.
pub fn parse_cot(xml: &str) -> Result<CotEvent, CotParseError> {
    let mut reader = Reader::from_str(xml);

    let mut event: Option<EventAttrs> = None;
    let mut point: Option<CotPoint> = None;
    let mut detail = CotDetail {
        callsign: String::new(),
        speed: 0.0,
        course: 0.0,
    };

    loop {
        match reader
            .read_event()
            .map_err(|e| CotParseError::Xml(e.to_string()))?
        {
            XmlEvent::Start(ref elem) | XmlEvent::Empty(ref elem) => {
                match elem.name().as_ref() {
                    b"event" => event = Some(read_event_attrs(elem)?),
                    b"point" => point = Some(read_point_attrs(elem)?),
                    b"contact" => {
                        if let Some(callsign) = read_attr(elem, b"callsign")? {
                            detail.callsign = callsign;
                        }
                    }
                    b"track" => {
                        if let Some(speed) = read_attr(elem, b"speed")? {
                            detail.speed = parse_f64("speed", &speed)?;
                        }
                        if let Some(course) = read_attr(elem, b"course")? {
                            detail.course = parse_f64("course", &course)?;
                        }
                    }
                    _ => {}
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    let attrs = event.ok_or(CotParseError::MissingEvent)?;
    let point = point.ok_or(CotParseError::MissingPoint)?;

    Ok(CotEvent {
        uid: attrs.uid.ok_or(missing("event", "uid"))?,
        event_type: attrs.event_type.ok_or(missing("event", "type"))?,
        how: attrs.how.unwrap_or_default(),
        time: attrs.time.ok_or(missing("event", "time"))?,
        start: attrs.start.ok_or(missing("event", "start"))?,
        stale: attrs.stale.ok_or(missing("event", "stale"))?,
        point,
        detail,
    })
}

fn missing(element: &'static str, attribute: &'static str) -> CotParseError {
    CotParseError::MissingAttribute { element, attribute }
}

fn read_event_attrs(elem: &BytesStart<'_>) -> Result<EventAttrs, CotParseError> {
    let mut attrs = EventAttrs::default();
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| CotParseError::Xml(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| CotParseError::Xml(e.to_string()))?
            .into_owned();
        match attr.key.as_ref() {
            b"uid" => attrs.uid = Some(value),
            b"type" => attrs.event_type = Some(value),
            b"how" => attrs.how = Some(value),
            b"time" => attrs.time = Some(parse_instant(&value)?),
            b"start" => attrs.start = Some(parse_instant(&value)?),
            b"stale" => attrs.stale = Some(parse_instant(&value)?),
            _ => {}
        }
    }
    Ok(attrs)
}

fn read_point_attrs(elem: &BytesStart<'_>) -> Result<CotPoint, CotParseError> {
    let mut lat = None;
    let mut lon = None;
    let mut hae = None;
    let mut ce = UNKNOWN_ACCURACY;
    let mut le = UNKNOWN_ACCURACY;
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| CotParseError::Xml(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| CotParseError::Xml(e.to_string()))?;
        match attr.key.as_ref() {
            b"lat" => lat = Some(parse_f64("lat", &value)?),
            b"lon" => lon = Some(parse_f64("lon", &value)?),
            b"hae" => hae = Some(parse_f64("hae", &value)?),
            b"ce" => ce = parse_f64("ce", &value)?,
            b"le" => le = parse_f64("le", &value)?,
            _ => {}
        }
    }
    Ok(CotPoint {
        lat: lat.ok_or(missing("point", "lat"))?,
        lon: lon.ok_or(missing("point", "lon"))?,
        hae: hae.ok_or(missing("point", "hae"))?,
        ce,
        le,
    })
}

fn read_attr(elem: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, CotParseError> {
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| CotParseError::Xml(e.to_string()))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| CotParseError::Xml(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn parse_f64(attribute: &'static str, value: &str) -> Result<f64, CotParseError> {
    value.parse().map_err(|_| CotParseError::InvalidNumber {
        attribute,
        value: value.to_string(),
    })
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, CotParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| CotParseError::InvalidTimestamp {
            value: value.to_string(),
        })
}
