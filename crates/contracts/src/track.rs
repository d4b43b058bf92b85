//! TrackRecord - one raw telemetry observation
//!
//! Matches the aircraft.json dialect served by ADS-B aggregator APIs: a
//! top-level `aircraft` array whose entries carry `hex`, `lat`, `lon` and a
//! handful of optional motion fields. Records are decoded one entry at a
//! time so a malformed entry never poisons the rest of a fetch.

use serde::{Deserialize, Deserializer, Serialize};

/// One raw aircraft position observation, prior to event conversion.
///
/// Ephemeral: constructed per fetch cycle and discarded after encoding.
/// Missing optional fields take their documented defaults (altitude 0,
/// course 0, speed 0, callsign empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// ICAO hex / tail identity token
    pub hex: String,

    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Barometric altitude in feet. The upstream API reports the string
    /// `"ground"` for grounded aircraft; both that and absence normalize to 0.
    #[serde(default, deserialize_with = "de_alt_baro")]
    pub alt_baro: f64,

    /// Ground course in degrees
    #[serde(default)]
    pub track: f64,

    /// Ground speed in knots
    #[serde(default)]
    pub vel: f64,

    /// Callsign; the upstream API pads these with trailing spaces
    #[serde(default, deserialize_with = "de_callsign")]
    pub flight: String,
}

fn de_alt_baro<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AltBaro {
        Feet(f64),
        Label(String),
    }

    Ok(match Option::<AltBaro>::deserialize(deserializer)? {
        Some(AltBaro::Feet(feet)) => feet,
        // "ground" (or any other non-numeric label) means on the surface
        Some(AltBaro::Label(_)) | None => 0.0,
    })
}

fn de_callsign<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()).unwrap_or_default())
}
