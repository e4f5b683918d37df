//! NMEA-0183 sentence decoding.
use thiserror::Error;

mod correlator;
pub use correlator::FixCorrelator;

/// Minimum field count (address included) for an RMC sentence.
const RMC_MIN_FIELDS: usize = 12;

/// Minimum field count (address included) for a GGA sentence.
const GGA_MIN_FIELDS: usize = 14;

/// Minimum field count (address included) for a GSV sentence.
const GSV_MIN_FIELDS: usize = 4;

/// Structural decoding error. Anything listed here means the line is
/// dropped; per-field numeric garbage is decoded permissively instead
/// (see [decode]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("sentence does not start with '$'")]
    MissingStart,

    #[error("missing '*' checksum delimiter")]
    MissingChecksum,

    #[error("checksum is not two hex digits")]
    ChecksumFormat,

    #[error("checksum mismatch (expected {expected:02X}, computed {computed:02X})")]
    ChecksumMismatch { expected: u8, computed: u8 },

    #[error("truncated {0} sentence")]
    Truncated(&'static str),

    #[error("unknown or unsupported sentence type")]
    UnknownSentence,
}

/// Position / velocity record (RMC). Coordinates are kept in the raw
/// DDMM.MMMM encoding until [FixCorrelator] merges them.
#[derive(Debug, Clone, PartialEq)]
pub struct RmcData {
    /// Milliseconds since UTC midnight
    pub timestamp_ms: u64,
    /// Receiver status ("A" = active)
    pub valid: bool,
    /// Raw latitude (DDMM.MMMM)
    pub latitude: f64,
    pub lat_hemisphere: char,
    /// Raw longitude (DDDMM.MMMM)
    pub longitude: f64,
    pub lon_hemisphere: char,
    /// Ground speed [knots]
    pub speed_knots: f64,
    /// Course over ground [°]
    pub course_deg: f64,
    /// DDMMYY date field, kept verbatim
    pub date: String,
}

impl Default for RmcData {
    fn default() -> Self {
        Self {
            timestamp_ms: 0,
            valid: false,
            latitude: 0.0,
            lat_hemisphere: 'N',
            longitude: 0.0,
            lon_hemisphere: 'E',
            speed_knots: 0.0,
            course_deg: 0.0,
            date: String::new(),
        }
    }
}

/// Position / quality record (GGA).
#[derive(Debug, Clone, PartialEq)]
pub struct GgaData {
    /// Milliseconds since UTC midnight
    pub timestamp_ms: u64,
    /// Raw latitude (DDMM.MMMM)
    pub latitude: f64,
    pub lat_hemisphere: char,
    /// Raw longitude (DDDMM.MMMM)
    pub longitude: f64,
    pub lon_hemisphere: char,
    /// Fix quality indicator (0 = no fix)
    pub quality: u32,
    /// Satellites used in the solution
    pub satellites: u32,
    /// Horizontal dilution of precision
    pub hdop: f64,
    /// Antenna altitude above mean sea level [m]
    pub altitude_m: f64,
}

impl Default for GgaData {
    fn default() -> Self {
        Self {
            timestamp_ms: 0,
            latitude: 0.0,
            lat_hemisphere: 'N',
            longitude: 0.0,
            lon_hemisphere: 'E',
            quality: 0,
            satellites: 0,
            hdop: 0.0,
            altitude_m: 0.0,
        }
    }
}

/// Satellites-in-view record (GSV). Retained for inspection only,
/// never merged into a fix.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GsvData {
    pub total_messages: u32,
    pub message_number: u32,
    pub satellites_in_view: u32,
    /// Per satellite: (PRN, elevation [°], azimuth [°], SNR [dB])
    pub satellites: Vec<(u32, u32, u32, u32)>,
}

/// One successfully decoded sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Sentence {
    Rmc(RmcData),
    Gga(GgaData),
    Gsv(GsvData),
}

/// Converts a DDDMM.MMMM (or DMM.MMMM) encoded coordinate to signed
/// decimal degrees. Southern and western hemispheres negate.
pub fn ddmm_to_degrees(value: f64, hemisphere: char) -> f64 {
    let degrees = (value / 100.0).floor();
    let minutes = value - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;
    match hemisphere {
        'S' | 'W' => -decimal,
        _ => decimal,
    }
}

/// Knots to km/h.
pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * 1.852
}

/// Converts an "HHMMSS" or "HHMMSS.sss" UTC time field to milliseconds
/// since midnight. Malformed input decodes to 0 (permissive rule).
pub fn time_to_ms(field: &str) -> u64 {
    if field.len() < 6 || !field.is_ascii() {
        return 0;
    }

    let hours: u64 = field[0..2].parse().unwrap_or(0);
    let minutes: u64 = field[2..4].parse().unwrap_or(0);
    let seconds: u64 = field[4..6].parse().unwrap_or(0);

    let mut millis = 0u64;
    if let Some(dot) = field.find('.') {
        let frac = &field[dot + 1..];
        if !frac.is_empty() {
            // scale whatever precision was transmitted to milliseconds
            let digits: String = frac.chars().take(3).collect();
            let value: u64 = digits.parse().unwrap_or(0);
            millis = value * 10u64.pow(3 - digits.len() as u32);
        }
    }

    (hours * 3600 + minutes * 60 + seconds) * 1000 + millis
}

/// Permissive numeric field decoding: garbage reads as 0.
fn field_f64(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}

fn field_u32(field: &str) -> u32 {
    field.parse().unwrap_or(0)
}

/// Verifies the `$...*XX` envelope and returns the payload between
/// `$` and `*` on success.
fn checksum_verified(line: &str) -> Result<&str, ParseError> {
    let rem = line.strip_prefix('$').ok_or(ParseError::MissingStart)?;

    let star = rem.find('*').ok_or(ParseError::MissingChecksum)?;
    let payload = &rem[..star];
    let trailer = &rem[star + 1..];

    let digits = trailer.get(..2).ok_or(ParseError::ChecksumFormat)?;
    let expected = u8::from_str_radix(digits, 16).map_err(|_| ParseError::ChecksumFormat)?;

    let computed = payload.bytes().fold(0u8, |acc, b| acc ^ b);

    if computed != expected {
        return Err(ParseError::ChecksumMismatch { expected, computed });
    }

    Ok(payload)
}

fn decode_rmc(fields: &[&str]) -> Result<RmcData, ParseError> {
    if fields.len() < RMC_MIN_FIELDS {
        return Err(ParseError::Truncated("RMC"));
    }

    let mut data = RmcData::default();
    data.timestamp_ms = time_to_ms(fields[1]);
    data.valid = fields[2] == "A";

    if !fields[3].is_empty() && !fields[4].is_empty() {
        data.latitude = field_f64(fields[3]);
        data.lat_hemisphere = fields[4].chars().next().unwrap_or('N');
    }

    if !fields[5].is_empty() && !fields[6].is_empty() {
        data.longitude = field_f64(fields[5]);
        data.lon_hemisphere = fields[6].chars().next().unwrap_or('E');
    }

    data.speed_knots = field_f64(fields[7]);
    data.course_deg = field_f64(fields[8]);

    if !fields[9].is_empty() {
        data.date = fields[9].to_string();
    }

    Ok(data)
}

fn decode_gga(fields: &[&str]) -> Result<GgaData, ParseError> {
    if fields.len() < GGA_MIN_FIELDS {
        return Err(ParseError::Truncated("GGA"));
    }

    let mut data = GgaData::default();
    data.timestamp_ms = time_to_ms(fields[1]);

    if !fields[2].is_empty() && !fields[3].is_empty() {
        data.latitude = field_f64(fields[2]);
        data.lat_hemisphere = fields[3].chars().next().unwrap_or('N');
    }

    if !fields[4].is_empty() && !fields[5].is_empty() {
        data.longitude = field_f64(fields[4]);
        data.lon_hemisphere = fields[5].chars().next().unwrap_or('E');
    }

    data.quality = field_u32(fields[6]);
    data.satellites = field_u32(fields[7]);
    data.hdop = field_f64(fields[8]);
    data.altitude_m = field_f64(fields[9]);

    Ok(data)
}

fn decode_gsv(fields: &[&str]) -> Result<GsvData, ParseError> {
    if fields.len() < GSV_MIN_FIELDS {
        return Err(ParseError::Truncated("GSV"));
    }

    let mut data = GsvData::default();
    data.total_messages = field_u32(fields[1]);
    data.message_number = field_u32(fields[2]);
    data.satellites_in_view = field_u32(fields[3]);

    let mut i = 4;
    while i + 3 < fields.len() {
        if !fields[i].is_empty() {
            data.satellites.push((
                field_u32(fields[i]),
                field_u32(fields[i + 1]),
                field_u32(fields[i + 2]),
                field_u32(fields[i + 3]),
            ));
        }
        i += 4;
    }

    Ok(data)
}

/// Decodes one raw NMEA line into a typed [Sentence].
///
/// Only structural problems are hard failures: bad envelope, failed
/// checksum, unknown type, too few fields for the type. Individual
/// numeric fields that fail to parse decode as 0 instead, matching
/// what embedded receivers actually emit (empty fields on dropout).
pub fn decode(line: &str) -> Result<Sentence, ParseError> {
    let payload = checksum_verified(line)?;

    let fields: Vec<&str> = payload.split(',').collect();

    let address = fields[0];
    if address.len() < 6 || !address.is_ascii() {
        return Err(ParseError::UnknownSentence);
    }

    match &address[3..6] {
        "RMC" => Ok(Sentence::Rmc(decode_rmc(&fields)?)),
        "GGA" => Ok(Sentence::Gga(decode_gga(&fields)?)),
        "GSV" => Ok(Sentence::Gsv(decode_gsv(&fields)?)),
        _ => Err(ParseError::UnknownSentence),
    }
}
