//! DTM timestamp codec
//!
//! HL7 v2 date/time values use the variable-precision format
//! `YYYY[MM[DD[HH[MM[SS[.S[S[S[S]]]]]]]]][+/-ZZZZ]`. Which reading applies
//! is decided purely by the trimmed length of the value. Two lengths are
//! genuinely ambiguous in the grammar: 17 characters can be a two-digit
//! fraction or minute precision with an offset, and 19 characters can be a
//! four-digit fraction or second precision with an offset. In both cases
//! the fractional reading is tried first and the offset reading only on its
//! failure.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

use crate::error::{Error, Result};

/// Parse a DTM value into a calendar timestamp with an offset.
///
/// Omitted trailing units default to their minimum (month and day to 1,
/// the rest to 0). When the value carries no explicit offset,
/// `assume_local` binds it to the local zone instead of UTC; with an
/// explicit offset the flag is ignored.
pub fn parse_timestamp(value: &str, assume_local: bool) -> Result<DateTime<FixedOffset>> {
    let ts = value.trim();
    // DTM values are ASCII; the guard also keeps the byte-offset slicing
    // below on character boundaries.
    if ts.is_empty() || !ts.is_ascii() {
        return Err(Error::InvalidTimestamp(value.to_string()));
    }

    match ts.len() {
        4 => parse_parts(value, ts, 4, 0, false, assume_local),
        6 => parse_parts(value, ts, 6, 0, false, assume_local),
        8 => parse_parts(value, ts, 8, 0, false, assume_local),
        9 => parse_parts(value, ts, 4, 0, true, assume_local),
        10 => parse_parts(value, ts, 10, 0, false, assume_local),
        11 => parse_parts(value, ts, 6, 0, true, assume_local),
        12 => parse_parts(value, ts, 12, 0, false, assume_local),
        13 => parse_parts(value, ts, 8, 0, true, assume_local),
        14 => parse_parts(value, ts, 14, 0, false, assume_local),
        15 => parse_parts(value, ts, 10, 0, true, assume_local),
        16 => parse_parts(value, ts, 14, 1, false, assume_local),
        // Ambiguous: YYYYMMDDHHMMSS.SS vs YYYYMMDDHHMM+ZZZZ.
        17 => parse_parts(value, ts, 14, 2, false, assume_local)
            .or_else(|_| parse_parts(value, ts, 12, 0, true, assume_local)),
        18 => parse_parts(value, ts, 14, 3, false, assume_local),
        // Ambiguous: YYYYMMDDHHMMSS.SSSS vs YYYYMMDDHHMMSS+ZZZZ.
        19 => parse_parts(value, ts, 14, 4, false, assume_local)
            .or_else(|_| parse_parts(value, ts, 14, 0, true, assume_local)),
        21 => parse_parts(value, ts, 14, 1, true, assume_local),
        22 => parse_parts(value, ts, 14, 2, true, assume_local),
        23 => parse_parts(value, ts, 14, 3, true, assume_local),
        _ => parse_parts(value, ts, 14, 4, true, assume_local),
    }
}

/// Render a timestamp as `YYYYMMDDHHMMSS.FFFF` with exactly four
/// fractional digits. This is the form used for generated control
/// identifiers and acknowledgment header timestamps.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let fraction = (timestamp.nanosecond() % 1_000_000_000) / 100_000;
    format!("{}.{:04}", timestamp.format("%Y%m%d%H%M%S"), fraction)
}

/// Parse one candidate reading: `digits` leading date/time digits, a
/// fraction of `frac` digits, and optionally a trailing `±HHMM` offset.
/// Fails unless the value has exactly that shape.
fn parse_parts(
    original: &str,
    ts: &str,
    digits: usize,
    frac: usize,
    with_offset: bool,
    assume_local: bool,
) -> Result<DateTime<FixedOffset>> {
    let invalid = || Error::InvalidTimestamp(original.to_string());

    let mut expected = digits;
    if frac > 0 {
        expected += 1 + frac;
    }
    if with_offset {
        expected += 5;
    }
    if ts.len() != expected {
        return Err(invalid());
    }

    let body = &ts[..digits];
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let unit = |range: std::ops::Range<usize>, fallback: u32| -> u32 {
        if digits >= range.end {
            body[range].parse().unwrap_or(fallback)
        } else {
            fallback
        }
    };
    let year: i32 = body[0..4].parse().map_err(|_| invalid())?;
    let month = unit(4..6, 1);
    let day = unit(6..8, 1);
    let hour = unit(8..10, 0);
    let minute = unit(10..12, 0);
    let second = unit(12..14, 0);

    let mut cursor = digits;
    let nanos = if frac > 0 {
        if ts.as_bytes()[cursor] != b'.' {
            return Err(invalid());
        }
        let text = &ts[cursor + 1..cursor + 1 + frac];
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        cursor += 1 + frac;
        let scale = 10u32.pow(9 - frac as u32);
        text.parse::<u32>().map_err(|_| invalid())? * scale
    } else {
        0
    };

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(invalid)?;
    let naive = NaiveDateTime::new(date, time);

    if with_offset {
        let offset = parse_offset(original, &ts[cursor..])?;
        offset.from_local_datetime(&naive).single().ok_or_else(invalid)
    } else if assume_local {
        let resolved = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(invalid)?;
        let offset = *resolved.offset();
        Ok(resolved.with_timezone(&offset))
    } else {
        Ok(Utc.from_utc_datetime(&naive).with_timezone(&utc_offset()))
    }
}

fn parse_offset(original: &str, text: &str) -> Result<FixedOffset> {
    let invalid = || Error::InvalidTimestamp(original.to_string());

    let bytes = text.as_bytes();
    if bytes.len() != 5 {
        return Err(invalid());
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid()),
    };
    if !bytes[1..].iter().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = text[1..3].parse().map_err(|_| invalid())?;
    let minutes: i32 = text[3..5].parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).expect("zero offset")
}
