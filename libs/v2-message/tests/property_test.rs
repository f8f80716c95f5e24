//! Property-based tests using QuickCheck

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use nuntius_message::{format_timestamp, parse_timestamp, Encoding, Field, Message, Segment};
use quickcheck::{QuickCheck, TestResult};

/// Property: decoding an encoded string always gives the string back,
/// whatever it contains.
#[test]
fn prop_decode_encode_identity() {
    fn prop(s: String) -> bool {
        let encoding = Encoding::default();
        encoding.decode(&encoding.encode(&s)) == s
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: the formatter's output is always a parseable DTM value that
/// comes back as the same instant.
#[test]
fn prop_format_parse_identity() {
    fn prop(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        fraction: u16,
    ) -> TestResult {
        let year = 1000 + (year % 9000) as i32;
        let month = 1 + (month % 12) as u32;
        let day = 1 + (day % 31) as u32;
        let hour = (hour % 24) as u32;
        let minute = (minute % 60) as u32;
        let second = (second % 60) as u32;
        let nanos = (fraction % 10_000) as u32 * 100_000;

        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return TestResult::discard();
        };
        let Some(time) = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos) else {
            return TestResult::discard();
        };
        let timestamp = Utc.from_utc_datetime(&NaiveDateTime::new(date, time));

        let text = format_timestamp(&timestamp);
        match parse_timestamp(&text, false) {
            Ok(parsed) => TestResult::from_bool(parsed == timestamp),
            Err(_) => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(u16, u8, u8, u8, u8, u8, u16) -> TestResult);
}

/// Property: serialization is a fixpoint — whatever leaf values a segment
/// is built from, serializing, reparsing and serializing again gives the
/// same text.
#[test]
fn prop_serialize_parse_serialize_fixpoint() {
    fn prop(values: Vec<String>) -> TestResult {
        if values.is_empty() || values.len() > 24 {
            return TestResult::discard();
        }

        let mut message = Message::parse_text(
            "MSH|^~\\&|APP|FAC|DEST|DESTFAC|20240101000000||ADT^A01|1|P|2.7\r",
        )
        .unwrap();
        let mut segment = Segment::new("ZRT");
        for value in &values {
            segment.add_field(Field::new(value.clone()));
        }
        message.add_segment(segment);

        let first = message.serialize(false).unwrap();
        let reparsed = match Message::parse_text(&first) {
            Ok(m) => m,
            Err(_) => return TestResult::failed(),
        };
        let second = reparsed.serialize(false).unwrap();
        TestResult::from_bool(first == second)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}
