//! DTM codec: the length-dispatch table, the two ambiguous lengths,
//! local-time binding and the fixed-width formatter.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Timelike, Utc};
use nuntius_message::{format_timestamp, parse_timestamp, Error};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn offset(
    secs: i32,
    y: i32,
    mo: u32,
    d: u32,
    h: u32,
    mi: u32,
    s: u32,
) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(secs)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
}

#[test]
fn parses_every_plain_precision() {
    let cases: &[(&str, DateTime<Utc>)] = &[
        ("2010", utc(2010, 1, 1, 0, 0, 0)),
        ("201206", utc(2012, 6, 1, 0, 0, 0)),
        ("20120619", utc(2012, 6, 19, 0, 0, 0)),
        ("2012061913", utc(2012, 6, 19, 13, 0, 0)),
        ("201206191327", utc(2012, 6, 19, 13, 27, 0)),
        ("20120609032743", utc(2012, 6, 9, 3, 27, 43)),
        // Leap day.
        ("20120229", utc(2012, 2, 29, 0, 0, 0)),
    ];
    for (input, expected) in cases {
        let parsed = parse_timestamp(input, false).unwrap();
        assert_eq!(parsed, *expected, "input {input}");
        assert_eq!(parsed.offset().local_minus_utc(), 0, "input {input}");
    }
}

#[test]
fn parses_fractional_seconds() {
    let base = utc(2012, 6, 9, 3, 27, 43);
    let cases: &[(&str, u32)] = &[
        ("20120609032743.1", 100_000_000),
        ("20120609032743.12", 120_000_000),
        ("20120609032743.123", 123_000_000),
        ("20120609032743.1234", 123_400_000),
    ];
    for (input, nanos) in cases {
        let parsed = parse_timestamp(input, false).unwrap();
        assert_eq!(parsed, base.with_nanosecond(*nanos).unwrap(), "input {input}");
    }
}

#[test]
fn parses_explicit_offsets() {
    let cases: &[(&str, DateTime<FixedOffset>)] = &[
        ("2012+0000", offset(0, 2012, 1, 1, 0, 0, 0)),
        ("2012+0230", offset(9000, 2012, 1, 1, 0, 0, 0)),
        ("2012-0230", offset(-9000, 2012, 1, 1, 0, 0, 0)),
        ("201202+0200", offset(7200, 2012, 2, 1, 0, 0, 0)),
        ("20120207+0200", offset(7200, 2012, 2, 7, 0, 0, 0)),
        ("2012020713+0200", offset(7200, 2012, 2, 7, 13, 0, 0)),
        ("20120207133245.1+0200", {
            let dt = offset(7200, 2012, 2, 7, 13, 32, 45);
            dt.with_nanosecond(100_000_000).unwrap()
        }),
        ("20120207133245.12+0200", {
            let dt = offset(7200, 2012, 2, 7, 13, 32, 45);
            dt.with_nanosecond(120_000_000).unwrap()
        }),
        ("20120207133245.123+0200", {
            let dt = offset(7200, 2012, 2, 7, 13, 32, 45);
            dt.with_nanosecond(123_000_000).unwrap()
        }),
        ("20120606215334.1234+0200", {
            let dt = offset(7200, 2012, 6, 6, 21, 53, 34);
            dt.with_nanosecond(123_400_000).unwrap()
        }),
    ];
    for (input, expected) in cases {
        let parsed = parse_timestamp(input, false).unwrap();
        assert_eq!(parsed, *expected, "input {input}");
        assert_eq!(
            parsed.offset().local_minus_utc(),
            expected.offset().local_minus_utc(),
            "input {input}"
        );
    }
}

#[test]
fn seventeen_characters_prefers_the_fraction() {
    let parsed = parse_timestamp("20120207133245.12", false).unwrap();
    assert_eq!(
        parsed,
        utc(2012, 2, 7, 13, 32, 45).with_nanosecond(120_000_000).unwrap()
    );

    // Same length, but only the minute+offset reading fits.
    let parsed = parse_timestamp("201202071332+0200", false).unwrap();
    assert_eq!(parsed, offset(7200, 2012, 2, 7, 13, 32, 0));
    assert_eq!(parsed.offset().local_minus_utc(), 7200);
}

#[test]
fn nineteen_characters_prefers_the_fraction() {
    let parsed = parse_timestamp("20120207133245.1234", false).unwrap();
    assert_eq!(
        parsed,
        utc(2012, 2, 7, 13, 32, 45).with_nanosecond(123_400_000).unwrap()
    );

    let parsed = parse_timestamp("20120207133245+0200", false).unwrap();
    assert_eq!(parsed, offset(7200, 2012, 2, 7, 13, 32, 45));
    assert_eq!(parsed.offset().local_minus_utc(), 7200);
}

#[test]
fn assume_local_binds_offsetless_values_to_the_local_zone() {
    let expected = Local.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_timestamp("2012", true).unwrap(), expected);

    let expected = Local.with_ymd_and_hms(2012, 6, 9, 3, 27, 43).unwrap();
    assert_eq!(parse_timestamp("20120609032743", true).unwrap(), expected);
}

#[test]
fn assume_local_is_ignored_with_an_explicit_offset() {
    let parsed = parse_timestamp("20120606215334.1234+0200", true).unwrap();
    assert_eq!(
        parsed,
        offset(7200, 2012, 6, 6, 21, 53, 34)
            .with_nanosecond(123_400_000)
            .unwrap()
    );
    assert_eq!(parsed.offset().local_minus_utc(), 7200);
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(
        parse_timestamp(" 20120619 ", false).unwrap(),
        utc(2012, 6, 19, 0, 0, 0)
    );
}

#[test]
fn malformed_values_fail_with_the_offending_text() {
    let bad = [
        "",
        "   ",
        "201",     // no listed length
        "20121",   // no listed length
        "2012130", // no listed length
        "20121301",                  // month 13
        "20120132",                  // day 32
        "2012020725",                // hour 25
        "201202071380",              // minute 80
        "2012020a",                  // stray letter
        "2012~0200",                 // bad offset sign
        "20120207133245.1234+02x0",  // non-digit in offset
        "20120207133245.1234+2400",  // offset hour out of range
        "20120207133245.12345+0200", // five fractional digits
    ];
    for input in bad {
        match parse_timestamp(input, false) {
            Err(Error::InvalidTimestamp(text)) => assert_eq!(text, input),
            other => panic!("expected failure for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn formats_with_exactly_four_fraction_digits() {
    let dt = utc(2012, 6, 6, 21, 53, 34).with_nanosecond(123_400_000).unwrap();
    assert_eq!(format_timestamp(&dt), "20120606215334.1234");

    let dt = utc(2012, 6, 6, 21, 53, 34);
    assert_eq!(format_timestamp(&dt), "20120606215334.0000");
}

#[test]
fn formatted_timestamps_parse_back() {
    let dt = utc(2024, 2, 29, 23, 59, 59).with_nanosecond(987_600_000).unwrap();
    let text = format_timestamp(&dt);
    assert_eq!(parse_timestamp(&text, false).unwrap(), dt);
}
