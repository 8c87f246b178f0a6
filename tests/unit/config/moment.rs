use super::*;

#[test]
fn parses_storage_formats() {
    let dt = parse_moment("2024-06-15", "20:00").unwrap();
    assert_eq!(dt.to_string(), "2024-06-15 20:00:00");
    assert!(parse_date("15/06/2024").is_err());
    assert!(parse_time("8pm").is_err());
    assert!(parse_time("24:00").is_err());
}

#[test]
fn caption_is_long_date_and_24h_time() {
    assert_eq!(caption("2024-06-15", "20:00"), "June 15, 2024, 20:00");
    assert_eq!(caption("2025-01-01", "07:05"), "January 1, 2025, 07:05");
}

#[test]
fn caption_falls_back_to_raw_strings() {
    assert_eq!(caption("not-a-date", "20:00"), "not-a-date 20:00");
    assert_eq!(caption("", ""), "");
}

#[test]
fn storage_helpers_round_trip() {
    let d = parse_date("2024-02-29").unwrap();
    assert_eq!(date_string(d), "2024-02-29");
    let t = parse_time("09:30").unwrap();
    assert_eq!(time_string(t), "09:30");
    assert_eq!(long_date(d), "February 29, 2024");
}

#[test]
fn clock_helpers_produce_parsable_values() {
    assert!(parse_date(&today()).is_ok());
    assert!(parse_time(&now()).is_ok());
}
