use chrono::{TimeZone, Utc};
use mcproto::utils::*;
use serde_json::json;

#[test]
fn test_datetime_to_microseconds() {
    let epoch = Utc.timestamp_opt(0, 0).unwrap();
    assert_eq!(datetime_to_microseconds(&epoch), 0);

    let instant = Utc.with_ymd_and_hms(2013, 10, 1, 12, 0, 0).unwrap();
    assert_eq!(datetime_to_microseconds(&instant), 1_380_628_800_000_000);

    let with_millis = Utc.timestamp_millis_opt(1_380_628_800_123).unwrap();
    assert_eq!(datetime_to_microseconds(&with_millis), 1_380_628_800_123_000);
}

#[test]
fn test_current_millis() {
    let before = Utc::now().timestamp_millis();
    let millis: i64 = current_millis().parse().unwrap();
    let after = Utc::now().timestamp_millis();

    assert!(millis >= before && millis <= after);
}

#[test]
fn test_wire_bool() {
    assert_eq!(wire_bool(true), "True");
    assert_eq!(wire_bool(false), "False");
}

#[test]
fn test_item_placeholder() {
    assert_eq!(item_placeholder(3, "tracks"), "<3 tracks>");
    assert_eq!(item_placeholder(0, "stations"), "<0 stations>");
}

#[test]
fn test_str_field() {
    let track = json!({"title": "Airbag", "trackNumber": 1});

    assert_eq!(str_field(&track, "title"), "Airbag");
    // non-string and missing fields read as empty
    assert_eq!(str_field(&track, "trackNumber"), "");
    assert_eq!(str_field(&track, "album"), "");
}

#[test]
fn test_join_str_array() {
    let value = json!(["Apcbq", 7, "Axyz"]);
    assert_eq!(join_str_array(Some(&value), ", "), "Apcbq, Axyz");
    assert_eq!(join_str_array(Some(&json!("single")), ", "), "");
    assert_eq!(join_str_array(None, ", "), "");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("OK Computer", 20), "OK Computer");
    assert_eq!(truncate("OK Computer", 11), "OK Computer");
    assert_eq!(truncate("OK Computer", 6), "OK Co…");
    assert_eq!(truncate("Sigur Rós Ágætis byrjun", 11).chars().count(), 11);
}
