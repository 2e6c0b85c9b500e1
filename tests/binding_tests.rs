//! Store and JSON boundaries working together.

use wkt_core::{
    codec, Duration, ExternalValue, Scan, StructValue, Timestamp, ToExternalValue, Value,
    WellKnownKind, WellKnownValue,
};
use wkt_json_types::{typed_values_to_json, FromJsonText, ToJsonText};
use wkt_sql_types::declared_db_type;

#[test]
fn test_duration_store_and_json_agree() {
    let d = Duration::new(0, 75, 0, 0).unwrap();
    assert_eq!(d, Duration::new(1, 15, 0, 0).unwrap());

    let stored = d.to_external_value();
    assert_eq!(stored, ExternalValue::Text("01:15:00".to_string()));
    assert_eq!(d.to_json_text().unwrap(), br#""01:15:00""#);

    let from_json = Duration::from_json_text(&d.to_json_text().unwrap()).unwrap();
    assert_eq!(from_json, Some(Duration::scan(&stored).unwrap()));
}

#[test]
fn test_duration_canonical_examples() {
    assert_eq!(codec::encode_duration(Duration::ZERO), "00:00:00");
    assert_eq!(
        codec::encode_duration(Duration::new(1, 2, 3, 0).unwrap()),
        "01:02:03"
    );
    assert_eq!(
        codec::encode_duration(Duration::new(0, 0, 0, 1).unwrap()),
        "00:00:00.000000001"
    );
    for nanos in [0, 1, 999_999_999, 3_600_000_000_000, -61_000_000_001] {
        let d = Duration::from_nanos(nanos).unwrap();
        assert_eq!(codec::decode_duration(&codec::encode_duration(d)).unwrap(), d);
    }
}

#[test]
fn test_timestamp_full_precision_before_epoch() {
    let ts = Timestamp::new(-1, 999_999_999).unwrap();
    let stored = codec::encode_timestamp(ts);
    assert_eq!(codec::decode_timestamp(&stored).unwrap(), ts);

    let json = ts.to_json_text().unwrap();
    assert_eq!(json, br#""1969-12-31T23:59:59.999999999Z""#);
    assert_eq!(Timestamp::from_json_text(&json).unwrap(), Some(ts));
}

#[test]
fn test_absent_values_at_both_boundaries() {
    assert_eq!(Option::<Timestamp>::scan(&ExternalValue::Null), Ok(None));
    assert_eq!(
        WellKnownValue::scan(WellKnownKind::Struct, &ExternalValue::Null),
        Ok(None)
    );

    let mut ts = Timestamp::new(1_700_000_000, 0).unwrap();
    ts.update_from_json_text(b"null").unwrap();
    assert_eq!(ts, Timestamp::new(1_700_000_000, 0).unwrap());
}

#[test]
fn test_struct_nested_round_trip() {
    let sv = StructValue::scan(&ExternalValue::Bytes(br#"{"a":{"b":1}}"#.to_vec())).unwrap();
    let inner = sv.get("a").and_then(Value::as_struct).unwrap();
    assert_eq!(inner.get("b").and_then(Value::as_f64), Some(1.0));

    let back = StructValue::scan(&sv.to_external_value()).unwrap();
    assert_eq!(back.as_map(), sv.as_map());
    assert_eq!(sv.to_json_text().unwrap(), br#"{"a":{"b":1}}"#);
}

#[test]
fn test_row_to_json_and_column_types() {
    let row: Vec<(String, Option<WellKnownValue>)> = vec![
        (
            "session_length".to_string(),
            Some(Duration::new(0, 0, 45, 0).unwrap().into()),
        ),
        ("last_login".to_string(), None),
        (
            "attributes".to_string(),
            Some(StructValue::new().with("role", "admin").unwrap().into()),
        ),
    ];
    assert_eq!(
        typed_values_to_json(row).unwrap(),
        serde_json::json!({
            "session_length": "00:00:45",
            "last_login": null,
            "attributes": {"role": "admin"}
        })
    );

    assert_eq!(declared_db_type::<Duration>("mysql"), "TIME");
    assert_eq!(declared_db_type::<Option<StructValue>>("postgres"), "JSONB");
}
