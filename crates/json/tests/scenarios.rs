//! End-to-end scenarios for the JSON column type.

use basalt_json::{Error, JsonType, JsonValue};
use std::cmp::Ordering;

#[test]
fn object_with_array_renders_equivalent_document() {
    let v = JsonValue::parse(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
    let text = v.to_json_string().unwrap();

    let rendered: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rendered, serde_json::json!({"a": 1, "b": [1, 2, 3]}));
    assert_eq!(JsonValue::parse(&text).unwrap(), v);
}

#[test]
fn extra_fields_on_right_are_ignored() {
    let left = JsonValue::parse(r#"{"a":1}"#).unwrap();
    let right = JsonValue::parse(r#"{"a":1,"b":2}"#).unwrap();
    assert_eq!(left.compare(&right), Ordering::Equal);
}

#[test]
fn array_compares_common_prefix_only() {
    let left = JsonValue::parse("[1,2]").unwrap();
    let right = JsonValue::parse("[1,2,3]").unwrap();
    assert_eq!(left.compare(&right), Ordering::Equal);
}

#[test]
fn int_accessor_on_string_is_type_mismatch() {
    let err = JsonValue::from_string("x").get_int().unwrap_err();
    assert_eq!(err, Error::type_mismatch("int", JsonType::String));
}

#[test]
fn empty_text_is_absent_not_null() {
    let absent = JsonValue::parse("").unwrap();
    assert_eq!(absent.get_type(), JsonType::Absent);
    assert_ne!(absent.get_type(), JsonValue::from_null().get_type());
    assert_eq!(absent.to_json_string().unwrap(), "");
    assert_eq!(JsonValue::parse(absent.to_json_string().unwrap()).unwrap(), absent);
}

#[test]
fn int_equals_double() {
    assert_eq!(
        JsonValue::from_int(3).compare(&JsonValue::from_double(3.0)),
        Ordering::Equal
    );
}

#[test]
fn scalar_constructors_round_trip_through_text() {
    let values = [
        JsonValue::from_null(),
        JsonValue::from_bool(false),
        JsonValue::from_int(i64::MIN),
        JsonValue::from_uint(u64::MAX),
        JsonValue::from_double(-0.25),
        JsonValue::from_double(1e300),
        JsonValue::from_string("line\nbreak \u{1F600}"),
    ];
    for v in values {
        let back = JsonValue::parse(v.to_json_string().unwrap()).unwrap();
        assert_eq!(back, v, "{v:?}");
    }

    // unsigned values up to i64::MAX come back signed, equal by value only
    let small = JsonValue::from_uint(7);
    let back = JsonValue::parse(small.to_json_string().unwrap()).unwrap();
    assert_eq!(back.get_type(), JsonType::Int);
    assert_eq!(back.compare(&small), Ordering::Equal);
    assert_eq!(back.hash64(), small.hash64());
}

#[test]
fn values_are_shareable_across_threads() {
    let v = std::sync::Arc::new(JsonValue::parse(r#"{"k":[1,2,3]}"#).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let v = std::sync::Arc::clone(&v);
            std::thread::spawn(move || (v.hash64(), v.compare(&v)))
        })
        .collect();
    let expected = v.hash64();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), (expected, Ordering::Equal));
    }
}

#[test]
fn group_by_hash_set() {
    use std::collections::HashSet;

    let mut groups = HashSet::new();
    groups.insert(JsonValue::parse(r#"{"a":1,"b":2}"#).unwrap());
    groups.insert(JsonValue::parse(r#"{"b":2,"a":1}"#).unwrap());
    groups.insert(JsonValue::parse(r#"{"a":2}"#).unwrap());
    assert_eq!(groups.len(), 2);
}
