//! Property-based tests for basalt-json using proptest.

use basalt_json::{compare_raw, JsonValue};
use proptest::prelude::*;
use serde_json::Value;
use std::cmp::Ordering;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON has no non-finite numbers", |f| f.is_finite())
            .prop_map(Value::from),
        "\\PC{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{0,6}", inner, 0..8)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Every value compares equal to itself.
    #[test]
    fn compare_is_reflexive(tree in arb_json()) {
        let v = JsonValue::from_serde(&tree).unwrap();
        prop_assert_eq!(v.compare(&v), Ordering::Equal);
        prop_assert_eq!(compare_raw(v.as_bytes(), v.as_bytes()).unwrap(), Ordering::Equal);
    }

    /// Rendering then parsing reproduces the same encoding.
    #[test]
    fn text_roundtrip(tree in arb_json()) {
        let v = JsonValue::from_serde(&tree).unwrap();
        let text = v.to_json_string().unwrap();
        prop_assert!(!text.contains('\n'));
        let back = JsonValue::parse(&text).unwrap();
        prop_assert_eq!(&back, &v);
        prop_assert_eq!(back.compare(&v), Ordering::Equal);
    }

    /// Independently built copies hash identically.
    #[test]
    fn hash_is_deterministic(tree in arb_json()) {
        let a = JsonValue::from_serde(&tree).unwrap();
        let b = JsonValue::parse(serde_json::to_string(&tree).unwrap()).unwrap();
        prop_assert_eq!(a.hash64(), a.hash64());
        prop_assert_eq!(a.hash64(), b.hash64());
    }

    /// Sentinels bound every document.
    #[test]
    fn sentinels_bound_everything(tree in arb_json()) {
        let v = JsonValue::from_serde(&tree).unwrap();
        prop_assert_eq!(JsonValue::min_key().compare(&v), Ordering::Less);
        prop_assert_eq!(JsonValue::max_key().compare(&v), Ordering::Greater);
        prop_assert_eq!(v.compare(&JsonValue::min_key()), Ordering::Greater);
        prop_assert_eq!(v.compare(&JsonValue::max_key()), Ordering::Less);
    }

    /// Integers and their exact double form are equal and hash the same.
    #[test]
    fn int_double_equivalence(i in -(1i64 << 53)..(1i64 << 53)) {
        let int = JsonValue::from_int(i);
        let double = JsonValue::from_double(i as f64);
        prop_assert_eq!(int.compare(&double), Ordering::Equal);
        prop_assert_eq!(int.hash64(), double.hash64());
    }

    /// Integer ordering matches i64 ordering, including extreme values.
    #[test]
    fn int_order_matches_native(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(JsonValue::from_int(a).compare(&JsonValue::from_int(b)), a.cmp(&b));
    }

    /// Persisted bytes load back unchanged.
    #[test]
    fn serialize_from_slice(tree in arb_json()) {
        let v = JsonValue::from_serde(&tree).unwrap();
        let mut cell = vec![0u8; v.serialize_size()];
        prop_assert_eq!(v.serialize(&mut cell), cell.len());
        prop_assert_eq!(JsonValue::from_slice(&cell).unwrap(), v);
    }
}
