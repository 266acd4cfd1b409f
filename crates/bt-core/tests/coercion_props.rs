use bt_core::{Blackboard, Value, ValueKind};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = ValueKind> {
    prop_oneof![
        Just(ValueKind::Bool),
        Just(ValueKind::Int),
        Just(ValueKind::Float),
        Just(ValueKind::Str),
        Just(ValueKind::List),
    ]
}

fn any_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[a-z0-9.]{0,8}".prop_map(Value::Str),
    ]
}

proptest! {
    #[test]
    fn coercion_yields_target_kind_or_error(value in any_scalar(), to in any_kind()) {
        if let Ok(converted) = value.clone().coerce(to) {
            prop_assert_eq!(converted.kind(), to);
        }
    }

    #[test]
    fn int_float_widening_roundtrips_exactly(i in -(1i64 << 53)..=(1i64 << 53)) {
        let widened = Value::Int(i).coerce(ValueKind::Float).unwrap();
        prop_assert_eq!(widened.coerce(ValueKind::Int).unwrap(), Value::Int(i));
    }

    #[test]
    fn reads_normalize_to_declared_kind(i in any::<i32>()) {
        let mut bb = Blackboard::new();
        bb.set("x", i);
        bb.set_entry("x", None, Some(ValueKind::Float)).unwrap();
        prop_assert_eq!(bb.get("x").unwrap(), Value::Float(f64::from(i)));
    }
}
