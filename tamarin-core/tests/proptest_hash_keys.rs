// tamarin-core - Property-based tests for hash key consistency
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for the HashKey contract: equal values produce
//! equal keys, and the hashable kinds never collide across type tags.

use proptest::prelude::*;

use tamarin_core::object::{Object, ObjectKind};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Equal strings always produce identical hash keys.
    #[test]
    fn string_hash_key_consistency(s in ".{0,24}") {
        let a = Object::string(s.clone());
        let b = Object::string(s);
        prop_assert_eq!(a.hash_key(), b.hash_key());
    }

    /// Integer keys are the bit-cast of the value, so distinct integers
    /// have distinct keys.
    #[test]
    fn integer_hash_keys_are_injective(a in any::<i64>(), b in any::<i64>()) {
        let ka = Object::Integer(a).hash_key().unwrap();
        let kb = Object::Integer(b).hash_key().unwrap();
        prop_assert_eq!(a == b, ka == kb);
    }

    /// Keys carry the type tag: an integer key never equals a boolean or
    /// string key even when the digests collide.
    #[test]
    fn hash_keys_are_tagged(n in 0i64..2) {
        let int_key = Object::Integer(n).hash_key().unwrap();
        let bool_key = Object::Boolean(n == 1).hash_key().unwrap();
        prop_assert_eq!(int_key.kind, ObjectKind::Integer);
        prop_assert_eq!(bool_key.kind, ObjectKind::Boolean);
        prop_assert_ne!(int_key, bool_key);
    }
}
