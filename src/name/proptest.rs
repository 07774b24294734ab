//! Property-Based Tests for Name Construction
//!
//! Uses proptest to systematically verify the builder's ordering and
//! determinism contract across arbitrary property sequences.
//!
//! # Test Properties
//!
//! 1. **Insertion Order**: properties render in first-introduction order
//! 2. **In-Place Update**: repeated keys update the value, never the position
//! 3. **Determinism**: the same call sequence always yields the same name
//! 4. **Canonical Form**: rendering is `namespace:key1=value1,...`

#![cfg(test)]

use proptest::prelude::*;

use super::builder::NameBuilder;
use super::{DEFAULT_KIND, TYPE_PROPERTY};

// =============================================================================
// Property Strategies
// =============================================================================

/// Strategy for property keys: short lowercase identifiers, excluding the
/// reserved `type` key so the seeded property stays untouched.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}".prop_filter("reserved key", |key| key != TYPE_PROPERTY)
}

/// Strategy for property values: short non-empty alphanumerics.
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9.]{0,7}"
}

/// Strategy for a sequence of property calls (keys may repeat).
fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 1..12)
}

/// Reference model of the ordering contract: first-introduction order with
/// in-place value updates, seeded with the default `type` property.
fn expected_properties(pairs: &[(String, String)]) -> Vec<(String, String)> {
    let mut expected = vec![(TYPE_PROPERTY.to_string(), DEFAULT_KIND.to_string())];
    for (key, value) in pairs {
        match expected.iter_mut().find(|(existing, _)| existing == key) {
            Some(slot) => slot.1 = value.clone(),
            None => expected.push((key.clone(), value.clone())),
        }
    }
    expected
}

fn builder_with(pairs: &[(String, String)]) -> NameBuilder {
    let mut builder = NameBuilder::new();
    for (key, value) in pairs {
        builder = builder.property(key.clone(), value.clone()).unwrap();
    }
    builder
}

// =============================================================================
// Ordering Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_properties_render_in_first_introduction_order(pairs in pairs_strategy()) {
        let name = builder_with(&pairs).build();
        prop_assert_eq!(name.properties().to_vec(), expected_properties(&pairs));
    }

    #[test]
    fn prop_build_is_deterministic_and_repeatable(pairs in pairs_strategy()) {
        let builder = builder_with(&pairs);
        let first = builder.build();
        let second = builder.build();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.canonical(), second.canonical());
    }

    #[test]
    fn prop_canonical_form_is_namespace_and_joined_pairs(pairs in pairs_strategy()) {
        let name = builder_with(&pairs).build();
        let joined = name
            .properties()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(",");
        prop_assert_eq!(name.canonical(), format!("{}:{}", name.namespace(), joined));
    }

    #[test]
    fn prop_disable_type_keeps_remaining_order(pairs in pairs_strategy()) {
        let builder = builder_with(&pairs).disable_type().unwrap();
        let name = builder.build();

        let mut expected = expected_properties(&pairs);
        expected.retain(|(key, _)| key != TYPE_PROPERTY);

        prop_assert_eq!(name.properties().to_vec(), expected);
        prop_assert!(name.property(TYPE_PROPERTY).is_none());
    }
}
