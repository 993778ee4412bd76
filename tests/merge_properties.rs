//! Property tests for variable merging and filling.

use beekeeper::{merge, Variable, VariableCollection, VariableSpec, DEFAULT_VARIABLE_TYPE};
use proptest::prelude::*;
use serde_json::json;

fn type_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]_type", 0..5)
}

fn variable() -> impl Strategy<Value = Variable> {
    (
        type_names(),
        prop::option::of("[a-z]{1,8}"),
        prop::option::of("(text|application)/(plain|json)"),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(types, value, mimetype, optional)| {
            Variable::from(VariableSpec {
                value: value.map(|v| json!(v)),
                var_type: None,
                types: Some(types),
                mimetype,
                optional,
            })
        })
}

proptest! {
    #[test]
    fn merged_types_start_with_override_then_base(a in variable(), b in variable()) {
        let merged = merge(&a, &b);
        let types = merged.types();
        let b_types = b.types();

        prop_assert_eq!(&types[..b_types.len()], &b_types[..]);

        let rest: Vec<&str> = a.types().into_iter().filter(|t| !b_types.contains(t)).collect();
        prop_assert_eq!(&types[b_types.len()..], &rest[..]);

        let mut deduped = types.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), types.len());
    }

    #[test]
    fn merged_types_are_never_empty(a in variable(), b in variable()) {
        prop_assert!(!merge(&a, &b).types().is_empty());
    }

    #[test]
    fn merge_with_itself_is_identity(a in variable()) {
        prop_assert_eq!(merge(&a, &a), a);
    }

    #[test]
    fn merge_prefers_override_scalars(a in variable(), b in variable()) {
        let merged = merge(&a, &b);
        prop_assert_eq!(merged.value(), b.value().or(a.value()));
        prop_assert_eq!(merged.mimetype(), b.mimetype().or(a.mimetype()));
    }

    #[test]
    fn is_filled_iff_value_or_optional(a in variable()) {
        prop_assert_eq!(a.is_filled(), a.has_value() || a.is_optional());
    }

    #[test]
    fn single_type_equals_type_list(t in "[a-z_]{1,12}", value in "[a-z]{0,8}") {
        let single = Variable::from(VariableSpec::new().of_type(t.clone()).value(value.clone()));
        let list = Variable::from(VariableSpec::new().types([t]).value(value));
        prop_assert_eq!(single, list);
    }

    #[test]
    fn collection_types_always_include_default(names in prop::collection::vec("[a-z]{1,6}", 0..6)) {
        let collection = VariableCollection::from_specs(
            names.iter().map(|n| (n.as_str(), VariableSpec::new().of_type("header"))),
        );
        prop_assert!(collection.types().iter().any(|t| t == DEFAULT_VARIABLE_TYPE));
    }
}
