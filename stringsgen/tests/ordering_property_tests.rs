use proptest::prelude::*;
use stringsgen::{
    emit::{EmitOptions, render},
    specifier::classify,
    tree::NamespaceTree,
};

fn key_strategy() -> impl Strategy<Value = String> {
    let segment = "[a-z][a-zA-Z0-9]{0,6}";
    (
        prop::collection::vec(segment, 0..3),
        segment,
        prop::collection::vec(prop_oneof!["[a-z]{1,5}", Just(":".to_string())], 0..3),
    )
        .prop_map(|(namespaces, name, labels)| {
            let mut key = namespaces.join(".");
            if !key.is_empty() {
                key.push('.');
            }
            key.push_str(&name);
            for label in labels {
                key.push('_');
                key.push_str(&label);
            }
            key
        })
}

/// Unique keys paired with a value holding one `%d` per label.
fn entries_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_set(key_strategy(), 1..24).prop_map(|keys| {
        keys.into_iter()
            .map(|key| {
                let labels = key.rsplit('.').next().unwrap_or_default().split('_').count() - 1;
                let value = vec!["%d"; labels].join(" ");
                (key, value)
            })
            .collect()
    })
}

fn render_in_order(entries: &[(String, String)]) -> String {
    let mut tree = NamespaceTree::new();
    for (key, value) in entries {
        tree.insert(key, classify(value)).unwrap();
    }
    render(&tree, &EmitOptions::default())
}

proptest! {
    #[test]
    fn prop_output_independent_of_insertion_order(
        (entries, shuffled) in entries_strategy()
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle()))
    ) {
        prop_assert_eq!(render_in_order(&entries), render_in_order(&shuffled));
    }

    #[test]
    fn prop_values_without_percent_have_no_arguments(value in "[^%]{0,40}") {
        prop_assert!(classify(&value).is_empty());
    }

    #[test]
    fn prop_every_entry_is_rendered_once(entries in entries_strategy()) {
        let rendered = render_in_order(&entries);
        for (key, _) in &entries {
            let lookup = format!("NSLocalizedString(\"{}\", comment: \"\")", key);
            prop_assert_eq!(rendered.matches(&lookup).count(), 1);
        }
    }
}
