use localizable::{Arguments, LocaleRegistry, LocaleSource, ResourcePack, resolve};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_.]{0,20}").expect("valid key regex")
}

fn name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,10}").expect("valid name regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{0,20}").expect("valid value regex")
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 ,.!]{0,12}").expect("valid text regex")
}

fn source_with(entries: &BTreeMap<String, String>) -> LocaleSource {
    let mut pack = ResourcePack::new("en");
    for (key, value) in entries {
        pack.insert(None, key.clone(), value.clone());
    }
    LocaleSource::from_pack(Arc::new(pack))
}

proptest! {
    #[test]
    fn prop_missing_key_resolves_to_itself(
        key in key_strategy(),
        entries in prop::collection::btree_map(key_strategy(), value_strategy(), 0..6),
    ) {
        prop_assume!(!entries.contains_key(&key));
        let source = source_with(&entries);
        prop_assert_eq!(resolve(&key, None, &source, None), key.clone());
        prop_assert_eq!(resolve(&key, Some("Other"), &source, None), key);
    }

    #[test]
    fn prop_present_key_resolves_to_value(
        entries in prop::collection::btree_map(key_strategy(), value_strategy(), 1..6),
    ) {
        let source = source_with(&entries);
        for (key, value) in &entries {
            prop_assert_eq!(&resolve(key, None, &source, None), value);
        }
    }

    #[test]
    fn prop_placeholder_is_replaced(
        prefix in text_strategy(),
        suffix in text_strategy(),
        name in name_strategy(),
        value in value_strategy(),
    ) {
        let template = format!("{prefix}$({name}){suffix}");
        let source = source_with(&BTreeMap::from([("k".to_string(), template)]));
        let args = Arguments::new().with(name.clone(), &value);

        let out = resolve("k", None, &source, Some(&args));
        prop_assert_eq!(&out, &format!("{prefix}{value}{suffix}"));
        let token = format!("$({name})");
        prop_assert!(!out.contains(&token));
    }

    #[test]
    fn prop_unmatched_placeholder_is_verbatim(
        prefix in text_strategy(),
        name in name_strategy(),
        other in name_strategy(),
        value in value_strategy(),
    ) {
        prop_assume!(name != other);
        let template = format!("{prefix}$({name})");
        let source = source_with(&BTreeMap::from([("k".to_string(), template.clone())]));
        let args = Arguments::new().with(other, value);

        prop_assert_eq!(resolve("k", None, &source, Some(&args)), template);
    }

    #[test]
    fn prop_every_set_is_observed_once(
        picks in prop::collection::vec(0usize..3, 1..20),
    ) {
        let sources: Vec<LocaleSource> = ["en", "fr", "ja"]
            .iter()
            .map(|lang| LocaleSource::from_pack(Arc::new(ResourcePack::new(*lang))))
            .collect();
        let registry = LocaleRegistry::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        registry.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for (n, pick) in picks.iter().enumerate() {
            registry.set_active(sources[*pick].clone());
            prop_assert_eq!(&registry.active(), &sources[*pick]);
            prop_assert_eq!(calls.load(Ordering::SeqCst), n + 1);
        }
    }
}
