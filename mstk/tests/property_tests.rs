use mstk::generators::escape::{escape_apostrophes, escape_quotes, unescape_apostrophes};
use mstk::{Generator, GeneratorKind, MemoryLoader, Loader, ResourceSet, SimpleString, Spreadsheet};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 '\"\\\\]{0,24}").expect("valid text regex")
}

fn language_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{2}").expect("valid language regex")
}

fn translations_strategy() -> impl Strategy<Value = BTreeMap<String, (String, bool)>> {
    prop::collection::btree_map(language_strategy(), (text_strategy(), any::<bool>()), 2..8)
}

fn table(rows: &[Vec<&str>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

proptest! {
    #[test]
    fn prop_escape_apostrophes_is_idempotent(text in text_strategy()) {
        let once = escape_apostrophes(&text);
        prop_assert_eq!(escape_apostrophes(&once), once.clone());
        prop_assert_eq!(unescape_apostrophes(&once).matches('\'').count(), once.matches('\'').count());
    }

    #[test]
    fn prop_escape_quotes_is_idempotent(text in text_strategy()) {
        let once = escape_quotes(&text);
        prop_assert_eq!(escape_quotes(&once), once.clone());
        let trailing = once.len() - once.trim_end_matches('\\').len();
        prop_assert_eq!(trailing % 2, 0);
    }

    #[test]
    fn prop_merge_order_does_not_matter(translations in translations_strategy()) {
        let (left, right): (Vec<_>, Vec<_>) = translations
            .iter()
            .partition(|(_, (_, side))| *side);
        prop_assume!(!left.is_empty() && !right.is_empty());

        let build = |part: &[(&String, &(String, bool))]| {
            let mut resource =
                SimpleString::new("key", part.iter().map(|(language, _)| language.as_str())).unwrap();
            for (language, (text, _)) in part {
                resource.set(language, text.as_str()).unwrap();
            }
            resource
        };

        let mut left_first = build(&left);
        left_first.merge(build(&right)).unwrap();
        let mut right_first = build(&right);
        right_first.merge(build(&left)).unwrap();

        prop_assert_eq!(&left_first, &right_first);
        for (language, (text, _)) in &translations {
            prop_assert_eq!(left_first.get(language).unwrap().as_str(), text.as_str());
        }
    }

    #[test]
    fn prop_array_rows_in_any_order(texts in prop::collection::vec("[a-z]{1,8}", 1..8)
        .prop_flat_map(|texts| {
            let indices: Vec<usize> = (0..texts.len()).collect();
            (Just(texts), Just(indices).prop_shuffle())
        }))
    {
        let (texts, order) = texts;
        let keys: Vec<String> = order.iter().map(|index| format!("menu:{}", index)).collect();
        let mut rows = vec![vec!["type", "android_id", "en", "options"]];
        for (index, key) in order.iter().zip(&keys) {
            rows.push(vec!["string-array", key.as_str(), texts[*index].as_str(), ""]);
        }

        let loader = MemoryLoader::new(table(&rows));
        let sheet = Spreadsheet::new("android_id", loader.load().unwrap(), &["en"]).unwrap();
        let arrays = sheet.extract_string_arrays().unwrap();
        prop_assert_eq!(arrays.len(), 1);
        let items: Vec<&str> = arrays[0].items("en").unwrap().into_iter().map(|t| t.as_str()).collect();
        let expected: Vec<&str> = texts.iter().map(String::as_str).collect();
        prop_assert_eq!(items, expected);
    }

    #[test]
    fn prop_sorted_output_follows_keys(keys in prop::collection::btree_set("[a-z]{1,10}", 1..10)) {
        let mut set = ResourceSet::new().with_sorted(true);
        for key in keys.iter().rev() {
            let mut resource = SimpleString::new(key.as_str(), ["en"]).unwrap();
            resource.set("en", "text").unwrap();
            set.add(resource);
        }

        let output = GeneratorKind::Apple.create().generate(&set, "en").unwrap();
        let written: Vec<String> = output
            .lines()
            .map(|line| line.split('"').nth(1).unwrap().to_string())
            .collect();
        let expected: Vec<String> = keys.into_iter().collect();
        prop_assert_eq!(written, expected);
    }
}
