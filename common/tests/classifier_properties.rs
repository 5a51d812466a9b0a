use proptest::prelude::*;
use reclassify_common::{normalize, score, Basis, Classifier, KeywordCatalog};

fn single_word_keywords(catalog: &KeywordCatalog, entry: usize) -> Vec<String> {
    catalog.entries()[entry]
        .keywords
        .iter()
        .filter(|k| !k.contains(' '))
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn score_is_never_negative(text in ".{0,120}") {
        let catalog = KeywordCatalog::reference();
        for entry in catalog.entries() {
            let s = score(&text, entry);
            prop_assert!(s >= 0.0, "{} scored {} for {:?}", entry.category, s, text);
        }
    }

    #[test]
    fn whitespace_only_is_unclassified(text in "[ \t\n\r]{0,20}", name in proptest::option::of("[ \t]{0,5}")) {
        let result = Classifier::reference().classify(&text, name.as_deref());
        prop_assert_eq!(result.category, None);
        prop_assert_eq!(result.confidence, 0.0);
        prop_assert_eq!(result.basis, Basis::Empty);
    }

    #[test]
    fn classify_is_deterministic(text in "[a-zñáéí0-9 .,/-]{0,80}", name in proptest::option::of("[a-z ]{0,20}")) {
        let classifier = Classifier::reference();
        let first = classifier.classify(&text, name.as_deref());
        let second = classifier.classify(&text, name.as_deref());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn extra_exact_keyword_never_lowers_score(
        text in "[a-z0-9 .,-]{0,80}",
        entry_idx in 0usize..3,
        pick in any::<prop::sample::Index>(),
    ) {
        let catalog = KeywordCatalog::reference();
        let entry = &catalog.entries()[entry_idx];
        let words = single_word_keywords(&catalog, entry_idx);
        let keyword = pick.get(&words);

        let before = score(&text, entry);
        let after = score(&format!("{} {}", text, keyword), entry);
        prop_assert!(after >= before, "{} -> {} after adding {:?}", before, after, keyword);
    }

    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z0-9ÑÁÉñáé .,;:!?_\t-]{0,120}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn winner_has_maximum_score(text in "[a-z0-9 ]{1,80}") {
        let classifier = Classifier::reference();
        let result = classifier.classify(&text, None);
        if result.basis == Basis::Keywords {
            let scores = classifier.scores(&text, None);
            let max = scores.iter().map(|s| s.score).fold(0.0_f64, f64::max);
            prop_assert_eq!(result.confidence, max);
            let first_max = scores.iter().find(|s| s.score == max).map(|s| s.category.id);
            prop_assert_eq!(result.category_id(), first_max);
        }
    }
}
