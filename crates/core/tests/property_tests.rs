use std::collections::BTreeMap;

use proptest::prelude::*;
use wordfreq_core::normalize::{normalize_in_place, normalize_scalar, runs};
use wordfreq_core::{CollisionPolicy, CountConfig, WordCounter};

/// Lowercased words of `input`, split on every non-letter byte.
fn reference_counts(input: &[u8]) -> BTreeMap<Vec<u8>, u32> {
    let mut counts = BTreeMap::new();
    for word in input.split(|b| !b.is_ascii_alphabetic()).filter(|w| !w.is_empty()) {
        *counts.entry(word.to_ascii_lowercase()).or_insert(0) += 1;
    }
    counts
}

fn text() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(("[a-dA-D]{1,4}", "[ ,.!0-9\n]{1,3}"), 0..80).prop_map(|parts| {
        parts
            .into_iter()
            .flat_map(|(word, gap)| word.into_bytes().into_iter().chain(gap.into_bytes()))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn vector_normalization_matches_scalar(mut bytes in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut expected = bytes.clone();
        normalize_scalar(&mut expected);
        normalize_in_place(&mut bytes);
        prop_assert_eq!(bytes, expected);
    }

    #[test]
    fn counts_match_a_plain_map(input in prop_oneof![text(), prop::collection::vec(any::<u8>(), 0..400)]) {
        let mut counter = WordCounter::new(CountConfig::default()).unwrap();
        counter.count(&input).unwrap();
        let expected = reference_counts(&input);

        let entries = counter.ranked().unwrap();
        let got: BTreeMap<Vec<u8>, u32> =
            entries.iter().map(|e| (e.word.to_vec(), e.count)).collect();
        // one line per distinct word
        prop_assert_eq!(got.len(), entries.len());
        prop_assert_eq!(&got, &expected);

        let total: u64 = entries.iter().map(|e| u64::from(e.count)).sum();
        let mut normalized = input.clone();
        normalize_in_place(&mut normalized);
        prop_assert_eq!(total, runs(&normalized).count() as u64);
        prop_assert_eq!(counter.summary().words, total);
    }

    #[test]
    fn ranking_is_totally_ordered(input in text()) {
        let mut counter = WordCounter::new(CountConfig::default()).unwrap();
        counter.count(&input).unwrap();
        let entries = counter.ranked().unwrap();
        for pair in entries.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.count > b.count || (a.count == b.count && a.word < b.word));
        }
    }

    #[test]
    fn output_is_deterministic(input in text()) {
        let render = |input: &[u8]| {
            let mut counter = WordCounter::new(CountConfig::default()).unwrap();
            counter.count(input).unwrap();
            counter
                .ranked()
                .unwrap()
                .iter()
                .map(|e| format!("{} {}\n", e.count, e.word_str()))
                .collect::<String>()
        };
        prop_assert_eq!(render(&input), render(&input));
    }

    #[test]
    fn arena_keeps_the_first_spelling_lowered(input in text()) {
        let mut counter = WordCounter::new(CountConfig::default()).unwrap();
        counter.count(&input).unwrap();
        let table = counter.table();
        let mut normalized = input.clone();
        normalize_in_place(&mut normalized);
        let mut first_seen = Vec::new();
        for word in runs(&normalized) {
            if !first_seen.contains(&word) {
                first_seen.push(word);
            }
        }
        // arena order is first-insertion order
        let mut offsets: Vec<u32> = table
            .occupied()
            .map(|(bucket, slot, _)| table.index().get(bucket, slot))
            .collect();
        offsets.sort_unstable();
        let stored: Vec<&[u8]> = offsets
            .iter()
            .map(|&offset| table.arena().word(offset).unwrap())
            .collect();
        prop_assert_eq!(stored, first_seen);
    }

    #[test]
    fn probing_policy_agrees_with_fatal_policy(input in text()) {
        let mut fatal = WordCounter::new(CountConfig::default()).unwrap();
        let mut probing = WordCounter::new(CountConfig {
            order: 8,
            slots: 4,
            policy: CollisionPolicy::LinearProbing,
            ..CountConfig::default()
        })
        .unwrap();
        fatal.count(&input).unwrap();
        probing.count(&input).unwrap();
        prop_assert_eq!(fatal.ranked().unwrap(), probing.ranked().unwrap());
    }
}

#[test]
fn reused_session_matches_a_fresh_one() {
    let mut counter = WordCounter::new(CountConfig::default()).unwrap();
    counter.count(b"stale words here").unwrap();
    counter.reset();
    counter.count(b"The cat sat on the mat. The CAT ran.").unwrap();

    let mut fresh = WordCounter::new(CountConfig::default()).unwrap();
    fresh.count(b"The cat sat on the mat. The CAT ran.").unwrap();
    assert_eq!(counter.ranked().unwrap(), fresh.ranked().unwrap());
}
