//! Property-based tests for list compaction and the token walk.

use super::*;
use crate::buffer::{Buffer, Registry};
use crate::filter::KeepAll;
use proptest::prelude::*;

/// Lists over a small alphabet so duplicates and delimiter runs are common.
fn list_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b':', b':', b'a', b'b', b'/', b'c']), 0..80)
}

fn tokens(text: &[u8]) -> Vec<&[u8]> {
    text.split(|&b| b == b':').filter(|t| !t.is_empty()).collect()
}

fn compact(text: &[u8]) -> Vec<u8> {
    let mut registry = Registry::new();
    let mut buffer = Buffer::from_bytes(&mut registry, text).unwrap();
    compact_runs(&mut registry, &mut buffer, b':');
    buffer.as_bytes(&registry).to_vec()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn compaction_is_idempotent(text in list_strategy()) {
        let once = compact(&text);
        prop_assert_eq!(compact(&once), once);
    }

    // Compaction keeps every non-empty token in order and nothing else.
    #[test]
    fn compaction_preserves_tokens(text in list_strategy()) {
        let once = compact(&text);
        prop_assert_eq!(tokens(&once), tokens(&text));
        prop_assert!(!once.windows(2).any(|w| w == b"::"));
        prop_assert!(once.first() != Some(&b':'));
        prop_assert!(once.last() != Some(&b':'));
    }

    // Each token survives exactly once, at its leftmost position, or not
    // at all when the filter rejects it.
    #[test]
    fn dedupe_keeps_leftmost_occurrence(text in list_strategy(), reject_b in any::<bool>()) {
        let mut registry = Registry::new();
        let mut buffer = Buffer::from_bytes(&mut registry, &text).unwrap();
        compact_runs(&mut registry, &mut buffer, b':');

        let mut filter = |token: &[u8]| !(reject_b && token.contains(&b'b'));
        walk_and_clean(&mut registry, &mut buffer, b':', &mut filter).unwrap();

        let mut expected: Vec<&[u8]> = Vec::new();
        for token in tokens(&text) {
            if !expected.contains(&token) {
                expected.push(token);
            }
        }
        expected.retain(|token| !(reject_b && token.contains(&b'b')));

        prop_assert_eq!(tokens(buffer.as_bytes(&registry)), expected);
    }

    #[test]
    fn walk_leaves_no_trailing_delimiter(text in list_strategy()) {
        let mut registry = Registry::new();
        let mut buffer = Buffer::from_bytes(&mut registry, &text).unwrap();
        compact_runs(&mut registry, &mut buffer, b':');
        walk_and_clean(&mut registry, &mut buffer, b':', &mut KeepAll).unwrap();

        let mut result = buffer.as_bytes(&registry).to_vec();
        prop_assert!(result.last() != Some(&b':'));

        let len = buffer.length(&registry);
        let block = registry.block(buffer.handle()).unwrap();
        prop_assert!(block[len..].iter().all(|&b| b == 0));

        result.push(b':');
        prop_assert_eq!(compact(&result), buffer.as_bytes(&registry));
    }
}
