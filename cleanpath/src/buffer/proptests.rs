//! Property-based tests for buffer operations.

use super::*;
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..200)
}

fn assert_invariant(buffer: &mut Buffer, registry: &Registry) -> std::result::Result<(), TestCaseError> {
    let len = buffer.length(registry);
    let block = registry.block(buffer.handle()).unwrap();
    prop_assert!(len < buffer.capacity());
    prop_assert_eq!(block.len(), buffer.capacity());
    prop_assert!(block[len..].iter().all(|&b| b == 0));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Copying text in and reading it back gives the text cut at its first
    // NUL or at the limit, whichever is shorter.
    #[test]
    fn copy_round_trip(text in text_strategy(), limit in 0usize..250) {
        let mut registry = Registry::new();
        let mut buffer = Buffer::new(&mut registry, 0).unwrap();
        buffer.copy_bytes(&mut registry, &text, limit).unwrap();

        let expected = &text[..bounded_len(&text, limit)];
        prop_assert_eq!(buffer.as_bytes(&registry), expected);
        assert_invariant(&mut buffer, &registry)?;
    }

    // The length invariant holds after any sequence of appends and splices.
    #[test]
    fn length_invariant_after_mutation(
        pieces in prop::collection::vec(text_strategy(), 1..6),
        cuts in prop::collection::vec((0usize..300, 0usize..300), 0..6),
    ) {
        let mut registry = Registry::new();
        let mut buffer = Buffer::new(&mut registry, 0).unwrap();
        for piece in &pieces {
            buffer.append_bytes(&mut registry, piece, usize::MAX).unwrap();
            assert_invariant(&mut buffer, &registry)?;
        }
        for (from, to) in cuts {
            let before = buffer.as_bytes(&registry).to_vec();
            let removed = buffer.splice(&mut registry, from, to, None).unwrap();
            assert_invariant(&mut buffer, &registry)?;

            match removed {
                Some(count) => {
                    let end = to.min(before.len());
                    let mut expected = before[..from].to_vec();
                    expected.extend_from_slice(&before[end..]);
                    prop_assert_eq!(count, end - from);
                    prop_assert_eq!(buffer.as_bytes(&registry), expected.as_slice());
                }
                None => prop_assert_eq!(buffer.as_bytes(&registry), before.as_slice()),
            }
        }
        prop_assert_eq!(registry.live_blocks(), 1);
    }
}
