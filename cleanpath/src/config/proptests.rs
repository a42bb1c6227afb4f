//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use super::validator::ConfigValidator;
use crate::filter::CheckMode;
use proptest::prelude::*;

fn check_strategy() -> impl Strategy<Value = CheckMode> {
    prop_oneof![
        Just(CheckMode::None),
        Just(CheckMode::Exists),
        Just(CheckMode::File),
        Just(CheckMode::Dir),
    ]
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(prop::sample::select(vec![':', ';', ',', ' ', '|'])),
        prop::option::of(check_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of("[A-Z_]{1,12}"),
        prop::option::of(1usize..1_000_000),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(delimiter, check, before, variable, size_limit, disable_size_limit)| Config {
                delimiter,
                check,
                before,
                variable,
                size_limit,
                disable_size_limit,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher layer wins, every other field is kept.
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.delimiter, high.delimiter.or(low.delimiter));
        prop_assert_eq!(merged.check, high.check.or(low.check));
        prop_assert_eq!(merged.before, high.before.or(low.before));
        prop_assert_eq!(merged.variable, high.variable.or(low.variable));
        prop_assert_eq!(merged.size_limit, high.size_limit.or(low.size_limit));
        prop_assert_eq!(
            merged.disable_size_limit,
            high.disable_size_limit.or(low.disable_size_limit)
        );
    }

    // Merging a config into itself changes nothing.
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Valid configurations always resolve.
    #[test]
    fn valid_config_resolves(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
        let options = config.resolve().unwrap();
        prop_assert_eq!(options.size_limit.is_none(), config.disable_size_limit == Some(true));
    }
}
