//! Property tests for the control file.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use proptest::prelude::*;
use ssgc::{ConfigError, GeneratorConfig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Rendered settings parse back to themselves.
    #[test]
    fn prop_render_round_trips(generate in any::<bool>(), debug in any::<bool>()) {
        let config = GeneratorConfig { generate, debug };
        prop_assert_eq!(GeneratorConfig::parse(&config.to_string()).unwrap(), config);
    }

    /// Any non-zero integer switches a setting on, whitespace and unknown
    /// keys notwithstanding.
    #[test]
    fn prop_integer_values(
        value in any::<i64>(),
        pad in "[ \t]{0,3}",
        unknown in "[a-z]{3,8}",
    ) {
        prop_assume!(unknown != "debug" && unknown != "generate");
        let text = format!("{pad}debug{pad}={pad}{value}{pad}\n\n{unknown}=5\n");
        let config = GeneratorConfig::parse(&text).unwrap();
        prop_assert_eq!(config.debug, value != 0);
        prop_assert!(config.generate);
    }

    /// Lines without `=` are always rejected with their line number.
    #[test]
    fn prop_missing_equals_is_rejected(line in "[a-z]{1,10}", blank_lines in 0usize..4) {
        let text = format!("{}{line}\n", "\n".repeat(blank_lines));
        match GeneratorConfig::parse(&text) {
            Err(ConfigError::Parse { line: number, .. }) => prop_assert_eq!(number, blank_lines + 1),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
