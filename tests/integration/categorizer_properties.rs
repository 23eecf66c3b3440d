//! Property-based tests for the categorizer

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tutorhub_resilience::config::LoggingConfig;
    use tutorhub_resilience::{
        Environment, ErrorCategorizer, ErrorCategory, ErrorDetails, Logger, RawError,
    };

    // ==================== Test Generators ====================

    fn message_strategy() -> impl Strategy<Value = String> {
        ".{0,80}"
    }

    fn raw_error_strategy() -> impl Strategy<Value = RawError> {
        prop_oneof![
            message_strategy().prop_map(RawError::Value),
            (
                message_strategy(),
                proptest::option::of(100u16..600),
                proptest::option::of("[0-9A-Z]{5}"),
            )
                .prop_map(|(message, status, code)| {
                    let mut details = ErrorDetails::new(message);
                    details.status = status;
                    details.code = code;
                    RawError::Error(details)
                }),
        ]
    }

    fn network_keyword() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("fetch"),
            Just("Failed to fetch"),
            Just("NETWORK"),
            Just("network request failed"),
        ]
    }

    proptest! {
        #[test]
        fn categorize_is_total_and_idempotent(raw in raw_error_strategy()) {
            let categorizer = ErrorCategorizer::default();
            let first = categorizer.categorize(raw);
            prop_assert!(ErrorCategory::ALL.contains(&first.category()));

            let second = categorizer.categorize(first.clone());
            prop_assert_eq!(second.category(), first.category());
            prop_assert_eq!(second.severity(), first.severity());
            prop_assert_eq!(second.message(), first.message());
        }

        #[test]
        fn fetch_or_network_messages_are_network(
            prefix in "[a-z ]{0,20}",
            keyword in network_keyword(),
            suffix in "[a-z ]{0,20}",
            code in proptest::option::of("[0-9A-Z]{5}"),
            structured in any::<bool>(),
        ) {
            let message = format!("{}{}{}", prefix, keyword, suffix);
            let categorizer = ErrorCategorizer::default();
            let err = if structured {
                let mut details = ErrorDetails::new(message);
                details.code = code;
                categorizer.categorize(details)
            } else {
                categorizer.categorize(message)
            };
            prop_assert_eq!(err.category(), ErrorCategory::Network);
            prop_assert!(err.is_recoverable());
        }

        #[test]
        fn status_403_is_always_authorization(message in message_strategy()) {
            let err = ErrorCategorizer::default()
                .categorize(ErrorDetails::new(message).with_status(403));
            prop_assert_eq!(err.category(), ErrorCategory::Authorization);
            prop_assert!(!err.is_recoverable());
        }

        #[test]
        fn user_message_comes_from_catalog(raw in raw_error_strategy()) {
            let categorizer = ErrorCategorizer::default();
            let err = categorizer.categorize(raw);
            prop_assert_eq!(
                err.user_message(),
                categorizer.messages().for_category(err.category())
            );
        }

        #[test]
        fn logger_never_exceeds_capacity(capacity in 1usize..64, inserts in 0usize..200) {
            let config = LoggingConfig { capacity, ..LoggingConfig::default() };
            let logger = Logger::new(&config, Environment::Production);
            for i in 0..inserts {
                logger.error(&format!("entry {}", i), None, None);
            }
            prop_assert_eq!(logger.len(), inserts.min(capacity));
        }
    }
}
