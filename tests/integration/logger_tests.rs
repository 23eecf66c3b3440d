//! Logger integration tests

#[cfg(test)]
mod tests {
    use crate::common::TestStack;
    use tutorhub_resilience::config::LoggingConfig;
    use tutorhub_resilience::{Environment, HandleOptions, LogContext, LogLevel, Logger};

    #[test]
    fn test_set_level_error_filters_lower_levels() {
        let logger = Logger::development();
        logger.set_level(LogLevel::Error);

        logger.debug("d", None, None);
        logger.info("i", None, None);
        logger.warn("w", None, None);
        assert!(logger.is_empty());

        logger.error("e", None, None);
        logger.fatal("f", None, None);
        let levels: Vec<_> = logger
            .get_recent_logs(None)
            .into_iter()
            .map(|entry| entry.level)
            .collect();
        assert_eq!(levels, vec![LogLevel::Error, LogLevel::Fatal]);
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let logger = Logger::new(&LoggingConfig::default(), Environment::Development);
        for i in 0..1100 {
            logger.info(&format!("entry {}", i), None, None);
        }

        let logs = logger.get_recent_logs(None);
        assert_eq!(logs.len(), 1000);
        assert_eq!(logs.first().unwrap().message, "entry 100");
        assert_eq!(logs.last().unwrap().message, "entry 1099");
    }

    #[test]
    fn test_export_is_valid_json() {
        let logger = Logger::development();
        logger.warn(
            "slow response",
            Some(LogContext::component("TutorList").with_metadata("ms", 1800)),
            None,
        );

        let exported: serde_json::Value = serde_json::from_str(&logger.export_logs()).unwrap();
        let entries = exported.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["level"], "WARN");
        assert_eq!(entries[0]["context"]["component"], "TutorList");
    }

    #[tokio::test]
    async fn test_shared_logger_sees_handler_entries() {
        let stack = TestStack::development();
        stack.logger.info("page mounted", None, None);
        stack
            .handler
            .handle_error("weird", HandleOptions::quiet())
            .await;

        let messages: Vec<_> = stack
            .logger
            .get_recent_logs(None)
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(messages, vec!["page mounted", "weird"]);
    }

    #[test]
    fn test_isolated_instances_do_not_share_state() {
        let first = Logger::development();
        let second = Logger::development();
        first.error("only here", None, None);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}
