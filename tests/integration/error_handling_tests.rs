//! Error handling integration tests
//!
//! Raw failures flowing through the categorizer, handler, logger and
//! recovery registry together.

#[cfg(test)]
mod tests {
    use crate::common::{CategorizedErrorAssertions, RawErrorFactory, TestStack};
    use std::sync::Arc;
    use std::time::Duration;
    use tutorhub_resilience::utils::error::FnStrategy;
    use tutorhub_resilience::{
        CategorizedError, ErrorCategory, ErrorSeverity, HandleOptions, LogContext, LogLevel,
        NotificationKind, ResilienceError,
    };

    // ==================== Categorization through the handler ====================

    #[tokio::test]
    async fn test_failed_to_fetch_flow() {
        let stack = TestStack::development();
        let err = stack
            .handler
            .handle_error(RawErrorFactory::failed_to_fetch(), HandleOptions::new())
            .await;

        err.assert_categorized_as(ErrorCategory::Network);
        err.assert_user_safe();
        assert!(err.is_recoverable());
        assert_eq!(stack.logger.get_logs_by_level(LogLevel::Error).len(), 1);
        assert_eq!(stack.notifier.messages_of(NotificationKind::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_expired_session_redirects() {
        let stack = TestStack::development();
        let err = stack
            .handler
            .handle_error(RawErrorFactory::jwt_expired(), HandleOptions::new())
            .await;

        err.assert_categorized_as(ErrorCategory::Authentication);
        assert_eq!(stack.navigator.redirects(), vec!["/login"]);
    }

    #[tokio::test]
    async fn test_forbidden_is_not_recovered() {
        let stack = TestStack::development();
        let err = stack
            .handler
            .handle_error(RawErrorFactory::row_level_security(), HandleOptions::new())
            .await;

        err.assert_categorized_as(ErrorCategory::Authorization);
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(stack.navigator.redirects().is_empty());
        assert_eq!(stack.handler.error_stats().recoveries_attempted, 0);
    }

    #[tokio::test]
    async fn test_unique_violation_is_database() {
        let stack = TestStack::development();
        let err = stack
            .handler
            .handle_error(RawErrorFactory::unique_violation(), HandleOptions::quiet())
            .await;

        err.assert_categorized_as(ErrorCategory::Database);
        assert_eq!(err.code(), Some("23505"));
        let entry = &stack.logger.get_logs_by_level(LogLevel::Error)[0];
        assert!(entry.message.contains("bookings_pkey"));
    }

    #[tokio::test]
    async fn test_type_error_is_runtime() {
        let stack = TestStack::development();
        let err = stack
            .handler
            .handle_error(RawErrorFactory::type_error(), HandleOptions::new())
            .await;

        err.assert_categorized_as(ErrorCategory::Runtime);
        err.assert_user_safe();
        assert_eq!(stack.logger.get_logs_by_level(LogLevel::Warn).len(), 1);
    }

    #[tokio::test]
    async fn test_anyhow_error_flow() {
        let stack = TestStack::development();
        let source = anyhow::anyhow!("relation \"tutors\" does not exist")
            .context("postgres query failed");
        let err = stack
            .handler
            .handle_error(source, HandleOptions::quiet())
            .await;

        assert_eq!(err.category(), ErrorCategory::Database);
        assert!(err.message().contains("tutors"));
        assert!(!err.user_message().contains("tutors"));
    }

    #[tokio::test]
    async fn test_categorized_error_inside_anyhow_is_not_reclassified() {
        let stack = TestStack::development();
        let original = CategorizedError::business_logic("tutor is fully booked")
            .with_user_message("This tutor has no free slots.");
        let err = stack
            .handler
            .handle_error(anyhow::Error::new(original), HandleOptions::new())
            .await;

        assert_eq!(err.category(), ErrorCategory::BusinessLogic);
        assert_eq!(
            stack.notifier.messages_of(NotificationKind::Error),
            vec!["This tutor has no free slots."]
        );
    }

    // ==================== Context and logging ====================

    #[tokio::test]
    async fn test_call_site_context_reaches_log() {
        let stack = TestStack::development();
        stack
            .handler
            .handle_error(
                RawErrorFactory::unique_violation(),
                HandleOptions::quiet().with_context(
                    LogContext::component("BookingForm")
                        .with_action("submit")
                        .with_metadata("tutor_id", 17),
                ),
            )
            .await;

        let entry = &stack.logger.get_recent_logs(Some(1))[0];
        let ctx = entry.context.as_ref().unwrap();
        assert_eq!(ctx.component.as_deref(), Some("BookingForm"));
        assert_eq!(ctx.metadata["tutor_id"], serde_json::json!(17));
        assert_eq!(ctx.metadata["code"], serde_json::json!("23505"));
        assert!(entry.error.as_deref().unwrap().contains("duplicate key"));
    }

    #[tokio::test]
    async fn test_production_logger_keeps_warn_and_above() {
        let stack = TestStack::production();
        stack
            .handler
            .handle_error(CategorizedError::validation("bad email"), HandleOptions::quiet())
            .await;
        stack
            .handler
            .handle_error(RawErrorFactory::failed_to_fetch(), HandleOptions::quiet())
            .await;

        let logs = stack.logger.get_recent_logs(None);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].level, LogLevel::Error);
    }

    // ==================== Recovery ====================

    #[tokio::test(start_paused = true)]
    async fn test_connectivity_restored_notification() {
        let stack = TestStack::development();
        stack.connectivity.set_online(true);

        stack
            .handler
            .handle_error(RawErrorFactory::failed_to_fetch(), HandleOptions::new())
            .await;
        assert_eq!(stack.notifier.len(), 1);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(
            stack.notifier.messages_of(NotificationKind::Info),
            vec!["Connection restored."]
        );
    }

    #[tokio::test]
    async fn test_custom_strategy_runs_after_defaults() {
        let stack = TestStack::development();
        stack
            .handler
            .register_recovery_strategy(Arc::new(FnStrategy::new(
                "refresh stale cache",
                |err: &CategorizedError| err.category() == ErrorCategory::Database,
                |_err| async { Err(ResilienceError::recovery("cache locked")) },
            )));

        let err = stack
            .handler
            .handle_error(
                RawErrorFactory::unique_violation(),
                HandleOptions::quiet().attempt_recovery(true),
            )
            .await;

        assert_eq!(err.category(), ErrorCategory::Database);
        let stats = stack.handler.error_stats();
        assert_eq!(stats.recoveries_attempted, 1);
        assert_eq!(stats.recoveries_failed, 1);
        assert!(stack
            .logger
            .get_logs_by_level(LogLevel::Error)
            .iter()
            .any(|entry| entry.message == "Recovery strategy failed"));
    }
}
