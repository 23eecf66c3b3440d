//! Configuration integration tests

#[cfg(test)]
mod tests {
    use crate::common::TestStack;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tutorhub_resilience::{
        Environment, ErrorCategory, HandleOptions, MessageCatalog, Resilience, ResilienceConfig,
        ResilienceError,
    };

    #[tokio::test]
    async fn test_resilience_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
environment: development
retry:
  max_retries: 4
recovery:
  login_path: "/ingresar"
messages:
  network: "Sin conexión"
"#
        )
        .unwrap();

        let resilience = Resilience::from_file(file.path()).await.unwrap();
        assert_eq!(resilience.config().environment, Environment::Development);
        assert_eq!(resilience.runner().retry_options().max_retries, 4);

        let err = resilience
            .handler()
            .handle_error("Failed to fetch", HandleOptions::quiet())
            .await;
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.user_message(), "Sin conexión");
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "retry:\n  backoff_multiplier: 0.5\n").unwrap();

        let result = Resilience::from_file(file.path()).await;
        assert!(matches!(result, Err(ResilienceError::Config(_))));
    }

    #[tokio::test]
    async fn test_spanish_catalog_reaches_notifications() {
        let config = ResilienceConfig {
            messages: MessageCatalog::spanish(),
            ..ResilienceConfig::development()
        };
        let stack = TestStack::new(config);

        stack
            .handler
            .handle_error("permission denied for table tutors", HandleOptions::new())
            .await;

        assert_eq!(
            stack.notifier.notifications()[0].1,
            MessageCatalog::spanish().forbidden
        );
    }

    #[tokio::test]
    async fn test_custom_login_path() {
        let mut config = ResilienceConfig::development();
        config.recovery.login_path = "/auth".to_string();
        let stack = TestStack::new(config);

        stack
            .handler
            .handle_error("invalid token", HandleOptions::new().show_toast(false))
            .await;
        assert_eq!(stack.navigator.last().as_deref(), Some("/auth"));
    }
}
