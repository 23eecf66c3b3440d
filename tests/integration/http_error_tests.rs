//! HTTP failure categorization
//!
//! Real `reqwest` errors produced against a `wiremock` server.

#[cfg(test)]
mod tests {
    use crate::common::TestStack;
    use std::time::Duration;
    use tutorhub_resilience::{ErrorCategorizer, ErrorCategory, HandleOptions, RetryOptions};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn failing_status(status: u16) -> reqwest::Error {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/bookings"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        reqwest::get(format!("{}/rest/v1/bookings", server.uri()))
            .await
            .expect("server reachable")
            .error_for_status()
            .expect_err("status should be an error")
    }

    #[tokio::test]
    async fn test_401_is_authentication() {
        let err = ErrorCategorizer::default().categorize(failing_status(401).await);
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(err.code(), Some("401"));
    }

    #[tokio::test]
    async fn test_403_is_authorization() {
        let err = ErrorCategorizer::default().categorize(failing_status(403).await);
        assert_eq!(err.category(), ErrorCategory::Authorization);
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_500_is_runtime() {
        let err = ErrorCategorizer::default().categorize(failing_status(500).await);
        assert_eq!(err.category(), ErrorCategory::Runtime);
        assert_eq!(err.code(), Some("500"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network() {
        // nothing listens on the discard port
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .expect_err("connection should fail");

        let categorized = ErrorCategorizer::default().categorize(err);
        assert_eq!(categorized.category(), ErrorCategory::Network);
        assert!(categorized.is_recoverable());
    }

    #[tokio::test]
    async fn test_handle_async_over_http() {
        let stack = TestStack::development();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let url = format!("{}/sessions", server.uri());

        let body = stack
            .runner
            .handle_async(
                || async move { reqwest::get(url).await?.error_for_status()?.text().await },
                HandleOptions::new(),
            )
            .await;

        assert!(body.is_none());
        assert_eq!(stack.navigator.redirects(), vec!["/login"]);
    }

    #[tokio::test]
    async fn test_retry_recovers_after_transient_status() {
        let stack = TestStack::development();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tutors"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tutors"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;
        let url = format!("{}/tutors", server.uri());

        let body = stack
            .runner
            .retry_async(
                || {
                    let url = url.clone();
                    async move { reqwest::get(url).await?.error_for_status()?.text().await }
                },
                RetryOptions::new()
                    .max_retries(3)
                    .delay(Duration::from_millis(5))
                    .should_retry(|err, _| err.code() == Some("503")),
            )
            .await;

        assert_eq!(body.unwrap(), "[]");
    }
}
