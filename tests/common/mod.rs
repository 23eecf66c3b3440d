//! Common test utilities for tutorhub-resilience
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::TestStack;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let stack = TestStack::development();
//!     let value = stack.runner.handle_async(|| async { Ok::<_, String>(1) }, Default::default()).await;
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::CategorizedErrorAssertions;
pub use fixtures::{RawErrorFactory, TestStack};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
