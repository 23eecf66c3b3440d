//! Integration tests for tutorhub-resilience
//!
//! These tests verify the interaction between the categorizer, handler,
//! logger, recovery strategies and async wrappers.

pub mod categorizer_properties;
pub mod config_tests;
pub mod error_handling_tests;
pub mod http_error_tests;
pub mod logger_tests;
