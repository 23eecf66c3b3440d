//! Custom test assertions

use tutorhub_resilience::{CategorizedError, ErrorCategory, MessageCatalog};

/// Assertions for CategorizedError
pub trait CategorizedErrorAssertions {
    /// Assert the category and the catalog message that goes with it
    fn assert_categorized_as(&self, category: ErrorCategory);

    /// Assert the user message does not leak the internal message
    fn assert_user_safe(&self);
}

impl CategorizedErrorAssertions for CategorizedError {
    fn assert_categorized_as(&self, category: ErrorCategory) {
        assert_eq!(
            self.category(),
            category,
            "Expected {} for {:?}, got {}",
            category,
            self.message(),
            self.category()
        );
        assert_eq!(
            self.user_message(),
            MessageCatalog::default().for_category(category)
        );
    }

    fn assert_user_safe(&self) {
        if !self.message().is_empty() {
            assert!(
                !self.user_message().contains(self.message()),
                "User message leaks internal text: {:?}",
                self.user_message()
            );
        }
    }
}
