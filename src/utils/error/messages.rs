//! Localized user-facing messages
//!
//! Only these strings ever reach a notification sink.

use super::categorized::ErrorCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub network: String,
    pub session_expired: String,
    pub forbidden: String,
    pub database: String,
    pub validation: String,
    pub business_logic: String,
    pub unexpected: String,
    pub unknown: String,
    pub timeout: String,
    pub connection_restored: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            network: "Connection problem. Check your internet connection and try again."
                .to_string(),
            session_expired: "Your session has expired. Please sign in again.".to_string(),
            forbidden: "You don't have permission to perform this action.".to_string(),
            database: "We couldn't save or load your data. Please try again.".to_string(),
            validation: "Some of the information entered is not valid.".to_string(),
            business_logic: "This action can't be completed right now.".to_string(),
            unexpected: "An unexpected error occurred. Please try again.".to_string(),
            unknown: "Something went wrong. Please try again.".to_string(),
            timeout: "The operation timed out. Please try again.".to_string(),
            connection_restored: "Connection restored.".to_string(),
        }
    }
}

impl MessageCatalog {
    pub fn spanish() -> Self {
        Self {
            network: "Error de conexión. Verifica tu conexión a internet e inténtalo de nuevo."
                .to_string(),
            session_expired: "Tu sesión ha expirado. Inicia sesión nuevamente.".to_string(),
            forbidden: "No tienes permisos para realizar esta acción.".to_string(),
            database: "No pudimos guardar o cargar tus datos. Inténtalo de nuevo.".to_string(),
            validation: "Algunos de los datos ingresados no son válidos.".to_string(),
            business_logic: "Esta acción no se puede completar en este momento.".to_string(),
            unexpected: "Ocurrió un error inesperado. Inténtalo de nuevo.".to_string(),
            unknown: "Algo salió mal. Inténtalo de nuevo.".to_string(),
            timeout: "La operación tardó demasiado. Inténtalo de nuevo.".to_string(),
            connection_restored: "Conexión restablecida.".to_string(),
        }
    }

    pub fn for_category(&self, category: ErrorCategory) -> &str {
        match category {
            ErrorCategory::Network => &self.network,
            ErrorCategory::Authentication => &self.session_expired,
            ErrorCategory::Authorization => &self.forbidden,
            ErrorCategory::Database => &self.database,
            ErrorCategory::Validation => &self.validation,
            ErrorCategory::BusinessLogic => &self.business_logic,
            ErrorCategory::Runtime => &self.unexpected,
            ErrorCategory::Unknown => &self.unknown,
        }
    }

    /// Every message with its field name
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("network", &self.network),
            ("session_expired", &self.session_expired),
            ("forbidden", &self.forbidden),
            ("database", &self.database),
            ("validation", &self.validation),
            ("business_logic", &self.business_logic),
            ("unexpected", &self.unexpected),
            ("unknown", &self.unknown),
            ("timeout", &self.timeout),
            ("connection_restored", &self.connection_restored),
        ]
    }
}
