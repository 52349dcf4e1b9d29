//! Numeric error codes carried in every [`ErrorResponse`](super::ErrorResponse).
//!
//! The integer is stable and meant for clients and dashboards; the default
//! message is what end users see when a handler has nothing more specific.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    /// Malformed query or path parameter
    InvalidParameter,
    /// Body is not valid JSON or has the wrong shape
    InvalidJson,
    NotFound,
    Unauthorized,
    Forbidden,

    // Server errors
    InternalError,
    ServiceUnavailable,

    /// The document store failed (2000-2999)
    DatabaseError,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidParameter => 1002,
            ErrorCode::InvalidJson => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::InternalError => 1005,
            ErrorCode::Unauthorized => 1006,
            ErrorCode::Forbidden => 1007,
            ErrorCode::ServiceUnavailable => 1008,
            ErrorCode::DatabaseError => 2001,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "La solicitud no superó la validación",
            ErrorCode::InvalidParameter => "Parámetro inválido",
            ErrorCode::InvalidJson => "El cuerpo de la solicitud no es un JSON válido",
            ErrorCode::NotFound => "Recurso no encontrado",
            ErrorCode::Unauthorized => "Autenticación requerida",
            ErrorCode::Forbidden => "Acceso no autorizado",
            ErrorCode::ServiceUnavailable => "Servicio no disponible",
            ErrorCode::InternalError | ErrorCode::DatabaseError => "Error interno del servidor",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 9] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidParameter,
        ErrorCode::InvalidJson,
        ErrorCode::NotFound,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::InternalError,
        ErrorCode::ServiceUnavailable,
        ErrorCode::DatabaseError,
    ];

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<i32> = ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn test_serializes_like_as_str() {
        for code in ALL {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }

    #[test]
    fn test_store_failures_share_generic_message() {
        assert_eq!(
            ErrorCode::DatabaseError.default_message(),
            ErrorCode::InternalError.default_message()
        );
        assert_eq!(ErrorCode::Forbidden.default_message(), "Acceso no autorizado");
    }
}
