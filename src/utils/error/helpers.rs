//! Helper functions for creating specific error types

use super::types::AccessError;

impl AccessError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Stable code exposed to RPC callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Database(_)
            | Self::Crypto(_)
            | Self::Serialization(_)
            | Self::Yaml(_)
            | Self::Io(_)
            | Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the error is a caller-facing outcome rather than an
    /// infrastructure failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Forbidden(_)
                | Self::Unauthorized(_)
                | Self::BadRequest(_)
                | Self::Conflict(_)
                | Self::InvalidState(_)
        )
    }

    /// Human-readable reason without the variant prefix
    pub fn reason(&self) -> String {
        match self {
            Self::NotFound(m)
            | Self::Forbidden(m)
            | Self::Unauthorized(m)
            | Self::BadRequest(m)
            | Self::Conflict(m)
            | Self::InvalidState(m)
            | Self::Config(m)
            | Self::Crypto(m)
            | Self::Internal(m) => m.clone(),
            other => other.to_string(),
        }
    }
}
