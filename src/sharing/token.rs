//! Share token sources

use crate::utils::auth::crypto::{MIN_TOKEN_BYTES, generate_url_safe_token};

/// Source of share link tokens
pub trait TokenGenerator: Send + Sync + std::fmt::Debug {
    /// A fresh URL-safe token. Uniqueness is checked by the caller.
    fn generate(&self) -> String;
}

/// OS-random tokens, base64 URL-safe without padding
#[derive(Debug, Clone)]
pub struct RandomTokenGenerator {
    bytes: usize,
}

impl RandomTokenGenerator {
    /// Entropy below 128 bits is raised to 128 bits
    pub fn new(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(MIN_TOKEN_BYTES),
        }
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new(32)
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        generate_url_safe_token(self.bytes)
    }
}
