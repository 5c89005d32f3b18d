//! Session credential with truncated Debug/Display output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Number of leading characters that may appear in diagnostics.
const PREVIEW_CHARS: usize = 8;

/// A bearer session token that never exposes its full value in logs or debug output.
#[derive(Clone)]
pub struct SessionToken {
    inner: String,
}

impl SessionToken {
    /// Wrap a session token, rejecting empty or whitespace-only values.
    #[track_caller]
    pub fn new(token: impl Into<String>) -> Result<Self, RedactError> {
        let inner = token.into().trim().to_string();

        if inner.is_empty() {
            return Err(RedactError::Empty {
                message: String::from("session token is empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { inner })
    }

    /// Get the actual token value for transmission.
    ///
    /// # Security Note
    /// Only call this when actually building the outbound request headers.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Leading characters followed by an ellipsis (safe to log).
    pub fn preview(&self) -> String {
        let head: String = self.inner.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }

    /// Get the token length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.preview())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.preview())
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for SessionToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("SessionToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
