//! Identity handles supplied during the wishlist identify exchange.

use thiserror::Error;

/// Errors that can occur when parsing an [`IdentityHandle`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The input string is empty or whitespace-only.
    #[error("identity cannot be empty")]
    Empty,
}

/// A contact handle a visitor supplies to claim their wishlist.
///
/// Classification mirrors the wishlist service: anything containing an `@`
/// is an email, everything else is treated as a phone number. No further
/// validation happens client-side; the service owns the canonical record.
///
/// ## Examples
///
/// ```
/// use deco_estilos_core::IdentityHandle;
///
/// assert!(IdentityHandle::parse("a@b.com").unwrap().is_email());
/// assert!(IdentityHandle::parse("+34 600 000 000").unwrap().is_phone());
/// assert!(IdentityHandle::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityHandle {
    /// An email address (contains `@`).
    Email(String),
    /// A phone number (anything else).
    Phone(String),
}

impl IdentityHandle {
    /// Parse and classify a raw identity string.
    ///
    /// The input is trimmed before classification.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Empty`] if the trimmed input is empty.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty);
        }
        if trimmed.contains('@') {
            Ok(Self::Email(trimmed.to_string()))
        } else {
            Ok(Self::Phone(trimmed.to_string()))
        }
    }

    /// The handle as supplied (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(s) | Self::Phone(s) => s,
        }
    }

    /// Whether this handle was classified as an email.
    #[must_use]
    pub const fn is_email(&self) -> bool {
        matches!(self, Self::Email(_))
    }

    /// Whether this handle was classified as a phone number.
    #[must_use]
    pub const fn is_phone(&self) -> bool {
        matches!(self, Self::Phone(_))
    }
}

impl std::fmt::Display for IdentityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_email() {
        let handle = IdentityHandle::parse("user@example.com").expect("parse");
        assert!(handle.is_email());
        assert_eq!(handle.as_str(), "user@example.com");
    }

    #[test]
    fn test_classify_phone() {
        let handle = IdentityHandle::parse("600123456").expect("parse");
        assert!(handle.is_phone());
    }

    #[test]
    fn test_trims_before_classifying() {
        let handle = IdentityHandle::parse("  a@b.com  ").expect("parse");
        assert!(handle.is_email());
        assert_eq!(handle.as_str(), "a@b.com");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(IdentityHandle::parse(""), Err(IdentityError::Empty));
        assert_eq!(IdentityHandle::parse("   "), Err(IdentityError::Empty));
    }
}
