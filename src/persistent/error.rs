//! Error types for typed trie lookups.
//!
//! [`Trie::get`](super::Trie::get) folds every failure into `None`. When a
//! caller needs to know *why* a lookup failed, [`Trie::try_get`](super::Trie::try_get)
//! returns a [`LookupError`] instead.

/// Represents why a typed lookup produced no value.
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::{LookupError, Trie};
///
/// let trie = Trie::new().put("answer", 42u32);
///
/// assert_eq!(
///     trie.try_get::<u32>("missing"),
///     Err(LookupError::NotFound { key: b"missing".to_vec() })
/// );
/// assert!(matches!(
///     trie.try_get::<String>("answer"),
///     Err(LookupError::TypeMismatch { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No value is stored under the key.
    NotFound {
        /// The key that was looked up.
        key: Vec<u8>,
    },
    /// A value is stored under the key, but it has another type.
    TypeMismatch {
        /// The key that was looked up.
        key: Vec<u8>,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type of the stored value.
        found: &'static str,
    },
}

impl LookupError {
    /// Returns the key of the failed lookup.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        match self {
            Self::NotFound { key } | Self::TypeMismatch { key, .. } => key,
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { key } => {
                write!(formatter, "no value stored under key \"{}\"", key.escape_ascii())
            }
            Self::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                formatter,
                "value under key \"{}\" has type {found}, not {expected}",
                key.escape_ascii()
            ),
        }
    }
}

impl std::error::Error for LookupError {}
