//! Type-erased value storage for trie nodes.
//!
//! A trie stores values of different types side by side, so a node cannot
//! name the type of its value. [`ValueCell`] hides the type behind a
//! reference-counted trait object and recovers it with a checked downcast.
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::ValueCell;
//!
//! let cell = ValueCell::new(42u32);
//! assert_eq!(cell.downcast_ref::<u32>(), Some(&42));
//! assert_eq!(cell.downcast_ref::<u64>(), None);
//!
//! // Cloning a cell shares the payload.
//! let shared = cell.clone();
//! assert!(ValueCell::ptr_eq(&cell, &shared));
//! ```

use std::any::{Any, type_name};
use std::fmt;

use super::ReferenceCounter;

// =============================================================================
// TrieValue
// =============================================================================

/// A type that can be stored in a [`Trie`](super::Trie).
///
/// Implemented for every `'static` type. With the `arc` feature enabled the
/// type must also be `Send + Sync`, so that snapshots can cross threads.
///
/// The value does not need to implement `Clone`: nodes share a value through
/// its cell and never copy the payload.
#[cfg(feature = "arc")]
pub trait TrieValue: Any + Send + Sync {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the name of the concrete type.
    fn value_type_name(&self) -> &'static str;
}

/// A type that can be stored in a [`Trie`](super::Trie).
///
/// Implemented for every `'static` type. With the `arc` feature enabled the
/// type must also be `Send + Sync`, so that snapshots can cross threads.
///
/// The value does not need to implement `Clone`: nodes share a value through
/// its cell and never copy the payload.
#[cfg(not(feature = "arc"))]
pub trait TrieValue: Any {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the name of the concrete type.
    fn value_type_name(&self) -> &'static str;
}

#[cfg(feature = "arc")]
impl<T: Any + Send + Sync> TrieValue for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

#[cfg(not(feature = "arc"))]
impl<T: Any> TrieValue for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn value_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

// =============================================================================
// ValueCell
// =============================================================================

/// A shared, type-erased value.
///
/// Cloning a `ValueCell` clones the reference, not the value.
#[derive(Clone)]
pub struct ValueCell {
    value: ReferenceCounter<dyn TrieValue>,
}

impl ValueCell {
    /// Moves `value` into a new cell.
    #[inline]
    #[must_use]
    pub fn new<T: TrieValue>(value: T) -> Self {
        Self {
            value: ReferenceCounter::new(value),
        }
    }

    /// The stored value as a trait object.
    ///
    /// The reference counter itself is `'static` and would satisfy
    /// `TrieValue` too, so method calls must go through the pointee.
    #[inline]
    fn payload(&self) -> &dyn TrieValue {
        &*self.value
    }

    /// Returns the value if it has type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::ValueCell;
    ///
    /// let cell = ValueCell::new(String::from("hello"));
    /// assert_eq!(cell.downcast_ref::<String>().map(String::as_str), Some("hello"));
    /// assert!(cell.downcast_ref::<&str>().is_none());
    /// ```
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: TrieValue>(&self) -> Option<&T> {
        self.payload().as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the stored value has type `T`.
    #[inline]
    #[must_use]
    pub fn is<T: TrieValue>(&self) -> bool {
        self.payload().as_any().is::<T>()
    }

    /// Returns the name of the stored value's type.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.payload().value_type_name()
    }

    /// Returns `true` if both cells point at the same value.
    #[inline]
    #[must_use]
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        ReferenceCounter::ptr_eq(&left.value, &right.value)
    }
}

impl fmt::Debug for ValueCell {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("ValueCell")
            .field(&self.type_name())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
