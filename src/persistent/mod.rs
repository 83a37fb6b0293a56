//! Persistent (immutable) trie and its supporting types.
//!
//! - [`Trie`]: copy-on-write trie from byte keys to typed values
//! - [`ValueCell`]: shared, type-erased value storage used by trie nodes
//! - [`TrieValue`]: the bound every stored value satisfies
//! - [`LookupError`]: why a typed lookup found nothing
//!
//! # Structural Sharing
//!
//! Every write returns a new [`Trie`] that copies only the nodes on the path
//! of the written key. All other subtrees, and all values, are shared with
//! the previous version, which stays valid and unchanged.
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::Trie;
//!
//! let t0 = Trie::new();
//! let t1 = t0.put("a", 1u32);
//! let t2 = t1.put("ab", 2u32);
//! let t3 = t1.put("ac", 3u32);
//!
//! assert_eq!(t1.get::<u32>("a"), Some(&1));
//! assert_eq!(t2.get::<u32>("ab"), Some(&2));
//! assert_eq!(t3.get::<u32>("ab"), None);
//! assert_eq!(t3.get::<u32>("ac"), Some(&3));
//! assert!(t0.is_empty());
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod node;
mod trie;
mod value;

pub use error::LookupError;
pub use trie::Trie;
pub use trie::TrieIterator;
pub use value::TrieValue;
pub use value::ValueCell;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = ReferenceCounter::clone(&reference_counter);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }

    #[rstest]
    fn test_trie_clone_shares_nodes() {
        let trie = super::Trie::new().put("abc", 1u32);
        let before = trie.node_count();
        let copy = trie.clone();
        assert!(super::Trie::ptr_eq(&trie, &copy));
        assert_eq!(copy.node_count(), before);
    }
}
