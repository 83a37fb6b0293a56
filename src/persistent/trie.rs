//! Persistent (immutable) copy-on-write trie over byte keys.
//!
//! This module provides [`Trie`], an immutable map from byte sequences to
//! values of arbitrary type that uses structural sharing between versions.
//!
//! # Overview
//!
//! Every key is consumed one byte at a time; each byte selects a child of the
//! current node. Writes copy only the nodes on the path of the written key and
//! link the copies to the untouched, shared siblings.
//!
//! - O(k) get, where k is the key length
//! - O(k) put
//! - O(k) remove
//! - O(1) len and `is_empty`
//!
//! Values of different types can live in the same trie. A lookup names the
//! type it expects and sees nothing if the stored value has another type.
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::Trie;
//!
//! let trie = Trie::new()
//!     .put("a", 1u32)
//!     .put("ab", String::from("two"));
//!
//! assert_eq!(trie.get::<u32>("a"), Some(&1));
//! assert_eq!(trie.get::<String>("ab").map(String::as_str), Some("two"));
//! assert_eq!(trie.get::<u64>("a"), None); // wrong type
//!
//! // Structural sharing: the original trie is preserved
//! let removed = trie.remove("a");
//! assert_eq!(trie.get::<u32>("a"), Some(&1));   // Original unchanged
//! assert_eq!(removed.get::<u32>("a"), None);    // New version
//! ```
//!
//! # Node lifecycle
//!
//! A node is in one of three states in any given snapshot: absent, plain, or
//! value-bearing. `put` turns the terminal node of its key into a value node,
//! creating plain nodes along the way as needed. `remove` demotes the
//! terminal node to plain and prunes every node on the path that is left with
//! neither a value nor a child. Nodes change state only in the snapshot a
//! write returns; the receiver never observes the change.

use std::any::type_name;
use std::fmt;
use std::iter::FromIterator;

use super::ReferenceCounter;
use super::error::LookupError;
use super::node::{Node, NodeReference};
use super::value::{TrieValue, ValueCell};

// =============================================================================
// Trie Definition
// =============================================================================

/// A persistent (immutable) trie mapping byte keys to typed values.
///
/// A `Trie` is a snapshot: cloning it is O(1) and shares the whole structure,
/// and [`put`](Self::put) and [`remove`](Self::remove) return new snapshots
/// while leaving the receiver untouched.
///
/// Keys are anything that can be viewed as bytes (`&str`, `String`, `&[u8]`,
/// `Vec<u8>`, ...). The empty key is valid and addresses the root.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(k)              |
/// | `put`          | O(k)              |
/// | `remove`       | O(k)              |
/// | `contains_key` | O(k)              |
/// | `len`          | O(1)              |
/// | `keys`, `iter` | O(N)              |
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::Trie;
///
/// let version1 = Trie::new().put("key", 1u32);
/// let version2 = version1.put("key", 2u32);
///
/// assert_eq!(version1.get::<u32>("key"), Some(&1));
/// assert_eq!(version2.get::<u32>("key"), Some(&2));
/// ```
#[derive(Clone, Default)]
pub struct Trie {
    /// Root node, `None` when the trie holds no keys
    root: Option<NodeReference>,
    /// Number of keys holding a value
    length: usize,
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Trie: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Trie: Send, Sync);

impl Trie {
    /// Creates a new empty trie.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new();
    /// assert!(trie.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of keys holding a value.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no key holds a value.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` if both snapshots share the same root node.
    ///
    /// Two empty tries are always considered equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("a", 1u32);
    /// assert!(Trie::ptr_eq(&trie, &trie.clone()));
    /// assert!(Trie::ptr_eq(&trie, &trie.remove("missing")));
    /// assert!(!Trie::ptr_eq(&trie, &trie.put("a", 1u32)));
    /// ```
    #[must_use]
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        match (&left.root, &right.root) {
            (Some(left_root), Some(right_root)) => ReferenceCounter::ptr_eq(left_root, right_root),
            (None, None) => true,
            _ => false,
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Walks `key` from the root.
    fn find(&self, key: &[u8]) -> Option<&Node> {
        key.iter()
            .try_fold(self.root.as_deref()?, |node, &fragment| {
                node.get_child(fragment)
            })
    }

    /// Walks `key` from the root, returning the shared reference to the node.
    fn find_reference(&self, key: &[u8]) -> Option<&NodeReference> {
        key.iter()
            .try_fold(self.root.as_ref()?, |node, &fragment| {
                node.child_reference(fragment)
            })
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// Returns `None` if the key holds no value, or if the stored value is
    /// not of type `T`.
    ///
    /// # Complexity
    ///
    /// O(k) where k is the key length
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("hello", 42u32);
    ///
    /// assert_eq!(trie.get::<u32>("hello"), Some(&42));
    /// assert_eq!(trie.get::<u32>("hell"), None);   // prefix only
    /// assert_eq!(trie.get::<i64>("hello"), None);  // other type
    /// ```
    #[must_use]
    pub fn get<T: TrieValue>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.find(key.as_ref())?.value()?.downcast_ref::<T>()
    }

    /// Returns the value stored under `key`, or the reason there is none.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if the key holds no value and
    /// [`LookupError::TypeMismatch`] if the value is not of type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::{LookupError, Trie};
    ///
    /// let trie = Trie::new().put("count", 3u64);
    ///
    /// assert_eq!(trie.try_get::<u64>("count"), Ok(&3));
    /// assert!(matches!(
    ///     trie.try_get::<u32>("count"),
    ///     Err(LookupError::TypeMismatch { found: "u64", .. })
    /// ));
    /// ```
    pub fn try_get<T: TrieValue>(&self, key: impl AsRef<[u8]>) -> Result<&T, LookupError> {
        let key = key.as_ref();
        let cell = self
            .find(key)
            .and_then(Node::value)
            .ok_or_else(|| LookupError::NotFound { key: key.to_vec() })?;

        cell.downcast_ref::<T>()
            .ok_or_else(|| LookupError::TypeMismatch {
                key: key.to_vec(),
                expected: type_name::<T>(),
                found: cell.type_name(),
            })
    }

    /// Returns `true` if `key` holds a value of any type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("ab", 'x');
    /// assert!(trie.contains_key("ab"));
    /// assert!(!trie.contains_key("a"));
    /// ```
    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key.as_ref()).is_some_and(Node::is_value_node)
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The previous value may have had another type. Only the nodes on the
    /// path of `key` are copied; every other subtree is shared with `self`.
    /// The value is moved into the trie and never cloned, so `T` does not
    /// need to implement `Clone`.
    ///
    /// # Complexity
    ///
    /// O(k) where k is the key length
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("", 0u8).put("a", 1u8);
    ///
    /// assert_eq!(trie.get::<u8>(""), Some(&0)); // stored at the root
    /// assert_eq!(trie.get::<u8>("a"), Some(&1));
    /// ```
    #[must_use]
    pub fn put<T: TrieValue>(&self, key: impl AsRef<[u8]>, value: T) -> Self {
        let key = key.as_ref();

        // Copy every node on the path; off-path children stay shared.
        let mut path: Vec<Node> = Vec::with_capacity(key.len());
        let mut current = self.root.as_deref();
        for &fragment in key {
            path.push(current.map_or_else(Node::plain, Node::clone));
            current = current.and_then(|node| node.get_child(fragment));
        }

        let mut terminal = current.map_or_else(Node::plain, Node::clone);
        let added = !terminal.is_value_node();
        terminal.set_value(ValueCell::new(value));

        let root = key
            .iter()
            .zip(path)
            .rev()
            .fold(terminal, |child, (&fragment, mut parent)| {
                parent.put_child(fragment, ReferenceCounter::new(child));
                parent
            });

        let length = if added { self.length + 1 } else { self.length };
        tracing::trace!(key_length = key.len(), added, length, "trie put");

        Self {
            root: Some(ReferenceCounter::new(root)),
            length,
        }
    }

    // =========================================================================
    // Remove
    // =========================================================================

    /// Removes the value stored under `key`.
    ///
    /// Nodes on the path that are left with neither a value nor a child are
    /// pruned from the new snapshot. If `key` holds no value, the result
    /// shares its root with `self`.
    ///
    /// # Complexity
    ///
    /// O(k) where k is the key length
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("a", 1u32).put("abc", 3u32);
    /// let removed = trie.remove("abc");
    ///
    /// assert_eq!(removed.get::<u32>("abc"), None);
    /// assert_eq!(removed.get::<u32>("a"), Some(&1));
    /// assert_eq!(removed.node_count(), 2); // root and "a"; "ab" was pruned
    /// assert_eq!(trie.get::<u32>("abc"), Some(&3)); // Original unchanged
    /// ```
    #[must_use]
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Self {
        let key = key.as_ref();

        let Some((ancestors, terminal)) = self.value_path(key) else {
            tracing::trace!(key_length = key.len(), "trie remove of absent key");
            return self.clone();
        };

        let mut demoted = terminal.clone();
        demoted.clear_value();

        // Each step yields the replacement for the level below, or `None`
        // when that level was pruned.
        let root = key.iter().zip(ancestors).rev().fold(
            demoted.into_surviving(),
            |replacement, (&fragment, ancestor)| {
                let mut parent = ancestor.clone();
                match replacement {
                    Some(child) => parent.put_child(fragment, ReferenceCounter::new(child)),
                    None => {
                        parent.remove_child(fragment);
                    }
                }
                parent.into_surviving()
            },
        );

        let length = self.length - 1;
        tracing::trace!(key_length = key.len(), length, "trie remove");

        Self {
            root: root.map(ReferenceCounter::new),
            length,
        }
    }

    /// Collects the ancestors of the node under `key`, root first, along
    /// with the node itself.
    ///
    /// Returns `None` unless `key` holds a value.
    fn value_path(&self, key: &[u8]) -> Option<(Vec<&Node>, &Node)> {
        let mut ancestors = Vec::with_capacity(key.len());
        let mut current = self.root.as_deref()?;
        for &fragment in key {
            let child = current.get_child(fragment)?;
            ancestors.push(current);
            current = child;
        }
        current.is_value_node().then_some((ancestors, current))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns the part of the trie below `prefix` as its own snapshot.
    ///
    /// Keys in the result are relative to `prefix`. The subtree is shared,
    /// not copied.
    ///
    /// # Complexity
    ///
    /// O(k + m) where m is the number of nodes below `prefix`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("user/1", 10u32).put("user/2", 20u32).put("group/1", 1u32);
    /// let users = trie.subtrie("user/");
    ///
    /// assert_eq!(users.len(), 2);
    /// assert_eq!(users.get::<u32>("2"), Some(&20));
    /// ```
    #[must_use]
    pub fn subtrie(&self, prefix: impl AsRef<[u8]>) -> Self {
        self.find_reference(prefix.as_ref())
            .map_or_else(Self::new, |node| Self {
                root: Some(ReferenceCounter::clone(node)),
                length: node.value_count(),
            })
    }

    /// Returns the number of nodes reachable from the root.
    ///
    /// An empty trie has no nodes. A trie holding only the empty key has one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.as_deref().map_or(0, Node::reachable_count)
    }

    /// Collects every key holding a value together with its cell, in
    /// ascending byte order.
    fn collect_entries(&self) -> Vec<(Vec<u8>, &ValueCell)> {
        let mut entries = Vec::with_capacity(self.length);
        let mut pending: Vec<(Vec<u8>, &Node)> = self
            .root
            .as_deref()
            .map(|root| (Vec::new(), root))
            .into_iter()
            .collect();

        while let Some((key, node)) = pending.pop() {
            for (fragment, child) in node.children().rev() {
                let mut child_key = Vec::with_capacity(key.len() + 1);
                child_key.extend_from_slice(&key);
                child_key.push(fragment);
                pending.push((child_key, child));
            }
            if let Some(cell) = node.value() {
                entries.push((key, cell));
            }
        }

        entries
    }

    /// Returns an iterator over every key holding a value, in ascending
    /// byte order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("b", 2u32).put("a", 'a').put("ab", 1.5f64);
    /// let keys: Vec<Vec<u8>> = trie.keys().collect();
    /// assert_eq!(keys, vec![b"a".to_vec(), b"ab".to_vec(), b"b".to_vec()]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = Vec<u8>> {
        self.collect_entries().into_iter().map(|(key, _)| key)
    }

    /// Returns an iterator over every entry whose value has type `T`, in
    /// ascending key order. Entries of other types are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("x", 1u32).put("y", "text").put("z", 3u32);
    /// let numbers: Vec<(Vec<u8>, &u32)> = trie.iter::<u32>().collect();
    /// assert_eq!(numbers, vec![(b"x".to_vec(), &1), (b"z".to_vec(), &3)]);
    /// ```
    #[must_use]
    pub fn iter<T: TrieValue>(&self) -> TrieIterator<'_, T> {
        let entries: Vec<(Vec<u8>, &T)> = self
            .collect_entries()
            .into_iter()
            .filter_map(|(key, cell)| cell.downcast_ref::<T>().map(|value| (key, value)))
            .collect();
        TrieIterator {
            entries: entries.into_iter(),
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`Trie`] whose values have type `T`.
pub struct TrieIterator<'a, T> {
    entries: std::vec::IntoIter<(Vec<u8>, &'a T)>,
}

impl<'a, T> Iterator for TrieIterator<'a, T> {
    type Item = (Vec<u8>, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> DoubleEndedIterator for TrieIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<T> ExactSizeIterator for TrieIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: AsRef<[u8]>, T: TrieValue> FromIterator<(K, T)> for Trie {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<K: AsRef<[u8]>, T: TrieValue> Extend<(K, T)> for Trie {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            *self = self.put(key, value);
        }
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(
                self.collect_entries()
                    .iter()
                    .map(|(key, cell)| (key.escape_ascii().to_string(), cell.type_name())),
            )
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
