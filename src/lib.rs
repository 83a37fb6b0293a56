//! # cowtrie
//!
//! A persistent, copy-on-write trie mapping byte-sequence keys to values of
//! arbitrary type.
//!
//! ## Overview
//!
//! Every write produces a new version of the trie that shares all untouched
//! subtrees with the versions before it. Old versions stay valid and never
//! change, which makes the trie a building block for versioned key-value
//! structures such as catalogs and snapshot-isolated indexes.
//!
//! - **Typed values**: each key holds one value of any `'static` type; a
//!   lookup names the type it expects
//! - **Copy-on-write**: `put` and `remove` copy only the nodes on the key's path
//! - **Pruning**: `remove` drops nodes left with neither value nor children
//!
//! ## Feature Flags
//!
//! - `arc`: share nodes through `Arc` instead of `Rc`, making snapshots
//!   `Send + Sync`
//!
//! ## Logging
//!
//! Writes emit `TRACE` level events through [`tracing`]. Install a subscriber
//! in the application to see them.
//!
//! ## Example
//!
//! ```rust
//! use cowtrie::prelude::*;
//!
//! let catalog = Trie::new()
//!     .put("tables/users", 1u64)
//!     .put("tables/orders", 2u64);
//! let snapshot = catalog.clone();
//!
//! let catalog = catalog.remove("tables/users");
//! assert_eq!(catalog.get::<u64>("tables/users"), None);
//! assert_eq!(snapshot.get::<u64>("tables/users"), Some(&1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use cowtrie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
}

pub mod persistent;
