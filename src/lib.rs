//! Two maps behind one contract: an [`OrderedMap`] built on a plain binary
//! search tree, and a [`ChainedHashMap`] built on a fixed row of buckets with
//! doubly-linked chains.
//!
//! Both keep their nodes in a flat arena and link them together by index, so
//! parent and `prev` back-references are just more indices. Both hand out
//! cursors that step either way through the entries, and both report misuse
//! through [`MapError`] rather than panicking.
//!
//! ```
//! use twin_maps::{ChainedHashMap, Map, MapError, OrderedMap};
//!
//! fn tally<M: Map<&'static str, u32>>(map: &mut M) {
//!     for word in ["a", "rose", "is", "a", "rose"] {
//!         *map.get_or_insert(word) += 1;
//!     }
//! }
//!
//! let mut tree = OrderedMap::new();
//! let mut hash = ChainedHashMap::new();
//! tally(&mut tree);
//! tally(&mut hash);
//!
//! assert_eq!(Ok(&2), tree.lookup("rose"));
//! assert_eq!(Ok(&2), hash.lookup("rose"));
//! assert_eq!(Err(MapError::KeyNotFound), hash.remove("daisy"));
//! ```

mod arena;
pub mod chained_hash_map;
mod error;
mod identity_hasher;
mod map;
pub mod ordered_map;

pub use chained_hash_map::{ChainedHashMap, DEFAULT_BUCKET_COUNT};
pub use error::{MapError, Result};
pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use map::Map;
pub use ordered_map::OrderedMap;
