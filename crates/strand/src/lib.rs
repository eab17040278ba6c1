//! Copy-on-write singly linked list stored in a single arena.
//!
//! Instead of one heap block per node, a [`LinkedList`] keeps all of its
//! nodes in one [`NodeArena`]: a header, a fixed array of node slots and an
//! occupancy bitmap. Cloning a list shares the arena; the first mutation of a
//! shared list copies it.
//!
//! # Architecture
//!
//! ```text
//! LinkedList<T> (value-semantic handle, COW gate)
//! └── Arc<NodeArena<T>> (header + node slots, shared until written)
//!     ├── Node[] (element + generation-tagged next link)
//!     └── SlotBitmap (one bit per slot, lowest-free-slot allocation)
//! ```
//!
//! # Example
//!
//! ```
//! use strand::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.insert(10);
//! list.insert(20);
//!
//! let mut copy = list.clone();
//! copy.insert(30);
//!
//! assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [30, 20, 10]);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [20, 10]);
//! assert_eq!(list.remove(0), 20);
//! ```
//!
//! # Preconditions
//!
//! Indexing a vacant slot or an out-of-range position panics. The `try_*`
//! methods report the same conditions as [`ListError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod iter;
pub mod list;
pub mod slot;

// Public re-exports for the primary API surface.
pub use arena::NodeArena;
pub use bitmap::SlotBitmap;
pub use config::ListConfig;
pub use error::{ArenaError, ListError};
pub use list::LinkedList;
pub use slot::{Slot, MAX_CAPACITY};
