//! Storage abstraction for the docnav documentation-tree builder.
//!
//! This crate provides a [`Storage`] trait that hides how documentation sources
//! are listed and read. The site builder only ever talks to this trait, which
//! enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between tree-building logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list()`, `read()` and `resolve()` methods
//! - [`FsStorage`] implementation rooted at a project directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! All paths passed to a [`Storage`] are relative to its root.
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use docnav_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("."));
//! for entry in storage.list(Path::new("src/docs"))? {
//!     println!("{} ({:?})", entry.name, entry.kind);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{DirEntry, EntryKind, Storage, StorageError, StorageErrorKind};
