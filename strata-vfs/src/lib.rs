//! Strata Virtual File System
//!
//! A virtual file system abstraction with two backends, so package discovery
//! and compiler roots can be resolved against disk or memory alike.
//!
//! # Usage
//! ```rust
//! use strata_vfs::{VirtualFileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new();
//! fs.write_file(Path::new("/proj/Strata.json"), b"{}").unwrap();
//! assert!(fs.is_dir(Path::new("/proj")));
//! ```

mod error;
mod memory;
mod native;
mod r#trait;

pub use error::{VfsError, VfsResult};
pub use memory::MemoryFileSystem;
pub use native::NativeFileSystem;
pub use r#trait::VirtualFileSystem;
