//! File and stream operations
//!
//! [`FileStore`] holds the path-based operations; [`copy_stream`] and
//! [`read_to_string`] work on streams the caller already has open.

mod file_store;
mod report;
pub(crate) mod stream;

pub use file_store::FileStore;
pub use report::{CopyFailure, CopyReport};
pub use stream::{copy_stream, read_to_string};
