//! Read-only resources bundled with the application
//!
//! Assets are addressed by relative, `/`-separated keys and are never written.

mod dir;
mod memory;
mod traits;

pub use dir::DirAssets;
pub use memory::MemoryAssets;
pub use traits::AssetSource;
