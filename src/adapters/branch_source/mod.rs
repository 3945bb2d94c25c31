//! Branch source adapters.
//!
//! - `JsonFileBranchSource` - Records exported as a JSON file
//! - `InMemoryBranchSource` - Fixed list held in memory

mod in_memory;
mod json_file;

pub use in_memory::InMemoryBranchSource;
pub use json_file::JsonFileBranchSource;
