//! Report module - conclusions, artifacts and where they are published

pub mod artifacts;
pub mod conclusions;
pub mod publish;
pub mod summary;

pub use artifacts::*;
pub use conclusions::*;
pub use publish::*;
pub use summary::*;
