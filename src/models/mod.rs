//! Data models

pub mod document;
pub mod mapping;

pub use document::*;
pub use mapping::*;
