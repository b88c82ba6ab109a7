pub mod occurrence;
pub mod range;

// Re-export commonly used types
pub use occurrence::{Occurrence, Place};
pub use range::TextRange;
