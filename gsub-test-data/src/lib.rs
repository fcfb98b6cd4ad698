//! test data shared between the gsub codec crates.

pub mod bebuffer;
pub mod gsub;
pub mod layout;

pub use bebuffer::BeBuffer;
