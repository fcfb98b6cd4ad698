//! Owned versions of the GSUB subtables

pub mod gsub;
pub mod layout;
