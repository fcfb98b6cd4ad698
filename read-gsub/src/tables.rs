//! The supported tables

pub mod gsub;
pub mod layout;
