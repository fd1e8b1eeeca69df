//! Core - grid keys and crate-wide utilities

#[macro_use]
pub mod utils;
pub mod keys;

pub use keys::{CellKey, NEIGHBORS_4};
