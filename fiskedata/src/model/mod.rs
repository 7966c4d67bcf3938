//! Core data types

mod cell;
mod records;

pub use cell::*;
pub use records::*;
