//! Database entities
//!
//! Note that these may have to be updated by hand.

#[macro_use]
mod macros;

pub mod prelude;

pub mod blog;
pub mod company;
pub mod person;
pub mod user;
