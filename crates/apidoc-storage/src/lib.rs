//! apidoc Storage - Documentation directory access
//!
//! This crate reads definition files and other documents out of the
//! configured documentation directory and discovers the definitions it
//! contains.

pub mod discovery;
pub mod file;

pub use discovery::{discover_definitions, is_definition_file};
pub use file::{DocStorage, LocalDocStorage};
