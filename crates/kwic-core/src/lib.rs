//! kwic-core
//!
//! Domain types, error taxonomy, configuration and document loading shared by
//! the snippet extractor (`kwic-text`) and the command-line drivers.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod document;
pub mod error;
pub mod traits;
pub mod types;
