//! Javadoc migration library
//!
//! Converts legacy AsciiDoc API links and bare code spans into `javadoc:`
//! inline macros. Bare names are resolved through a name index harvested
//! from a locally rendered javadoc site and from the javadoc sites of
//! external libraries.

pub use crate::doc_engine::IndexBuilder;
pub use crate::index_core::{Lookup, NameIndex, NameIndexBuilder};
pub use crate::rewrite::{RewriteError, Rewriter};
pub use crate::settings::Settings;

pub mod doc_engine;
pub mod index_core;
pub mod migrate;
pub mod rewrite;
pub mod settings;
