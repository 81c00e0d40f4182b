//! # I/O Module
//!
//! Interfaces to the collaborators that sit outside the combinatorial core.
//!
//! The core never touches the filesystem. Reading dimension declarations,
//! rendering MD-package input files and serializing exchange-group tables are
//! delegated to implementors of the traits in [`traits`], which the CLI (or any
//! other front end) provides.

pub mod traits;
