//! # REMDKit Core Library
//!
//! A library for laying out multi-dimensional replica-exchange molecular dynamics (MREMD)
//! runs: enumerating the replica space spanned by a set of exchange dimensions, assigning
//! every replica a deterministic coordinate, resolving per-replica simulation parameters,
//! and partitioning replicas into exchange groups for each dimension.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models: exchange dimensions and their
//!   value ladders, the ordered `DimensionSet`, replica coordinates and the odometer that
//!   walks them, and the collaborator traits used for input and output.
//!
//! - **[`engine`]: The Logic Core.** Pure computations over the models: exchange-group
//!   partitioning, per-replica parameter resolution, generation configuration, error
//!   types and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures tying `core` and `engine`
//!   together, such as generating a complete, validated run plan in a single
//!   all-or-nothing pass.

pub mod core;
pub mod engine;
pub mod workflows;
