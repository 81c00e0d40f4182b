//! # Workflows Module
//!
//! High-level entry points that run a complete generation pass.
//!
//! ## Overview
//!
//! A workflow takes the declarations or a prebuilt `DimensionSet`, enumerates the
//! replica space, resolves every replica's parameters and builds the exchange
//! groups, then hands the finished plan to the writer collaborators. Generation is
//! all-or-nothing: any fatal configuration error surfaces before a single writer
//! is invoked.
//!
//! - **Generation Workflow** ([`generate`]) - Dimension loading, plan generation and
//!   plan writing.

pub mod generate;
