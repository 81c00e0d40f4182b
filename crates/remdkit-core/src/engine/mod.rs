//! # Engine Module
//!
//! This module implements the computations that turn a `DimensionSet` into a
//! complete replica-exchange layout.
//!
//! ## Overview
//!
//! Given the ordered replica → coordinate assignment produced by the odometer,
//! the engine partitions replicas into exchange groups along every dimension and
//! resolves the concrete simulation parameters of each replica. Everything here
//! is synchronous, pure, and bounded by `TotalReplicas × Ndims`.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Generation options and base parameters
//! - **Exchange Groups** ([`groups`]) - Per-dimension partition of replicas
//! - **Parameter Resolution** ([`resolver`]) - Per-replica parameter records and warnings
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Generation errors wrapping configuration failures
//!
//! ## Key Capabilities
//!
//! - **Exactly-once partitions** of replicas per dimension with stable group numbering
//! - **Deterministic parameter resolution** with explicit precedence between dimensions
//! - **Non-fatal warnings** for documented fallbacks (default temperature, default pH)

pub mod config;
pub mod error;
pub mod groups;
pub mod progress;
pub mod resolver;
