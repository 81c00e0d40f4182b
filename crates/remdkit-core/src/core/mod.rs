//! # Core Module
//!
//! This module provides the fundamental data structures for describing a
//! multi-dimensional replica-exchange run.
//!
//! ## Overview
//!
//! An MREMD run is spanned by a handful of independent exchange dimensions (a
//! temperature ladder, a Hamiltonian ladder of topologies, a pH ladder, an aMD
//! boost ladder, an SGLD temperature ladder). Every replica is a point in the
//! product space of those ladders. The core module models:
//!
//! - **Exchange dimensions** ([`dimensions`]) - Per-kind value tables, the ordered
//!   `DimensionSet`, and the registration table mapping declaration tags to kinds
//! - **Replica coordinates** ([`coordinates`]) - Coordinate tuples, numbered replicas and
//!   the odometer (`ReplicaCoordinateSpace`) that enumerates them
//! - **Collaborator interfaces** ([`io`]) - Traits for dimension sources and plan writers
//! - **Errors** ([`error`]) - Fatal configuration errors shared by every layer
//!
//! ## Invariants
//!
//! - A `DimensionSet` holds at most one dimension per kind.
//! - Dimension 0 is the fastest-varying coordinate index.
//! - Replica numbers are 1-based and map bijectively onto coordinates in odometer order.

pub mod coordinates;
pub mod dimensions;
pub mod error;
pub mod io;
