//! # Dimensions Module
//!
//! Exchange dimensions and the ordered set they form.
//!
//! ## Key Components
//!
//! - [`kind`] - The five dimension kinds and the exchange protocol each one uses
//! - [`dimension`] - A single dimension: a validated value ladder plus a description
//! - [`registry`] - The static tag table and the declaration → dimension constructors
//! - [`set`] - `DimensionSet`, the ordered at-most-one-per-kind collection
//!
//! ## Usage
//!
//! ```
//! use remdkit::core::dimensions::{dimension::Dimension, set::DimensionSet};
//!
//! let mut set = DimensionSet::new();
//! set.add_dimension(Dimension::temperature(vec![300.0, 310.0, 320.0, 330.0])?)?;
//! set.add_dimension(Dimension::ph(vec![6.0, 7.0, 8.0])?)?;
//! assert_eq!(set.total_replicas(), 12);
//! # Ok::<(), remdkit::core::error::ConfigurationError>(())
//! ```

pub mod dimension;
pub mod kind;
pub mod registry;
pub mod set;
