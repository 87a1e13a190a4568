//! # U-Cartonize Core
//!
//! Core types and traits for the U-Cartonize warehouse packing engine.
//!
//! This crate provides the foundational types shared between the 3D
//! cartonization engine and the fulfillment collaborators (allocation and
//! shipping quotes).
//!
//! ## Core Components
//!
//! - **Geometry**: `Dimensions` triples and floor `Rect`s with half-open overlap
//! - **Configuration**: `PackingConfig` (volumetric divisor, clearance)
//! - **Solver trait**: Common interface for every computation
//! - **Plan types**: `PackingPlan`, `CommittedCarton`, `Layer`, `ItemPlacement`
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use config::PackingConfig;
pub use error::{Error, Result};
pub use geometry::{Dimensions, Rect, EPSILON};
pub use placement::ItemPlacement;
pub use result::{CommittedCarton, Layer, PackingPlan, PlanSummary};
pub use solver::Solver;
