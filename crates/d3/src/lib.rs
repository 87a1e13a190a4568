//! # U-Cartonize 3D
//!
//! Multi-carton packing engine for warehouse orders.
//!
//! The pipeline runs one way and returns values back up:
//!
//! - [`packer`]: driver that commits one carton at a time until the order is
//!   packed or stalls
//! - [`evaluator`]: scores every carton type for the remaining pool
//! - [`layer`]: fills one carton bottom-up in horizontal layers
//! - [`shelf`]: places footprints on a layer floor at corner anchors
//! - [`orientation`]: enumerates valid axis-aligned orientations
//!
//! ## Features
//!
//! - Rotation, upright-only and fixed orientation constraints
//! - Fragile units kept on top
//! - Carton weight limits enforced at placement time
//! - Dead, volumetric and billable weight per carton
//! - Parallel batch packing of independent orders

pub mod carton;
pub mod evaluator;
pub mod item;
pub mod layer;
pub mod orientation;
pub mod packer;
pub mod request;
pub mod shelf;

// Re-exports
pub use carton::CartonType;
pub use item::{expand_lines, ItemInstance, LineItem};
pub use orientation::OrientationConstraint;
pub use packer::Cartonizer;
pub use request::OrderRequest;
pub use u_cartonize_core::{
    CommittedCarton, Error, Layer, PackingConfig, PackingPlan, Result, Solver,
};
