//! # U-Cartonize
//!
//! Warehouse order packing engine.
//!
//! This crate provides:
//! - **Cartonization**: splits an order into the fewest, lightest-billed
//!   cartons from a catalog, layer by layer
//! - **Allocation**: FEFO, LIFO and FIFO draws from stock batches
//! - **Shipping quotes**: box choice and zone/slab pricing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use u_cartonize::d3::{Cartonizer, CartonType, LineItem, OrderRequest};
//!
//! let request = OrderRequest::new("ORD-1")
//!     .with_item(LineItem::new("MUG", 0.4, 12.0, 9.0, 10.0).with_quantity(4))
//!     .with_carton(CartonType::new("S", 30.0, 20.0, 15.0, 10.0));
//!
//! let plan = Cartonizer::default_config().pack(&request)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `d3` (default): cartonization engine
//! - `fulfillment` (default): allocation and shipping quotes
//! - `serde`: Serialization support

/// Core types and traits.
pub use u_cartonize_core as core;

/// Cartonization engine.
#[cfg(feature = "d3")]
pub use u_cartonize_d3 as d3;

/// Allocation and shipping quotes.
#[cfg(feature = "fulfillment")]
pub use u_cartonize_fulfillment as fulfillment;

// Re-export commonly used types at root level
pub use u_cartonize_core::{Error, PackingConfig, PackingPlan, Result, Solver};
