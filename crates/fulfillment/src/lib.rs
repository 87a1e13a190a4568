//! # U-Cartonize Fulfillment
//!
//! Collaborators that sit next to the packing engine in an order pipeline:
//!
//! - [`allocation`]: draws order quantities from stock batches under a FEFO,
//!   LIFO or FIFO policy and reports shortfalls
//! - [`shipping`]: prices a shipment from a stacked bounding box, a box
//!   catalog and a zone/slab rate table
//!
//! Both implement [`Solver`] and never mutate their inputs.

pub mod allocation;
pub mod shipping;

// Re-exports
pub use allocation::{
    AllocationRequest, AllocationResult, AllocationStrategy, Allocator, BatchDraw,
    LineAllocation, OrderLine, StockBatch,
};
pub use shipping::{
    DistanceZone, QuoteRequest, RateTable, ShipItem, ShippingBox, ShippingCalculator,
    ShippingQuote, WeightSlab, SAFETY_MARGIN_CM,
};
pub use u_cartonize_core::{Error, Result, Solver};
