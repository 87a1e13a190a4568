//! Stock batch allocation.
//!
//! Draws order quantities from stock batches in a strategy-defined order and
//! reports what was taken from where, plus any shortfall. The incoming stock
//! list is cloned; callers receive the post-allocation snapshot and their own
//! records are never touched.

use std::cmp::Ordering;

use chrono::NaiveDate;
use u_cartonize_core::{Error, Result, Solver};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which batches of the same SKU are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum AllocationStrategy {
    /// First expired, first out. Batches without an expiry date go last.
    Fefo,
    /// Last in, first out (newest created date first).
    Lifo,
    /// First in, first out (oldest created date first).
    #[default]
    Fifo,
}

impl AllocationStrategy {
    /// Compares two batches under this strategy. Ties are left to the caller's
    /// stable sort.
    pub fn compare(&self, a: &StockBatch, b: &StockBatch) -> Ordering {
        match self {
            AllocationStrategy::Fefo => match (a.expiry_date, b.expiry_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            AllocationStrategy::Lifo => b.created_date.cmp(&a.created_date),
            AllocationStrategy::Fifo => a.created_date.cmp(&b.created_date),
        }
    }
}

/// A batch of stock for one SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StockBatch {
    pub batch_id: String,
    pub sku: String,
    pub quantity: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry_date: Option<NaiveDate>,
    pub created_date: NaiveDate,
}

impl StockBatch {
    /// Creates a batch without an expiry date.
    pub fn new(
        batch_id: impl Into<String>,
        sku: impl Into<String>,
        quantity: u64,
        created_date: NaiveDate,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            sku: sku.into(),
            quantity,
            expiry_date: None,
            created_date,
        }
    }

    /// Sets the expiry date.
    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }
}

/// A requested SKU and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrderLine {
    pub sku: String,
    #[cfg_attr(feature = "serde", serde(alias = "qty"))]
    pub quantity: u64,
}

impl OrderLine {
    pub fn new(sku: impl Into<String>, quantity: u64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

/// Allocation input.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AllocationRequest {
    pub lines: Vec<OrderLine>,
    pub stock: Vec<StockBatch>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: AllocationStrategy,
}

impl AllocationRequest {
    /// Validates lines and batches.
    pub fn validate(&self) -> Result<()> {
        for line in &self.lines {
            if line.sku.trim().is_empty() {
                return Err(Error::InvalidItem("SKU must not be empty".into()));
            }
            if line.quantity == 0 {
                return Err(Error::InvalidItem(format!(
                    "Quantity for '{}' must be at least 1",
                    line.sku
                )));
            }
        }
        for batch in &self.stock {
            if batch.batch_id.trim().is_empty() {
                return Err(Error::InvalidItem(format!(
                    "Batch of '{}' has an empty id",
                    batch.sku
                )));
            }
        }
        Ok(())
    }

    /// Parses a request from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SerializationError(e.to_string()))
    }
}

/// Quantity drawn from one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BatchDraw {
    pub batch_id: String,
    pub quantity: u64,
}

/// Outcome for one order line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LineAllocation {
    pub sku: String,
    pub requested: u64,
    pub allocated: u64,
    /// Draws in consumption order.
    pub draws: Vec<BatchDraw>,
    /// `requested - allocated`.
    pub shortfall: u64,
}

/// Allocation output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AllocationResult {
    pub strategy: AllocationStrategy,
    pub lines: Vec<LineAllocation>,
    /// Stock after allocation, in the original input order.
    pub remaining_stock: Vec<StockBatch>,
}

impl AllocationResult {
    /// Returns true if no line is short.
    pub fn fully_allocated(&self) -> bool {
        self.lines.iter().all(|l| l.shortfall == 0)
    }

    /// Total units short across all lines.
    pub fn total_shortfall(&self) -> u64 {
        self.lines.iter().map(|l| l.shortfall).sum()
    }
}

/// Greedy batch allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allocator;

impl Allocator {
    pub fn new() -> Self {
        Self
    }

    /// Allocates every line against a private copy of the stock.
    pub fn allocate(&self, request: &AllocationRequest) -> Result<AllocationResult> {
        request.validate()?;

        let strategy = request.strategy;
        let mut stock = request.stock.clone();

        let mut order: Vec<usize> = (0..stock.len()).collect();
        order.sort_by(|&a, &b| strategy.compare(&stock[a], &stock[b]));

        let mut lines = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let mut needed = line.quantity;
            let mut draws = Vec::new();

            for &idx in &order {
                if needed == 0 {
                    break;
                }
                let batch = &mut stock[idx];
                if batch.sku != line.sku || batch.quantity == 0 {
                    continue;
                }
                let take = needed.min(batch.quantity);
                batch.quantity -= take;
                needed -= take;
                draws.push(BatchDraw {
                    batch_id: batch.batch_id.clone(),
                    quantity: take,
                });
            }

            if needed > 0 {
                log::warn!(
                    "allocation short for {}: {} of {} unit(s) unavailable",
                    line.sku,
                    needed,
                    line.quantity
                );
            }

            lines.push(LineAllocation {
                sku: line.sku.clone(),
                requested: line.quantity,
                allocated: line.quantity - needed,
                draws,
                shortfall: needed,
            });
        }

        Ok(AllocationResult {
            strategy,
            lines,
            remaining_stock: stock,
        })
    }
}

impl Solver for Allocator {
    type Request = AllocationRequest;
    type Output = AllocationResult;

    fn solve(&self, request: &AllocationRequest) -> Result<AllocationResult> {
        self.allocate(request)
    }
}
