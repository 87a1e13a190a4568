//! Synthetic order generator.
//!
//! Produces reproducible random orders against a small fixed carton catalog,
//! for trying the packer without real order data.

use rand::prelude::*;
use u_cartonize_d3::{CartonType, LineItem, OrderRequest};

/// The catalog every synthetic order is packed against.
pub fn standard_catalog() -> Vec<CartonType> {
    vec![
        CartonType::new("S", 30.0, 20.0, 15.0, 10.0).with_empty_weight(0.2),
        CartonType::new("M", 40.0, 30.0, 25.0, 20.0).with_empty_weight(0.4),
        CartonType::new("L", 60.0, 40.0, 40.0, 30.0).with_empty_weight(0.8),
        CartonType::new("XL", 80.0, 60.0, 50.0, 40.0).with_empty_weight(1.2),
    ]
}

/// Generator for synthetic orders.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator {
    /// Creates a generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a generator with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates an order with `lines` lines.
    ///
    /// Roughly one line in five is fragile and one in six is upright-only.
    pub fn order(&mut self, order_id: impl Into<String>, lines: usize) -> OrderRequest {
        let mut request = OrderRequest::new(order_id);
        for n in 0..lines {
            request = request.with_item(self.line(n));
        }
        for carton in standard_catalog() {
            request = request.with_carton(carton);
        }
        request
    }

    fn line(&mut self, n: usize) -> LineItem {
        let l = self.dimension(5.0, 35.0);
        let w = self.dimension(5.0, 25.0);
        let h = self.dimension(2.0, 20.0);
        let weight = (self.rng.random_range(0.1..3.0_f64) * 100.0).round() / 100.0;

        LineItem::new(format!("SKU-{:03}", n + 1), weight, l, w, h)
            .with_quantity(self.rng.random_range(1..=4))
            .with_fragile(self.rng.random_bool(0.2))
            .with_upright_only(self.rng.random_bool(1.0 / 6.0))
    }

    /// Whole-centimetre dimension in `[lo, hi)`.
    fn dimension(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.random_range(lo..hi).floor()
    }
}
