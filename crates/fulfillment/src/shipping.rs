//! Shipping cost quote.
//!
//! A coarse single-box estimate: every unit is stacked into one bounding box,
//! the smallest catalog box that holds it is chosen, and the chargeable weight
//! is priced against a zone/slab rate table.

use std::collections::BTreeMap;

use u_cartonize_core::geometry::EPSILON;
use u_cartonize_core::{Dimensions, Error, PackingConfig, Result, Solver};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Margin added to every axis of the stacked bounding box.
pub const SAFETY_MARGIN_CM: f64 = 2.0;

/// An order line to ship.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShipItem {
    pub sku: String,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity", alias = "qty"))]
    pub quantity: usize,
    pub weight_kg: f64,
    pub dimensions_cm: Dimensions,
}

#[cfg(feature = "serde")]
fn default_quantity() -> usize {
    1
}

impl ShipItem {
    pub fn new(sku: impl Into<String>, weight_kg: f64, l: f64, w: f64, h: f64) -> Self {
        Self {
            sku: sku.into(),
            quantity: 1,
            weight_kg,
            dimensions_cm: Dimensions::new(l, w, h),
        }
    }

    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.sku.trim().is_empty() {
            return Err(Error::InvalidItem("SKU must not be empty".into()));
        }
        if self.quantity == 0 {
            return Err(Error::InvalidItem(format!(
                "Quantity for '{}' must be at least 1",
                self.sku
            )));
        }
        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            return Err(Error::InvalidItem(format!(
                "Weight for '{}' must be a non-negative number, got {}",
                self.sku, self.weight_kg
            )));
        }
        if let Some((axis, value)) = self.dimensions_cm.invalid_axis() {
            return Err(Error::InvalidItem(format!(
                "Dimension {} for '{}' must be positive, got {}",
                axis, self.sku, value
            )));
        }
        Ok(())
    }
}

/// A shipping box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShippingBox {
    pub box_id: String,
    pub inner_dimensions_cm: Dimensions,
    #[cfg_attr(feature = "serde", serde(default))]
    pub empty_weight_kg: f64,
}

impl ShippingBox {
    pub fn new(box_id: impl Into<String>, l: f64, w: f64, h: f64) -> Self {
        Self {
            box_id: box_id.into(),
            inner_dimensions_cm: Dimensions::new(l, w, h),
            empty_weight_kg: 0.0,
        }
    }

    pub fn with_empty_weight(mut self, kg: f64) -> Self {
        self.empty_weight_kg = kg;
        self
    }

    /// Axis-by-axis fit check; the box is not turned.
    pub fn accommodates(&self, required: &Dimensions) -> bool {
        let inner = &self.inner_dimensions_cm;
        required.l <= inner.l + EPSILON
            && required.w <= inner.w + EPSILON
            && required.h <= inner.h + EPSILON
    }

    fn validate(&self) -> Result<()> {
        if let Some((axis, value)) = self.inner_dimensions_cm.invalid_axis() {
            return Err(Error::InvalidCarton(format!(
                "Dimension {} of box '{}' must be positive, got {}",
                axis, self.box_id, value
            )));
        }
        if !self.empty_weight_kg.is_finite() || self.empty_weight_kg < 0.0 {
            return Err(Error::InvalidCarton(format!(
                "Empty weight of box '{}' must be non-negative",
                self.box_id
            )));
        }
        Ok(())
    }
}

/// A distance band.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DistanceZone {
    pub name: String,
    /// Inclusive upper bound.
    pub max_distance_km: f64,
}

/// A weight band with a price per zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeightSlab {
    /// Inclusive upper bound.
    pub max_weight_kg: f64,
    /// Zone name to price.
    pub rates: BTreeMap<String, f64>,
}

/// Carrier rate table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RateTable {
    #[cfg_attr(feature = "serde", serde(default = "default_divisor"))]
    pub volumetric_divisor: f64,
    pub zones: Vec<DistanceZone>,
    pub slabs: Vec<WeightSlab>,
    /// Zone name to price per kg beyond the last slab.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_per_kg: BTreeMap<String, f64>,
}

#[cfg(feature = "serde")]
fn default_divisor() -> f64 {
    PackingConfig::DEFAULT_VOLUMETRIC_DIVISOR
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            volumetric_divisor: PackingConfig::DEFAULT_VOLUMETRIC_DIVISOR,
            zones: Vec::new(),
            slabs: Vec::new(),
            extra_per_kg: BTreeMap::new(),
        }
    }
}

impl RateTable {
    pub fn with_zone(mut self, name: impl Into<String>, max_distance_km: f64) -> Self {
        self.zones.push(DistanceZone {
            name: name.into(),
            max_distance_km,
        });
        self
    }

    /// Adds a slab; `rates` pairs zone names with prices.
    pub fn with_slab(mut self, max_weight_kg: f64, rates: &[(&str, f64)]) -> Self {
        self.slabs.push(WeightSlab {
            max_weight_kg,
            rates: rates.iter().map(|(z, r)| (z.to_string(), *r)).collect(),
        });
        self
    }

    pub fn with_extra_per_kg(mut self, zone: impl Into<String>, rate: f64) -> Self {
        self.extra_per_kg.insert(zone.into(), rate);
        self
    }

    pub fn with_volumetric_divisor(mut self, divisor: f64) -> Self {
        self.volumetric_divisor = divisor;
        self
    }

    /// Validates the table.
    pub fn validate(&self) -> Result<()> {
        if !self.volumetric_divisor.is_finite() || self.volumetric_divisor <= 0.0 {
            return Err(Error::ConfigError(format!(
                "Volumetric divisor must be positive, got {}",
                self.volumetric_divisor
            )));
        }
        if self.zones.is_empty() {
            return Err(Error::ConfigError("Rate table has no zones".into()));
        }
        if self.slabs.is_empty() {
            return Err(Error::ConfigError("Rate table has no weight slabs".into()));
        }
        Ok(())
    }

    /// Zone whose upper bound is the smallest one covering `distance_km`.
    pub fn zone_for(&self, distance_km: f64) -> Result<&DistanceZone> {
        self.zones
            .iter()
            .filter(|z| distance_km <= z.max_distance_km + EPSILON)
            .min_by(|a, b| a.max_distance_km.total_cmp(&b.max_distance_km))
            .ok_or_else(|| {
                Error::ConfigError(format!("No rate zone covers a distance of {distance_km} km"))
            })
    }

    /// Prices a chargeable weight in a zone.
    pub fn price(&self, zone: &str, chargeable_kg: f64) -> Result<RatedCost> {
        let mut slabs: Vec<&WeightSlab> = self.slabs.iter().collect();
        slabs.sort_by(|a, b| a.max_weight_kg.total_cmp(&b.max_weight_kg));

        let rate_in = |slab: &WeightSlab| {
            slab.rates.get(zone).copied().ok_or_else(|| {
                Error::ConfigError(format!(
                    "Slab up to {} kg has no rate for zone '{}'",
                    slab.max_weight_kg, zone
                ))
            })
        };

        if let Some(slab) = slabs
            .iter()
            .find(|s| s.max_weight_kg + EPSILON >= chargeable_kg)
        {
            return Ok(RatedCost {
                slab_max_weight_kg: slab.max_weight_kg,
                extra_kg: 0.0,
                cost: rate_in(*slab)?,
            });
        }

        let last = slabs
            .last()
            .ok_or_else(|| Error::ConfigError("Rate table has no weight slabs".into()))?;
        let extra_rate = self.extra_per_kg.get(zone).copied().ok_or_else(|| {
            Error::ConfigError(format!("No extra-per-kg rate for zone '{zone}'"))
        })?;
        let extra_kg = (chargeable_kg - last.max_weight_kg).ceil();

        Ok(RatedCost {
            slab_max_weight_kg: last.max_weight_kg,
            extra_kg,
            cost: rate_in(*last)? + extra_kg * extra_rate,
        })
    }
}

/// Slab lookup outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedCost {
    pub slab_max_weight_kg: f64,
    /// Whole kilograms billed beyond the last slab.
    pub extra_kg: f64,
    pub cost: f64,
}

/// Quote input.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct QuoteRequest {
    pub items: Vec<ShipItem>,
    pub boxes: Vec<ShippingBox>,
    /// Falls back to the calculator's table when absent.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rates: Option<RateTable>,
    pub distance_km: f64,
}

impl QuoteRequest {
    /// Parses a request from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SerializationError(e.to_string()))
    }

    /// Stacked bounding box of every unit, margin included.
    pub fn required_dimensions(&self) -> Dimensions {
        let mut bound = Dimensions::default();
        for item in &self.items {
            let d = &item.dimensions_cm;
            bound.l = bound.l.max(d.l);
            bound.w = bound.w.max(d.w);
            bound.h += d.h * item.quantity as f64;
        }
        bound.grown(SAFETY_MARGIN_CM)
    }

    /// Sum of unit weights.
    pub fn items_weight(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.weight_kg * i.quantity as f64)
            .sum()
    }
}

/// Priced shipment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ShippingQuote {
    pub box_id: String,
    pub zone: String,
    pub required_dimensions_cm: Dimensions,
    pub actual_weight_kg: f64,
    pub volumetric_weight_kg: f64,
    pub chargeable_weight_kg: f64,
    pub slab_max_weight_kg: f64,
    pub extra_kg: f64,
    pub cost: f64,
}

/// Single-box shipping estimator.
#[derive(Debug, Clone, Default)]
pub struct ShippingCalculator {
    default_rates: Option<RateTable>,
}

impl ShippingCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `rates` for requests that carry no table of their own.
    pub fn with_default_rates(rates: RateTable) -> Self {
        Self {
            default_rates: Some(rates),
        }
    }

    /// Quotes one shipment.
    pub fn quote(&self, request: &QuoteRequest) -> Result<ShippingQuote> {
        let rates = request
            .rates
            .as_ref()
            .or(self.default_rates.as_ref())
            .ok_or_else(|| Error::ConfigError("No rate table supplied".into()))?;
        rates.validate()?;

        if request.items.is_empty() {
            return Err(Error::InvalidItem("Nothing to ship".into()));
        }
        for item in &request.items {
            item.validate()?;
        }
        for b in &request.boxes {
            b.validate()?;
        }
        if !request.distance_km.is_finite() || request.distance_km < 0.0 {
            return Err(Error::ConfigError(format!(
                "Distance must be non-negative, got {}",
                request.distance_km
            )));
        }

        let required = request.required_dimensions();
        let chosen = request
            .boxes
            .iter()
            .filter(|b| b.accommodates(&required))
            .reduce(|best, b| {
                if b.inner_dimensions_cm.volume() < best.inner_dimensions_cm.volume() {
                    b
                } else {
                    best
                }
            })
            .ok_or_else(|| {
                Error::NoPlacement(format!(
                    "no box accommodates {:.1} x {:.1} x {:.1} cm",
                    required.l, required.w, required.h
                ))
            })?;

        let actual_weight_kg = request.items_weight() + chosen.empty_weight_kg;
        let volumetric_weight_kg = chosen.inner_dimensions_cm.volume() / rates.volumetric_divisor;
        let chargeable_weight_kg = actual_weight_kg.max(volumetric_weight_kg);

        let zone = rates.zone_for(request.distance_km)?;
        let rated = rates.price(&zone.name, chargeable_weight_kg)?;

        log::debug!(
            "quote: box {} zone {} chargeable {:.3} kg cost {:.2}",
            chosen.box_id,
            zone.name,
            chargeable_weight_kg,
            rated.cost
        );

        Ok(ShippingQuote {
            box_id: chosen.box_id.clone(),
            zone: zone.name.clone(),
            required_dimensions_cm: required,
            actual_weight_kg,
            volumetric_weight_kg,
            chargeable_weight_kg,
            slab_max_weight_kg: rated.slab_max_weight_kg,
            extra_kg: rated.extra_kg,
            cost: rated.cost,
        })
    }
}

impl Solver for ShippingCalculator {
    type Request = QuoteRequest;
    type Output = ShippingQuote;

    fn solve(&self, request: &QuoteRequest) -> Result<ShippingQuote> {
        self.quote(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rates() -> RateTable {
        RateTable::default()
            .with_zone("LOCAL", 50.0)
            .with_zone("REGIONAL", 500.0)
            .with_slab(1.0, &[("LOCAL", 40.0), ("REGIONAL", 60.0)])
            .with_slab(5.0, &[("LOCAL", 70.0), ("REGIONAL", 110.0)])
            .with_extra_per_kg("LOCAL", 10.0)
            .with_extra_per_kg("REGIONAL", 15.0)
    }

    fn boxes() -> Vec<ShippingBox> {
        vec![
            ShippingBox::new("LARGE", 60.0, 40.0, 40.0).with_empty_weight(0.8),
            ShippingBox::new("SMALL", 20.0, 15.0, 10.0).with_empty_weight(0.1),
            ShippingBox::new("MEDIUM", 30.0, 25.0, 20.0).with_empty_weight(0.3),
        ]
    }

    #[test]
    fn test_required_dimensions_stack_heights() {
        let request = QuoteRequest {
            items: vec![
                ShipItem::new("A", 0.2, 10.0, 8.0, 3.0).with_quantity(2),
                ShipItem::new("B", 0.1, 12.0, 5.0, 2.0),
            ],
            ..Default::default()
        };
        let d = request.required_dimensions();
        assert_relative_eq!(d.l, 14.0);
        assert_relative_eq!(d.w, 10.0);
        assert_relative_eq!(d.h, 10.0);
    }

    #[test]
    fn test_smallest_fitting_box() {
        let request = QuoteRequest {
            items: vec![ShipItem::new("A", 0.5, 10.0, 10.0, 4.0).with_quantity(2)],
            boxes: boxes(),
            rates: Some(rates()),
            distance_km: 20.0,
        };

        let quote = ShippingCalculator::new().quote(&request).unwrap();
        assert_eq!(quote.box_id, "SMALL");
        assert_eq!(quote.zone, "LOCAL");
        assert_relative_eq!(quote.actual_weight_kg, 1.1, epsilon = 1e-9);
        assert_relative_eq!(quote.volumetric_weight_kg, 0.6, epsilon = 1e-9);
        assert_relative_eq!(quote.chargeable_weight_kg, 1.1, epsilon = 1e-9);
        assert_relative_eq!(quote.cost, 70.0);
    }

    #[test]
    fn test_beyond_last_slab() {
        let request = QuoteRequest {
            items: vec![ShipItem::new("IRON", 6.3, 20.0, 20.0, 10.0)],
            boxes: boxes(),
            rates: Some(rates()),
            distance_km: 120.0,
        };

        let quote = ShippingCalculator::new().quote(&request).unwrap();
        assert_eq!(quote.box_id, "MEDIUM");
        assert_eq!(quote.zone, "REGIONAL");
        // 6.3 + 0.3 tare = 6.6 kg, 2 kg beyond the 5 kg slab.
        assert_relative_eq!(quote.extra_kg, 2.0);
        assert_relative_eq!(quote.cost, 140.0);
    }

    #[test]
    fn test_no_box_fits() {
        let request = QuoteRequest {
            items: vec![ShipItem::new("POLE", 1.0, 120.0, 5.0, 5.0)],
            boxes: boxes(),
            rates: Some(rates()),
            distance_km: 10.0,
        };
        let err = ShippingCalculator::new().quote(&request).unwrap_err();
        assert!(matches!(err, Error::NoPlacement(_)));
    }

    #[test]
    fn test_no_zone_for_distance() {
        let request = QuoteRequest {
            items: vec![ShipItem::new("A", 0.5, 10.0, 10.0, 4.0)],
            boxes: boxes(),
            rates: Some(rates()),
            distance_km: 900.0,
        };
        let err = ShippingCalculator::new().quote(&request).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_default_rates_fallback() {
        let request = QuoteRequest {
            items: vec![ShipItem::new("A", 0.5, 10.0, 10.0, 4.0)],
            boxes: boxes(),
            rates: None,
            distance_km: 10.0,
        };
        assert!(ShippingCalculator::new().quote(&request).is_err());
        assert!(ShippingCalculator::with_default_rates(rates())
            .quote(&request)
            .is_ok());
    }
}
