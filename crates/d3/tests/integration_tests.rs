//! Integration tests for u-cartonize-d3.
//!
//! Randomized orders are generated from fixed seeds so every run checks the
//! same inputs.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_cartonize_core::geometry::EPSILON;
use u_cartonize_d3::{
    expand_lines, CartonType, Cartonizer, ItemInstance, LineItem, OrderRequest,
    OrientationConstraint, PackingPlan,
};

fn catalog() -> Vec<CartonType> {
    vec![
        CartonType::new("XS", 20.0, 15.0, 10.0, 5.0).with_empty_weight(0.2),
        CartonType::new("S", 30.0, 25.0, 20.0, 12.0).with_empty_weight(0.4),
        CartonType::new("M", 45.0, 35.0, 30.0, 20.0).with_empty_weight(0.8),
        CartonType::new("L", 60.0, 50.0, 40.0, 30.0).with_empty_weight(1.2),
    ]
}

fn random_order(seed: u64, lines: usize) -> OrderRequest {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut request = OrderRequest::new(format!("RND-{}", seed));

    for i in 0..lines {
        let item = LineItem::new(
            format!("SKU{}", i),
            rng.random_range(0.1..8.0),
            rng.random_range(2.0..45.0),
            rng.random_range(2.0..35.0),
            rng.random_range(2.0..30.0),
        )
        .with_quantity(rng.random_range(1..4))
        .with_rotatable(rng.random_bool(0.8))
        .with_upright_only(rng.random_bool(0.2))
        .with_fragile(rng.random_bool(0.15));
        request = request.with_item(item);
    }

    // An occasional unit no catalog entry can take.
    if seed % 3 == 0 {
        request = request.with_item(LineItem::new("OVERSIZE", 1.0, 90.0, 10.0, 10.0));
    }
    if seed % 4 == 0 {
        request = request.with_item(LineItem::new("OVERWEIGHT", 40.0, 10.0, 10.0, 10.0));
    }

    for carton in catalog() {
        request = request.with_carton(carton);
    }
    request
}

fn unit_table(request: &OrderRequest) -> HashMap<String, ItemInstance> {
    expand_lines(&request.items)
        .into_iter()
        .map(|i| (i.id.clone(), i))
        .collect()
}

fn carton_type<'a>(request: &'a OrderRequest, id: &str) -> &'a CartonType {
    request
        .cartons
        .iter()
        .find(|c| c.carton_id == id)
        .expect("carton type exists")
}

fn check_plan(request: &OrderRequest, plan: &PackingPlan) {
    let units = unit_table(request);

    // Conservation: each unit exactly once, either packed or unpacked.
    let mut seen = HashSet::new();
    for carton in &plan.recommended_cartons {
        for id in &carton.unit_ids {
            assert!(seen.insert(id.clone()), "{} packed twice", id);
        }
    }
    for id in &plan.unpacked_items {
        assert!(seen.insert(id.clone()), "{} both packed and unpacked", id);
    }
    assert_eq!(seen.len(), units.len());

    let violated: usize = plan
        .constraint_violations
        .iter()
        .map(|v| {
            v.split_whitespace()
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0)
        })
        .sum();
    assert_eq!(violated, plan.unpacked_items.len());

    for carton in &plan.recommended_cartons {
        let ctype = carton_type(request, &carton.carton_id);
        assert!(carton.item_count() >= 1);

        // Weight bound.
        assert!(carton.dead_weight_kg <= ctype.max_weight_kg + EPSILON);
        let expected: f64 = ctype.empty_weight_kg
            + carton
                .unit_ids
                .iter()
                .map(|id| units[id].weight_kg)
                .sum::<f64>();
        assert!((carton.dead_weight_kg - expected).abs() < 1e-6);
        assert_eq!(
            carton.billable_weight_kg,
            carton.dead_weight_kg.max(carton.volumetric_weight_kg)
        );

        // Height bound.
        assert!(carton.used_height() <= ctype.height() + EPSILON);

        let mut z = 0.0;
        for (i, layer) in carton.layers.iter().enumerate() {
            assert_eq!(layer.index, i);
            assert!((layer.z_offset_cm - z).abs() < 1e-9);
            z += layer.height_cm;

            // No overlap within a layer, and everything inside the floor.
            for (a, pa) in layer.placements.iter().enumerate() {
                assert!(pa.footprint().fits_within(ctype.length(), ctype.width()));
                assert!(pa.h <= layer.height_cm + EPSILON);
                for pb in layer.placements.iter().skip(a + 1) {
                    assert!(
                        !pa.footprint().overlaps(&pb.footprint()),
                        "{} overlaps {}",
                        pa.id,
                        pb.id
                    );
                }
            }

            // Fragile units only in the top layer.
            let has_fragile = layer.placements.iter().any(|p| units[&p.id].fragile);
            if has_fragile {
                assert_eq!(i, carton.layers.len() - 1);
            }
        }

        // Orientation validity.
        for p in carton.placements() {
            let unit = &units[&p.id];
            assert_eq!(p.sku, unit.sku);
            assert!(p.dimensions().is_permutation_of(&unit.dimensions_cm));
            assert!(p.top() <= ctype.height() + EPSILON);
            match unit.orientation {
                OrientationConstraint::Fixed => assert_eq!(p.dimensions(), unit.dimensions_cm),
                OrientationConstraint::Upright => assert_eq!(p.h, unit.dimensions_cm.h),
                OrientationConstraint::Any => {}
            }
        }
    }
}

mod scenario_tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_fit() {
        let request = OrderRequest::new("SIMPLE")
            .with_item(LineItem::new("CUBE", 5.0, 50.0, 50.0, 50.0))
            .with_carton(CartonType::new("C60", 60.0, 60.0, 60.0, 20.0).with_empty_weight(1.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert_eq!(plan.recommended_cartons.len(), 1);
        let carton = &plan.recommended_cartons[0];
        assert_eq!(carton.items_packed, vec!["CUBE".to_string()]);
        assert_relative_eq!(carton.dead_weight_kg, 6.0, epsilon = 1e-9);
        assert_relative_eq!(carton.volumetric_weight_kg, 43.2, epsilon = 1e-9);
        assert_relative_eq!(carton.billable_weight_kg, 43.2, epsilon = 1e-9);
        check_plan(&request, &plan);
    }

    #[test]
    fn test_overweight_single_item() {
        let request = OrderRequest::new("HEAVY")
            .with_item(LineItem::new("ANVIL", 25.0, 20.0, 20.0, 20.0))
            .with_carton(CartonType::new("C", 60.0, 60.0, 60.0, 20.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert!(plan.recommended_cartons.is_empty());
        assert_eq!(plan.constraint_violations.len(), 1);
        assert!(plan.constraint_violations[0].starts_with("1 item(s)"));
        check_plan(&request, &plan);
    }

    #[test]
    fn test_fragile_on_top() {
        // Equal footprints covering the whole floor: the two units only share
        // the carton if stacked.
        let request = OrderRequest::new("FRAGILE")
            .with_item(LineItem::new("GLASS", 1.0, 30.0, 30.0, 20.0).with_fragile(true))
            .with_item(LineItem::new("BOOKS", 3.0, 30.0, 30.0, 20.0))
            .with_carton(CartonType::new("C", 30.0, 30.0, 40.0, 20.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert_eq!(plan.recommended_cartons.len(), 1);
        let layers = &plan.recommended_cartons[0].layers;
        let layer_of = |sku: &str| {
            layers
                .iter()
                .find(|l| l.items.iter().any(|s| s == sku))
                .map(|l| l.index)
                .unwrap()
        };
        assert!(layer_of("BOOKS") < layer_of("GLASS"));
        check_plan(&request, &plan);
    }

    #[test]
    fn test_small_fragile_unit_does_not_strand_stack() {
        // The mug would fit beside the first book; it must wait for the top.
        let request = OrderRequest::new("BOOKS-MUG")
            .with_item(
                LineItem::new("BOOK", 1.0, 30.0, 30.0, 10.0)
                    .with_rotatable(false)
                    .with_quantity(3),
            )
            .with_item(
                LineItem::new("MUG", 0.3, 5.0, 5.0, 5.0)
                    .with_rotatable(false)
                    .with_fragile(true),
            )
            .with_carton(CartonType::new("C", 35.0, 30.0, 60.0, 50.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert_eq!(plan.carton_count(), 1);
        assert!(plan.unpacked_items.is_empty());
        let layers = &plan.recommended_cartons[0].layers;
        assert_eq!(layers.len(), 4);
        let top = layers.iter().max_by_key(|l| l.index).unwrap();
        assert_eq!(top.items, vec!["MUG".to_string()]);
        check_plan(&request, &plan);
    }

    #[test]
    fn test_skipped_unit_fits_later_anchor() {
        // X has no anchor until Y is placed; without a second pass it would
        // need a second carton since A uses the full height.
        let request = OrderRequest::new("RETRY")
            .with_item(LineItem::new("A", 1.0, 10.0, 10.0, 50.0).with_rotatable(false))
            .with_item(LineItem::new("B", 1.0, 25.0, 10.0, 10.0).with_rotatable(false))
            .with_item(LineItem::new("X", 1.0, 5.0, 15.0, 10.0).with_rotatable(false))
            .with_item(LineItem::new("Y", 1.0, 15.0, 5.0, 5.0).with_rotatable(false))
            .with_carton(CartonType::new("C", 30.0, 20.0, 50.0, 50.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert_eq!(plan.carton_count(), 1);
        assert_eq!(plan.recommended_cartons[0].item_count(), 4);
        assert_eq!(plan.recommended_cartons[0].layers.len(), 1);
        check_plan(&request, &plan);
    }

    #[test]
    fn test_upright_liquid_keeps_height() {
        let request = OrderRequest::new("LIQUID")
            .with_item(
                LineItem::new("BOTTLE", 1.0, 8.0, 8.0, 30.0)
                    .with_upright_only(true)
                    .with_quantity(2),
            )
            // Lying down would fit the short carton, standing up only the tall one.
            .with_carton(CartonType::new("SHORT", 40.0, 40.0, 10.0, 20.0))
            .with_carton(CartonType::new("TALL", 20.0, 20.0, 35.0, 20.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert_eq!(plan.recommended_cartons.len(), 1);
        assert_eq!(plan.recommended_cartons[0].carton_id, "TALL");
        check_plan(&request, &plan);
    }

    #[test]
    fn test_greedy_prefers_more_items_per_box() {
        let request = OrderRequest::new("GREEDY")
            .with_item(LineItem::new("A", 1.0, 10.0, 10.0, 10.0).with_quantity(4))
            .with_carton(CartonType::new("SMALL", 10.0, 10.0, 10.0, 20.0))
            .with_carton(CartonType::new("BIG", 20.0, 20.0, 10.0, 20.0));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert_eq!(plan.recommended_cartons.len(), 1);
        assert_eq!(plan.recommended_cartons[0].carton_id, "BIG");
        assert_eq!(plan.recommended_cartons[0].item_count(), 4);
    }

    #[test]
    fn test_no_cartons_strands_everything() {
        let request =
            OrderRequest::new("EMPTY").with_item(LineItem::new("A", 1.0, 1.0, 1.0, 1.0).with_quantity(3));

        let plan = Cartonizer::default_config().pack(&request).unwrap();

        assert!(plan.recommended_cartons.is_empty());
        assert_eq!(plan.unpacked_items.len(), 3);
        assert!(plan.constraint_violations[0].starts_with("3 item(s)"));
    }
}

mod property_tests {
    use super::*;

    #[test]
    fn test_random_orders_respect_invariants() {
        let packer = Cartonizer::default_config();
        for seed in 0..40 {
            let request = random_order(seed, 6);
            let plan = packer.pack(&request).unwrap();
            check_plan(&request, &plan);
        }
    }

    #[test]
    fn test_oversize_units_reported() {
        let packer = Cartonizer::default_config();
        let request = random_order(12, 4);
        let plan = packer.pack(&request).unwrap();

        assert!(plan.unpacked_items.contains(&"OVERSIZE-0".to_string()));
        assert!(plan.unpacked_items.contains(&"OVERWEIGHT-0".to_string()));
        assert!(!plan.is_complete());
    }

    #[test]
    fn test_deterministic() {
        let packer = Cartonizer::default_config();
        for seed in [1, 7, 21] {
            let request = random_order(seed, 8);
            let first = packer.pack(&request).unwrap();
            let second = packer.pack(&request).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_batch_matches_sequential() {
        let packer = Cartonizer::default_config();
        let requests: Vec<OrderRequest> = (100..110).map(|s| random_order(s, 5)).collect();

        let batch = packer.pack_batch(&requests);
        for (request, result) in requests.iter().zip(batch) {
            assert_eq!(result.unwrap(), packer.pack(request).unwrap());
        }
    }
}
