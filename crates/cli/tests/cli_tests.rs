//! End-to-end checks over the runner's library pieces.

use u_cartonize_cli::{CliConfig, SyntheticGenerator};
use u_cartonize_d3::{Cartonizer, OrderRequest};

#[test]
fn test_synthetic_order_survives_json_and_packs() {
    let config = CliConfig::from_toml("[packing]\npackingClearanceCm = 1.0").unwrap();
    let cartonizer = Cartonizer::new(config.packing);

    for seed in 0..10 {
        let order = SyntheticGenerator::with_seed(seed).order(format!("SYN-{seed}"), 6);
        let json = serde_json::to_string(&order).unwrap();
        let parsed = OrderRequest::from_json(&json).unwrap();
        assert_eq!(parsed.unit_count(), order.unit_count());

        let plan = cartonizer.pack(&parsed).unwrap();
        assert_eq!(plan.packed_count() + plan.unpacked_count(), order.unit_count());
        for carton in &plan.recommended_cartons {
            let inner = carton.inner_dimensions_cm;
            let outer = carton.final_dimensions_cm;
            assert!((outer.l - inner.l - 1.0).abs() < 1e-9);
            assert!((outer.h - inner.h - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_plan_serializes_camel_case() {
    let order = SyntheticGenerator::with_seed(3).order("SYN-3", 3);
    let plan = Cartonizer::default_config().pack(&order).unwrap();
    let value = serde_json::to_value(&plan).unwrap();

    assert!(value.get("recommendedCartons").is_some());
    assert!(value.get("optimizationReason").is_some());
    assert!(value.get("constraintViolations").is_some());
}
