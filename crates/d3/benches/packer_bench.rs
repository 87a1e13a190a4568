//! Benchmarks for multi-carton packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use u_cartonize_d3::{CartonType, Cartonizer, LineItem, OrderRequest};

fn mixed_order() -> OrderRequest {
    let mut request = OrderRequest::new("BENCH")
        .with_item(LineItem::new("BOOK", 0.8, 24.0, 17.0, 4.0).with_quantity(12))
        .with_item(LineItem::new("MUG", 0.4, 12.0, 9.0, 10.0).with_quantity(8).with_fragile(true))
        .with_item(LineItem::new("BOTTLE", 1.1, 8.0, 8.0, 28.0).with_quantity(6).with_upright_only(true))
        .with_item(LineItem::new("BOX", 2.5, 30.0, 20.0, 15.0).with_quantity(6))
        .with_item(LineItem::new("PANEL", 1.5, 40.0, 30.0, 2.0).with_quantity(8).with_rotatable(false));

    for carton in [
        CartonType::new("S", 30.0, 25.0, 20.0, 12.0).with_empty_weight(0.4),
        CartonType::new("M", 45.0, 35.0, 30.0, 20.0).with_empty_weight(0.8),
        CartonType::new("L", 60.0, 50.0, 40.0, 30.0).with_empty_weight(1.2),
        CartonType::new("XL", 80.0, 60.0, 50.0, 40.0).with_empty_weight(1.8),
    ] {
        request = request.with_carton(carton);
    }
    request
}

fn packer_benchmark(c: &mut Criterion) {
    let request = mixed_order();
    let packer = Cartonizer::default_config();

    c.bench_function("pack_40_unit_mixed_order", |b| {
        b.iter(|| {
            let plan = packer.pack(black_box(&request));
            black_box(plan)
        })
    });

    let batch: Vec<OrderRequest> = (0..16).map(|_| mixed_order()).collect();
    c.bench_function("pack_batch_16_orders", |b| {
        b.iter(|| black_box(packer.pack_batch(black_box(&batch))))
    });
}

criterion_group!(benches, packer_benchmark);
criterion_main!(benches);
