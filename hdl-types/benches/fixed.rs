use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hdl_types::Fixed;

fn fixed_ops(c: &mut Criterion) {
    let a = Fixed::from_int(true, 128, 32, 123_456_789);
    let b = Fixed::from_int(true, 128, 32, -987_654_321);

    c.bench_function("fixed add 160-bit", |bench| {
        bench.iter(|| black_box(black_box(a.clone()) + black_box(b.clone())));
    });

    c.bench_function("fixed mul 160-bit", |bench| {
        bench.iter(|| black_box(black_box(a.clone()) * black_box(b.clone())));
    });

    c.bench_function("fixed resize 160-bit to 48-bit", |bench| {
        bench.iter(|| black_box(black_box(&a).resize(40, 8)));
    });
}

criterion_group!(benches, fixed_ops);
criterion_main!(benches);
