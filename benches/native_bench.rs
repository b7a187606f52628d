use criterion::{black_box, criterion_group, criterion_main, Criterion};

use calico::schema::{FieldDescriptor, StructDescriptor};
use calico::{FromNative, NativeValue, Record, ToNative, TypeDescriptor};

fn order_type() -> TypeDescriptor {
    TypeDescriptor::Struct(StructDescriptor::new(
        "Order",
        vec![
            FieldDescriptor::new("id", TypeDescriptor::u64()),
            FieldDescriptor::new("owner", TypeDescriptor::Address),
            FieldDescriptor::new("price", TypeDescriptor::Decimal { scale: Some(18) }),
            FieldDescriptor::new("tags", TypeDescriptor::list(TypeDescriptor::Str)),
        ],
    ))
}

fn order_native() -> NativeValue {
    Record::new()
        .with("id", 77u64)
        .with("owner", vec![0xabu8; 32])
        .with("price", "12.345")
        .with(
            "tags",
            NativeValue::Seq(vec!["limit".into(), "post-only".into(), "gtc".into()]),
        )
        .into()
}

fn from_native_bench(c: &mut Criterion) {
    let ty = order_type();
    let native = order_native();
    c.bench_function("set_from_native", |b| {
        b.iter(|| {
            let mut value = ty.placeholder();
            black_box(value.set_from_native(&native))
        })
    });
}

fn to_native_bench(c: &mut Criterion) {
    let mut value = order_type().placeholder();
    value.set_from_native(&order_native()).unwrap();
    c.bench_function("to_native", |b| b.iter(|| black_box(value.to_native())));
}

criterion_group! {
    name = native_benches;
    config = Criterion::default();
    targets = from_native_bench, to_native_bench
}

criterion_main!(native_benches);
