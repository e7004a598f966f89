//! Benchmark encode/decode cost per message kind and of registry dispatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seiwire_protocol::{
    type_url, Coin, ExecuteContract, Msg, PointerType, ProtoMessage, RegisterPointer, Registry,
    StoreCode,
};

fn execute_msg(batch: usize) -> ExecuteContract {
    let sends: Vec<_> = (0..batch)
        .map(|i| serde_json::json!({"token_id": i.to_string(), "recipient": "sei1recipient"}))
        .collect();
    let mut msg = ExecuteContract::new("sei1sender", "sei1contract")
        .with_json_msg(&serde_json::json!({"batch_send": {"sends": sends}}))
        .unwrap();
    msg.push_funds(&Coin::new(1_000, "usei")).unwrap();
    msg
}

fn bench_execute_contract(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute_contract");

    for batch in [1usize, 25, 250] {
        let msg = execute_msg(batch);
        let bytes = msg.encode().unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", batch), &msg, |b, msg| {
            b.iter(|| black_box(msg).encode().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decode", batch), &bytes, |b, bytes| {
            b.iter(|| ExecuteContract::decode(black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

fn bench_store_code(c: &mut Criterion) {
    // Typical optimized cw721 contract is a few hundred KiB
    let msg = StoreCode::new("sei1sender", vec![0xAB; 400 * 1024]);
    let bytes = msg.encode().unwrap();

    let mut group = c.benchmark_group("store_code");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("encode", |b| b.iter(|| black_box(&msg).encode().unwrap()));
    group.bench_function("decode", |b| {
        b.iter(|| StoreCode::decode(black_box(&bytes)).unwrap())
    });
    group.finish();
}

fn bench_registry_dispatch(c: &mut Criterion) {
    let registry = Registry::with_baseline();
    let msg = Msg::RegisterPointer(RegisterPointer::new(
        "sei1sender",
        PointerType::Cw721,
        "0x0000000000000000000000000000000000000001",
    ));
    let any = registry
        .encode_any(type_url::MSG_REGISTER_POINTER, &msg)
        .unwrap();

    c.bench_function("registry_encode_any", |b| {
        b.iter(|| {
            registry
                .encode_any(black_box(type_url::MSG_REGISTER_POINTER), black_box(&msg))
                .unwrap()
        });
    });

    c.bench_function("registry_decode_any", |b| {
        b.iter(|| registry.decode_any(black_box(&any)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_execute_contract,
    bench_store_code,
    bench_registry_dispatch
);
criterion_main!(benches);
