use criterion::{black_box, criterion_group, criterion_main, Criterion};
use text_queue::*;

// cargo bench
pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("insert_back/remove_front 1000", |b| {
        b.iter(|| {
            let mut queue = Queue::new();
            for _ in 0..1000 {
                queue.insert_back(black_box("some short value")).unwrap();
            }
            let mut buf = [0u8; 8];
            while queue.remove_front(Some(&mut buf[..])).is_ok() {}
        })
    });

    let mut long = Queue::new();
    for i in 0..100_000 {
        long.insert_back(&i.to_string()).unwrap();
    }
    c.bench_function("reverse 100000", |b| b.iter(|| black_box(&mut long).reverse()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
