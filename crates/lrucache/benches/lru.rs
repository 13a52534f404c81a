use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrucache::{LruCache, SharedLruCache};

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_hit", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.put(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_put_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("put_evict");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_new_key_full_cache", |b| {
        let mut cache = LruCache::new(100).unwrap();

        // Fill so every later put evicts
        for key in 0..100u64 {
            cache.put(key, key);
        }

        let mut counter = 100u64;
        b.iter(|| {
            black_box(cache.put(counter, counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write_shared", |b| {
        let cache = SharedLruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for key in 0..100u64 {
            cache.put(key, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 100)));
            } else {
                black_box(cache.put(counter % 2000, data.clone()));
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_put_evict, bench_mixed_50_50);
criterion_main!(benches);
