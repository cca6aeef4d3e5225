use evictkit::builder::{CacheBuilder, CachePolicy, PolicyCache};
use evictkit::sink::NoopSink;
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 1024;

/// Deterministic key stream; 80% of reads land on the first tenth of the universe.
struct HotsetKeys {
    state: u64,
    universe: u64,
}

impl HotsetKeys {
    fn new(seed: u64, universe: u64) -> Self {
        Self {
            state: seed.max(1),
            universe,
        }
    }

    fn next_key(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        let hot = self.universe / 10;
        if x % 10 < 8 {
            x % hot.max(1)
        } else {
            x % self.universe
        }
    }
}

fn warm(policy: CachePolicy) -> PolicyCache<u64, u64, NoopSink> {
    let mut cache = CacheBuilder::new(CAPACITY).with_sink(NoopSink).build(policy);
    for i in 0..CAPACITY as u64 {
        cache.insert(i, i);
        // give LFU a read history so it evicts instead of growing
        let _ = cache.get(&i);
    }
    cache
}

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict");
    group.throughput(Throughput::Elements(CAPACITY as u64));
    for policy in CachePolicy::ALL {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || warm(policy),
                |mut cache| {
                    for i in 0..CAPACITY as u64 {
                        cache.insert(std::hint::black_box(i + 10_000), i);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(CAPACITY as u64));
    for policy in CachePolicy::ALL {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || warm(policy),
                |mut cache| {
                    for i in 0..CAPACITY as u64 {
                        let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_hotset_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("hotset_mixed");
    let ops = 4096u64;
    group.throughput(Throughput::Elements(ops));
    for policy in CachePolicy::ALL {
        group.bench_function(BenchmarkId::from_parameter(policy), |b| {
            b.iter_batched(
                || (warm(policy), HotsetKeys::new(0x9E37_79B9, (CAPACITY * 4) as u64)),
                |(mut cache, mut keys)| {
                    for _ in 0..ops {
                        let key = keys.next_key();
                        if cache.get(&key).is_none() {
                            cache.insert(key, key);
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert_evict, bench_get_hit, bench_hotset_mixed);
criterion_main!(benches);
