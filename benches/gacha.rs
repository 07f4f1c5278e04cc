use criterion::{
    BatchSize as Batching, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use gachastat::{
    BatchSize, SimpleRates, SparkPolicy, apply_sparks, beta_inc, build_single_and_batch,
    compute_family, draw_batch, neg_binom_cdf,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    const BATCHES_PER_ITER: usize = 1024;

    let rates = build_single_and_batch(SimpleRates {
        ssr: 0.0225,
        ssr_focus: 0.0075,
        sr: 0.1575,
        sr_focus: 0.0225,
    })
    .unwrap();

    for batch in [BatchSize::One, BatchSize::Ten] {
        let table = rates.table(batch);
        group.throughput(Throughput::Elements((BATCHES_PER_ITER * batch.len()) as u64));
        group.bench_function(format!("draw_batch_{batch:?}"), |b| {
            b.iter_batched_ref(
                || Pcg32::seed_from_u64(999),
                |rng| {
                    let mut hits = 0usize;
                    for _ in 0..BATCHES_PER_ITER {
                        hits += draw_batch(table, rng).hits();
                    }
                    black_box(hits)
                },
                Batching::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_odds(c: &mut Criterion) {
    let mut group = c.benchmark_group("odds");

    group.bench_function("beta_inc_large_shape", |b| {
        b.iter(|| beta_inc(black_box(0.0075), black_box(5.0), black_box(996.0)))
    });

    for &n in &[200usize, 1000, 2000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("neg_binom_cdf_n={n}"), |b| {
            b.iter(|| neg_binom_cdf(black_box(5), black_box(0.0075), Some(n)))
        });
    }

    group.bench_function("compute_family_sparked", |b| {
        b.iter(|| compute_family(black_box(0.0075), 5, 1000, true, 200))
    });

    let base = compute_family(0.0075, 5, 1000, false, 200).unwrap();
    group.bench_function("apply_sparks", |b| {
        b.iter(|| apply_sparks(black_box(base.curves()), 200, SparkPolicy::OnCompletion))
    });
    group.finish();
}

criterion_group!(gacha, bench_draw, bench_odds);
criterion_main!(gacha);
