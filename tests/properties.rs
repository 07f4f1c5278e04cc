use approx::assert_abs_diff_eq;
use gachastat::{
    BatchSize, Categorical, Draw, Rarity, RarityRates, SimpleRates, SparkPolicy, StatsConfig,
    apply_sparks, build_single_and_batch, compute_family, compute_family_with, neg_binom_cdf,
    tally,
};
use rand::{SeedableRng, rngs::StdRng};

fn single_focus() -> SimpleRates {
    SimpleRates {
        ssr: 0.0225,
        ssr_focus: 0.0075,
        sr: 0.1575,
        sr_focus: 0.0225,
    }
}

#[test]
fn sampler_converges_on_declared_rates() {
    let rates = RarityRates::from_pairs([(Rarity::Sr, 0.3), (Rarity::R, 0.7)]);
    let mut rng = StdRng::seed_from_u64(2024);

    let draws = 100_000;
    let mut sr = 0usize;
    for _ in 0..draws {
        if rates.draw(&mut rng) == Rarity::Sr {
            sr += 1;
        }
    }
    let freq = sr as f64 / draws as f64;
    assert!((freq - 0.3).abs() < 0.01, "freq={freq}");
}

#[test]
fn simulated_ten_pulls_track_table_rates() {
    let rates = build_single_and_batch(single_focus()).unwrap();
    let ten = rates.table(BatchSize::Ten);
    let mut rng = StdRng::seed_from_u64(99);

    let counts = tally(ten, 20_000, &mut rng);
    assert_eq!(counts.pulls(), 200_000);

    // nine regular slots plus one pity slot per batch
    for rarity in Rarity::ALL.iter().copied() {
        let expected = ten.positions().iter().map(|p| p.get(rarity)).sum::<f64>() / 10.0;
        assert!(
            (counts.frequency(rarity) - expected).abs() < 0.01,
            "{rarity}: {} vs {expected}",
            counts.frequency(rarity)
        );
    }
    let focus = rates.single_rates().focus_rate();
    let hit_rate = counts.hits() as f64 / counts.pulls() as f64;
    assert!((hit_rate - focus).abs() < 0.01);
}

#[test]
fn end_to_end_single_hit_odds() {
    let family = compute_family(0.0075, 5, 1000, false, 200).unwrap();
    let closed_form = 1.0 - (1.0f64 - 0.0075).powi(200);
    assert_abs_diff_eq!(family.probability(0, 199).unwrap(), closed_form, epsilon = 1e-6);

    let poi = family.point(1, 200).unwrap();
    assert_eq!(poi.probability, family.probability(0, 199).unwrap());
}

#[test]
fn higher_targets_are_never_more_likely() {
    let family = compute_family(0.0075, 5, 1000, false, 200).unwrap();
    for i in 0..1000 {
        for r in 1..5 {
            let easier = family.probability(r - 1, i).unwrap();
            let harder = family.probability(r, i).unwrap();
            assert!(harder <= easier + 1e-12, "r={r} i={i}");
        }
    }
}

#[test]
fn sparked_curves_dominate_raw_curves() {
    let raw = compute_family(0.0075, 5, 1000, false, 200).unwrap();
    let sparked = compute_family(0.0075, 5, 1000, true, 200).unwrap();
    for r in 0..5 {
        for i in 0..1000 {
            assert!(sparked.probability(r, i).unwrap() >= raw.probability(r, i).unwrap());
        }
        // every target is reachable by sparks alone at pull 200 * (r+1)
        assert_eq!(sparked.probability(r, 200 * (r + 1) - 1), Some(1.0));
    }
}

#[test]
fn spark_conventions_differ_by_one_pull() {
    let base: Vec<Vec<f64>> = (1..=5u32)
        .map(|r| neg_binom_cdf(r, 0.0075, Some(1000)).unwrap())
        .collect();

    let on_completion = apply_sparks(&base, 200, SparkPolicy::OnCompletion);
    let deferred = apply_sparks(&base, 200, SparkPolicy::Deferred);

    assert_eq!(on_completion[0][199], 1.0);
    assert_eq!(deferred[0][199], base[0][199]);
    assert_eq!(deferred[0][200], 1.0);

    // banking later never helps
    for (late, early) in deferred.iter().zip(&on_completion) {
        for (d, o) in late.iter().zip(early) {
            assert!(d <= o);
        }
    }
}

#[test]
fn config_json_drives_family() {
    let config = StatsConfig::from_json(
        r#"{ "max_hits_tracked": 3, "max_pulls": 600, "apply_sparks": true }"#,
    )
    .unwrap();
    let family = compute_family_with(0.0075, &config).unwrap();
    assert_eq!(family.len(), 3);
    assert!(family.curves().iter().all(|c| c.len() == 600));
    assert_eq!(family.probability(2, 599), Some(1.0));
}
