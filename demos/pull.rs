use gachastat::{
    BatchSize, Categorical, Rarity, SimpleRates, build_single_and_batch, draw_batch, tally,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // one SSR and one SR on focus
    let rates = build_single_and_batch(SimpleRates {
        ssr: 0.0225,
        ssr_focus: 0.0075,
        sr: 0.1575,
        sr_focus: 0.0225,
    })?;

    let mut rng = rand::rng();
    let ten = rates.table(BatchSize::Ten);

    let result = draw_batch(ten, &mut rng);
    println!("ten-pull: {result}");
    println!("  hits: {}, best: {:?}\n", result.hits(), result.best());

    let batches = 200_000;
    let counts = tally(ten, batches, &mut rng);

    println!("{batches} ten-pulls:");
    for rarity in Rarity::ALL.iter().copied() {
        println!(
            "{:>9} {:>8} {:>8.4}%",
            rarity.label(),
            counts.count(rarity),
            counts.frequency(rarity) * 100.0
        );
    }
    println!("focus hits: {}", counts.hits());

    Ok(())
}
