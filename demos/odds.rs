use gachastat::{Rarity, SimpleRates, StatsConfig, build_single_and_batch, compute_for_rates};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // optional JSON config as the first argument, e.g. '{"apply_sparks": true}'
    let config = match std::env::args().nth(1) {
        Some(json) => StatsConfig::from_json(&json)?,
        None => StatsConfig::default(),
    };

    let rates = build_single_and_batch(SimpleRates {
        ssr: 0.0225,
        ssr_focus: 0.0075,
        sr: 0.1575,
        sr_focus: 0.0225,
    })?;
    let family = compute_for_rates(&rates, Rarity::SsrFocus, &config)?;

    print!("{:>6}", "pulls");
    for hits in 1..=family.len() {
        print!(" {:>8}", format!(">={hits}"));
    }
    println!();

    for pulls in (50..=config.max_pulls).step_by(50) {
        let Some(column) = family.at_pulls(pulls) else {
            break;
        };
        print!("{pulls:>6}");
        for p in column {
            print!(" {p:>8.4}");
        }
        println!();
    }

    if let Some(poi) = family.point(1, 200) {
        let note = if family.is_sparked() { " (sparked)" } else { "" };
        println!(
            "\nP(>= {} hit by pull {}) = {:.6}{note}",
            poi.hits, poi.pulls, poi.probability
        );
    }

    Ok(())
}
