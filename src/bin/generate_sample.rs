//! Writes a synthetic `spacex_launch_dash.csv` with the same columns as the
//! published dataset, for running the dashboard without it.

use anyhow::{Context, Result};
use serde::Serialize;

const OUTPUT_PATH: &str = "spacex_launch_dash.csv";
const N_LAUNCHES: usize = 56;

/// Sites with their relative launch weight.
const SITES: [(&str, u64); 4] = [
    ("CCAFS LC-40", 26),
    ("VAFB SLC-4E", 10),
    ("KSC LC-39A", 13),
    ("CCAFS SLC-40", 7),
];

/// Booster generations in flight order: (category, serial prefix, first
/// flight, success probability, (min, max) payload kg).
const BOOSTERS: [(&str, &str, usize, f64, (f64, f64)); 5] = [
    ("v1.0", "F9 v1.0  B00", 0, 0.2, (0.0, 700.0)),
    ("v1.1", "F9 v1.1  B10", 5, 0.3, (500.0, 4600.0)),
    ("FT", "F9 FT B10", 20, 0.7, (2000.0, 9600.0)),
    ("B4", "F9 B4 B10", 40, 0.55, (2000.0, 9600.0)),
    ("B5", "F9 B5 B10", 50, 0.9, (3000.0, 7000.0)),
];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick_weighted(&mut self, weights: &[(&'static str, u64)]) -> &'static str {
        let total: u64 = weights.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_u64() % total;
        for (item, w) in weights {
            if roll < *w {
                return *item;
            }
            roll -= w;
        }
        weights[weights.len() - 1].0
    }
}

fn main() -> Result<()> {
    let file = std::fs::File::create(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;
    let written = write_sample(file)?;
    println!("Wrote {written} launches to {OUTPUT_PATH}");
    Ok(())
}

/// Write the seeded sample to `out`; the same bytes on every run.
fn write_sample<W: std::io::Write>(out: W) -> Result<usize> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_writer(out);

    for flight in 0..N_LAUNCHES {
        let (category, prefix, first_flight, p_success, (min_kg, max_kg)) = BOOSTERS
            .iter()
            .rev()
            .find(|b| flight >= b.2)
            .copied()
            .unwrap_or(BOOSTERS[0]);

        // The earliest flights carried dummy payloads.
        let payload = if flight < 2 {
            0.0
        } else {
            rng.uniform(min_kg, max_kg).round()
        };

        writer
            .serialize(Row {
                index: flight,
                flight_number: flight + 1,
                launch_site: rng.pick_weighted(&SITES),
                class: u8::from(rng.next_f64() < p_success),
                payload_mass_kg: payload,
                booster_version: format!("{prefix}{:02}", 3 + flight - first_flight),
                booster_version_category: category,
            })
            .with_context(|| format!("writing flight {}", flight + 1))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(N_LAUNCHES)
}
