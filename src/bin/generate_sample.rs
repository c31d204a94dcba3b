use anyhow::{Context, Result};

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// State name, county count, typical 1989 income.
const STATES: [(&str, usize, f64); 5] = [
    ("Alabama", 12, 21000.0),
    ("California", 18, 33000.0),
    ("New York", 15, 30000.0),
    ("Ohio", 14, 27000.0),
    ("Texas", 20, 24000.0),
];

const COUNTY_STEMS: [&str; 10] = [
    "Washington",
    "Franklin",
    "Jefferson",
    "Lincoln",
    "Madison",
    "Clay",
    "Marion",
    "Union",
    "Monroe",
    "Jackson",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "counties.csv".to_string());

    let mut wtr = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    // Remote-source header spelling; fips is ignored by the loader.
    wtr.write_record(["state", "county", "income-2015", "income-1989", "fips"])?;

    let mut rows = 0usize;
    for (state_idx, &(state, n_counties, base_income)) in STATES.iter().enumerate() {
        for i in 0..n_counties {
            let county = format!(
                "{} County {}",
                COUNTY_STEMS[i % COUNTY_STEMS.len()],
                i / COUNTY_STEMS.len() + 1
            );
            let baseline = base_income * rng.range(0.7, 1.4);
            let growth = rng.range(1.3, 2.6);
            let recent = baseline * growth;

            // Sprinkle the gaps real census extracts have.
            let roll = rng.next_f64();
            let (recent_cell, baseline_cell) = if roll < 0.04 {
                (format!("{recent:.0}"), "N/A".to_string())
            } else if roll < 0.07 {
                (String::new(), format!("{baseline:.0}"))
            } else if roll < 0.08 {
                (format!("{recent:.0}"), "0".to_string())
            } else {
                (format!("{recent:.0}"), format!("{baseline:.0}"))
            };

            let fips = format!("{:02}{:03}", state_idx + 1, 2 * i + 1);
            wtr.write_record([
                state,
                county.as_str(),
                recent_cell.as_str(),
                baseline_cell.as_str(),
                fips.as_str(),
            ])?;
            rows += 1;
        }
    }
    wtr.flush().context("flushing CSV")?;

    println!(
        "Wrote {rows} counties across {} states to {output_path}",
        STATES.len()
    );
    Ok(())
}
