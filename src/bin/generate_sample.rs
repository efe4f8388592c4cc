use anyhow::{Context, Result};

use data_sweeper::data::convert::{write_csv, write_xlsx};
use data_sweeper::data::model::{CellValue, Dataset};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn maybe_missing(rng: &mut SimpleRng, v: f64) -> CellValue {
    if rng.next_f64() < 0.08 {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}

/// Sales-like rows with roughly 10% duplicated rows and 8% missing numbers.
fn build_dataset(rng: &mut SimpleRng, rows: usize) -> Result<Dataset> {
    let regions = ["North", "South", "East", "West"];
    let products = ["Widget", "Gadget", "Gizmo"];

    let headers = ["order_id", "region", "product", "units", "unit_price", "discount"]
        .map(String::from)
        .to_vec();

    let mut records: Vec<Vec<CellValue>> = Vec::with_capacity(rows + rows / 10);
    for order_id in 0..rows as i64 {
        let region = regions[(rng.next_u64() % regions.len() as u64) as usize];
        let product = products[(rng.next_u64() % products.len() as u64) as usize];
        let units = rng.gauss(20.0, 6.0).round().max(1.0);
        let price = (rng.gauss(9.5, 2.0).max(0.5) * 100.0).round() / 100.0;
        let discount = (rng.next_f64() * 20.0).round() / 100.0;

        let record = vec![
            CellValue::Integer(1000 + order_id),
            CellValue::Text(region.to_string()),
            CellValue::Text(product.to_string()),
            maybe_missing(rng, units),
            maybe_missing(rng, price),
            maybe_missing(rng, discount),
        ];

        let duplicate = rng.next_f64() < 0.1;
        if duplicate {
            records.push(record.clone());
        }
        records.push(record);
    }

    Ok(Dataset::from_rows(headers, records)?)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let dataset = build_dataset(&mut rng, 200)?;

    let csv_path = "sample_data.csv";
    std::fs::write(csv_path, write_csv(&dataset)?).with_context(|| format!("writing {csv_path}"))?;

    let xlsx_path = "sample_data.xlsx";
    std::fs::write(xlsx_path, write_xlsx(&dataset)?)
        .with_context(|| format!("writing {xlsx_path}"))?;

    println!(
        "Wrote {} rows ({} missing values) to {csv_path} and {xlsx_path}",
        dataset.row_count(),
        dataset.null_count()
    );
    Ok(())
}
