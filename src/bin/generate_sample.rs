use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in launch order: (category, serial prefix, success rate).
const GENERATIONS: [(&str, &str, f64); 5] = [
    ("v1.0", "F9 v1.0  B", 0.2),
    ("v1.1", "F9 v1.1  B", 0.35),
    ("FT", "F9 FT B", 0.7),
    ("B4", "F9 B4 B", 0.8),
    ("B5", "F9 B5 B", 0.9),
];

const LAUNCHES: usize = 60;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Row {
    flight: i64,
    site: String,
    class: i64,
    payload: f64,
    booster: String,
    category: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (0..LAUNCHES)
        .map(|i| {
            let generation = GENERATIONS[i * GENERATIONS.len() / LAUNCHES];
            let (category, prefix, success_rate) = generation;
            // Early flights carry little; later generations lift up to ~9.6 t.
            let ceiling = 2000.0 + 7600.0 * (i as f64 / LAUNCHES as f64);
            let payload = (rng.next_f64() * ceiling).round();
            let class = i64::from(rng.next_f64() < success_rate);
            Row {
                flight: i as i64 + 1,
                site: rng.pick(&SITES).to_string(),
                class,
                payload,
                booster: format!("{prefix}{}", 1003 + i),
                category: category.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for row in rows {
        writer.write_record([
            row.flight.to_string(),
            row.site.clone(),
            row.class.to_string(),
            format!("{:.1}", row.payload),
            row.booster.clone(),
            row.category.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn to_batch(rows: &[Row]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.category.as_str()))),
        ],
    )
    .context("building record batch")?;
    Ok(batch)
}

fn write_parquet(path: &str, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let csv_path = "sample_launches.csv";
    let parquet_path = "sample_launches.parquet";

    write_csv(csv_path, &rows)?;
    let batch = to_batch(&rows)?;
    write_parquet(parquet_path, &batch)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!("Wrote {} launches to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
