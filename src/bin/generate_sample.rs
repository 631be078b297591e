use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use argh::FromArgs;
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value as JsonValue, json};

#[derive(FromArgs, Debug)]
/// Write a synthetic wine dataset as JSON and Parquet
struct Args {
    /// output path without extension (default: sample_wine)
    #[argh(option, short = 'o', default = "PathBuf::from(\"sample_wine\")")]
    out: PathBuf,

    /// samples per class (default: 60)
    #[argh(option, short = 'n', default = "60")]
    rows: usize,

    /// random seed (default: 42)
    #[argh(option, default = "42")]
    seed: u64,
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

/// Per-class (mean, std) of the generated attributes, roughly those of the
/// UCI wine data.
struct ClassProfile {
    class: i64,
    ash: (f64, f64),
    hue: (f64, f64),
    magnesium: (f64, f64),
    flavanoids: (f64, f64),
}

const PROFILES: [ClassProfile; 3] = [
    ClassProfile { class: 1, ash: (2.46, 0.23), hue: (1.06, 0.12), magnesium: (106.0, 10.0), flavanoids: (2.98, 0.40) },
    ClassProfile { class: 2, ash: (2.24, 0.32), hue: (1.06, 0.20), magnesium: (94.0, 16.0), flavanoids: (2.08, 0.70) },
    ClassProfile { class: 3, ash: (2.44, 0.18), hue: (0.68, 0.11), magnesium: (99.0, 11.0), flavanoids: (0.78, 0.29) },
];

struct Sample {
    class: i64,
    ash: f64,
    hue: f64,
    magnesium: i64,
    /// Kept as text: the source data mixes numbers and numeric strings.
    flavanoids: String,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(args: &Args) -> Vec<Sample> {
    let mut rng = SimpleRng::new(args.seed);
    let mut samples = Vec::with_capacity(args.rows * PROFILES.len());

    for profile in &PROFILES {
        for i in 0..args.rows {
            let flavanoids = round2(rng.gauss(profile.flavanoids.0, profile.flavanoids.1).max(0.1));
            let flavanoids = if i % 25 == 24 {
                "n/a".to_string()
            } else {
                flavanoids.to_string()
            };
            samples.push(Sample {
                class: profile.class,
                ash: round2(rng.gauss(profile.ash.0, profile.ash.1).max(1.0)),
                hue: round2(rng.gauss(profile.hue.0, profile.hue.1).max(0.4)),
                magnesium: rng.gauss(profile.magnesium.0, profile.magnesium.1).round().max(70.0) as i64,
                flavanoids,
            });
        }
    }
    samples
}

fn write_json(path: &Path, samples: &[Sample]) -> Result<()> {
    let rows: Vec<JsonValue> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut obj = Map::new();
            obj.insert("Alcohol".into(), json!(s.class));
            obj.insert("Class".into(), json!(s.class));
            obj.insert("Ash".into(), json!(s.ash));
            obj.insert("Hue".into(), json!(s.hue));
            obj.insert("Magnesium".into(), json!(s.magnesium));
            // Every third value stays a string, as in exports that mix encodings.
            let flav = match s.flavanoids.parse::<f64>() {
                Ok(v) if i % 3 != 0 => json!(v),
                _ => json!(s.flavanoids),
            };
            obj.insert("Flavanoids".into(), flav);
            JsonValue::Object(obj)
        })
        .collect();

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &rows).context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, samples: &[Sample]) -> Result<()> {
    let class = Int64Array::from(samples.iter().map(|s| s.class).collect::<Vec<_>>());
    let ash = Float64Array::from(samples.iter().map(|s| s.ash).collect::<Vec<_>>());
    let hue = Float64Array::from(samples.iter().map(|s| s.hue).collect::<Vec<_>>());
    let magnesium = Int64Array::from(samples.iter().map(|s| s.magnesium).collect::<Vec<_>>());
    let flavanoids = StringArray::from(
        samples.iter().map(|s| s.flavanoids.as_str()).collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Alcohol", DataType::Int64, false),
        Field::new("Class", DataType::Int64, false),
        Field::new("Ash", DataType::Float64, false),
        Field::new("Hue", DataType::Float64, false),
        Field::new("Magnesium", DataType::Int64, false),
        Field::new("Flavanoids", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(class.clone()),
            Arc::new(class),
            Arc::new(ash),
            Arc::new(hue),
            Arc::new(magnesium),
            Arc::new(flavanoids),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let samples = generate(&args);

    let json_path = args.out.with_extension("json");
    let parquet_path = args.out.with_extension("parquet");
    write_json(&json_path, &samples)?;
    write_parquet(&parquet_path, &samples)?;

    log::info!(
        "Wrote {} samples to {} and {}",
        samples.len(),
        json_path.display(),
        parquet_path.display()
    );
    println!("Wrote {} samples to {}", samples.len(), json_path.display());
    Ok(())
}
