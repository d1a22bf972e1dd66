use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Readings per probe, one every centimetre.
const N_READINGS: usize = 875;
const START_DEPTH: f64 = 0.6;
const SPACING: f64 = 0.01;

/// Friction ratio (%) of the stiff background soil.
const BACKGROUND_RF: f64 = 0.6;

#[derive(Clone, Copy)]
enum Band {
    /// Soft sand mixture: qc ≈ 1.5 MPa, Rf ≈ 0.8 %
    Soft,
    /// Clay: qc ≈ 0.5 MPa, Rf ≈ 1.2 %
    Clay,
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

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// Cone resistance (MPa) and sleeve friction (kPa) of one reading.
fn reading(band: Option<Band>, rng: &mut SimpleRng) -> (f64, Option<f64>) {
    let (qc, rf) = match band {
        None => (rng.uniform(8.0, 12.0), BACKGROUND_RF),
        Some(Band::Soft) => (rng.uniform(1.4, 1.6), 0.8),
        Some(Band::Clay) => (rng.uniform(0.45, 0.55), 1.2),
    };
    // sleeve friction drops out now and then
    let fs = (rng.next_f64() > 0.01).then(|| rf * 10.0 * qc);
    (qc, fs)
}

fn main() {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let probes: [(&str, &[(f64, f64, Band)]); 3] = [
        (
            "GEO-97/127-S1",
            &[(1.50, 1.80, Band::Soft), (4.00, 4.50, Band::Soft), (4.10, 4.20, Band::Clay)],
        ),
        (
            "GEO-97/127-S2",
            &[(2.95, 3.91, Band::Soft), (3.16, 3.20, Band::Clay), (6.10, 6.40, Band::Soft)],
        ),
        ("GEO-97/127-S3", &[(5.00, 7.50, Band::Clay)]),
    ];

    let mut all_number: Vec<&str> = Vec::new();
    let mut all_depth: Vec<f64> = Vec::new();
    let mut all_qc: Vec<Option<f64>> = Vec::new();
    let mut all_fs: Vec<Option<f64>> = Vec::new();

    for &(number, bands) in &probes {
        for i in 0..N_READINGS {
            let depth = ((START_DEPTH + i as f64 * SPACING) * 100.0).round() / 100.0;
            // later bands override earlier ones
            let band = bands
                .iter()
                .filter(|(top, bottom, _)| (*top..=*bottom).contains(&depth))
                .last()
                .map(|&(_, _, band)| band);
            let (qc, fs) = reading(band, &mut rng);

            all_number.push(number);
            all_depth.push(depth);
            all_qc.push(Some(qc));
            all_fs.push(fs);
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("sondeernummer", DataType::Utf8, false),
        Field::new("diepte", DataType::Float64, true),
        Field::new("qc", DataType::Float64, true),
        Field::new("fs", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(all_number)),
            Arc::new(Float64Array::from(all_depth)),
            Arc::new(Float64Array::from(all_qc)),
            Arc::new(Float64Array::from(all_fs)),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_probes.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    log::info!(
        "Wrote {} probes ({N_READINGS} readings each) to {output_path}",
        probes.len()
    );
}
