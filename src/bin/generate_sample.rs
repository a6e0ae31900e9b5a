use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    payload_kg: f64,
    class: i64,
    booster: &'static str,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sites = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
    // Booster category with its rough success probability; later hardware
    // lands more often.
    let boosters: [(&str, f64); 5] = [
        ("v1.0", 0.2),
        ("v1.1", 0.35),
        ("FT", 0.7),
        ("B4", 0.6),
        ("B5", 0.95),
    ];

    let mut launches = Vec::new();
    for flight in 1..=56 {
        let era = ((flight - 1) as usize * boosters.len()) / 56;
        let (booster, p_success) = boosters[era];
        let site = *rng.pick(&sites);
        // Payloads are quoted to the nearest 10 kg and capped at 9600 kg.
        let payload_kg = ((rng.next_f64() * 9600.0) / 10.0).round() * 10.0;
        let class = i64::from(rng.next_f64() < p_success);

        launches.push(Launch {
            flight,
            site,
            payload_kg,
            class,
            booster,
        });
    }

    // ---- CSV ----
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for l in &launches {
        writer
            .write_record([
                l.flight.to_string(),
                l.site.to_string(),
                l.class.to_string(),
                format!("{:.1}", l.payload_kg),
                l.booster.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(
                launches.iter().map(|l| l.flight).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                launches.iter().map(|l| l.site).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                launches.iter().map(|l| l.class).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                launches.iter().map(|l| l.payload_kg).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                launches.iter().map(|l| l.booster).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to {csv_path} and {parquet_path}",
        launches.len()
    );
}
