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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

struct Listing {
    price: i64,
    year: Option<i64>,
    model: String,
    condition: String,
    fuel: String,
    odometer: Option<f64>,
    days_listed: i64,
}

impl Listing {
    fn is_complete(&self) -> bool {
        self.year.is_some() && self.odometer.is_some()
    }

    fn csv_record(&self) -> [String; 7] {
        [
            self.price.to_string(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.model.clone(),
            self.condition.clone(),
            self.fuel.clone(),
            self.odometer.map(|o| format!("{o:.0}")).unwrap_or_default(),
            self.days_listed.to_string(),
        ]
    }
}

const HEADERS: [&str; 7] = [
    "price",
    "year",
    "model",
    "condition",
    "fuel",
    "odometer",
    "days_listed",
];

const LISTINGS: usize = 2000;
const CLEAN_SAMPLE: usize = 200;

fn generate(rng: &mut SimpleRng) -> Vec<Listing> {
    // (model, price when new)
    let models: [(&str, f64); 8] = [
        ("bmw x5", 48000.0),
        ("ford f-150", 34000.0),
        ("hyundai sonata", 22000.0),
        ("chrysler 200", 21000.0),
        ("toyota camry", 25000.0),
        ("honda pilot", 33000.0),
        ("chevrolet silverado", 36000.0),
        ("subaru outback", 28000.0),
    ];
    let conditions = ["new", "like new", "excellent", "good", "fair", "salvage"];
    let fuels = ["gas", "gas", "gas", "diesel", "hybrid"];

    (0..LISTINGS)
        .map(|_| {
            let (model, new_price) = *rng.pick(&models);
            let year = 1995 + (rng.next_u64() % 25) as i64;
            let age = (2019 - year) as f64;

            let odometer = (age * 12_500.0 + rng.gauss(0.0, 15_000.0)).max(0.0);
            let depreciation = 0.85f64.powf(age) * (1.0 - odometer / 600_000.0).max(0.2);
            let price = (new_price * depreciation + rng.gauss(0.0, 1_500.0)).max(500.0);

            Listing {
                price: (price / 100.0).round() as i64 * 100,
                year: (!rng.chance(0.07)).then_some(year),
                model: model.to_string(),
                condition: rng.pick(&conditions).to_string(),
                fuel: rng.pick(&fuels).to_string(),
                odometer: (!rng.chance(0.15)).then_some(odometer.round()),
                days_listed: (rng.next_u64() % 120) as i64,
            }
        })
        .collect()
}

fn write_csv(path: &str, listings: &[&Listing]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer.write_record(HEADERS).expect("Failed to write header");
    for listing in listings {
        writer
            .write_record(listing.csv_record())
            .expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(path: &str, listings: &[Listing]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("price", DataType::Int64, false),
        Field::new("year", DataType::Int64, true),
        Field::new("model", DataType::Utf8, false),
        Field::new("condition", DataType::Utf8, false),
        Field::new("fuel", DataType::Utf8, false),
        Field::new("odometer", DataType::Float64, true),
        Field::new("days_listed", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.price))),
            Arc::new(Int64Array::from_iter(listings.iter().map(|l| l.year))),
            Arc::new(StringArray::from_iter_values(listings.iter().map(|l| l.model.as_str()))),
            Arc::new(StringArray::from_iter_values(
                listings.iter().map(|l| l.condition.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(listings.iter().map(|l| l.fuel.as_str()))),
            Arc::new(Float64Array::from_iter(listings.iter().map(|l| l.odometer))),
            Arc::new(Int64Array::from_iter_values(listings.iter().map(|l| l.days_listed))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let listings = generate(&mut rng);

    let all: Vec<&Listing> = listings.iter().collect();
    write_csv("vehicles_us.csv", &all);

    let clean: Vec<&Listing> = listings
        .iter()
        .filter(|l| l.is_complete())
        .take(CLEAN_SAMPLE)
        .collect();
    write_csv("vehicles_clean_sample.csv", &clean);

    write_parquet("vehicles_us.parquet", &listings);

    println!(
        "Wrote {} listings to vehicles_us.csv / vehicles_us.parquet and {} complete rows to vehicles_clean_sample.csv",
        listings.len(),
        clean.len()
    );
}
