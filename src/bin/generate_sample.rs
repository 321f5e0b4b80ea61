use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use rusty_bnb::data::model::Listing;

/// Write deterministic sample datasets for both viewers.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", about = "Write sample listings and students files")]
struct Cli {
    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of listings to generate
    #[arg(long, default_value_t = 500)]
    listings: usize,

    /// Number of students to generate
    #[arg(long, default_value_t = 1000)]
    students: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// (group, neighbourhood, latitude, longitude)
const AREAS: [(&str, &str, f64, f64); 10] = [
    ("Manhattan", "Harlem", 40.8116, -73.9465),
    ("Manhattan", "Midtown", 40.7549, -73.9840),
    ("Manhattan", "East Village", 40.7265, -73.9815),
    ("Brooklyn", "Williamsburg", 40.7081, -73.9571),
    ("Brooklyn", "Bedford-Stuyvesant", 40.6872, -73.9418),
    ("Brooklyn", "Kensington", 40.6428, -73.9726),
    ("Queens", "Astoria", 40.7644, -73.9235),
    ("Queens", "Flushing", 40.7675, -73.8331),
    ("Bronx", "Mott Haven", 40.8091, -73.9229),
    ("Staten Island", "St. George", 40.6437, -74.0736),
];

const HOSTS: [&str; 8] = [
    "John", "Elisabeth", "Garon", "Shunichi", "Lyndon", "Laura", "Chris", "Maya",
];

const ADJECTIVES: [&str; 6] = ["Cozy", "Sunny", "Spacious", "Quiet", "Modern", "Charming"];

fn generate_listing(id: u64, rng: &mut SimpleRng) -> Listing {
    let (group, neighbourhood, lat, lon) = *rng.pick(&AREAS);

    let roll = rng.next_f64();
    let (room_type, base_price, noun) = if roll < 0.52 {
        ("Entire home/apt", 180.0, "apartment")
    } else if roll < 0.97 {
        ("Private room", 80.0, "room")
    } else {
        ("Shared room", 60.0, "bed")
    };

    let price = (base_price * rng.gauss(0.0, 0.4).exp()).round().max(10.0);
    let minimum_nights = *rng.pick(&[1u32, 1, 1, 2, 2, 3, 5, 7, 30]);
    let number_of_reviews = (rng.next_f64().powi(2) * 150.0) as u32;
    let (last_review, reviews_per_month) = if number_of_reviews == 0 {
        (None, None)
    } else {
        let month = 1 + rng.below(7);
        let day = 1 + rng.below(28);
        let rpm = (rng.next_f64() * 4.0 * 100.0).round() / 100.0;
        (Some(format!("2019-{month:02}-{day:02}")), Some(rpm.max(0.01)))
    };

    Listing {
        id,
        name: format!(
            "{} {noun} in {neighbourhood}",
            rng.pick(&ADJECTIVES)
        ),
        host_id: 1000 + rng.below(400) as u64,
        host_name: rng.pick(&HOSTS).to_string(),
        neighbourhood_group: group.to_string(),
        neighbourhood: neighbourhood.to_string(),
        latitude: lat + rng.gauss(0.0, 0.006),
        longitude: lon + rng.gauss(0.0, 0.006),
        room_type: room_type.to_string(),
        price,
        minimum_nights,
        number_of_reviews,
        last_review,
        reviews_per_month,
        calculated_host_listings_count: 1 + rng.below(5) as u32,
        availability_365: rng.below(366) as u16,
    }
}

fn write_listings(cli: &Cli, rng: &mut SimpleRng) -> Result<PathBuf> {
    let path = cli.out_dir.join("NYC-airbnb-2019.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    for i in 0..cli.listings {
        writer.serialize(generate_listing(2539 + i as u64 * 7, rng))?;
    }
    writer.flush()?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

struct Student {
    gender: &'static str,
    group: &'static str,
    education: &'static str,
    lunch: &'static str,
    preparation: &'static str,
    math: i64,
    reading: i64,
    writing: i64,
}

const STUDENT_HEADER: [&str; 8] = [
    "gender",
    "race/ethnicity",
    "parental level of education",
    "lunch",
    "test preparation course",
    "math score",
    "reading score",
    "writing score",
];

fn generate_student(rng: &mut SimpleRng) -> Student {
    let preparation = if rng.next_f64() < 0.36 { "completed" } else { "none" };
    let bonus = if preparation == "completed" { 6.0 } else { 0.0 };
    let ability = rng.gauss(66.0, 13.0) + bonus;
    let mut score = |spread: f64| (ability + rng.gauss(0.0, spread)).round().clamp(0.0, 100.0) as i64;

    let math = score(6.0);
    let reading = score(5.0);
    let writing = score(5.0);
    Student {
        gender: *rng.pick(&["female", "male"]),
        group: *rng.pick(&["group A", "group B", "group C", "group D", "group E"]),
        education: *rng.pick(&[
            "some high school",
            "high school",
            "some college",
            "associate's degree",
            "bachelor's degree",
            "master's degree",
        ]),
        lunch: *rng.pick(&["standard", "standard", "free/reduced"]),
        preparation,
        math,
        reading,
        writing,
    }
}

fn write_students_csv(path: &Path, students: &[Student]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(STUDENT_HEADER)?;
    for s in students {
        writer.write_record([
            s.gender.to_string(),
            s.group.to_string(),
            s.education.to_string(),
            s.lunch.to_string(),
            s.preparation.to_string(),
            s.math.to_string(),
            s.reading.to_string(),
            s.writing.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn students_batch(students: &[Student]) -> Result<RecordBatch> {
    let text = |f: fn(&Student) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(students.iter().map(f).collect::<Vec<_>>()))
    };
    let number = |f: fn(&Student) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(students.iter().map(f).collect::<Vec<_>>()))
    };

    let fields: Vec<Field> = STUDENT_HEADER
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let data_type = if i < 5 { DataType::Utf8 } else { DataType::Int64 };
            Field::new(*name, data_type, false)
        })
        .collect();

    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        vec![
            text(|s| s.gender),
            text(|s| s.group),
            text(|s| s.education),
            text(|s| s.lunch),
            text(|s| s.preparation),
            number(|s| s.math),
            number(|s| s.reading),
            number(|s| s.writing),
        ],
    )?;
    Ok(batch)
}

fn write_students(cli: &Cli, rng: &mut SimpleRng) -> Result<(PathBuf, PathBuf)> {
    let students: Vec<Student> = (0..cli.students).map(|_| generate_student(rng)).collect();

    let csv_path = cli.out_dir.join("StudentsPerformance.csv");
    write_students_csv(&csv_path, &students)?;

    let batch = students_batch(&students)?;
    let preview = batch.slice(0, batch.num_rows().min(5));
    println!("{}", pretty_format_batches(&[preview])?);

    let parquet_path = cli.out_dir.join("StudentsPerformance.parquet");
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok((csv_path, parquet_path))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let listings_path = write_listings(&cli, &mut rng)?;
    println!("Wrote {} listings to {}", cli.listings, listings_path.display());

    let (csv_path, parquet_path) = write_students(&cli, &mut rng)?;
    println!(
        "Wrote {} students to {} and {}",
        cli.students,
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
