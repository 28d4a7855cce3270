use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const FIRST_NAMES: &[&str] = &[
    "Ava", "Ben", "Chloe", "Diego", "Emma", "Farah", "Gus", "Hana", "Ivan", "Jade", "Kofi",
    "Lena", "Mateo", "Nina", "Omar", "Priya",
];
const LAST_NAMES: &[&str] = &[
    "Adams", "Brooks", "Chen", "Diaz", "Evans", "Fischer", "Garcia", "Haddad", "Ito", "Jones",
    "Kim", "Lopez", "Nguyen", "Okafor", "Patel", "Reyes",
];
const COURSES: &[&str] = &[
    "Honors Geometry",
    "Honors Algebra 2",
    "Honors Precalculus",
    "AP Calculus AB",
    "AP Statistics",
];
const NOTES: &[&str] = &["", "", "", "Teacher recommendation", "Summer bridge completed"];

const PSAT_COLUMNS: [&str; 5] = [
    "Math PSAT9F",
    "Math PSAT9S",
    "Math PSAT10F",
    "Math PSAT10S",
    "Math PSAT11F",
];

struct Student {
    first: String,
    last: String,
    grade: i64,
    course: String,
    notes: String,
    cum_gpa: f64,
    fab5_gpa: f64,
    /// One slot per PSAT administration; `None` if not yet taken or absent.
    psat: [Option<f64>; 5],
}

fn generate_student(rng: &mut SimpleRng) -> Student {
    let grade = 9 + (rng.next_u64() % 4) as i64;
    let ability = rng.gauss(0.0, 1.0);

    let cum_gpa = (3.1 + 0.45 * ability + rng.gauss(0.0, 0.15)).clamp(1.5, 4.0);
    let fab5_gpa = (cum_gpa + rng.gauss(-0.05, 0.2)).clamp(1.0, 4.0);

    // Administrations available by grade: 9 → fall/spring of 9th, etc.
    let taken = match grade {
        9 => 2,
        10 => 4,
        _ => 5,
    };
    let mut psat = [None; 5];
    for (i, slot) in psat.iter_mut().enumerate().take(taken) {
        if rng.chance(0.08) {
            continue; // absent that day
        }
        let score = 480.0 + 70.0 * ability + 12.0 * i as f64 + rng.gauss(0.0, 25.0);
        *slot = Some((score / 10.0).round().clamp(16.0, 76.0) * 10.0);
    }

    Student {
        first: rng.pick(FIRST_NAMES).to_string(),
        last: rng.pick(LAST_NAMES).to_string(),
        grade,
        course: rng.pick(COURSES).to_string(),
        notes: rng.pick(NOTES).to_string(),
        cum_gpa: (cum_gpa * 100.0).round() / 100.0,
        fab5_gpa: (fab5_gpa * 100.0).round() / 100.0,
        psat,
    }
}

fn write_csv(path: &str, students: &[Student]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![
        "First Name",
        "Last Name",
        "Grade Level",
        "I do not meet the grade prerequisite for",
        "Department Notes",
        "Cum GPA",
        "Fab 5 GPA",
    ];
    header.extend(PSAT_COLUMNS);
    writer.write_record(&header)?;

    for s in students {
        let mut row = vec![
            s.first.clone(),
            s.last.clone(),
            s.grade.to_string(),
            s.course.clone(),
            s.notes.clone(),
            format!("{:.2}", s.cum_gpa),
            format!("{:.2}", s.fab5_gpa),
        ];
        row.extend(
            s.psat
                .iter()
                .map(|v| v.map(|x| format!("{x:.0}")).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, students: &[Student]) {
    let text = |f: fn(&Student) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(students.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Student) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(students.iter().map(f).collect::<Vec<_>>()))
    };

    let mut fields = vec![
        Field::new("First Name", DataType::Utf8, false),
        Field::new("Last Name", DataType::Utf8, false),
        Field::new("Grade Level", DataType::Int64, false),
        Field::new("I do not meet the grade prerequisite for", DataType::Utf8, false),
        Field::new("Department Notes", DataType::Utf8, false),
        Field::new("Cum GPA", DataType::Float64, true),
        Field::new("Fab 5 GPA", DataType::Float64, true),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        text(|s| s.first.as_str()),
        text(|s| s.last.as_str()),
        Arc::new(Int64Array::from(
            students.iter().map(|s| s.grade).collect::<Vec<_>>(),
        )),
        text(|s| s.course.as_str()),
        text(|s| s.notes.as_str()),
        float(|s| Some(s.cum_gpa)),
        float(|s| Some(s.fab5_gpa)),
    ];
    for (i, name) in PSAT_COLUMNS.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(
            students.iter().map(|s| s.psat[i]).collect::<Vec<_>>(),
        )));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)
        .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let students: Vec<Student> = (0..240).map(|_| generate_student(&mut rng)).collect();

    let csv_path = "sample_students.csv";
    write_csv(csv_path, &students).expect("Failed to write CSV");

    let parquet_path = "sample_students.parquet";
    write_parquet(parquet_path, &students);

    println!(
        "Wrote {} students to {csv_path} and {parquet_path}",
        students.len()
    );
}
