use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 10_000;
const CSV_PATH: &str = "Churn_Modelling.csv";
const PARQUET_PATH: &str = "Churn_Modelling.parquet";

const SURNAMES: [&str; 12] = [
    "Hargrave", "Hill", "Onio", "Boni", "Mitchell", "Chu", "Bartlett", "Obinna", "He", "Scott",
    "Romeo", "Yen",
];

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Columns of the generated table, in file order.
#[derive(Default)]
struct Columns {
    row_number: Vec<i64>,
    customer_id: Vec<i64>,
    surname: Vec<String>,
    credit_score: Vec<i64>,
    geography: Vec<String>,
    gender: Vec<String>,
    age: Vec<i64>,
    tenure: Vec<i64>,
    balance: Vec<f64>,
    num_of_products: Vec<i64>,
    has_cr_card: Vec<i64>,
    is_active_member: Vec<i64>,
    estimated_salary: Vec<f64>,
    exited: Vec<i64>,
}

impl Columns {
    const NAMES: [&'static str; 14] = [
        "RowNumber",
        "CustomerId",
        "Surname",
        "CreditScore",
        "Geography",
        "Gender",
        "Age",
        "Tenure",
        "Balance",
        "NumOfProducts",
        "HasCrCard",
        "IsActiveMember",
        "EstimatedSalary",
        "Exited",
    ];

    fn generate(rng: &mut SimpleRng) -> Self {
        let mut cols = Columns::default();
        for i in 0..ROWS {
            // Roughly the mix of the public churn dataset: half France,
            // a quarter each Germany and Spain.
            let geography = match rng.below(4) {
                0 | 1 => "France",
                2 => "Germany",
                _ => "Spain",
            };
            let gender = if rng.chance(0.545) { "Male" } else { "Female" };
            let age = rng.gauss(39.0, 10.5).round().clamp(18.0, 92.0) as i64;
            let is_active = rng.chance(0.515);

            let mut churn_p = 0.12;
            if geography == "Germany" {
                churn_p += 0.13;
            }
            if gender == "Female" {
                churn_p += 0.06;
            }
            if age > 45 {
                churn_p += 0.20;
            }
            if !is_active {
                churn_p += 0.06;
            }

            let balance = if rng.chance(0.36) {
                0.0
            } else {
                (rng.gauss(119_800.0, 30_000.0).max(3_700.0) * 100.0).round() / 100.0
            };

            cols.row_number.push(i as i64 + 1);
            cols.customer_id.push(15_565_701 + rng.below(250_000) as i64);
            cols.surname.push(SURNAMES[rng.below(SURNAMES.len() as u64) as usize].to_string());
            cols.credit_score.push(rng.gauss(650.0, 96.0).round().clamp(350.0, 850.0) as i64);
            cols.geography.push(geography.to_string());
            cols.gender.push(gender.to_string());
            cols.age.push(age);
            cols.tenure.push(rng.below(11) as i64);
            cols.balance.push(balance);
            cols.num_of_products.push(1 + rng.below(4) as i64);
            cols.has_cr_card.push(rng.chance(0.7) as i64);
            cols.is_active_member.push(is_active as i64);
            cols.estimated_salary
                .push((rng.next_f64() * 199_980.0 * 100.0).round() / 100.0 + 11.58);
            cols.exited.push(rng.chance(churn_p) as i64);
        }
        cols
    }

    fn write_csv(&self, path: &str) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
        writer.write_record(Self::NAMES)?;
        for i in 0..ROWS {
            writer.write_record([
                self.row_number[i].to_string(),
                self.customer_id[i].to_string(),
                self.surname[i].clone(),
                self.credit_score[i].to_string(),
                self.geography[i].clone(),
                self.gender[i].clone(),
                self.age[i].to_string(),
                self.tenure[i].to_string(),
                self.balance[i].to_string(),
                self.num_of_products[i].to_string(),
                self.has_cr_card[i].to_string(),
                self.is_active_member[i].to_string(),
                self.estimated_salary[i].to_string(),
                self.exited[i].to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_parquet(&self, path: &str) -> Result<()> {
        let fields: Vec<Field> = Self::NAMES
            .iter()
            .map(|&name| {
                let dtype = match name {
                    "Surname" | "Geography" | "Gender" => DataType::Utf8,
                    "Balance" | "EstimatedSalary" => DataType::Float64,
                    _ => DataType::Int64,
                };
                Field::new(name, dtype, false)
            })
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let ints = |v: &[i64]| -> ArrayRef { Arc::new(Int64Array::from(v.to_vec())) };
        let floats = |v: &[f64]| -> ArrayRef { Arc::new(Float64Array::from(v.to_vec())) };
        let strings = |v: &[String]| -> ArrayRef {
            Arc::new(StringArray::from(v.iter().map(String::as_str).collect::<Vec<_>>()))
        };

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                ints(&self.row_number),
                ints(&self.customer_id),
                strings(&self.surname),
                ints(&self.credit_score),
                strings(&self.geography),
                strings(&self.gender),
                ints(&self.age),
                ints(&self.tenure),
                floats(&self.balance),
                ints(&self.num_of_products),
                ints(&self.has_cr_card),
                ints(&self.is_active_member),
                floats(&self.estimated_salary),
                ints(&self.exited),
            ],
        )
        .context("building record batch")?;

        let file = std::fs::File::create(path).context("creating parquet file")?;
        let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
        writer.write(&batch).context("writing parquet batch")?;
        writer.close().context("closing parquet writer")?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let columns = Columns::generate(&mut rng);

    columns.write_csv(CSV_PATH)?;
    columns.write_parquet(PARQUET_PATH)?;

    let churned: i64 = columns.exited.iter().sum();
    println!("Wrote {ROWS} customers ({churned} churned) to {CSV_PATH} and {PARQUET_PATH}");
    Ok(())
}
