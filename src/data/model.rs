use std::collections::BTreeSet;
use std::fmt;

use anyhow::{Context, Result, bail};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const GEOGRAPHY: &str = "Geography";
pub const GENDER: &str = "Gender";
pub const AGE: &str = "Age";
pub const ESTIMATED_SALARY: &str = "EstimatedSalary";
pub const EXITED: &str = "Exited";

pub const REQUIRED_COLUMNS: [&str; 5] = [GEOGRAPHY, GENDER, AGE, ESTIMATED_SALARY, EXITED];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A single source cell. Delimited files keep the field exactly as written
/// (`Text`), so columns the explorer does not use are carried through
/// unchanged; typed sources (JSON, Parquet) keep their native scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Raw field text, only parsed when a required column asks for it.
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) | CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integers, and floats without a fractional part (`42.0`).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            CellValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(i) => Some(i),
                Err(_) => CellValue::Float(s.trim().parse().ok()?).as_i64(),
            },
            _ => None,
        }
    }

    /// `0`/`1` flags and real booleans.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Text(s) if matches!(s.trim(), "true" | "True") => Some(true),
            CellValue::Text(s) if matches!(s.trim(), "false" | "False") => Some(false),
            other => match other.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
        }
    }

    /// Category label of a text-like cell, `None` when blank.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) | CellValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            other => Some(other.to_string()),
        }
    }
}

static NULL_CELL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// Customer – one row of the table
// ---------------------------------------------------------------------------

/// One customer row: the typed fields the explorer works with, plus every
/// cell of the source row in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub geography: String,
    pub gender: String,
    pub age: i64,
    pub estimated_salary: f64,
    pub exited: bool,
    pub cells: Vec<CellValue>,
}

/// Positions of the required columns within a header.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    geography: usize,
    gender: usize,
    age: usize,
    estimated_salary: usize,
    exited: usize,
}

impl ColumnIndex {
    pub fn locate(columns: &[String]) -> Result<Self> {
        let find = |name: &str| {
            columns
                .iter()
                .position(|c| c.trim() == name)
                .with_context(|| format!("missing required column '{name}'"))
        };
        Ok(ColumnIndex {
            geography: find(GEOGRAPHY)?,
            gender: find(GENDER)?,
            age: find(AGE)?,
            estimated_salary: find(ESTIMATED_SALARY)?,
            exited: find(EXITED)?,
        })
    }
}

impl Customer {
    /// Type the required cells of a source row. `row` is zero-based and only
    /// used in error messages.
    pub fn from_cells(cells: Vec<CellValue>, index: &ColumnIndex, row: usize) -> Result<Self> {
        let cell = |i: usize| cells.get(i).unwrap_or(&NULL_CELL);

        let geography = cell(index.geography)
            .as_label()
            .with_context(|| format!("row {row}: empty {GEOGRAPHY}"))?;
        let gender = cell(index.gender)
            .as_label()
            .with_context(|| format!("row {row}: empty {GENDER}"))?;

        let age = cell(index.age)
            .as_i64()
            .with_context(|| format!("row {row}: {AGE} '{}' is not an integer", cell(index.age)))?;
        if age < 0 {
            bail!("row {row}: {AGE} {age} is negative");
        }

        let salary_cell = cell(index.estimated_salary);
        let estimated_salary = salary_cell
            .as_f64()
            .with_context(|| format!("row {row}: {ESTIMATED_SALARY} '{salary_cell}' is not a number"))?;
        if !estimated_salary.is_finite() || estimated_salary < 0.0 {
            bail!("row {row}: {ESTIMATED_SALARY} {estimated_salary} is not a non-negative number");
        }

        let exited = cell(index.exited)
            .as_flag()
            .with_context(|| format!("row {row}: {EXITED} '{}' is not 0 or 1", cell(index.exited)))?;

        Ok(Customer {
            geography,
            gender,
            age,
            estimated_salary,
            exited,
            cells,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with the domains the filter widgets need.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Rows in source order.
    pub customers: Vec<Customer>,
    pub geographies: BTreeSet<String>,
    pub genders: BTreeSet<String>,
    /// Observed `(min, max)` age, `None` when there are no rows.
    pub age_bounds: Option<(i64, i64)>,
}

impl Dataset {
    /// Validate raw rows against the required schema and build the domains.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let index = ColumnIndex::locate(&columns)?;
        let customers = rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| Customer::from_cells(cells, &index, row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_customers(columns, customers))
    }

    pub fn from_customers(columns: Vec<String>, customers: Vec<Customer>) -> Self {
        let mut geographies = BTreeSet::new();
        let mut genders = BTreeSet::new();
        let mut age_bounds: Option<(i64, i64)> = None;

        for c in &customers {
            geographies.insert(c.geography.clone());
            genders.insert(c.gender.clone());
            age_bounds = Some(match age_bounds {
                None => (c.age, c.age),
                Some((lo, hi)) => (lo.min(c.age), hi.max(c.age)),
            });
        }

        Dataset {
            columns,
            customers,
            geographies,
            genders,
            age_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
