use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::filter::FilterSelection;
use crate::data::model::Dataset;

pub const DEFAULT_DATA_FILE: &str = "Churn_Modelling.csv";
pub const DEFAULT_BIN_COUNT: u16 = 30;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "churn-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Portfolio app with an interactive customer-churn data explorer")]
pub struct Config {
    /// Customer table to explore (.csv, .tsv, .json or .parquet)
    #[arg(long, env = "CHURN_EXPLORER_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_BIN_COUNT, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub bins: u16,

    /// Run headless instead of opening the window
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the aggregates for a selection as JSON
    Summary(QueryArgs),
    /// Write the rows matching a selection to a CSV file
    Export {
        #[command(flatten)]
        query: QueryArgs,
        /// Destination CSV file
        #[arg(long)]
        out: PathBuf,
    },
}

/// Filter flags shared by the headless commands. Omitted flags select
/// everything, matching the widgets' initial state.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Geography to keep (repeatable)
    #[arg(long = "geography")]
    pub geographies: Vec<String>,

    /// Gender to keep (repeatable)
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Youngest age to keep (inclusive)
    #[arg(long)]
    pub age_min: Option<i64>,

    /// Oldest age to keep (inclusive)
    #[arg(long)]
    pub age_max: Option<i64>,
}

impl QueryArgs {
    pub fn to_selection(&self, dataset: &Dataset) -> FilterSelection {
        let mut selection = FilterSelection::all(dataset);
        if !self.geographies.is_empty() {
            selection.geographies = self.geographies.iter().cloned().collect();
        }
        if !self.genders.is_empty() {
            selection.genders = self.genders.iter().cloned().collect();
        }
        if let Some(min) = self.age_min {
            selection.age_min = min;
        }
        if let Some(max) = self.age_max {
            selection.age_max = max;
        }
        selection
    }
}
