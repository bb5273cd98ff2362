use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Command;
use crate::data::aggregate::explore;
use crate::data::export::write_view_csv;
use crate::data::filter::apply;
use crate::data::loader::load;

/// Run one headless command against the dataset at `data`. JSON output goes
/// to `out`.
pub fn run(command: &Command, data: &Path, bin_count: usize, out: &mut impl Write) -> Result<()> {
    let dataset = load(data)?;
    log::info!("Loaded {} customers from {}", dataset.len(), data.display());

    match command {
        Command::Summary(query) => {
            let selection = query.to_selection(&dataset);
            let exploration = explore(&dataset, &selection, bin_count);
            serde_json::to_writer_pretty(&mut *out, &exploration).context("writing summary")?;
            writeln!(out)?;
        }
        Command::Export { query, out: path } => {
            let selection = query.to_selection(&dataset);
            write_view_csv(&apply(&dataset, &selection), path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryArgs;
    use crate::error::ExplorerError;

    const CSV: &str = "\
CustomerId,Geography,Gender,Age,EstimatedSalary,Exited
1,France,Male,30,50000,0
2,France,Female,45,80000,1
3,Germany,Male,30,65000,1
";

    fn dataset_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        file
    }

    #[test]
    fn summary_prints_aggregates() {
        let file = dataset_file();
        let command = Command::Summary(QueryArgs {
            geographies: vec!["France".into()],
            ..Default::default()
        });

        let mut out = Vec::new();
        run(&command, file.path(), 4, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["row_count"], 2);
        assert_eq!(json["exit_rate_by_gender"]["Female"], 1.0);
        assert_eq!(json["exit_rate_by_gender"]["Male"], 0.0);
        assert_eq!(json["selection"]["age_max"], 45);
    }

    #[test]
    fn export_writes_matching_rows() {
        let file = dataset_file();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("germany.csv");
        let command = Command::Export {
            query: QueryArgs {
                geographies: vec!["Germany".into()],
                ..Default::default()
            },
            out: path.clone(),
        };

        run(&command, file.path(), 30, &mut Vec::new()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "CustomerId,Geography,Gender,Age,EstimatedSalary,Exited\n3,Germany,Male,30,65000,1\n"
        );
    }

    #[test]
    fn missing_data_is_fatal() {
        let command = Command::Summary(QueryArgs::default());
        let err = run(&command, Path::new("/definitely/not/here.csv"), 30, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExplorerError>(),
            Some(ExplorerError::DataUnavailable { .. })
        ));
    }
}
