use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::aggregate::Exploration;
use super::filter::FilteredView;
use crate::error::ExplorerError;

/// Write the filtered rows as CSV: the source header, then every row in view
/// order with all of its cells, including the columns the explorer ignores.
pub fn write_view_csv(view: &FilteredView<'_>, path: &Path) -> Result<(), ExplorerError> {
    write_csv(view, path).map_err(|e| ExplorerError::export(path, &e))?;
    log::info!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}

fn write_csv(view: &FilteredView<'_>, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer
        .write_record(&view.dataset().columns)
        .context("writing CSV header")?;
    for (row_no, customer) in view.customers().enumerate() {
        writer
            .write_record(customer.cells.iter().map(|c| c.to_string()))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

/// Write the aggregates of one exploration as pretty-printed JSON.
pub fn write_exploration_json(exploration: &Exploration, path: &Path) -> Result<(), ExplorerError> {
    write_json(exploration, path).map_err(|e| ExplorerError::export(path, &e))?;
    log::info!("Exported summary to {}", path.display());
    Ok(())
}

fn write_json(exploration: &Exploration, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, exploration).context("serializing summary")?;
    writer.flush().context("flushing JSON file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::explore;
    use crate::data::filter::tests::{scenario_dataset, set};
    use crate::data::filter::{FilterSelection, apply};

    #[test]
    fn csv_export_keeps_layout_and_order() {
        let ds = scenario_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.genders = set(&["Male"]);
        let view = apply(&ds, &selection);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");
        write_view_csv(&view, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Geography,Gender,Age,EstimatedSalary,Exited",
                "France,Male,30,50000,0",
                "Germany,Male,30,65000,1",
            ]
        );
    }

    #[test]
    fn csv_export_passes_source_text_through() {
        let source = "\
Surname,Geography,Gender,Age,EstimatedSalary,Exited
007,France,Male,30,5000.0,1
Nan,Spain,Female,41,101348.80,0
";
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Churn_Modelling.csv");
        std::fs::write(&input, source).unwrap();
        let ds = crate::data::loader::load(&input).unwrap();
        let view = apply(&ds, &FilterSelection::all(&ds));

        let output = dir.path().join("filtered.csv");
        write_view_csv(&view, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), source);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let ds = scenario_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.geographies.clear();
        let view = apply(&ds, &selection);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_view_csv(&view, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap().trim_end(),
            "Geography,Gender,Age,EstimatedSalary,Exited"
        );
    }

    #[test]
    fn json_summary_omits_row_indices() {
        let ds = scenario_dataset();
        let exploration = explore(&ds, &FilterSelection::all(&ds), 5);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_exploration_json(&exploration, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["row_count"], 3);
        assert_eq!(json["counts_by_geography"]["France"], 2);
        assert_eq!(json["age_histogram"].as_array().map(Vec::len), Some(5));
        assert!(json.get("rows").is_none());
    }

    #[test]
    fn unwritable_path_is_export_error() {
        let ds = scenario_dataset();
        let view = apply(&ds, &FilterSelection::all(&ds));
        let err = write_view_csv(&view, Path::new("/definitely/not/here/out.csv")).unwrap_err();
        assert!(matches!(err, ExplorerError::Export { .. }));
    }
}
