//! Cost Sheet Loader Module
//! Reads `category,item,cost` rows from a CSV file using Polars.

use crate::cost::CostEntry;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const CATEGORY_COL: &str = "category";
pub const ITEM_COL: &str = "item";
pub const COST_COL: &str = "cost";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
}

/// Loads cost sheets for import into a rig.
pub struct CostSheetLoader;

impl CostSheetLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: &Path) -> Result<Vec<CostEntry>, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Self::entries_from_frame(&df)
    }

    /// Extract cost rows. Rows without category or item are skipped;
    /// costs that are not numeric become 0.
    pub fn entries_from_frame(df: &DataFrame) -> Result<Vec<CostEntry>, LoaderError> {
        let category_series = df.column(&Self::find_column(df, CATEGORY_COL)?)?;
        let item_series = df.column(&Self::find_column(df, ITEM_COL)?)?;
        let cost_series = df.column(&Self::find_column(df, COST_COL)?)?;
        let cost_f64 = cost_series.cast(&DataType::Float64)?;
        let cost_ca = cost_f64.f64()?;

        let mut entries = Vec::new();
        for i in 0..df.height() {
            let (Some(category), Some(item)) = (
                Self::text_at(category_series, i),
                Self::text_at(item_series, i),
            ) else {
                continue;
            };
            let cost = cost_ca.get(i).filter(|v| v.is_finite()).unwrap_or(0.0);
            entries.push(CostEntry {
                category,
                item,
                cost,
            });
        }

        Ok(entries)
    }

    /// Case-insensitive header lookup.
    fn find_column(df: &DataFrame, wanted: &'static str) -> Result<String, LoaderError> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .find(|name| name.trim().eq_ignore_ascii_case(wanted))
            .ok_or(LoaderError::MissingColumn(wanted))
    }

    fn text_at(column: &Column, i: usize) -> Option<String> {
        let val = column.get(i).ok()?;
        if val.is_null() {
            return None;
        }
        let text = val.to_string().trim_matches('"').trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_csv(content: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("drillcost-sheet-{unique}.csv"));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_rows_and_coerces_costs() {
        let path = temp_csv(
            "Category,Item,Cost\n\
             Drilling,Mud & Chemicals,1200\n\
             pre-drilling,land,50000.5\n\
             ,orphan,3\n\
             Completion,Packer,abc\n",
        );
        let entries = CostSheetLoader::load_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].category, "Drilling");
        assert_eq!(entries[0].item, "Mud & Chemicals");
        assert_eq!(entries[0].cost, 1200.0);
        assert_eq!(entries[1].cost, 50000.5);
        assert_eq!(entries[2].item, "Packer");
        assert_eq!(entries[2].cost, 0.0);
    }

    #[test]
    fn missing_cost_column_is_reported() {
        let path = temp_csv("category,item\nDrilling,Mud\n");
        let err = CostSheetLoader::load_csv(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, LoaderError::MissingColumn(COST_COL)));
    }
}
