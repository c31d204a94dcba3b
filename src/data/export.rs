use anyhow::{Context, Result};

use super::model::TableRow;

/// Header of the downloadable table.
pub const EXPORT_HEADER: [&str; 4] = [
    "County",
    "Income Baseline (USD)",
    "Income Recent (USD)",
    "% Change",
];

/// Serialize display rows to CSV text. Missing values become empty cells.
pub fn to_csv(rows: &[TableRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    // Written explicitly so an empty table still carries its header.
    wtr.write_record(EXPORT_HEADER)
        .context("writing CSV header")?;
    for row in rows {
        wtr.write_record([
            row.county.clone(),
            fmt_cell(row.income_baseline),
            fmt_cell(row.income_recent),
            fmt_cell(row.pct_change),
        ])
        .with_context(|| format!("writing row for {}", row.county))?;
    }
    let bytes = wtr.into_inner().context("flushing CSV")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn fmt_cell(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Download name for a state's table, e.g. `new_york_county_incomes.csv`.
pub fn export_file_name(state: &str) -> String {
    format!(
        "{}_county_incomes.csv",
        state.trim().replace(' ', "_").to_lowercase()
    )
}
