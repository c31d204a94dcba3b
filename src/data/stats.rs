use std::cmp::Ordering;

use super::model::{CountyIncomeRecord, DerivedStateView, TableRow};

// ---------------------------------------------------------------------------
// State filter and summary statistics
// ---------------------------------------------------------------------------

/// Whether a record's state matches the requested one (trimmed,
/// case-insensitive).
pub fn state_matches(record_state: &str, state: &str) -> bool {
    record_state.trim().eq_ignore_ascii_case(state.trim())
}

/// Filter `records` to one state and compute its medians.
///
/// An unknown state gives an empty view with `NaN` medians.
pub fn build_view(records: &[CountyIncomeRecord], state: &str) -> DerivedStateView {
    let subset: Vec<CountyIncomeRecord> = records
        .iter()
        .filter(|r| state_matches(&r.state, state))
        .cloned()
        .collect();

    let median_recent = median(subset.iter().map(|r| r.income_recent));
    let median_baseline = median(subset.iter().map(|r| r.income_baseline));

    log::debug!(
        "View for {state}: {} counties, median recent {median_recent}, median baseline {median_baseline}",
        subset.len()
    );

    DerivedStateView {
        state: state.trim().to_string(),
        count: subset.len(),
        records: subset,
        median_recent,
        median_baseline,
    }
}

/// Median of the non-null values; `NaN` when there are none.
pub fn median<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut vals: Vec<f64> = values.into_iter().flatten().collect();
    let n = vals.len();
    if n == 0 {
        return f64::NAN;
    }
    vals.sort_by(|a, b| a.total_cmp(b));
    if n % 2 == 0 {
        (vals[n / 2 - 1] + vals[n / 2]) / 2.0
    } else {
        vals[n / 2]
    }
}

/// Sorted list of distinct states for the picker.
///
/// States differing only by case collapse into the first spelling seen.
pub fn states(records: &[CountyIncomeRecord]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in records {
        if !out.iter().any(|s| state_matches(s, &r.state)) {
            out.push(r.state.clone());
        }
    }
    out.sort_by_key(|s| s.to_lowercase());
    out
}

// ---------------------------------------------------------------------------
// Display table
// ---------------------------------------------------------------------------

/// Descending by recent income; missing incomes last.
fn by_recent_desc(a: &TableRow, b: &TableRow) -> Ordering {
    match (a.income_recent, b.income_recent) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl DerivedStateView {
    /// Display rows with percentage change, sorted by recent income
    /// (descending, nulls last). Ties keep their input order.
    pub fn table(&self) -> Vec<TableRow> {
        let mut rows: Vec<TableRow> = self.records.iter().map(TableRow::from).collect();
        rows.sort_by(by_recent_desc);
        rows
    }
}
