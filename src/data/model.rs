use std::fmt;

#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Field – the canonical semantic columns
// ---------------------------------------------------------------------------

/// A required semantic column of the counties table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    State,
    County,
    /// Income at the recent time point (2015 in the shipped data).
    IncomeRecent,
    /// Income at the baseline time point (1989 in the shipped data).
    IncomeBaseline,
}

impl Field {
    /// All required fields in canonical order.
    pub const ALL: [Field; 4] = [
        Field::State,
        Field::County,
        Field::IncomeRecent,
        Field::IncomeBaseline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::State => "state",
            Field::County => "county",
            Field::IncomeRecent => "income_recent",
            Field::IncomeBaseline => "income_baseline",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CountyIncomeRecord – one row after normalization
// ---------------------------------------------------------------------------

/// One county row. `state` and `county` are trimmed and never empty;
/// incomes are `None` when the source cell did not parse as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyIncomeRecord {
    pub state: String,
    pub county: String,
    pub income_recent: Option<f64>,
    pub income_baseline: Option<f64>,
}

impl CountyIncomeRecord {
    /// Relative change from baseline to recent, in percent.
    ///
    /// `None` when either income is missing or the baseline is zero.
    pub fn pct_change(&self) -> Option<f64> {
        let recent = self.income_recent?;
        let baseline = self.income_baseline?;
        if baseline == 0.0 {
            return None;
        }
        let pct = (recent - baseline) / baseline * 100.0;
        pct.is_finite().then_some(pct)
    }
}

// ---------------------------------------------------------------------------
// DerivedStateView – the state-filtered subset plus summary statistics
// ---------------------------------------------------------------------------

/// Records of a single state with their medians. Medians are `NaN` when
/// no non-null value exists.
#[derive(Debug, Clone)]
pub struct DerivedStateView {
    pub state: String,
    /// Matching records in their original order.
    pub records: Vec<CountyIncomeRecord>,
    pub median_recent: f64,
    pub median_baseline: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// TableRow – one display / export row
// ---------------------------------------------------------------------------

/// Column order and titles match the downloadable CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct TableRow {
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Income Baseline (USD)")]
    pub income_baseline: Option<f64>,
    #[serde(rename = "Income Recent (USD)")]
    pub income_recent: Option<f64>,
    #[serde(rename = "% Change")]
    pub pct_change: Option<f64>,
}

impl From<&CountyIncomeRecord> for TableRow {
    fn from(rec: &CountyIncomeRecord) -> Self {
        TableRow {
            county: rec.county.clone(),
            income_baseline: rec.income_baseline,
            income_recent: rec.income_recent,
            pct_change: rec.pct_change(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(recent: Option<f64>, baseline: Option<f64>) -> CountyIncomeRecord {
        CountyIncomeRecord {
            state: "TX".into(),
            county: "Travis".into(),
            income_recent: recent,
            income_baseline: baseline,
        }
    }

    #[test]
    fn pct_change_doubles() {
        assert_eq!(rec(Some(100.0), Some(50.0)).pct_change(), Some(100.0));
    }

    #[test]
    fn pct_change_decline_is_negative() {
        assert_eq!(rec(Some(75.0), Some(100.0)).pct_change(), Some(-25.0));
    }

    #[test]
    fn pct_change_zero_baseline_is_none() {
        assert_eq!(rec(Some(100.0), Some(0.0)).pct_change(), None);
        assert_eq!(rec(Some(0.0), Some(0.0)).pct_change(), None);
    }

    #[test]
    fn pct_change_missing_income_is_none() {
        assert_eq!(rec(Some(100.0), None).pct_change(), None);
        assert_eq!(rec(None, Some(100.0)).pct_change(), None);
    }

    #[test]
    fn field_names_are_canonical() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            ["state", "county", "income_recent", "income_baseline"]
        );
    }
}
