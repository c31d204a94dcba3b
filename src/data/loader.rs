use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::columns::{resolve_columns, ColumnMap};
use super::model::{CountyIncomeRecord, Field};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Missing required column(s): {}", join_fields(.missing))]
    MissingColumns { missing: Vec<Field> },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where a counties table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A CSV file on disk (e.g. `counties.csv` next to the binary).
    Path(PathBuf),
    /// Bytes handed over by the user, with the original file name.
    Upload { name: String, bytes: Vec<u8> },
    /// A static CSV served over HTTP(S).
    Url(String),
}

impl Source {
    /// Cache key for this source. Uploads are never cached.
    pub fn cache_key(&self) -> Option<String> {
        match self {
            Source::Path(p) => Some(p.display().to_string()),
            Source::Url(u) => Some(u.clone()),
            Source::Upload { .. } => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Upload { name, .. } => write!(f, "upload: {name}"),
            Source::Url(u) => write!(f, "{u}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Settings for remote sources.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Load and normalize a counties table from any source.
pub fn load(source: &Source, opts: FetchOptions) -> Result<Vec<CountyIncomeRecord>, LoadError> {
    log::info!("Loading counties from {source}");
    let records = match source {
        Source::Path(path) => load_path(path)?,
        Source::Upload { bytes, .. } => load_reader(bytes.as_slice())?,
        Source::Url(url) => {
            let bytes = fetch(url, opts)?;
            load_reader(bytes.as_slice())?
        }
    };
    log::info!("Loaded {} county records from {source}", records.len());
    Ok(records)
}

fn load_path(path: &Path) -> Result<Vec<CountyIncomeRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Blocking one-shot GET; non-2xx responses are errors.
fn fetch(url: &str, opts: FetchOptions) -> Result<Vec<u8>, LoadError> {
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(opts.timeout)
        .build()
        .map_err(http_err)?;
    let resp = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(http_err)?;
    let bytes = resp.bytes().map_err(http_err)?;
    log::debug!("Fetched {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse a counties CSV (header row required).
///
/// Required columns are located through the alias table; every other column
/// is ignored. Income cells that do not parse, or that a short row lacks,
/// become `None`. Rows with a blank state or county are skipped.
pub fn load_reader<R: Read>(rdr: R) -> Result<Vec<CountyIncomeRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(rdr);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let cols: ColumnMap =
        resolve_columns(&headers).map_err(|missing| LoadError::MissingColumns { missing })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let row = result?;
        let state = row.get(cols.state).unwrap_or("").trim();
        let county = row.get(cols.county).unwrap_or("").trim();

        if state.is_empty() || county.is_empty() {
            skipped += 1;
            continue;
        }

        records.push(CountyIncomeRecord {
            state: state.to_string(),
            county: county.to_string(),
            income_recent: row.get(cols.income_recent).and_then(parse_number_or_null),
            income_baseline: row.get(cols.income_baseline).and_then(parse_number_or_null),
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} row(s) with a blank state or county");
    }

    Ok(records)
}

/// Parse a numeric cell.
///
/// Contract: surrounding whitespace is ignored; empty, unparseable and
/// non-finite values (`NaN`, `inf`) map to `None`. This never fails.
pub fn parse_number_or_null(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn load_str(csv: &str) -> Result<Vec<CountyIncomeRecord>, LoadError> {
        load_reader(csv.as_bytes())
    }

    #[test]
    fn parse_number_accepts_plain_numbers() {
        assert_eq!(parse_number_or_null("42"), Some(42.0));
        assert_eq!(parse_number_or_null(" 51234.5 "), Some(51234.5));
        assert_eq!(parse_number_or_null("-3e2"), Some(-300.0));
    }

    #[test]
    fn parse_number_maps_garbage_to_none() {
        for s in ["", "   ", "N/A", "abc", "$1,000", "12k", "NaN", "inf", "-inf"] {
            assert_eq!(parse_number_or_null(s), None, "{s:?}");
        }
    }

    #[test]
    fn loads_canonical_csv() {
        let records = load_str(
            "state,county,income_2015,income_1989\n\
             Texas,Travis County,61000,25000\n\
             Texas,Harris County,55000,27000\n",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            CountyIncomeRecord {
                state: "Texas".into(),
                county: "Travis County".into(),
                income_recent: Some(61000.0),
                income_baseline: Some(25000.0),
            }
        );
    }

    #[test]
    fn aliased_and_reordered_headers_load_identically() {
        let canonical = load_str("state,county,income_2015,income_1989\nTX,A,1,2\n").unwrap();
        let aliased = load_str("MedianIncome1989,NAME,fips,STNAME,median_2015\n2,A,48001,TX,1\n")
            .unwrap();
        assert_eq!(canonical, aliased);
    }

    #[test]
    fn remote_schema_loads() {
        let records = load_str(
            "state,county,income-2015,income-1989,fips\n\
             California,Alameda,79831,36705,6001\n",
        )
        .unwrap();
        assert_eq!(records[0].income_recent, Some(79831.0));
        assert_eq!(records[0].income_baseline, Some(36705.0));
    }

    #[test]
    fn unparseable_income_becomes_none_and_row_is_kept() {
        let records = load_str(
            "state,county,income_2015,income_1989\n\
             TX,A,n/a,\n\
             TX,B,100,oops\n",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].income_recent, None);
        assert_eq!(records[0].income_baseline, None);
        assert_eq!(records[1].income_recent, Some(100.0));
        assert_eq!(records[1].income_baseline, None);
    }

    #[test]
    fn duplicates_pass_through() {
        let records = load_str(
            "state,county,income_2015,income_1989\n\
             TX,A,1,1\n\
             TX,A,1,1\n",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn blank_state_or_county_rows_are_skipped() {
        let records = load_str(
            "state,county,income_2015,income_1989\n\
             ,A,1,1\n\
             TX,  ,1,1\n\
             TX,B,1,1\n",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].county, "B");
    }

    #[test]
    fn names_are_trimmed() {
        let records = load_str("state,county,income_2015,income_1989\n Texas , Travis ,1,1\n")
            .unwrap();
        assert_eq!(records[0].state, "Texas");
        assert_eq!(records[0].county, "Travis");
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let err = load_str("county,income_1989\nA,1\n").unwrap_err();
        match &err {
            LoadError::MissingColumns { missing } => {
                assert_eq!(missing, &vec![Field::State, Field::IncomeRecent]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Missing required column(s): state, income_recent"
        );
    }

    #[test]
    fn header_only_file_is_empty_not_an_error() {
        let records = load_str("state,county,income_2015,income_1989\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn short_row_gets_null_incomes() {
        let records = load_str(
            "state,county,income_2015,income_1989\n\
             TX,A,100,50\n\
             TX,B,200\n\
             TX,C\n",
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].income_recent, Some(200.0));
        assert_eq!(records[1].income_baseline, None);
        assert_eq!(records[2].income_recent, None);
        assert_eq!(records[2].income_baseline, None);
    }

    #[test]
    fn row_without_county_cell_is_skipped() {
        let records = load_str("state,county,income_2015,income_1989\nTX\nTX,A,1,2\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].county, "A");
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        let bytes: &[u8] = b"state,county,income_2015,income_1989\nTX,\xff,1,1\n";
        let err = load_reader(bytes).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn unreachable_url_is_http_error() {
        let url = "http://127.0.0.1:9/counties.csv";
        let opts = FetchOptions {
            timeout: Duration::from_secs(5),
        };
        let err = load(&Source::Url(url.to_string()), opts).unwrap_err();
        match &err {
            LoadError::Http { url: u, .. } => assert_eq!(u, url),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err
            .to_string()
            .starts_with("Failed to fetch http://127.0.0.1:9/counties.csv"));
    }

    #[test]
    fn loads_from_path_and_upload() {
        let body = "state,county,income_2015,income_1989\nOhio,Franklin,53000,28000\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();

        let from_path = load(
            &Source::Path(file.path().to_path_buf()),
            FetchOptions::default(),
        )
        .unwrap();
        let from_upload = load(
            &Source::Upload {
                name: "counties.csv".into(),
                bytes: body.as_bytes().to_vec(),
            },
            FetchOptions::default(),
        )
        .unwrap();
        assert_eq!(from_path, from_upload);
        assert_eq!(from_path[0].county, "Franklin");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load(&Source::Path(path.clone()), FetchOptions::default()).unwrap_err();
        match err {
            LoadError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn cache_keys() {
        assert_eq!(
            Source::Url("https://example.org/c.csv".into()).cache_key(),
            Some("https://example.org/c.csv".to_string())
        );
        assert_eq!(
            Source::Path(PathBuf::from("counties.csv")).cache_key(),
            Some("counties.csv".to_string())
        );
        let upload = Source::Upload {
            name: "x.csv".into(),
            bytes: Vec::new(),
        };
        assert_eq!(upload.cache_key(), None);
    }
}
