use super::model::Field;

// ---------------------------------------------------------------------------
// Header alias table
// ---------------------------------------------------------------------------

/// Accepted header spellings per field, lowercase, checked in order.
pub const ALIASES: [(Field, &[&str]); 4] = [
    (Field::State, &["state", "stname", "state_name"]),
    (Field::County, &["county", "name", "county_name"]),
    (
        Field::IncomeRecent,
        &[
            "income_2015",
            "median_2015",
            "medianincome2015",
            "income2015",
            "income-2015",
        ],
    ),
    (
        Field::IncomeBaseline,
        &[
            "income_1989",
            "median_1989",
            "medianincome1989",
            "income1989",
            "income-1989",
        ],
    ),
];

/// Accepted spellings for one field, in checking order.
pub fn aliases_for(field: Field) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// Header positions of the four required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub state: usize,
    pub county: usize,
    pub income_recent: usize,
    pub income_baseline: usize,
}

/// Resolve each required field to a header index.
///
/// For every field the aliases are tried in table order and the first one
/// present among the headers wins; a header repeated in the file resolves to
/// its leftmost occurrence. On failure returns every unresolved field in
/// canonical order.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap, Vec<Field>> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_ascii_lowercase())
        .collect();

    let mut found = [None; 4];
    let mut missing = Vec::new();

    for (slot, field) in found.iter_mut().zip(Field::ALL) {
        *slot = aliases_for(field)
            .iter()
            .find_map(|alias| normalized.iter().position(|h| h == alias));
        if slot.is_none() {
            missing.push(field);
        }
    }

    match found {
        [Some(state), Some(county), Some(income_recent), Some(income_baseline)] => Ok(ColumnMap {
            state,
            county,
            income_recent,
            income_baseline,
        }),
        _ => Err(missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_headers_resolve() {
        let map = resolve_columns(&["state", "county", "income_2015", "income_1989"]).unwrap();
        assert_eq!(
            map,
            ColumnMap {
                state: 0,
                county: 1,
                income_recent: 2,
                income_baseline: 3,
            }
        );
    }

    #[test]
    fn alias_table_covers_every_field_in_order() {
        let fields: Vec<Field> = ALIASES.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        for field in Field::ALL {
            assert!(!aliases_for(field).is_empty(), "{field}");
        }
        assert_eq!(aliases_for(Field::IncomeRecent)[0], "income_2015");
        assert_eq!(aliases_for(Field::IncomeBaseline)[0], "income_1989");
    }

    #[test]
    fn every_alias_resolves_to_its_field() {
        for (field, aliases) in ALIASES {
            for &alias in aliases {
                let mut headers = vec!["state", "county", "income_2015", "income_1989"];
                let idx = Field::ALL.iter().position(|f| *f == field).unwrap();
                headers[idx] = alias;
                // Shuffle the aliased column to the end to check position lookup.
                let moved = headers.remove(idx);
                headers.push(moved);

                let map = resolve_columns(&headers).unwrap();
                let got = match field {
                    Field::State => map.state,
                    Field::County => map.county,
                    Field::IncomeRecent => map.income_recent,
                    Field::IncomeBaseline => map.income_baseline,
                };
                assert_eq!(got, 3, "alias {alias} for {field}");
            }
        }
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let map = resolve_columns(&[" STNAME", "County_Name ", "MedianIncome2015", "INCOME-1989"])
            .unwrap();
        assert_eq!(map.state, 0);
        assert_eq!(map.county, 1);
        assert_eq!(map.income_recent, 2);
        assert_eq!(map.income_baseline, 3);
    }

    #[test]
    fn earlier_alias_wins_over_later_one() {
        // "county" precedes "name" in the alias list, regardless of header order.
        let map =
            resolve_columns(&["name", "state", "county", "income2015", "income1989"]).unwrap();
        assert_eq!(map.county, 2);
    }

    #[test]
    fn duplicated_header_resolves_leftmost() {
        let map =
            resolve_columns(&["state", "county", "income_2015", "income_1989", "state"]).unwrap();
        assert_eq!(map.state, 0);
    }

    #[test]
    fn remote_schema_resolves() {
        let map =
            resolve_columns(&["state", "county", "income-2015", "income-1989", "fips"]).unwrap();
        assert_eq!(map.income_recent, 2);
        assert_eq!(map.income_baseline, 3);
    }

    #[test]
    fn reports_exactly_the_missing_fields() {
        let missing = resolve_columns(&["county", "fips", "income_1989"]).unwrap_err();
        assert_eq!(missing, vec![Field::State, Field::IncomeRecent]);
    }

    #[test]
    fn empty_header_misses_everything() {
        let headers: [&str; 0] = [];
        assert_eq!(resolve_columns(&headers).unwrap_err(), Field::ALL.to_vec());
    }
}
