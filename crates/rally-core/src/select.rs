//! Explicit view selection and dataset catalog.
//!
//! A [`Selection`] names the tournament and/or category and the year a view
//! is computed for. It is passed by value to the filter, the graph builder
//! and every view, so none of them depend on where the choice came from.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::MatchRecord;

/// Which matches a view is computed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Tournament name; `None` selects every tournament.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    /// Category/series; `None` selects every category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Calendar year.
    pub year: i32,
}

impl Selection {
    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self {
            tournament: None,
            category: None,
            year,
        }
    }

    #[must_use]
    pub fn with_tournament(mut self, tournament: impl Into<String>) -> Self {
        self.tournament = Some(tournament.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns `true` if `record` belongs to the selected tournament and
    /// category. The year is not checked here; the graph builder applies it.
    ///
    /// Names compare case-insensitively after trimming.
    #[must_use]
    pub fn matches(&self, record: &MatchRecord) -> bool {
        let tournament_ok = self
            .tournament
            .as_deref()
            .is_none_or(|t| same_name(t, &record.tournament));
        let category_ok = self.category.as_deref().is_none_or(|c| {
            record
                .category
                .as_deref()
                .is_some_and(|rc| same_name(c, rc))
        });
        tournament_ok && category_ok
    }

    /// The tournament-filtered record set for this selection.
    #[must_use]
    pub fn filter<'a>(&self, records: &'a [MatchRecord]) -> Vec<&'a MatchRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Short label such as `"Wimbledon 2023"` or `"all tournaments 2023"`.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.tournament, &self.category) {
            (Some(t), Some(c)) => format!("{t} ({c}) {}", self.year),
            (Some(t), None) => format!("{t} {}", self.year),
            (None, Some(c)) => format!("{c} {}", self.year),
            (None, None) => format!("all tournaments {}", self.year),
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The choices a selection can be made from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Tournament name → years with at least one dated match.
    pub tournaments: BTreeMap<String, BTreeSet<i32>>,
    /// Category name → years with at least one dated match.
    pub categories: BTreeMap<String, BTreeSet<i32>>,
    /// All years with at least one dated match.
    pub years: BTreeSet<i32>,
    /// Records without a usable date.
    pub undated: usize,
}

impl Catalog {
    /// Returns `true` if `selection` names a tournament and category that
    /// exist in the dataset (the year is not checked).
    #[must_use]
    pub fn knows(&self, selection: &Selection) -> bool {
        let known = |names: &BTreeMap<String, BTreeSet<i32>>, wanted: Option<&str>| {
            wanted.is_none_or(|w| names.keys().any(|n| same_name(n, w)))
        };
        known(&self.tournaments, selection.tournament.as_deref())
            && known(&self.categories, selection.category.as_deref())
    }
}

/// Build the [`Catalog`] of `records`.
#[must_use]
pub fn catalog(records: &[MatchRecord]) -> Catalog {
    let mut out = Catalog::default();
    for record in records {
        let Some(year) = record.year() else {
            out.undated += 1;
            continue;
        };
        out.years.insert(year);
        out.tournaments
            .entry(record.tournament.clone())
            .or_default()
            .insert(year);
        if let Some(category) = &record.category {
            out.categories
                .entry(category.clone())
                .or_default()
                .insert(year);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(tournament: &str, category: &str, year: i32) -> MatchRecord {
        MatchRecord::new("A", "B", "A", NaiveDate::from_ymd_opt(year, 6, 1))
            .with_tournament(tournament)
            .with_category(category)
    }

    fn records() -> Vec<MatchRecord> {
        vec![
            rec("Wimbledon", "Grand Slam", 2022),
            rec("Wimbledon", "Grand Slam", 2023),
            rec("Rome", "Masters 1000", 2023),
            MatchRecord::new("C", "D", "C", None).with_tournament("Rome"),
        ]
    }

    #[test]
    fn empty_selection_matches_everything() {
        let records = records();
        assert_eq!(Selection::new(2023).filter(&records).len(), records.len());
    }

    #[test]
    fn tournament_filter_is_case_insensitive() {
        let records = records();
        let picked = Selection::new(2023).with_tournament(" wimbledon ").filter(&records);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|r| r.tournament == "Wimbledon"));
    }

    #[test]
    fn category_filter_requires_category() {
        let records = records();
        let picked = Selection::new(2023).with_category("Masters 1000").filter(&records);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].tournament, "Rome");
    }

    #[test]
    fn labels() {
        assert_eq!(Selection::new(2023).label(), "all tournaments 2023");
        assert_eq!(
            Selection::new(2023).with_tournament("Rome").label(),
            "Rome 2023"
        );
        assert_eq!(
            Selection::new(2021)
                .with_tournament("Rome")
                .with_category("Masters 1000")
                .label(),
            "Rome (Masters 1000) 2021"
        );
    }

    #[test]
    fn catalog_lists_years_per_tournament() {
        let catalog = catalog(&records());
        assert_eq!(catalog.years.iter().copied().collect::<Vec<_>>(), vec![2022, 2023]);
        assert_eq!(
            catalog.tournaments["Wimbledon"].iter().copied().collect::<Vec<_>>(),
            vec![2022, 2023]
        );
        assert_eq!(
            catalog.tournaments["Rome"].iter().copied().collect::<Vec<_>>(),
            vec![2023]
        );
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.undated, 1);
    }

    #[test]
    fn catalog_knows_selection() {
        let catalog = catalog(&records());
        assert!(catalog.knows(&Selection::new(1990)));
        assert!(catalog.knows(&Selection::new(2023).with_tournament("ROME")));
        assert!(!catalog.knows(&Selection::new(2023).with_tournament("Paris")));
        assert!(!catalog.knows(&Selection::new(2023).with_category("ATP250")));
    }
}
