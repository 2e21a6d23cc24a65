use chrono::NaiveDate;
use partida_types::Circuit;

use crate::error::{JournalError, JournalResult};
use crate::records::JournalEntry;

/// Date range and circuit scope of a report.
///
/// Both date bounds are inclusive and optional (unbounded when absent). The
/// range is validated when the filter is built, so a `ReportFilter` value is
/// always well formed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportFilter {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    circuit: Option<Circuit>,
}

impl ReportFilter {
    pub fn new(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        circuit: Option<Circuit>,
    ) -> JournalResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(JournalError::InvalidDateRange { from, to });
            }
        }
        Ok(Self { from, to, circuit })
    }

    /// No date bounds, all circuits.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn circuit(&self) -> Option<&Circuit> {
        self.circuit.as_ref()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    pub fn matches_circuit(&self, entry: &JournalEntry) -> bool {
        self.circuit.as_ref().map_or(true, |c| entry.in_circuit(c))
    }

    /// Returns `true` if the entry falls inside the period and circuit.
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        self.contains_date(entry.date) && self.matches_circuit(entry)
    }

    /// Returns `true` if the entry is in scope but dated before the period.
    pub fn precedes(&self, entry: &JournalEntry) -> bool {
        self.from.is_some_and(|from| entry.date < from) && self.matches_circuit(entry)
    }
}

#[cfg(test)]
mod tests {
    use partida_types::EntryId;

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn entry(d: u32, circuit: Option<&str>) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            number: 1,
            date: date(d),
            concept: String::new(),
            circuit: circuit.map(|c| Circuit::new(c).unwrap()),
            lines: vec![],
        }
    }

    #[test]
    fn inverted_range_is_rejected_at_construction() {
        let err = ReportFilter::new(Some(date(3)), Some(date(2)), None).unwrap_err();
        assert_eq!(
            err,
            JournalError::InvalidDateRange {
                from: date(3),
                to: date(2),
            }
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let filter = ReportFilter::new(Some(date(2)), Some(date(2)), None).unwrap();
        assert!(filter.contains_date(date(2)));
        assert!(!filter.contains_date(date(1)));
        assert!(!filter.contains_date(date(3)));
    }

    #[test]
    fn open_bounds_are_unbounded() {
        let filter = ReportFilter::new(None, Some(date(2)), None).unwrap();
        assert!(filter.contains_date(NaiveDate::MIN));
        assert!(!filter.contains_date(date(3)));
        assert!(ReportFilter::all().contains_date(NaiveDate::MAX));
    }

    #[test]
    fn circuit_filter_excludes_untagged_entries() {
        let ventas = Circuit::new("ventas").unwrap();
        let filter = ReportFilter::new(None, None, Some(ventas)).unwrap();
        assert!(filter.matches(&entry(1, Some("ventas"))));
        assert!(!filter.matches(&entry(1, Some("compras"))));
        assert!(!filter.matches(&entry(1, None)));
        assert!(ReportFilter::all().matches(&entry(1, None)));
    }

    #[test]
    fn precedes_needs_a_lower_bound() {
        let bounded = ReportFilter::new(Some(date(2)), None, None).unwrap();
        assert!(bounded.precedes(&entry(1, None)));
        assert!(!bounded.precedes(&entry(2, None)));
        assert!(!ReportFilter::all().precedes(&entry(1, None)));
    }
}
