use std::cmp::Reverse;

use crate::records::JournalEntry;

/// Day-book listing: most recent date first, latest posting first within a date.
///
/// Sequence numbers are unique, so the order is total.
pub fn diario(entries: &[JournalEntry]) -> Vec<JournalEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| Reverse((e.date, e.number)));
    sorted
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use partida_types::EntryId;
    use proptest::prelude::*;

    use super::*;

    fn entry(number: u64, d: u32) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            number,
            date: NaiveDate::from_ymd_opt(2026, 2, d).unwrap(),
            concept: format!("#{number}"),
            circuit: None,
            lines: vec![],
        }
    }

    #[test]
    fn orders_by_date_then_number_descending() {
        let entries = vec![entry(1, 1), entry(2, 3), entry(3, 2), entry(4, 3)];
        let numbers: Vec<_> = diario(&entries).iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![4, 2, 3, 1]);
    }

    #[test]
    fn input_is_left_untouched() {
        let entries = vec![entry(1, 1), entry(2, 2)];
        let _ = diario(&entries);
        assert_eq!(entries[0].number, 1);
    }

    #[test]
    fn empty_journal_yields_empty_day_book() {
        assert!(diario(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn order_is_total_and_stable(days in prop::collection::vec(1u32..28, 0..50)) {
            let entries: Vec<_> = days
                .iter()
                .enumerate()
                .map(|(i, d)| entry(i as u64 + 1, *d))
                .collect();
            let book = diario(&entries);

            prop_assert_eq!(book.len(), entries.len());
            prop_assert!(book
                .windows(2)
                .all(|w| (w[0].date, w[0].number) > (w[1].date, w[1].number)));

            let mut twice = book.clone();
            twice.reverse();
            twice.reverse();
            prop_assert_eq!(&twice, &book);
            prop_assert_eq!(&diario(&entries), &book);
        }
    }
}
