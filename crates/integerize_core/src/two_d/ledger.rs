//! Donor bookkeeping for the reallocation loop.

use serde::Serialize;

use crate::select::best_by_rank;
use crate::types::{Rank, TieBreak};

/// A cell decremented while correcting a row that was too high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DonorCell {
    /// Row the unit was taken from.
    pub row: usize,
    /// Column the unit was taken from.
    pub column: usize,
}

/// Tracks units taken out of each column and not yet put back.
///
/// Column totals are preserved by construction: every decrement records one
/// unit of credit on its column, and an increment is only ever made in a
/// column holding credit. At any point `colsum + credit == control` for
/// every column.
#[derive(Clone, Debug, Default)]
pub(crate) struct DonorLedger {
    credit: Vec<u64>,
    cells: Vec<DonorCell>,
}

impl DonorLedger {
    pub(crate) fn new(columns: usize) -> Self {
        Self {
            credit: vec![0; columns],
            cells: Vec::new(),
        }
    }

    /// Records a unit taken from `(row, column)`.
    pub(crate) fn record(&mut self, row: usize, column: usize) {
        self.credit[column] += 1;
        self.cells.push(DonorCell { row, column });
    }

    /// Spends one unit of `column`'s credit.
    pub(crate) fn consume(&mut self, column: usize) {
        debug_assert!(self.credit[column] > 0, "consumed column without credit");
        self.credit[column] = self.credit[column].saturating_sub(1);
    }

    /// Outstanding credit of one column.
    #[cfg(test)]
    pub(crate) fn credit(&self, column: usize) -> u64 {
        self.credit[column]
    }

    /// Total units not yet returned.
    pub(crate) fn outstanding(&self) -> u64 {
        self.credit.iter().sum()
    }

    /// Columns currently holding credit, ascending.
    pub(crate) fn credited_columns(&self) -> Vec<usize> {
        (0..self.credit.len()).filter(|&c| self.credit[c] > 0).collect()
    }

    /// Column with the most outstanding credit; ties go to the lowest index.
    pub(crate) fn most_credited(&self) -> Option<usize> {
        best_by_rank(
            &self.credit,
            self.credited_columns(),
            Rank::Largest,
            TieBreak::FirstOccurrence,
        )
    }

    /// Every donor cell recorded so far, in the order recorded.
    pub(crate) fn into_cells(self) -> Vec<DonorCell> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_consume() {
        let mut ledger = DonorLedger::new(3);
        ledger.record(0, 2);
        ledger.record(1, 2);
        ledger.record(1, 0);
        assert_eq!(ledger.outstanding(), 3);
        assert_eq!(ledger.credited_columns(), vec![0, 2]);

        ledger.consume(2);
        assert_eq!(ledger.credit(2), 1);
        assert_eq!(ledger.outstanding(), 2);
    }

    #[test]
    fn test_most_credited_prefers_lowest_on_tie() {
        let mut ledger = DonorLedger::new(4);
        assert_eq!(ledger.most_credited(), None);
        ledger.record(0, 3);
        ledger.record(0, 1);
        assert_eq!(ledger.most_credited(), Some(1));
        ledger.record(2, 3);
        assert_eq!(ledger.most_credited(), Some(3));
    }

    #[test]
    fn test_cells_keep_history_after_consume() {
        let mut ledger = DonorLedger::new(2);
        ledger.record(4, 1);
        ledger.consume(1);
        assert_eq!(ledger.outstanding(), 0);
        assert_eq!(ledger.into_cells(), vec![DonorCell { row: 4, column: 1 }]);
    }
}
