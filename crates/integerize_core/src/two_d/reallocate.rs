//! Row-correction loop run after the column-wise rounding pass.
//!
//! Each pass visits rows in ascending index:
//! 1. every row above its control gives one unit from its smallest nonzero
//!    cell, crediting that column in the [`DonorLedger`];
//! 2. every row below its control, while credit remains, takes one unit in a
//!    credited column: its largest cell there if nonzero, otherwise the
//!    neighbour fallback, otherwise the most-credited column outright.
//!
//! A row moves by at most one unit per pass. The loop ends when every row
//! satisfies the [`Condition`] and all credit has been returned.

use tracing::{debug, trace, warn};

use super::ledger::DonorLedger;
use super::neighbour;
use super::{AllocationReport, Fallback, FallbackKind};
use crate::select::best_by_rank;
use crate::types::{Condition, IntegerizeError, Rank, TieBreak};

/// State of the reallocation loop between passes.
#[derive(Debug)]
pub(crate) struct Reallocation<'a> {
    cells: Vec<Vec<u64>>,
    row_controls: &'a [u64],
    condition: Condition,
    radii: &'a [usize],
    deviations: Vec<i128>,
    ledger: DonorLedger,
    pass: usize,
    fallbacks: Vec<Fallback>,
}

impl<'a> Reallocation<'a> {
    pub(crate) fn new(
        cells: Vec<Vec<u64>>,
        columns: usize,
        row_controls: &'a [u64],
        condition: Condition,
        radii: &'a [usize],
    ) -> Self {
        let deviations = cells
            .iter()
            .zip(row_controls)
            .map(|(row, &control)| {
                row.iter().map(|&v| i128::from(v)).sum::<i128>() - i128::from(control)
            })
            .collect();
        Self {
            cells,
            row_controls,
            condition,
            radii,
            deviations,
            ledger: DonorLedger::new(columns),
            pass: 0,
            fallbacks: Vec::new(),
        }
    }

    /// Whether every row satisfies the condition with no credit outstanding.
    pub(crate) fn is_settled(&self) -> bool {
        self.ledger.outstanding() == 0
            && self.deviations.iter().all(|&d| self.condition.is_satisfied(d))
    }

    /// Runs passes until settled.
    ///
    /// # Errors
    ///
    /// [`IntegerizeError::UnresolvedAllocation`] when a pass moves no unit.
    pub(crate) fn run(mut self) -> Result<(Vec<Vec<u64>>, AllocationReport), IntegerizeError> {
        while !self.is_settled() {
            if !self.step() {
                let unresolved_rows = self
                    .deviations
                    .iter()
                    .filter(|&&d| !self.condition.is_satisfied(d))
                    .count();
                return Err(IntegerizeError::UnresolvedAllocation {
                    pass: self.pass,
                    unresolved_rows,
                    outstanding_credit: self.ledger.outstanding(),
                });
            }
        }
        debug!(
            passes = self.pass,
            fallbacks = self.fallbacks.len(),
            "reallocation settled"
        );
        let report = AllocationReport {
            passes: self.pass,
            donor_cells: self.ledger.into_cells(),
            fallbacks: self.fallbacks,
        };
        Ok((self.cells, report))
    }

    /// Performs one pass. Returns whether any unit moved.
    pub(crate) fn step(&mut self) -> bool {
        self.pass += 1;
        let mut moved = false;

        for row in 0..self.cells.len() {
            if self.deviations[row] <= 0 {
                continue;
            }
            let cells = &self.cells[row];
            let nonzero = (0..cells.len()).filter(|&c| cells[c] > 0);
            if let Some(column) = best_by_rank(cells, nonzero, Rank::Smallest, TieBreak::FirstOccurrence) {
                self.cells[row][column] -= 1;
                self.ledger.record(row, column);
                self.deviations[row] -= 1;
                moved = true;
            }
        }

        for row in 0..self.cells.len() {
            if self.ledger.outstanding() == 0 {
                break;
            }
            if self.deviations[row] >= 0 {
                continue;
            }
            if let Some(column) = self.receiving_column(row) {
                self.cells[row][column] += 1;
                self.ledger.consume(column);
                self.deviations[row] += 1;
                moved = true;
            }
        }

        trace!(
            pass = self.pass,
            outstanding = self.ledger.outstanding(),
            moved,
            "reallocation pass"
        );
        moved
    }

    /// Column of `row` that absorbs one unit of credit.
    fn receiving_column(&mut self, row: usize) -> Option<usize> {
        let donors = self.ledger.credited_columns();
        let cells = &self.cells[row];

        if let Some(column) = best_by_rank(cells, donors.iter().copied(), Rank::Largest, TieBreak::FirstOccurrence)
            .filter(|&c| cells[c] > 0)
        {
            return Some(column);
        }

        if let Some((column, radius)) = neighbour::search(cells, &donors, self.radii) {
            debug!(row, column, radius, "neighbour fallback");
            self.fallbacks.push(Fallback {
                row,
                column,
                kind: FallbackKind::Neighbour { radius },
            });
            return Some(column);
        }

        let column = self.ledger.most_credited()?;
        warn!(
            row,
            column,
            row_control = self.row_controls[row],
            "full relaxation: no populated neighbour within any radius"
        );
        self.fallbacks.push(Fallback {
            row,
            column,
            kind: FallbackKind::FullRelaxation,
        });
        Some(column)
    }

    /// Column sums plus outstanding credit, which equal the column controls
    /// after every pass.
    #[cfg(test)]
    pub(crate) fn accounted_columns(&self) -> Vec<u64> {
        let width = self.cells.first().map_or(0, Vec::len);
        (0..width)
            .map(|c| self.cells.iter().map(|r| r[c]).sum::<u64>() + self.ledger.credit(c))
            .collect()
    }
}
