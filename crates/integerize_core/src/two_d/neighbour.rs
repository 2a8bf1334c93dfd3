//! Nearest-neighbour fallback for deficient rows.
//!
//! When every donor column is zero in a deficient row, the row can still
//! absorb a unit in a donor column as long as the row is populated close by:
//! a zero cell next to nonzero cells is a plausible place for one more unit
//! when columns are ordered by a meaningful adjacency such as age bands.

/// First donor column (ascending) whose cell in `row` is zero and which has a
/// nonzero cell of `row` within `radius` positions on either side.
pub(crate) fn find_within(row: &[u64], donors: &[usize], radius: usize) -> Option<usize> {
    donors
        .iter()
        .copied()
        .find(|&column| row[column] == 0 && has_populated_neighbour(row, column, radius))
}

/// Tries each radius in order; returns the column and the radius that found
/// it.
pub(crate) fn search(row: &[u64], donors: &[usize], radii: &[usize]) -> Option<(usize, usize)> {
    radii
        .iter()
        .find_map(|&radius| find_within(row, donors, radius).map(|column| (column, radius)))
}

fn has_populated_neighbour(row: &[u64], column: usize, radius: usize) -> bool {
    let lo = column.saturating_sub(radius);
    let hi = column.saturating_add(radius).min(row.len().saturating_sub(1));
    (lo..=hi).any(|c| c != column && row[c] > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbour_within_radius() {
        let row = [0, 0, 0, 4, 0];
        assert_eq!(find_within(&row, &[1], 1), None);
        assert_eq!(find_within(&row, &[1], 2), Some(1));
        assert_eq!(find_within(&row, &[4], 1), Some(4));
    }

    #[test]
    fn test_only_zero_donor_cells_qualify() {
        let row = [2, 1, 0];
        assert_eq!(find_within(&row, &[0, 1], 3), None);
        assert_eq!(find_within(&row, &[0, 2], 3), Some(2));
    }

    #[test]
    fn test_first_qualifying_donor_wins() {
        let row = [0, 5, 0];
        assert_eq!(find_within(&row, &[0, 2], 1), Some(0));
        assert_eq!(find_within(&row, &[2, 0], 1), Some(2));
    }

    #[test]
    fn test_search_tries_radii_in_order() {
        let row = [0, 0, 0, 0, 3];
        assert_eq!(search(&row, &[1], &[1, 2, 3]), Some((1, 3)));
        assert_eq!(search(&row, &[1], &[4, 3]), Some((1, 4)));
        assert_eq!(search(&row, &[1], &[1, 2]), None);
        assert_eq!(search(&row, &[1], &[]), None);
    }

    #[test]
    fn test_empty_row_has_no_neighbours() {
        let row = [0, 0, 0];
        assert_eq!(search(&row, &[0, 1, 2], &[1, 2]), None);
    }
}
