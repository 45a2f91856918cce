//! Fixed-width grid layout for the genotype table.

/// Arranges cells left-to-right, top-to-bottom into rows of a fixed width,
/// right-padding the final row so every row has exactly `columns` cells.
///
/// Row-count sizing is deliberately independent from the cells actually
/// laid out: the viewer sizes its grid from the batch's total sample
/// count, which can exceed the number of samples that returned a genotype.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    columns: usize,
}

impl GridLayout {
    pub const DEFAULT_COLUMNS: usize = 10;

    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rows needed to lay out `cells` items: `ceil(cells / columns)`.
    pub fn row_count(&self, cells: usize) -> usize {
        cells.div_ceil(self.columns)
    }

    /// Split `cells` into rows; pad cells are `None`.
    pub fn arrange<T>(&self, cells: Vec<T>) -> Vec<Vec<Option<T>>> {
        let mut rows = Vec::with_capacity(self.row_count(cells.len()));
        let mut row = Vec::with_capacity(self.columns);

        for cell in cells {
            row.push(Some(cell));
            if row.len() == self.columns {
                rows.push(row);
                row = Vec::with_capacity(self.columns);
            }
        }

        if !row.is_empty() {
            while row.len() < self.columns {
                row.push(None);
            }
            rows.push(row);
        }

        rows
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_counts_match_ceiling_division() {
        let layout = GridLayout::default();
        let expected = [(0, 0), (1, 1), (9, 1), (10, 1), (11, 2), (23, 3)];
        for (cells, rows) in expected {
            assert_eq!(layout.row_count(cells), rows, "{cells} cells");
        }
    }

    #[test]
    fn every_row_is_padded_to_the_column_count() {
        let layout = GridLayout::default();
        for count in [1usize, 9, 10, 11, 23] {
            let grid = layout.arrange((0..count).collect());
            assert_eq!(grid.len(), layout.row_count(count));
            for row in &grid {
                assert_eq!(row.len(), layout.columns());
            }
            let filled: usize = grid.iter().flatten().filter(|c| c.is_some()).count();
            assert_eq!(filled, count);
        }
    }

    #[test]
    fn cells_fill_left_to_right_top_to_bottom() {
        let layout = GridLayout::new(3);
        let grid = layout.arrange(vec![1, 2, 3, 4]);
        assert_eq!(grid[0], vec![Some(1), Some(2), Some(3)]);
        assert_eq!(grid[1], vec![Some(4), None, None]);
    }

    #[test]
    fn empty_input_produces_no_rows() {
        let layout = GridLayout::default();
        let grid: Vec<Vec<Option<u8>>> = layout.arrange(Vec::new());
        assert!(grid.is_empty());
    }

    #[test]
    fn zero_columns_is_clamped() {
        let layout = GridLayout::new(0);
        assert_eq!(layout.columns(), 1);
        assert_eq!(layout.row_count(3), 3);
    }
}
