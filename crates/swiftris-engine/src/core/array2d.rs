/// Error returned when a cell coordinate lies outside the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({column}, {row}) is outside the {columns}x{rows} grid")]
pub struct GridIndexError {
    pub column: i32,
    pub row: i32,
    pub columns: usize,
    pub rows: usize,
}

/// Fixed-size two-dimensional store of optional cells.
///
/// Cells are addressed by `(column, row)` with `(0, 0)` at the top-left and
/// rows growing downward. Coordinates are signed so that callers can ask
/// about positions a shape has been moved to before its placement is checked
/// for legality; every access is bounds-checked and never panics.
///
/// Storage is a single row-major `Vec`, allocated once. The array is never
/// resized.
///
/// # Example
///
/// ```
/// use swiftris_engine::Array2D;
///
/// let mut grid = Array2D::<u8>::new(10, 20);
/// grid.set(3, 5, Some(1)).unwrap();
///
/// assert_eq!(grid.get(3, 5), Some(&1));
/// assert_eq!(grid.get(-1, 5), None);
/// assert!(grid.try_get(10, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    columns: usize,
    rows: usize,
    cells: Vec<Option<T>>,
}

impl<T> Array2D<T> {
    /// Creates an array with every cell empty.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut cells = Vec::with_capacity(columns * rows);
        cells.resize_with(columns * rows, || None);
        Self {
            columns,
            rows,
            cells,
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns `true` if `(column, row)` addresses a cell of this array.
    #[must_use]
    pub fn contains(&self, column: i32, row: i32) -> bool {
        self.index(column, row).is_ok()
    }

    fn index(&self, column: i32, row: i32) -> Result<usize, GridIndexError> {
        let error = GridIndexError {
            column,
            row,
            columns: self.columns,
            rows: self.rows,
        };
        let c = usize::try_from(column).map_err(|_| error)?;
        let r = usize::try_from(row).map_err(|_| error)?;
        if c >= self.columns || r >= self.rows {
            return Err(error);
        }
        Ok(r * self.columns + c)
    }

    /// Returns the content of a cell, or an error if it is out of range.
    pub fn try_get(&self, column: i32, row: i32) -> Result<Option<&T>, GridIndexError> {
        let index = self.index(column, row)?;
        Ok(self.cells[index].as_ref())
    }

    /// Returns the content of a cell. Out-of-range cells read as empty.
    #[must_use]
    pub fn get(&self, column: i32, row: i32) -> Option<&T> {
        self.try_get(column, row).ok().flatten()
    }

    /// Replaces the content of a cell and returns the previous content.
    pub fn try_set(
        &mut self,
        column: i32,
        row: i32,
        value: Option<T>,
    ) -> Result<Option<T>, GridIndexError> {
        let index = self.index(column, row)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Replaces the content of a cell.
    pub fn set(&mut self, column: i32, row: i32, value: Option<T>) -> Result<(), GridIndexError> {
        self.try_set(column, row, value).map(drop)
    }

    /// Empties a cell and returns what it held.
    pub fn take(&mut self, column: i32, row: i32) -> Result<Option<T>, GridIndexError> {
        self.try_set(column, row, None)
    }

    /// Returns `true` if the cell is in range and holds a value.
    #[must_use]
    pub fn is_occupied(&self, column: i32, row: i32) -> bool {
        self.get(column, row).is_some()
    }

    /// Iterates over occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter().flatten()
    }

    /// Returns `true` if no cell holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}
