/// Columns every run guarantees, in output order. Source columns beyond
/// these pass through unchanged, after the required block.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Row",
    "Title",
    "Year",
    "Genre",
    "imdbRating",
    "Actors (Main)",
    "BoxOffice",
];

/// In-memory movie table: an ordered header plus one string cell per
/// column per row. Every row is kept padded to the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Table { columns, rows };
        table.pad_rows();
        table
    }

    /// Adds any missing required column (empty cells) and reorders the
    /// header: required columns first, extras after in source order.
    pub fn ensure_required_columns(&mut self) {
        for name in REQUIRED_COLUMNS {
            if self.col(name).is_none() {
                self.columns.push(name.to_string());
            }
        }
        self.pad_rows();

        let mut order: Vec<usize> = REQUIRED_COLUMNS
            .iter()
            .map(|name| self.col(name).unwrap())
            .collect();
        for (i, name) in self.columns.iter().enumerate() {
            if !REQUIRED_COLUMNS.contains(&name.as_str()) {
                order.push(i);
            }
        }
        self.columns = order.iter().map(|&i| self.columns[i].clone()).collect();
        for row in self.rows.iter_mut() {
            *row = order.iter().map(|&i| row[i].clone()).collect();
        }
    }

    pub fn col(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, name: &str) -> &str {
        match self.col(name) {
            Some(c) => &self.rows[row][c],
            None => "",
        }
    }

    pub fn set(&mut self, row: usize, name: &str, value: impl Into<String>) {
        if let Some(c) = self.col(name) {
            self.rows[row][c] = value.into();
        }
    }

    fn pad_rows(&mut self) {
        let width = self.columns.len();
        for row in self.rows.iter_mut() {
            row.resize(width, String::new());
        }
    }
}
