use std::collections::BTreeSet;

/// A loaded station table: named columns over rows of nullable text cells.
///
/// Column presence is not guaranteed, so every accessor works by name and
/// returns `None` for absent columns as well as null cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Dataset {
    /// Build a table; rows shorter than the header are padded with nulls and
    /// longer rows are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A table is empty when it has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Names from `required` that this table lacks, in the order given
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|column| !self.has_column(column))
            .map(|column| column.to_string())
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            dataset: self,
            values,
        })
    }

    /// Keep only rows matching `predicate`; the column layout is unchanged
    pub fn filter_rows<F>(&self, mut predicate: F) -> Dataset
    where
        F: FnMut(&Row<'_>) -> bool,
    {
        let rows = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.values.to_vec())
            .collect();

        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Sorted distinct non-null, non-empty values of `column`
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let Some(index) = self.column_index(column) else {
            return Vec::new();
        };

        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(|cell| cell.as_deref()))
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Borrowed view of one dataset row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    values: &'a [Option<String>],
}

impl<'a> Row<'a> {
    /// Cell text, `None` when the column is absent or the cell is null
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.dataset.column_index(column)?;
        self.values.get(index).and_then(|cell| cell.as_deref())
    }
}
