//! Column-oriented time series of one result sheet
//!
//! Each column is stored as a `DVector<f64>`; cells that were empty in the
//! workbook hold `NaN`. The time column (`Time (sec)`) is expected to be
//! sorted in ascending order, which is how B-RISK writes it.

use nalgebra::DVector;

use super::error::{Error, Result};

/// Name of the time column in every B-RISK sheet
pub const TIME_COLUMN: &str = "Time (sec)";

/// Tabular data of one sheet (a room or `Outside`)
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    name: String,
    columns: Vec<String>,
    data: Vec<DVector<f64>>,
}

impl ResultTable {
    /// Create a table; every column must have the same number of rows.
    pub fn new(name: impl Into<String>, columns: Vec<String>, data: Vec<DVector<f64>>) -> Result<Self> {
        let name = name.into();

        if columns.len() != data.len() {
            return Err(Error::InvalidTable(format!(
                "{name}: {} column names for {} columns",
                columns.len(),
                data.len()
            )));
        }

        if let Some(first) = data.first() {
            if let Some((i, col)) = data.iter().enumerate().find(|(_, c)| c.len() != first.len()) {
                return Err(Error::InvalidTable(format!(
                    "{name}: column \"{}\" has {} rows, expected {}",
                    columns[i],
                    col.len(),
                    first.len()
                )));
            }
        }

        Ok(Self { name, columns, data })
    }

    /// Build a table from `(column name, values)` pairs
    pub fn from_columns<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (S, Vec<f64>)>,
    ) -> Result<Self> {
        let (names, data): (Vec<String>, Vec<DVector<f64>>) = columns
            .into_iter()
            .map(|(n, v)| (n.into(), DVector::from_vec(v)))
            .unzip();
        Self::new(name, names, data)
    }

    /// Sheet name (the room name once loaded)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Column names in sheet order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Rename a column, if present
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(c) = self.columns.iter_mut().find(|c| c.as_str() == from) {
            *c = to.to_string();
        }
    }

    /// Get a column by name
    pub fn column(&self, column: &str) -> Result<&DVector<f64>> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.data[i])
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// The `Time (sec)` column
    pub fn time(&self) -> Result<&DVector<f64>> {
        self.column(TIME_COLUMN)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.first().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First recorded time
    pub fn start_time(&self) -> Result<f64> {
        let time = self.time()?;
        time.iter().next().copied().ok_or_else(|| self.empty_error())
    }

    /// Last recorded time
    pub fn end_time(&self) -> Result<f64> {
        let time = self.time()?;
        time.iter().last().copied().ok_or_else(|| self.empty_error())
    }

    /// Largest recorded time
    pub fn max_time(&self) -> Result<f64> {
        let time = self.time()?;
        time.iter()
            .copied()
            .filter(|t| t.is_finite())
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))))
            .ok_or_else(|| self.empty_error())
    }

    /// `(time, value)` pairs of a column, for plotting
    pub fn series(&self, column: &str) -> Result<Vec<(f64, f64)>> {
        let time = self.time()?;
        let values = self.column(column)?;
        Ok(time.iter().copied().zip(values.iter().copied()).collect())
    }

    /// Linearly interpolated value of `column` at time `t`.
    ///
    /// Returns `None` outside the recorded time range.
    pub fn value_at(&self, column: &str, t: f64) -> Result<Option<f64>> {
        let time = self.time()?;
        let values = self.column(column)?;

        Ok(bracket(time.as_slice(), t).map(|(lo, hi)| {
            if lo == hi {
                values[lo]
            } else {
                lerp(time[lo], values[lo], time[hi], values[hi], t)
            }
        }))
    }

    /// Return a table that has a row at time `t`.
    ///
    /// The new row is linearly interpolated column by column between its
    /// neighbours. When `t` is already a recorded time, or lies outside the
    /// recorded range, the table is returned unchanged.
    pub fn with_time(&self, t: f64) -> Result<Self> {
        let time = self.time()?;

        let (lo, hi) = match bracket(time.as_slice(), t) {
            Some((lo, hi)) if lo != hi => (lo, hi),
            _ => return Ok(self.clone()),
        };

        let (t_lo, t_hi) = (time[lo], time[hi]);
        let data = self
            .data
            .iter()
            .map(|col| {
                let value = lerp(t_lo, col[lo], t_hi, col[hi], t);
                col.clone().insert_row(hi, value)
            })
            .collect();

        Self::new(self.name.clone(), self.columns.clone(), data)
    }

    /// Rows whose time lies in `[t0, t1]`
    pub fn slice_between(&self, t0: f64, t1: f64) -> Result<Self> {
        let time = self.time()?;
        let rows: Vec<usize> = time
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t >= t0 && t <= t1)
            .map(|(i, _)| i)
            .collect();

        let data = self
            .data
            .iter()
            .map(|col| DVector::from_iterator(rows.len(), rows.iter().map(|&i| col[i])))
            .collect();

        Self::new(self.name.clone(), self.columns.clone(), data)
    }

    fn empty_error(&self) -> Error {
        Error::InvalidTable(format!("{} has no rows", self.name))
    }
}

/// Indices of the samples surrounding `t` in a sorted time vector.
///
/// Both indices are equal when `t` is a recorded time.
fn bracket(time: &[f64], t: f64) -> Option<(usize, usize)> {
    if time.is_empty() || !t.is_finite() {
        return None;
    }

    let hi = time.partition_point(|&x| x < t);
    if hi < time.len() && time[hi] == t {
        return Some((hi, hi));
    }
    if hi == 0 || hi == time.len() {
        return None;
    }
    Some((hi - 1, hi))
}

fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        ResultTable::from_columns(
            "Room 1",
            vec![
                (TIME_COLUMN, vec![0.0, 10.0, 20.0, 30.0]),
                ("Upper Layer Temp (C)", vec![20.0, 40.0, 80.0, 100.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = ResultTable::from_columns("x", vec![("a", vec![1.0]), ("b", vec![1.0, 2.0])]);
        assert!(matches!(err, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn test_column_lookup() {
        let t = table();
        assert_eq!(t.len(), 4);
        assert!(t.has_column("Upper Layer Temp (C)"));
        assert!(matches!(t.column("Nope"), Err(Error::MissingColumn { .. })));
        assert_eq!(t.end_time().unwrap(), 30.0);
        assert_eq!(t.start_time().unwrap(), 0.0);
        assert_eq!(t.max_time().unwrap(), 30.0);
    }

    #[test]
    fn test_value_at() {
        let t = table();
        assert_eq!(t.value_at("Upper Layer Temp (C)", 15.0).unwrap(), Some(60.0));
        assert_eq!(t.value_at("Upper Layer Temp (C)", 20.0).unwrap(), Some(80.0));
        assert_eq!(t.value_at("Upper Layer Temp (C)", 31.0).unwrap(), None);
    }

    #[test]
    fn test_with_time_inserts_interpolated_row() {
        let t = table().with_time(25.0).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(t.time().unwrap().as_slice(), &[0.0, 10.0, 20.0, 25.0, 30.0]);
        assert_eq!(t.column("Upper Layer Temp (C)").unwrap()[3], 90.0);
    }

    #[test]
    fn test_with_time_existing_or_outside_is_unchanged() {
        let t = table();
        assert_eq!(t.with_time(10.0).unwrap(), t);
        assert_eq!(t.with_time(-5.0).unwrap(), t);
        assert_eq!(t.with_time(100.0).unwrap(), t);
    }

    #[test]
    fn test_slice_between_is_inclusive() {
        let t = table().slice_between(10.0, 20.0).unwrap();
        assert_eq!(t.time().unwrap().as_slice(), &[10.0, 20.0]);
        assert_eq!(t.column("Upper Layer Temp (C)").unwrap().as_slice(), &[40.0, 80.0]);
    }

    #[test]
    fn test_rename_column() {
        let mut t = table();
        t.rename_column("Upper Layer Temp (C)", "Upper (C)");
        assert!(t.has_column("Upper (C)"));
        assert!(!t.has_column("Upper Layer Temp (C)"));
    }
}
