//! A cursor over the cells of one row

use chrono::NaiveDateTime;

use crate::style::CellStyle;
use crate::table::row::{CellValue, Row};

/// A cursor exposing get/set operations on a row by column index.
///
/// The walker starts at column 0; `to` jumps, `next` advances. It operates on
/// an already materialized row, so every operation is infallible.
#[derive(Debug)]
pub struct CellWalker<'a> {
    row: &'a mut Row,
    col: usize,
}

impl<'a> CellWalker<'a> {
    pub(crate) fn new(row: &'a mut Row) -> Self {
        Self { row, col: 0 }
    }

    pub fn column(&self) -> usize {
        self.col
    }

    /// Move the cursor to `col`.
    pub fn to(&mut self, col: usize) -> &mut Self {
        self.col = col;
        self
    }

    /// Advance the cursor one column.
    pub fn next_cell(&mut self) -> &mut Self {
        self.col += 1;
        self
    }

    pub fn value(&self) -> Option<&CellValue> {
        self.row.value(self.col)
    }

    pub fn style_name(&self) -> Option<&str> {
        self.row.style_name(self.col)
    }

    pub fn set_boolean(&mut self, value: bool) -> &mut Self {
        self.row.set_boolean(self.col, value);
        self
    }

    pub fn set_currency(&mut self, value: f64, currency: &str) -> &mut Self {
        self.row.set_currency(self.col, value, currency);
        self
    }

    pub fn set_date(&mut self, value: NaiveDateTime) -> &mut Self {
        self.row.set_date(self.col, value);
        self
    }

    pub fn set_float(&mut self, value: f64) -> &mut Self {
        self.row.set_float(self.col, value);
        self
    }

    pub fn set_percentage(&mut self, value: f64) -> &mut Self {
        self.row.set_percentage(self.col, value);
        self
    }

    pub fn set_text(&mut self, value: &str) -> &mut Self {
        self.row.set_text(self.col, value);
        self
    }

    pub fn set_time_millis(&mut self, milliseconds: i64) -> &mut Self {
        self.row.set_time_millis(self.col, milliseconds);
        self
    }

    pub fn set_style(&mut self, style: &CellStyle) -> &mut Self {
        self.row.set_style(self.col, style);
        self
    }

    pub fn set_tooltip(&mut self, tooltip: &str) -> &mut Self {
        self.row.set_tooltip(self.col, tooltip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DataStyleSet, StyleRegistry};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn walker_writes_sequentially() {
        let mut row = Row::new(
            Rc::new(RefCell::new(StyleRegistry::new())),
            Rc::new(DataStyleSet::new()),
        );
        let mut walker = CellWalker::new(&mut row);
        walker.set_text("a");
        walker.next_cell().set_float(1.5);
        walker.to(4).set_boolean(false);

        assert_eq!(row.value(0), Some(&CellValue::Text("a".to_string())));
        assert_eq!(row.value(1), Some(&CellValue::Float(1.5)));
        assert_eq!(row.value(4), Some(&CellValue::Boolean(false)));
        assert_eq!(row.value(2), None);
    }
}
