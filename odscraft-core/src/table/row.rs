//! Rows: per-column value, style, span and tooltip arrays
//!
//! A row is materialized on first touch and belongs to exactly one table.
//! Its arrays are blank-compressed, so a row with a single cell in column
//! 900 stores one value and 899 implicit blanks.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::container::SparseVec;
use crate::style::{CellStyle, DataStyleSet, RowStyle, StyleRegistry};
use crate::xml::{append_attribute, append_int_attribute, append_raw_attribute, escape_xml};

/// Span sentinel for a cell covered by a merge anchored elsewhere, distinct
/// from 0 ("no span") and any positive span count.
pub(crate) const COVERED: i32 = -1;

/// A typed cell value, string-encoded per ODF value-type rules at emission.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Boolean(bool),
    Currency { value: f64, code: String },
    Date(NaiveDateTime),
    Float(f64),
    Percentage(f64),
    Text(String),
    /// A time interval in milliseconds, emitted as an ISO-8601 duration.
    Time { millis: i64 },
    Void,
}

impl CellValue {
    pub(crate) fn value_type(&self) -> &'static str {
        match self {
            CellValue::Boolean(_) => "boolean",
            CellValue::Currency { .. } => "currency",
            CellValue::Date(_) => "date",
            CellValue::Float(_) => "float",
            CellValue::Percentage(_) => "percentage",
            CellValue::Text(_) => "string",
            CellValue::Time { .. } => "time",
            CellValue::Void => "void",
        }
    }

    pub(crate) fn value_attribute(&self) -> Option<&'static str> {
        match self {
            CellValue::Boolean(_) => Some("office:boolean-value"),
            CellValue::Currency { .. } => Some("office:value"),
            CellValue::Date(_) => Some("office:date-value"),
            CellValue::Float(_) => Some("office:value"),
            CellValue::Percentage(_) => Some("office:value"),
            CellValue::Text(_) => Some("office:string-value"),
            CellValue::Time { .. } => Some("office:time-value"),
            CellValue::Void => None,
        }
    }

    pub(crate) fn format_value(&self) -> String {
        match self {
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Currency { value, .. } => value.to_string(),
            CellValue::Date(date) => date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Percentage(p) => p.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Time { millis } => format_time_interval(*millis),
            CellValue::Void => String::new(),
        }
    }
}

/// XML Schema Part 2, 3.2.6 duration: `P{d}DT{h}H{m}M{s}.{mmm}S`.
fn format_time_interval(milliseconds: i64) -> String {
    let mut remaining = milliseconds;
    let days = remaining / 86_400_000;
    remaining -= days * 86_400_000;
    let hours = remaining / 3_600_000;
    remaining -= hours * 3_600_000;
    let minutes = remaining / 60_000;
    remaining -= minutes * 60_000;
    let seconds = remaining / 1_000;
    remaining -= seconds * 1_000;
    format!("P{days}DT{hours}H{minutes}M{seconds}.{remaining:03}S")
}

/// One table row. Obtained from [`Table`](crate::table::Table) by index,
/// position string or sequential cursor.
#[derive(Debug, Clone)]
pub struct Row {
    styles_container: Rc<RefCell<StyleRegistry>>,
    data_styles: Rc<DataStyleSet>,
    values: SparseVec<Option<CellValue>>,
    cell_styles: SparseVec<Option<String>>,
    column_spans: SparseVec<i32>,
    row_spans: SparseVec<i32>,
    tooltips: SparseVec<Option<String>>,
    row_style: String,
    default_cell_style: Option<String>,
}

/// Rows compare by observable content; the style registry handle they share
/// with their table carries no identity of its own.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
            && self.cell_styles == other.cell_styles
            && self.column_spans == other.column_spans
            && self.row_spans == other.row_spans
            && self.tooltips == other.tooltips
            && self.row_style == other.row_style
            && self.default_cell_style == other.default_cell_style
    }
}

impl Row {
    pub(crate) fn new(
        styles_container: Rc<RefCell<StyleRegistry>>,
        data_styles: Rc<DataStyleSet>,
    ) -> Self {
        Self {
            styles_container,
            data_styles,
            values: SparseVec::new(None),
            cell_styles: SparseVec::new(None),
            column_spans: SparseVec::new(0),
            row_spans: SparseVec::new(0),
            tooltips: SparseVec::new(None),
            row_style: "ro1".to_string(),
            default_cell_style: None,
        }
    }

    pub fn set_boolean(&mut self, col: usize, value: bool) {
        self.values.set(col, Some(CellValue::Boolean(value)));
        let data_styles = Rc::clone(&self.data_styles);
        self.set_style(col, data_styles.boolean_style());
    }

    pub fn set_currency(&mut self, col: usize, value: f64, currency: &str) {
        self.values.set(
            col,
            Some(CellValue::Currency {
                value,
                code: currency.to_string(),
            }),
        );
        let data_styles = Rc::clone(&self.data_styles);
        self.set_style(col, data_styles.currency_style());
    }

    pub fn set_date(&mut self, col: usize, value: NaiveDateTime) {
        self.values.set(col, Some(CellValue::Date(value)));
        let data_styles = Rc::clone(&self.data_styles);
        self.set_style(col, data_styles.date_style());
    }

    pub fn set_float(&mut self, col: usize, value: f64) {
        self.values.set(col, Some(CellValue::Float(value)));
        let data_styles = Rc::clone(&self.data_styles);
        self.set_style(col, data_styles.float_style());
    }

    pub fn set_percentage(&mut self, col: usize, value: f64) {
        self.values.set(col, Some(CellValue::Percentage(value)));
        let data_styles = Rc::clone(&self.data_styles);
        self.set_style(col, data_styles.percentage_style());
    }

    /// Plain text cells carry no default style.
    pub fn set_text(&mut self, col: usize, value: &str) {
        self.values.set(col, Some(CellValue::Text(value.to_string())));
    }

    pub fn set_time_millis(&mut self, col: usize, milliseconds: i64) {
        self.values
            .set(col, Some(CellValue::Time { millis: milliseconds }));
        let data_styles = Rc::clone(&self.data_styles);
        self.set_style(col, data_styles.time_style());
    }

    pub fn set_void(&mut self, col: usize) {
        self.values.set(col, Some(CellValue::Void));
    }

    /// Clear a cell back to the implicit blank state.
    pub fn clear(&mut self, col: usize) {
        self.values.set(col, None);
        self.cell_styles.set(col, None);
        self.tooltips.set(col, None);
    }

    /// Assign a cell style, registering it (and the data style it adopts via
    /// the carry-forward rule) into the document's style registry.
    pub fn set_style(&mut self, col: usize, style: &CellStyle) {
        let mut registry = self.styles_container.borrow_mut();
        let merged = match self.cell_styles.get(col).as_deref() {
            Some(old_name) if style.data_style().is_none() => registry
                .cell_style(old_name)
                .map(|old| style.merged_with_data_style_of(old))
                .unwrap_or_else(|| style.clone()),
            _ => style.clone(),
        };
        registry.add_cell_style(&merged);
        drop(registry);
        self.cell_styles.set(col, Some(merged.name().to_string()));
    }

    pub fn set_tooltip(&mut self, col: usize, tooltip: &str) {
        self.tooltips.set(col, Some(tooltip.to_string()));
    }

    pub fn set_row_style(&mut self, style: &RowStyle) {
        self.styles_container.borrow_mut().add_row_style(style);
        self.row_style = style.name().to_string();
    }

    pub fn set_default_cell_style(&mut self, style: &CellStyle) {
        self.styles_container.borrow_mut().add_cell_style(style);
        self.default_cell_style = Some(style.name().to_string());
    }

    pub fn value(&self, col: usize) -> Option<&CellValue> {
        self.values.get(col).as_ref()
    }

    pub fn style_name(&self, col: usize) -> Option<&str> {
        self.cell_styles.get(col).as_deref()
    }

    pub fn tooltip(&self, col: usize) -> Option<&str> {
        self.tooltips.get(col).as_deref()
    }

    /// Column span at `col`: 0 = none, -1 = covered, >1 = merge anchor.
    pub fn columns_spanned(&self, col: usize) -> i32 {
        *self.column_spans.get(col)
    }

    pub fn rows_spanned(&self, col: usize) -> i32 {
        *self.row_spans.get(col)
    }

    /// Number of columns up to and including the last touched cell.
    pub fn used_columns(&self) -> usize {
        self.values.used_size()
    }

    /// Number of cells holding a value.
    pub fn cell_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// A blank row carries nothing a reader could observe; the serializer
    /// folds blank rows into the same repeated block as absent ones.
    pub(crate) fn is_blank(&self) -> bool {
        self.values.is_empty()
            && self.cell_styles.is_empty()
            && self.column_spans.is_empty()
            && self.row_spans.is_empty()
            && self.tooltips.is_empty()
            && self.row_style == "ro1"
            && self.default_cell_style.is_none()
    }

    pub(crate) fn is_covered(&self, col: usize) -> bool {
        *self.column_spans.get(col) == COVERED
    }

    /// Anchor a merge at `col`: record the spans and mark the covered cells
    /// to the right on this row. Covered rows below are handled by the table.
    pub(crate) fn set_spans(&mut self, col: usize, rows_spanned: u32, columns_spanned: u32) {
        if self.is_covered(col) {
            return;
        }
        if rows_spanned > 1 {
            self.row_spans.set(col, rows_spanned as i32);
        }
        if columns_spanned > 1 {
            self.column_spans.set(col, columns_spanned as i32);
            for c in 1..columns_spanned as usize {
                self.column_spans.set(col + c, COVERED);
            }
        }
    }

    /// Mark `count` cells starting at `col` as covered by a merge anchored
    /// on an earlier row.
    pub(crate) fn set_covered(&mut self, col: usize, count: usize) {
        for c in 0..count {
            self.column_spans.set(col + c, COVERED);
        }
    }

    /// Emit this row as a `<table:table-row>` block. Runs of null cells are
    /// coalesced into one self-closed cell with a repeat count; positions
    /// covered by a merge become `<table:covered-table-cell>` elements with
    /// their content suppressed, so the grid geometry matches the spans the
    /// anchor declares. A row holding no cell at all still gets one empty
    /// cell, as a row element requires at least one.
    pub(crate) fn append_xml(&self, xml: &mut String) {
        xml.push_str("<table:table-row");
        append_attribute(xml, "table:style-name", &self.row_style);
        if let Some(style) = &self.default_cell_style {
            append_attribute(xml, "table:default-cell-style-name", style);
        }
        xml.push('>');

        // covered markers can extend past the last value, e.g. on rows
        // materialized only by a merge anchored above
        let size = self.values.used_size().max(self.column_spans.used_size());
        let mut null_count = 0usize;
        let mut wrote_cell = false;
        for col in 0..size {
            if self.is_covered(col) {
                Self::flush_null_run(xml, &mut null_count);
                xml.push_str("<table:covered-table-cell/>");
                wrote_cell = true;
            } else {
                match self.values.get(col) {
                    None => null_count += 1,
                    Some(value) => {
                        Self::flush_null_run(xml, &mut null_count);
                        self.append_cell_xml(xml, col, value);
                        wrote_cell = true;
                    }
                }
            }
        }
        if !wrote_cell {
            xml.push_str("<table:table-cell/>");
        }

        xml.push_str("</table:table-row>");
    }

    fn flush_null_run(xml: &mut String, null_count: &mut usize) {
        if *null_count == 0 {
            return;
        }
        xml.push_str("<table:table-cell");
        if *null_count > 1 {
            append_int_attribute(xml, "table:number-columns-repeated", *null_count as i64);
        }
        xml.push_str("/>");
        *null_count = 0;
    }

    /// Emit one cell holding a value. Covered positions never reach this
    /// point; they serialize as `<table:covered-table-cell>` instead.
    fn append_cell_xml(&self, xml: &mut String, col: usize, value: &CellValue) {
        xml.push_str("<table:table-cell");
        if let Some(style) = self.cell_styles.get(col).as_deref() {
            append_attribute(xml, "table:style-name", style);
        }
        append_raw_attribute(xml, "office:value-type", value.value_type());
        if let Some(attr) = value.value_attribute() {
            append_attribute(xml, attr, &value.format_value());
        }
        if let CellValue::Currency { code, .. } = value {
            append_attribute(xml, "office:currency", code);
        }

        let col_span = *self.column_spans.get(col);
        if col_span > 1 {
            append_int_attribute(xml, "table:number-columns-spanned", i64::from(col_span));
        }
        let row_span = *self.row_spans.get(col);
        if row_span > 1 {
            append_int_attribute(xml, "table:number-rows-spanned", i64::from(row_span));
        }

        match self.tooltips.get(col).as_deref() {
            None => xml.push_str("/>"),
            Some(tooltip) => {
                // an annotation forces an explicit open/close tag pair
                xml.push_str("><office:annotation><text:p>");
                xml.push_str(&escape_xml(tooltip));
                xml.push_str("</text:p></office:annotation></table:table-cell>");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_row() -> Row {
        Row::new(
            Rc::new(RefCell::new(StyleRegistry::new())),
            Rc::new(DataStyleSet::new()),
        )
    }

    #[test]
    fn float_formatting_is_not_localized() {
        let mut row = empty_row();
        row.set_float(0, 3.14);
        row.set_float(1, 42.0);
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains("office:value-type=\"float\" office:value=\"3.14\""));
        assert!(xml.contains("office:value-type=\"float\" office:value=\"42\""));
    }

    #[test]
    fn null_runs_are_coalesced() {
        let mut row = empty_row();
        row.set_text(0, "first");
        row.set_text(4, "last");
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains("<table:table-cell table:number-columns-repeated=\"3\"/>"));
        // a single null cell carries no repeat attribute
        let mut row = empty_row();
        row.set_text(0, "a");
        row.set_text(2, "b");
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains("office:string-value=\"a\"/><table:table-cell/><table:table-cell"));
    }

    #[test]
    fn currency_cell_carries_code() {
        let mut row = empty_row();
        row.set_currency(0, 15.99, "EUR");
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains("office:value-type=\"currency\""));
        assert!(xml.contains("office:value=\"15.99\""));
        assert!(xml.contains("office:currency=\"EUR\""));
    }

    #[test]
    fn boolean_and_date_attributes() {
        let mut row = empty_row();
        row.set_boolean(0, true);
        row.set_date(
            1,
            chrono::NaiveDate::from_ymd_opt(2016, 7, 14)
                .and_then(|d| d.and_hms_opt(12, 30, 0))
                .unwrap_or_default(),
        );
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains("office:boolean-value=\"true\""));
        assert!(xml.contains("office:date-value=\"2016-07-14T12:30:00\""));
    }

    #[test]
    fn tooltip_forces_open_close_pair() {
        let mut row = empty_row();
        row.set_text(0, "v");
        row.set_tooltip(0, "a < b");
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains(
            "><office:annotation><text:p>a &lt; b</text:p></office:annotation></table:table-cell>"
        ));
    }

    #[test]
    fn covered_cell_serializes_as_covered_table_cell() {
        let mut row = empty_row();
        row.set_text(0, "anchor");
        row.set_text(1, "inside");
        row.set_spans(0, 2, 2);
        assert_eq!(row.columns_spanned(0), 2);
        assert_eq!(row.columns_spanned(1), COVERED);
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains("table:number-columns-spanned=\"2\""));
        assert!(xml.contains("table:number-rows-spanned=\"2\""));
        // exactly one spanned attribute pair, on the anchor only
        assert_eq!(xml.matches("number-columns-spanned").count(), 1);
        assert_eq!(xml.matches("number-rows-spanned").count(), 1);
        // the covered position switches element and drops its content
        assert!(xml.contains("<table:covered-table-cell/>"));
        assert!(!xml.contains("inside"));
    }

    #[test]
    fn covered_only_row_emits_covered_cells() {
        // a row materialized solely by a merge anchored above holds no
        // values, yet its covered positions must occupy the grid
        let mut row = empty_row();
        row.set_covered(0, 2);
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains(
            "><table:covered-table-cell/><table:covered-table-cell/></table:table-row>"
        ));
    }

    #[test]
    fn row_without_cells_still_carries_one_cell() {
        let mut row = empty_row();
        row.set_row_style(&RowStyle::new("tall").with_height("1.2cm"));
        let mut xml = String::new();
        row.append_xml(&mut xml);
        assert!(xml.contains(
            "<table:table-row table:style-name=\"tall\"><table:table-cell/></table:table-row>"
        ));
    }

    #[test]
    fn merge_anchor_already_covered_is_ignored() {
        let mut row = empty_row();
        row.set_covered(1, 1);
        row.set_spans(1, 3, 3);
        assert_eq!(row.columns_spanned(1), COVERED);
        assert_eq!(row.rows_spanned(1), 0);
    }

    #[test]
    fn carry_forward_keeps_data_style() {
        use crate::style::{DataStyle, TextProperties};
        let registry = Rc::new(RefCell::new(StyleRegistry::new()));
        let mut row = Row::new(Rc::clone(&registry), Rc::new(DataStyleSet::new()));

        let money = CellStyle::builder("money")
            .data_style(DataStyle::currency("money-data", "$", 2))
            .build();
        row.set_style(0, &money);
        let bold = CellStyle::builder("bold")
            .text_properties(TextProperties::bold())
            .build();
        row.set_style(0, &bold);

        let registry = registry.borrow();
        let stored = registry.cell_style("bold").map(|s| s.data_style().is_some());
        assert_eq!(stored, Some(true));
    }

    #[test]
    fn time_interval_format() {
        assert_eq!(format_time_interval(0), "P0DT0H0M0.000S");
        assert_eq!(
            format_time_interval(((26 * 3600) + (3 * 60) + 15) * 1000 + 42),
            "P1DT2H3M15.042S"
        );
    }
}
