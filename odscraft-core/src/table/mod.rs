//! Tables: the sparse row store and its `<table:table>` emission

pub mod row;
pub mod walker;

pub use row::{CellValue, Row};
pub use walker::CellWalker;

use std::cell::RefCell;
use std::rc::Rc;

use crate::container::SparseVec;
use crate::document::settings::append_config_item;
use crate::error::OdsError;
use crate::position::parse_position;
use crate::style::{ColumnStyle, DataStyleSet, StyleRegistry, TableStyle};
use crate::xml::{append_attribute, append_int_attribute, append_raw_attribute};

/// Row limit of the ODF 1.2 grid.
pub const MAX_ROW_COUNT: usize = 1_048_576;
/// Column limit of the ODF 1.2 grid.
pub const MAX_COLUMN_COUNT: usize = 1024;

/// Per-table view settings written into `settings.xml`.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub cursor_x: i64,
    pub cursor_y: i64,
    pub horizontal_split_position: i64,
    pub vertical_split_position: i64,
    pub zoom: i64,
    pub page_view_zoom: i64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            horizontal_split_position: 0,
            vertical_split_position: 0,
            zoom: 100,
            page_view_zoom: 60,
        }
    }
}

/// One sheet of the document: a lazily materialized row store plus column
/// styles and a table style.
///
/// Rows are created on first access; a row never touched costs nothing and is
/// run-length encoded at serialization time. Table names are unique within a
/// document (case-sensitive).
#[derive(Debug)]
pub struct Table {
    name: String,
    style_name: String,
    styles_container: Rc<RefCell<StyleRegistry>>,
    data_styles: Rc<DataStyleSet>,
    column_styles: SparseVec<Option<String>>,
    rows: SparseVec<Option<Row>>,
    next_row_index: usize,
    config: TableConfig,
}

impl Table {
    pub(crate) fn new(
        name: &str,
        styles_container: Rc<RefCell<StyleRegistry>>,
        data_styles: Rc<DataStyleSet>,
    ) -> Self {
        Self {
            name: name.to_string(),
            style_name: "ta1".to_string(),
            styles_container,
            data_styles,
            column_styles: SparseVec::new(None),
            rows: SparseVec::new(None),
            next_row_index: 0,
            config: TableConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_mut(&mut self) -> &mut TableConfig {
        &mut self.config
    }

    /// The row at `index`, materializing it (and nothing else) on first
    /// touch. Never fails; callers wanting bounds checking use [`Table::row`].
    pub fn row_secure(&mut self, index: usize) -> &mut Row {
        if self.rows.get(index).is_none() {
            self.rows.set(
                index,
                Some(Row::new(
                    Rc::clone(&self.styles_container),
                    Rc::clone(&self.data_styles),
                )),
            );
        }
        match self.rows.get_mut(index) {
            Some(Some(row)) => row,
            _ => unreachable!("row materialized above"),
        }
    }

    /// The row at `index`, rejecting indices beyond the grid limit.
    pub fn row(&mut self, index: usize) -> Result<&mut Row, OdsError> {
        if index >= MAX_ROW_COUNT {
            return Err(OdsError::RowIndexOutOfRange(index, MAX_ROW_COUNT));
        }
        Ok(self.row_secure(index))
    }

    /// The row addressed by a position string like `"C7"`.
    pub fn row_at(&mut self, position: &str) -> Result<&mut Row, OdsError> {
        let pos = parse_position(position)?;
        self.row(pos.row)
    }

    /// Advance the sequential cursor and return the next row, supporting
    /// append-style construction without explicit indices.
    pub fn next_row(&mut self) -> &mut Row {
        let index = self.next_row_index;
        self.next_row_index += 1;
        self.row_secure(index)
    }

    /// A cell cursor over the row at `index`.
    pub fn cell_walker(&mut self, index: usize) -> Result<CellWalker<'_>, OdsError> {
        if index >= MAX_ROW_COUNT {
            return Err(OdsError::RowIndexOutOfRange(index, MAX_ROW_COUNT));
        }
        Ok(CellWalker::new(self.row_secure(index)))
    }

    pub fn set_style(&mut self, style: &TableStyle) {
        self.styles_container.borrow_mut().add_table_style(style);
        self.style_name = style.name().to_string();
    }

    pub fn set_column_style(&mut self, col: usize, style: &ColumnStyle) -> Result<(), OdsError> {
        if col >= MAX_COLUMN_COUNT {
            return Err(OdsError::ColumnIndexOutOfRange(col, MAX_COLUMN_COUNT));
        }
        self.styles_container.borrow_mut().add_column_style(style);
        self.column_styles.set(col, Some(style.name().to_string()));
        Ok(())
    }

    /// Merge `rows_spanned` x `columns_spanned` cells anchored at
    /// (`row`, `col`). Span counts of 0 or 1 mean "no merge" in that
    /// direction; the interior of the rectangle is marked covered so the
    /// serializer suppresses it.
    pub fn set_cell_merge(
        &mut self,
        row: usize,
        col: usize,
        rows_spanned: u32,
        columns_spanned: u32,
    ) -> Result<(), OdsError> {
        if row >= MAX_ROW_COUNT {
            return Err(OdsError::RowIndexOutOfRange(row, MAX_ROW_COUNT));
        }
        if col >= MAX_COLUMN_COUNT {
            return Err(OdsError::ColumnIndexOutOfRange(col, MAX_COLUMN_COUNT));
        }
        if rows_spanned <= 1 && columns_spanned <= 1 {
            return Ok(());
        }

        let anchor = self.row_secure(row);
        if anchor.is_covered(col) {
            return Ok(());
        }
        anchor.set_spans(col, rows_spanned, columns_spanned);

        let width = columns_spanned.max(1) as usize;
        for r in 1..rows_spanned as usize {
            self.row_secure(row + r).set_covered(col, width);
        }
        Ok(())
    }

    /// As [`Table::set_cell_merge`], anchored at a position string.
    pub fn set_cell_merge_at(
        &mut self,
        position: &str,
        rows_spanned: u32,
        columns_spanned: u32,
    ) -> Result<(), OdsError> {
        let pos = parse_position(position)?;
        self.set_cell_merge(pos.row, pos.column, rows_spanned, columns_spanned)
    }

    /// Number of rows up to and including the last materialized one.
    pub fn used_rows(&self) -> usize {
        self.rows.used_size()
    }

    /// Table-wide column high-water mark over all materialized rows.
    pub fn used_columns(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(Row::used_columns)
            .max()
            .unwrap_or(0)
    }

    /// Number of cells holding a value, across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().flatten().map(Row::cell_count).sum()
    }

    /// Emit the whole `<table:table>` block into `content.xml`.
    pub(crate) fn append_content_xml(&self, registry: &StyleRegistry, xml: &mut String) {
        xml.push_str("<table:table");
        append_attribute(xml, "table:name", &self.name);
        append_attribute(xml, "table:style-name", &self.style_name);
        append_raw_attribute(xml, "table:print", "false");
        xml.push('>');
        xml.push_str(
            "<office:forms form:automatic-focus=\"false\" form:apply-design-mode=\"false\"/>",
        );
        self.append_columns(registry, xml);
        self.append_rows(xml);
        xml.push_str("</table:table>");
    }

    /// Column blocks: runs of value-equal consecutive styles collapse into
    /// one element with a repeat count, terminated by a default column so
    /// readers treat the rest of the grid as default.
    fn append_columns(&self, registry: &StyleRegistry, xml: &mut String) {
        let mut runs: Vec<(&str, usize)> = Vec::new();
        for col in 0..self.column_styles.used_size() {
            let name = self.column_styles.get(col).as_deref().unwrap_or("co1");
            match runs.last_mut() {
                Some((last, count)) if *last == name => *count += 1,
                _ => runs.push((name, 1)),
            }
        }
        for (name, count) in runs {
            let default_cell = registry
                .column_style(name)
                .map(ColumnStyle::default_cell_style_name)
                .unwrap_or("Default");
            Self::append_column_block(xml, name, count, default_cell);
        }
        Self::append_column_block(xml, "co1", 1, "Default");
    }

    fn append_column_block(xml: &mut String, style: &str, count: usize, default_cell: &str) {
        xml.push_str("<table:table-column");
        append_attribute(xml, "table:style-name", style);
        if count > 1 {
            append_int_attribute(xml, "table:number-columns-repeated", count as i64);
        }
        append_attribute(xml, "table:default-cell-style-name", default_cell);
        xml.push_str("/>");
    }

    /// Row blocks: absent and blank rows are run-length encoded into a
    /// single repeated empty row, sized by the table-wide column count.
    fn append_rows(&self, xml: &mut String) {
        let mut null_rows = 0usize;
        let last_col = self.used_columns().max(1);
        for index in 0..self.rows.used_size() {
            match self.rows.get(index) {
                Some(row) if !row.is_blank() => {
                    Self::flush_repeated_rows(xml, &mut null_rows, last_col);
                    row.append_xml(xml);
                }
                _ => null_rows += 1,
            }
        }
        Self::flush_repeated_rows(xml, &mut null_rows, last_col);
    }

    fn flush_repeated_rows(xml: &mut String, null_rows: &mut usize, last_col: usize) {
        if *null_rows == 0 {
            return;
        }
        xml.push_str("<table:table-row");
        if *null_rows > 1 {
            append_int_attribute(xml, "table:number-rows-repeated", *null_rows as i64);
        }
        append_raw_attribute(xml, "table:style-name", "ro1");
        xml.push_str("><table:table-cell");
        if last_col > 1 {
            append_int_attribute(xml, "table:number-columns-repeated", last_col as i64);
        }
        xml.push_str("/></table:table-row>");
        *null_rows = 0;
    }

    /// The `config:config-item-map-entry` for this table in `settings.xml`.
    pub(crate) fn append_settings_xml(&self, xml: &mut String) {
        xml.push_str("<config:config-item-map-entry");
        append_attribute(xml, "config:name", &self.name);
        xml.push('>');
        append_config_item(xml, "CursorPositionX", "int", &self.config.cursor_x.to_string());
        append_config_item(xml, "CursorPositionY", "int", &self.config.cursor_y.to_string());
        append_config_item(xml, "HorizontalSplitMode", "short", "0");
        append_config_item(xml, "VerticalSplitMode", "short", "0");
        append_config_item(
            xml,
            "HorizontalSplitPosition",
            "int",
            &self.config.horizontal_split_position.to_string(),
        );
        append_config_item(
            xml,
            "VerticalSplitPosition",
            "int",
            &self.config.vertical_split_position.to_string(),
        );
        append_config_item(xml, "ActiveSplitRange", "short", "2");
        append_config_item(xml, "PositionLeft", "int", "0");
        append_config_item(xml, "PositionRight", "int", "0");
        append_config_item(xml, "PositionTop", "int", "0");
        append_config_item(xml, "PositionBottom", "int", "0");
        append_config_item(xml, "ZoomType", "short", "0");
        append_config_item(xml, "ZoomValue", "int", &self.config.zoom.to_string());
        append_config_item(
            xml,
            "PageViewZoomValue",
            "int",
            &self.config.page_view_zoom.to_string(),
        );
        xml.push_str("</config:config-item-map-entry>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_table(name: &str) -> Table {
        Table::new(
            name,
            Rc::new(RefCell::new(StyleRegistry::new())),
            Rc::new(DataStyleSet::new()),
        )
    }

    fn content_xml(table: &Table) -> String {
        let mut xml = String::new();
        table.append_content_xml(&StyleRegistry::new(), &mut xml);
        xml
    }

    #[test]
    fn absent_rows_are_run_length_encoded() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.row(2)?.set_text(0, "a");
        table.row(5)?.set_text(0, "b");

        let xml = content_xml(&table);
        // rows 0-1 and 3-4 each collapse into one repeated block
        assert_eq!(xml.matches("table:number-rows-repeated=\"2\"").count(), 2);
        assert_eq!(xml.matches("<table:table-row").count(), 4);
        Ok(())
    }

    #[test]
    fn single_absent_row_has_no_repeat_attribute() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.row(1)?.set_text(0, "x");
        let xml = content_xml(&table);
        assert!(!xml.contains("table:number-rows-repeated"));
        assert_eq!(xml.matches("<table:table-row").count(), 2);
        Ok(())
    }

    #[test]
    fn blank_rows_fold_into_repeated_blocks() -> anyhow::Result<()> {
        // five rows, only the middle one holds data
        let mut table = empty_table("T");
        for i in 0..5 {
            let row = table.next_row();
            if i == 2 {
                row.set_text(0, "row_a");
            }
        }
        let xml = content_xml(&table);
        // three row blocks total: repeat 2, the data row, repeat 2
        assert_eq!(xml.matches("<table:table-row").count(), 3);
        assert_eq!(xml.matches("table:number-rows-repeated=\"2\"").count(), 2);
        let data_row = xml.find("row_a");
        let trailing = xml.rfind("table:number-rows-repeated");
        assert!(data_row < trailing);
        Ok(())
    }

    #[test]
    fn touched_but_blank_tail_row_is_not_dropped() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.row(0)?.set_text(0, "x");
        table.row_secure(9);
        let xml = content_xml(&table);
        // one data row plus one repeated block covering rows 1-9
        assert_eq!(xml.matches("<table:table-row").count(), 2);
        assert!(xml.contains("table:number-rows-repeated=\"9\""));
        Ok(())
    }

    #[test]
    fn repeated_empty_row_spans_table_width() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.row(0)?.set_text(4, "wide");
        table.row(3)?.set_text(0, "low");
        let xml = content_xml(&table);
        assert!(xml.contains(
            "table:number-rows-repeated=\"2\" table:style-name=\"ro1\">\
             <table:table-cell table:number-columns-repeated=\"5\"/>"
        ));
        Ok(())
    }

    #[test]
    fn column_styles_collapse_into_runs() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        let wide = ColumnStyle::new("wide", "5cm");
        table.set_column_style(0, &wide)?;
        table.set_column_style(1, &wide)?;
        table.set_column_style(2, &ColumnStyle::new("narrow", "1cm"))?;
        table.row(0)?.set_text(0, "x");

        let registry = table.styles_container.borrow();
        let mut xml = String::new();
        table.append_content_xml(&registry, &mut xml);
        assert!(xml.contains(
            "<table:table-column table:style-name=\"wide\" \
             table:number-columns-repeated=\"2\" table:default-cell-style-name=\"Default\"/>"
        ));
        assert!(xml.contains("table:style-name=\"narrow\""));
        // the terminating default column is always present
        assert!(xml.contains(
            "<table:table-column table:style-name=\"co1\" \
             table:default-cell-style-name=\"Default\"/>"
        ));
        Ok(())
    }

    #[test]
    fn gap_in_column_styles_uses_default_run() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.set_column_style(2, &ColumnStyle::new("narrow", "1cm"))?;
        let registry = table.styles_container.borrow();
        let mut xml = String::new();
        table.append_content_xml(&registry, &mut xml);
        assert!(xml.contains(
            "<table:table-column table:style-name=\"co1\" \
             table:number-columns-repeated=\"2\" table:default-cell-style-name=\"Default\"/>"
        ));
        Ok(())
    }

    #[test]
    fn merge_marks_covered_rows_below() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.row(0)?.set_text(0, "anchor");
        table.set_cell_merge(0, 0, 2, 2)?;

        assert_eq!(table.row(0)?.columns_spanned(0), 2);
        assert_eq!(table.row(0)?.columns_spanned(1), -1);
        assert!(table.row(1)?.is_covered(0));
        assert!(table.row(1)?.is_covered(1));
        assert!(!table.row(1)?.is_covered(2));
        Ok(())
    }

    #[test]
    fn merge_with_unit_spans_is_a_no_op() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.set_cell_merge(3, 3, 1, 1)?;
        table.set_cell_merge(3, 3, 0, 0)?;
        assert_eq!(table.used_rows(), 0);
        Ok(())
    }

    #[test]
    fn next_row_appends_sequentially() {
        let mut table = empty_table("T");
        table.next_row().set_text(0, "first");
        table.next_row().set_text(0, "second");
        assert_eq!(table.used_rows(), 2);
        assert_eq!(
            table.row_secure(1).value(0),
            Some(&CellValue::Text("second".to_string()))
        );
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut table = empty_table("T");
        assert!(table.row(MAX_ROW_COUNT).is_err());
        assert!(
            table
                .set_column_style(MAX_COLUMN_COUNT, &ColumnStyle::new("c", "1cm"))
                .is_err()
        );
        assert!(table.row_at("not a position").is_err());
    }

    #[test]
    fn row_at_resolves_position_strings() -> anyhow::Result<()> {
        let mut table = empty_table("T");
        table.row_at("C7")?.set_text(2, "here");
        assert_eq!(
            table.row(6)?.value(2),
            Some(&CellValue::Text("here".to_string()))
        );
        Ok(())
    }
}
