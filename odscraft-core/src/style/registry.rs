//! Style registries: ordered, name-keyed, first registration wins

use std::collections::HashMap;

use crate::style::{
    CellStyle, ColumnStyle, DataStyle, PageStyle, RowStyle, TableStyle, TextStyle,
};

/// An ordered set of named items where the first insertion under a name wins.
///
/// Registering a second item under an existing name is a deliberate no-op,
/// not an error: every cell, row, column and table registers its style on
/// each assignment, and the registry collapses those into one definition.
#[derive(Debug)]
pub struct NamedRegistry<T> {
    index_by_name: HashMap<String, usize>,
    items: Vec<T>,
}

impl<T> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NamedRegistry<T> {
    pub fn new() -> Self {
        Self {
            index_by_name: HashMap::new(),
            items: Vec::new(),
        }
    }

    /// Insert `item` under `name`; returns false (and keeps the existing
    /// item) if the name is already taken.
    pub fn insert(&mut self, name: &str, item: T) -> bool {
        if self.index_by_name.contains_key(name) {
            return false;
        }
        self.index_by_name.insert(name.to_string(), self.items.len());
        self.items.push(item);
        true
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index_by_name.get(name).map(|&i| &self.items[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_by_name.contains_key(name)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// All style families of one document, each deduplicated by name.
///
/// Shared between the document and its tables: any mutation that assigns a
/// style registers it here, and document assembly walks each family exactly
/// once to emit the definitions.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    cell_styles: NamedRegistry<CellStyle>,
    column_styles: NamedRegistry<ColumnStyle>,
    row_styles: NamedRegistry<RowStyle>,
    table_styles: NamedRegistry<TableStyle>,
    page_styles: NamedRegistry<PageStyle>,
    text_styles: NamedRegistry<TextStyle>,
    data_styles: NamedRegistry<DataStyle>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cell_style(&mut self, style: &CellStyle) {
        if let Some(data_style) = style.data_style() {
            self.add_data_style(data_style);
        }
        if !self.cell_styles.insert(style.name(), style.clone()) {
            self.warn_on_conflict(self.cell_styles.get(style.name()) != Some(style), style.name());
        }
    }

    pub fn add_column_style(&mut self, style: &ColumnStyle) {
        if !self.column_styles.insert(style.name(), style.clone()) {
            self.warn_on_conflict(
                self.column_styles.get(style.name()) != Some(style),
                style.name(),
            );
        }
    }

    pub fn add_row_style(&mut self, style: &RowStyle) {
        if !self.row_styles.insert(style.name(), style.clone()) {
            self.warn_on_conflict(self.row_styles.get(style.name()) != Some(style), style.name());
        }
    }

    pub fn add_table_style(&mut self, style: &TableStyle) {
        self.table_styles.insert(style.name(), style.clone());
    }

    pub fn add_page_style(&mut self, style: &PageStyle) {
        self.page_styles.insert(style.name(), style.clone());
    }

    pub fn add_text_style(&mut self, style: &TextStyle) {
        self.text_styles.insert(style.name(), style.clone());
    }

    pub fn add_data_style(&mut self, style: &DataStyle) {
        self.data_styles.insert(style.name(), style.clone());
    }

    pub fn cell_style(&self, name: &str) -> Option<&CellStyle> {
        self.cell_styles.get(name)
    }

    pub fn column_style(&self, name: &str) -> Option<&ColumnStyle> {
        self.column_styles.get(name)
    }

    fn warn_on_conflict(&self, conflicting: bool, name: &str) {
        if conflicting {
            tracing::debug!(style = name, "duplicate style name, first registration kept");
        }
    }

    /// Automatic styles for `content.xml`: table, column, row and cell
    /// definitions, each exactly once, in registration order.
    pub(crate) fn append_content_automatic_styles(&self, xml: &mut String) {
        for style in self.table_styles.iter() {
            style.append_xml(xml);
        }
        for style in self.column_styles.iter() {
            style.append_xml(xml);
        }
        for style in self.row_styles.iter() {
            style.append_xml(xml);
        }
        for style in self.cell_styles.iter() {
            style.append_xml(xml);
        }
    }

    /// `office:styles` content for `styles.xml`: the data styles, plus the
    /// Header/Footer paragraph styles when any page style carries a section.
    pub(crate) fn append_office_styles(&self, xml: &mut String) {
        for style in self.data_styles.iter() {
            style.append_xml(xml);
        }
        let has_header = self.page_styles.iter().any(|p| p.header().is_some());
        let has_footer = self.page_styles.iter().any(|p| p.footer().is_some());
        if has_header {
            Self::append_section_paragraph_style(xml, "Header");
        }
        if has_footer {
            Self::append_section_paragraph_style(xml, "Footer");
        }
    }

    /// Automatic styles for `styles.xml`: page layouts and text styles.
    pub(crate) fn append_styles_automatic_styles(&self, xml: &mut String) {
        for style in self.page_styles.iter() {
            style.append_automatic_xml(xml);
        }
        for style in self.text_styles.iter() {
            if !style.is_empty() {
                style.append_xml(xml);
            }
        }
    }

    /// `office:master-styles` content for `styles.xml`.
    pub(crate) fn append_master_styles(&self, xml: &mut String) {
        for style in self.page_styles.iter() {
            style.append_master_xml(xml);
        }
    }

    fn append_section_paragraph_style(xml: &mut String, name: &str) {
        use crate::xml::append_raw_attribute;
        xml.push_str("<style:style");
        append_raw_attribute(xml, "style:name", name);
        append_raw_attribute(xml, "style:family", "paragraph");
        append_raw_attribute(xml, "style:parent-style-name", "Standard");
        append_raw_attribute(xml, "style:class", "extra");
        xml.push_str(
            "><style:paragraph-properties text:number-lines=\"false\" \
             text:line-number=\"0\"/></style:style>",
        );
    }
}
