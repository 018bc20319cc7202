//! Style objects: cell, column, row, table, page and text styles
//!
//! Styles are immutable once built and registered into the document's
//! [`StyleRegistry`](registry::StyleRegistry) under their name, where the
//! first registration wins. Automatic styles (cell/column/row/table) are
//! emitted into `content.xml`; data styles, page layouts, text styles and
//! master pages into `styles.xml`.

pub mod data;
pub mod page;
pub mod registry;

pub use data::{DataStyle, DataStyleSet, DateFormat};
pub use page::{PageSection, PageStyle, PageStyleBuilder};
pub use registry::StyleRegistry;

use crate::xml::{append_attribute, append_raw_attribute};

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
    Justify,
}

impl TextAlign {
    fn attr_value(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::End => "end",
            TextAlign::Justify => "justify",
        }
    }
}

/// Vertical text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    fn attr_value(self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

/// Which edges of a cell a border applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderPosition {
    All,
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderPosition {
    fn attr_name(self) -> &'static str {
        match self {
            BorderPosition::All => "fo:border",
            BorderPosition::Top => "fo:border-top",
            BorderPosition::Bottom => "fo:border-bottom",
            BorderPosition::Left => "fo:border-left",
            BorderPosition::Right => "fo:border-right",
        }
    }
}

/// A single border line, e.g. `0.1cm solid #000000`.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub position: BorderPosition,
    pub width: String,
    pub color: String,
}

impl Border {
    pub fn new(position: BorderPosition, width: &str, color: &str) -> Self {
        Self {
            position,
            width: width.to_string(),
            color: color.to_string(),
        }
    }

    fn append_xml(&self, xml: &mut String) {
        append_attribute(
            xml,
            self.position.attr_name(),
            &format!("{} solid {}", self.width, self.color),
        );
    }
}

/// Character-level properties shared by cell and text styles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextProperties {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: Option<String>,
    pub font_color: Option<String>,
    pub font_name: Option<String>,
}

impl TextProperties {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn append_xml(&self, xml: &mut String) {
        xml.push_str("<style:text-properties");
        if self.bold {
            append_raw_attribute(xml, "fo:font-weight", "bold");
        }
        if self.italic {
            append_raw_attribute(xml, "fo:font-style", "italic");
        }
        if self.underline {
            append_raw_attribute(xml, "style:text-underline-style", "solid");
            append_raw_attribute(xml, "style:text-underline-color", "font-color");
        }
        if let Some(size) = &self.font_size {
            append_attribute(xml, "fo:font-size", size);
        }
        if let Some(color) = &self.font_color {
            append_attribute(xml, "fo:color", color);
        }
        if let Some(name) = &self.font_name {
            append_attribute(xml, "style:font-name", name);
        }
        xml.push_str("/>");
    }
}

/// A `table-cell` family style. Built once, then registered by name.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    name: String,
    background_color: Option<String>,
    text_align: Option<TextAlign>,
    vertical_align: Option<VerticalAlign>,
    wrap: bool,
    borders: Vec<Border>,
    text: Option<TextProperties>,
    data_style: Option<DataStyle>,
}

impl CellStyle {
    pub fn builder(name: &str) -> CellStyleBuilder {
        CellStyleBuilder {
            style: CellStyle {
                name: name.to_string(),
                background_color: None,
                text_align: None,
                vertical_align: None,
                wrap: false,
                borders: Vec::new(),
                text: None,
                data_style: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_style(&self) -> Option<&DataStyle> {
        self.data_style.as_ref()
    }

    /// The data-style carry-forward rule: a style without a data format
    /// adopts the data format of the style it replaces, so applying "bold"
    /// does not clobber a previously applied currency format.
    pub fn merged_with_data_style_of(&self, previous: &CellStyle) -> CellStyle {
        if self.data_style.is_none() && previous.data_style.is_some() {
            let mut merged = self.clone();
            merged.data_style = previous.data_style.clone();
            merged
        } else {
            self.clone()
        }
    }

    pub(crate) fn append_xml(&self, xml: &mut String) {
        xml.push_str("<style:style");
        append_attribute(xml, "style:name", &self.name);
        append_raw_attribute(xml, "style:family", "table-cell");
        append_raw_attribute(xml, "style:parent-style-name", "Default");
        if let Some(data_style) = &self.data_style {
            append_attribute(xml, "style:data-style-name", data_style.name());
        }
        xml.push_str("><style:table-cell-properties");
        if let Some(color) = &self.background_color {
            append_attribute(xml, "fo:background-color", color);
        }
        if let Some(align) = self.vertical_align {
            append_raw_attribute(xml, "style:vertical-align", align.attr_value());
        }
        for border in &self.borders {
            border.append_xml(xml);
        }
        if self.wrap {
            append_raw_attribute(xml, "fo:wrap-option", "wrap");
        }
        xml.push_str("/>");
        if let Some(text) = &self.text {
            if !text.is_empty() {
                text.append_xml(xml);
            }
        }
        if let Some(align) = self.text_align {
            xml.push_str("<style:paragraph-properties");
            append_raw_attribute(xml, "fo:text-align", align.attr_value());
            append_raw_attribute(xml, "fo:margin-left", "0cm");
            xml.push_str("/>");
        }
        xml.push_str("</style:style>");
    }
}

pub struct CellStyleBuilder {
    style: CellStyle,
}

impl CellStyleBuilder {
    pub fn background_color(mut self, color: &str) -> Self {
        self.style.background_color = Some(color.to_string());
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.style.text_align = Some(align);
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.style.vertical_align = Some(align);
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.style.wrap = wrap;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.style.borders.push(border);
        self
    }

    pub fn text_properties(mut self, text: TextProperties) -> Self {
        self.style.text = Some(text);
        self
    }

    pub fn data_style(mut self, data_style: DataStyle) -> Self {
        self.style.data_style = Some(data_style);
        self
    }

    pub fn build(self) -> CellStyle {
        self.style
    }
}

/// A `table-column` family style: width plus the default cell style the
/// column hands to its cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStyle {
    name: String,
    column_width: String,
    default_cell_style: String,
}

impl ColumnStyle {
    pub fn new(name: &str, column_width: &str) -> Self {
        Self {
            name: name.to_string(),
            column_width: column_width.to_string(),
            default_cell_style: "Default".to_string(),
        }
    }

    pub fn with_default_cell_style(mut self, style: &CellStyle) -> Self {
        self.default_cell_style = style.name().to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_cell_style_name(&self) -> &str {
        &self.default_cell_style
    }

    pub(crate) fn append_xml(&self, xml: &mut String) {
        xml.push_str("<style:style");
        append_attribute(xml, "style:name", &self.name);
        append_raw_attribute(xml, "style:family", "table-column");
        xml.push_str("><style:table-column-properties");
        append_raw_attribute(xml, "fo:break-before", "auto");
        append_attribute(xml, "style:column-width", &self.column_width);
        xml.push_str("/></style:style>");
    }
}

/// A `table-row` family style.
#[derive(Debug, Clone, PartialEq)]
pub struct RowStyle {
    name: String,
    row_height: Option<String>,
}

impl RowStyle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            row_height: None,
        }
    }

    pub fn with_height(mut self, height: &str) -> Self {
        self.row_height = Some(height.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn append_xml(&self, xml: &mut String) {
        xml.push_str("<style:style");
        append_attribute(xml, "style:name", &self.name);
        append_raw_attribute(xml, "style:family", "table-row");
        xml.push_str("><style:table-row-properties");
        if let Some(height) = &self.row_height {
            append_attribute(xml, "style:row-height", height);
        }
        append_raw_attribute(xml, "fo:break-before", "auto");
        append_raw_attribute(xml, "style:use-optimal-row-height", "true");
        xml.push_str("/></style:style>");
    }
}

/// A `table` family style, tied to the default master page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    name: String,
}

impl TableStyle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn append_xml(&self, xml: &mut String) {
        xml.push_str("<style:style");
        append_attribute(xml, "style:name", &self.name);
        append_raw_attribute(xml, "style:family", "table");
        append_raw_attribute(xml, "style:master-page-name", page::DEFAULT_MASTER_PAGE);
        xml.push_str(
            "><style:table-properties table:display=\"true\" \
             style:writing-mode=\"lr-tb\"/></style:style>",
        );
    }
}

/// A named `text` family style, usable from page headers and footers.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    name: String,
    properties: TextProperties,
}

impl TextStyle {
    pub fn new(name: &str, properties: TextProperties) -> Self {
        Self {
            name: name.to_string(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn append_xml(&self, xml: &mut String) {
        xml.push_str("<style:style");
        append_attribute(xml, "style:name", &self.name);
        append_raw_attribute(xml, "style:family", "text");
        xml.push('>');
        self.properties.append_xml(xml);
        xml.push_str("</style:style>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_style_xml_shape() {
        let style = CellStyle::builder("wood")
            .background_color("#CC9900")
            .text_align(TextAlign::Center)
            .build();
        let mut xml = String::new();
        style.append_xml(&mut xml);
        assert!(xml.starts_with("<style:style style:name=\"wood\" style:family=\"table-cell\""));
        assert!(xml.contains("fo:background-color=\"#CC9900\""));
        assert!(xml.contains("fo:text-align=\"center\""));
    }

    #[test]
    fn data_style_carry_forward() {
        let currency = CellStyle::builder("money")
            .data_style(DataStyle::currency("money-data", "$", 2))
            .build();
        let bold = CellStyle::builder("bold")
            .text_properties(TextProperties::bold())
            .build();

        let merged = bold.merged_with_data_style_of(&currency);
        assert_eq!(merged.data_style().map(DataStyle::name), Some("money-data"));

        // an explicit data style is never replaced
        let dated = CellStyle::builder("dated")
            .data_style(DataStyle::date("date-data", DateFormat::IsoDate))
            .build();
        let merged = dated.merged_with_data_style_of(&currency);
        assert_eq!(merged.data_style().map(DataStyle::name), Some("date-data"));
    }
}
