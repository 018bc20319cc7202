//! The spreadsheet document: tables, styles and the save pass

pub mod manifest;
pub mod meta;
pub(crate) mod settings;

pub use meta::DocumentMeta;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use std::rc::Rc;

use crate::config::DocumentConfig;
use crate::error::OdsError;
use crate::style::{
    CellStyle, ColumnStyle, DataStyle, DataStyleSet, PageStyle, RowStyle, StyleRegistry,
    TableStyle, TextStyle,
};
use crate::table::Table;
use crate::writer::PackageWriter;
use crate::xml::XML_PROLOG;

/// Maximum number of tables in one document.
pub const MAX_TABLE_COUNT: usize = 256;

const CONTENT_ROOT: &str = "<office:document-content \
     xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
     xmlns:style=\"urn:oasis:names:tc:opendocument:xmlns:style:1.0\" \
     xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\" \
     xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\" \
     xmlns:draw=\"urn:oasis:names:tc:opendocument:xmlns:drawing:1.0\" \
     xmlns:fo=\"urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0\" \
     xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
     xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
     xmlns:meta=\"urn:oasis:names:tc:opendocument:xmlns:meta:1.0\" \
     xmlns:number=\"urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0\" \
     xmlns:svg=\"urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0\" \
     xmlns:form=\"urn:oasis:names:tc:opendocument:xmlns:form:1.0\" \
     xmlns:script=\"urn:oasis:names:tc:opendocument:xmlns:script:1.0\" \
     xmlns:ooo=\"http://openoffice.org/2004/office\" \
     xmlns:oooc=\"http://openoffice.org/2004/calc\" office:version=\"1.1\">";

const STYLES_ROOT: &str = "<office:document-styles \
     xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
     xmlns:style=\"urn:oasis:names:tc:opendocument:xmlns:style:1.0\" \
     xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\" \
     xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\" \
     xmlns:fo=\"urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0\" \
     xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
     xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
     xmlns:meta=\"urn:oasis:names:tc:opendocument:xmlns:meta:1.0\" \
     xmlns:number=\"urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0\" \
     xmlns:svg=\"urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0\" \
     xmlns:ooo=\"http://openoffice.org/2004/office\" office:version=\"1.1\">";

const FONT_FACE_DECLS: &str = "<office:font-face-decls>\
     <style:font-face style:name=\"Arial\" svg:font-family=\"Arial\" \
     style:font-family-generic=\"swiss\" style:font-pitch=\"variable\"/>\
     <style:font-face style:name=\"Lucida Sans Unicode\" \
     svg:font-family=\"&apos;Lucida Sans Unicode&apos;\" \
     style:font-family-generic=\"system\" style:font-pitch=\"variable\"/>\
     <style:font-face style:name=\"Tahoma\" svg:font-family=\"Tahoma\" \
     style:font-family-generic=\"system\" style:font-pitch=\"variable\"/>\
     </office:font-face-decls>";

/// An in-memory spreadsheet document under construction.
///
/// Build tables and cells incrementally, then call [`OdsDocument::save`] or
/// [`OdsDocument::save_to`] once; saving consumes the document, because part
/// of its state (active table, view settings) is finalized during the pass.
/// Table names are matched case-sensitively everywhere.
#[derive(Debug)]
pub struct OdsDocument {
    tables: Vec<Table>,
    table_index_by_name: HashMap<String, usize>,
    styles: Rc<RefCell<StyleRegistry>>,
    data_styles: Rc<DataStyleSet>,
    meta: DocumentMeta,
    active_table: Option<String>,
    show_grid: bool,
    default_zoom: i64,
}

impl OdsDocument {
    pub fn new() -> Self {
        Self::with_config(&DocumentConfig::default())
    }

    pub fn with_config(config: &DocumentConfig) -> Self {
        let mut registry = StyleRegistry::new();
        registry.add_table_style(&TableStyle::new("ta1"));
        registry.add_row_style(&RowStyle::new("ro1"));
        registry.add_column_style(&ColumnStyle::new("co1", "2.5cm"));
        registry.add_cell_style(&CellStyle::builder("Default").build());
        registry.add_page_style(&PageStyle::builder("Mpm1").build());

        let mut meta = DocumentMeta::new();
        if let Some(creator) = &config.creator {
            meta.set_creator(creator);
        }

        Self {
            tables: Vec::new(),
            table_index_by_name: HashMap::new(),
            styles: Rc::new(RefCell::new(registry)),
            data_styles: Rc::new(DataStyleSet::new()),
            meta,
            active_table: config.active_table.clone(),
            show_grid: config.show_grid,
            default_zoom: config.zoom,
        }
    }

    /// Add a table, or return the existing one under that name. The first
    /// table added becomes the active table unless the configuration or
    /// [`OdsDocument::set_active_table`] pinned one.
    pub fn add_table(&mut self, name: &str) -> Result<&mut Table, OdsError> {
        if let Some(&index) = self.table_index_by_name.get(name) {
            return Ok(&mut self.tables[index]);
        }
        if self.tables.len() >= MAX_TABLE_COUNT {
            return Err(OdsError::TableLimit(MAX_TABLE_COUNT));
        }

        let mut table = Table::new(name, Rc::clone(&self.styles), Rc::clone(&self.data_styles));
        table.config_mut().zoom = self.default_zoom;

        let index = self.tables.len();
        self.table_index_by_name.insert(name.to_string(), index);
        self.tables.push(table);
        if self.active_table.is_none() {
            self.active_table = Some(name.to_string());
        }
        Ok(&mut self.tables[index])
    }

    /// Look up a table by name (case-sensitive).
    pub fn table(&mut self, name: &str) -> Option<&mut Table> {
        self.table_index_by_name
            .get(name)
            .copied()
            .map(move |index| &mut self.tables[index])
    }

    pub fn table_at(&mut self, index: usize) -> Result<&mut Table, OdsError> {
        if index >= self.tables.len() {
            return Err(OdsError::BadTableIndex(index));
        }
        Ok(&mut self.tables[index])
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(Table::name).collect()
    }

    /// Choose the table shown when the file is opened.
    pub fn set_active_table(&mut self, name: &str) -> Result<(), OdsError> {
        if !self.table_index_by_name.contains_key(name) {
            return Err(OdsError::UnknownTable(name.to_string()));
        }
        self.active_table = Some(name.to_string());
        Ok(())
    }

    pub fn set_creator(&mut self, creator: &str) {
        self.meta.set_creator(creator);
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    pub fn add_cell_style(&mut self, style: &CellStyle) {
        self.styles.borrow_mut().add_cell_style(style);
    }

    pub fn add_row_style(&mut self, style: &RowStyle) {
        self.styles.borrow_mut().add_row_style(style);
    }

    pub fn add_column_style(&mut self, style: &ColumnStyle) {
        self.styles.borrow_mut().add_column_style(style);
    }

    pub fn add_page_style(&mut self, style: &PageStyle) {
        self.styles.borrow_mut().add_page_style(style);
    }

    pub fn add_text_style(&mut self, style: &TextStyle) {
        self.styles.borrow_mut().add_text_style(style);
    }

    pub fn add_data_style(&mut self, style: &DataStyle) {
        self.styles.borrow_mut().add_data_style(style);
    }

    /// Save to a file path. Consumes the document; a failed save may leave a
    /// partially written file, so callers needing atomicity should write to a
    /// temporary path and rename.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), OdsError> {
        let file = File::create(path)?;
        self.save_to(BufWriter::new(file))
    }

    /// Serialize the whole document into `sink` in a single forward pass.
    pub fn save_to<W: Write + Seek>(self, sink: W) -> Result<(), OdsError> {
        let mut writer = PackageWriter::new(sink);
        let result = self.write_package(&mut writer);
        // release container resources before propagating any failure
        let finished = writer.finish();
        if let Err(error) = result {
            tracing::error!(%error, "saving the document failed");
            return Err(error);
        }
        finished?;
        tracing::info!(tables = self.tables.len(), "document saved");
        Ok(())
    }

    fn write_package<W: Write + Seek>(
        &self,
        writer: &mut PackageWriter<W>,
    ) -> Result<(), OdsError> {
        writer.write_mimetype()?;
        writer.write_part("META-INF/manifest.xml", &manifest::build_manifest_xml())?;
        writer.write_part("content.xml", &self.content_xml())?;
        writer.write_part("styles.xml", &self.styles_xml())?;
        writer.write_part("meta.xml", &self.meta_xml())?;
        writer.write_part("settings.xml", &self.settings_xml())?;
        writer.write_support_entries()
    }

    pub(crate) fn content_xml(&self) -> String {
        let registry = self.styles.borrow();
        let mut xml = String::with_capacity(8192);
        xml.push_str(XML_PROLOG);
        xml.push_str(CONTENT_ROOT);
        xml.push_str("<office:scripts/>");
        xml.push_str(FONT_FACE_DECLS);
        xml.push_str("<office:automatic-styles>");
        registry.append_content_automatic_styles(&mut xml);
        xml.push_str("</office:automatic-styles>");
        xml.push_str("<office:body><office:spreadsheet>");
        for table in &self.tables {
            table.append_content_xml(&registry, &mut xml);
        }
        xml.push_str("</office:spreadsheet></office:body></office:document-content>");
        xml
    }

    pub(crate) fn styles_xml(&self) -> String {
        let registry = self.styles.borrow();
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_PROLOG);
        xml.push_str(STYLES_ROOT);
        xml.push_str(FONT_FACE_DECLS);
        xml.push_str("<office:styles>");
        registry.append_office_styles(&mut xml);
        xml.push_str("</office:styles>");
        xml.push_str("<office:automatic-styles>");
        registry.append_styles_automatic_styles(&mut xml);
        xml.push_str("</office:automatic-styles>");
        xml.push_str("<office:master-styles>");
        registry.append_master_styles(&mut xml);
        xml.push_str("</office:master-styles>");
        xml.push_str("</office:document-styles>");
        xml
    }

    fn meta_xml(&self) -> String {
        let cell_count = self.tables.iter().map(Table::cell_count).sum();
        self.meta.build_xml(self.tables.len(), cell_count)
    }

    fn settings_xml(&self) -> String {
        let active = self
            .active_table
            .as_deref()
            .or_else(|| self.tables.first().map(Table::name))
            .unwrap_or("");
        settings::build_settings_xml(&self.tables, active, self.show_grid)
    }
}

impl Default for OdsDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_table_returns_existing_table_for_same_name() -> anyhow::Result<()> {
        let mut doc = OdsDocument::new();
        doc.add_table("Sheet1")?.row(0)?.set_text(0, "kept");
        doc.add_table("Sheet1")?;
        assert_eq!(doc.table_count(), 1);
        // lookup is case-sensitive: a different casing is a different table
        doc.add_table("sheet1")?;
        assert_eq!(doc.table_count(), 2);
        assert!(doc.table("SHEET1").is_none());
        Ok(())
    }

    #[test]
    fn active_table_defaults_to_first_added() -> anyhow::Result<()> {
        let mut doc = OdsDocument::new();
        doc.add_table("One")?;
        doc.add_table("Two")?;
        let settings = doc.settings_xml();
        assert!(settings.contains(
            "<config:config-item config:name=\"ActiveTable\" \
             config:type=\"string\">One</config:config-item>"
        ));
        Ok(())
    }

    #[test]
    fn set_active_table_rejects_unknown_names() -> anyhow::Result<()> {
        let mut doc = OdsDocument::new();
        doc.add_table("One")?;
        assert!(doc.set_active_table("Two").is_err());
        doc.set_active_table("One")?;
        Ok(())
    }

    #[test]
    fn content_has_fixed_top_level_shape() -> anyhow::Result<()> {
        let mut doc = OdsDocument::new();
        doc.add_table("Sheet1")?;
        let content = doc.content_xml();
        assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let scripts = content.find("<office:scripts/>");
        let fonts = content.find("<office:font-face-decls>");
        let automatic = content.find("<office:automatic-styles>");
        let body = content.find("<office:body>");
        assert!(scripts < fonts && fonts < automatic && automatic < body);
        assert_eq!(content.matches("<style:font-face ").count(), 3);
        Ok(())
    }

    #[test]
    fn styles_part_order_is_fixed() {
        let doc = OdsDocument::new();
        let styles = doc.styles_xml();
        let office_styles = styles.find("<office:styles>");
        let automatic = styles.find("<office:automatic-styles>");
        let master = styles.find("<office:master-styles>");
        assert!(office_styles < automatic && automatic < master);
        assert!(styles.contains("<style:master-page"));
    }

    #[test]
    fn table_limit_is_enforced() -> anyhow::Result<()> {
        let mut doc = OdsDocument::new();
        for i in 0..MAX_TABLE_COUNT {
            doc.add_table(&format!("T{i}"))?;
        }
        assert!(matches!(
            doc.add_table("overflow"),
            Err(OdsError::TableLimit(_))
        ));
        Ok(())
    }
}
