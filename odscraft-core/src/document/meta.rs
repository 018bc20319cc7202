//! `meta.xml`: generator, creator, date and document statistics

use crate::xml::{XML_PROLOG, append_int_attribute, append_text_element};

const META_ROOT: &str = "<office:document-meta \
     xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
     xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
     xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
     xmlns:meta=\"urn:oasis:names:tc:opendocument:xmlns:meta:1.0\" \
     xmlns:ooo=\"http://openoffice.org/2004/office\" office:version=\"1.1\">";

/// Document metadata, snapshotted into `meta.xml` at save time.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    generator: String,
    creator: String,
    date: String,
    editing_cycles: String,
    editing_duration: String,
}

impl DocumentMeta {
    pub fn new() -> Self {
        Self {
            generator: format!("odscraft {}", env!("CARGO_PKG_VERSION")),
            creator: "odscraft".to_string(),
            date: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            editing_cycles: "1".to_string(),
            editing_duration: "PT1M00S".to_string(),
        }
    }

    pub fn set_creator(&mut self, creator: &str) {
        self.creator = creator.to_string();
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub(crate) fn build_xml(&self, table_count: usize, cell_count: usize) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(XML_PROLOG);
        xml.push_str(META_ROOT);
        xml.push_str("<office:meta>");
        append_text_element(&mut xml, "meta:generator", &self.generator);
        append_text_element(&mut xml, "dc:creator", &self.creator);
        append_text_element(&mut xml, "dc:date", &self.date);
        append_text_element(&mut xml, "meta:editing-cycles", &self.editing_cycles);
        append_text_element(&mut xml, "meta:editing-duration", &self.editing_duration);
        xml.push_str("<meta:document-statistic");
        append_int_attribute(&mut xml, "meta:table-count", table_count as i64);
        append_int_attribute(&mut xml, "meta:cell-count", cell_count as i64);
        xml.push_str("/></office:meta></office:document-meta>");
        xml
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new()
    }
}
