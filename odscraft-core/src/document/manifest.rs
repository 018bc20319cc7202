//! `META-INF/manifest.xml`: the fixed package manifest

use crate::xml::XML_PROLOG;

const ENTRIES: &[(&str, &str)] = &[
    ("application/vnd.oasis.opendocument.spreadsheet", "/"),
    ("text/xml", "content.xml"),
    ("text/xml", "styles.xml"),
    ("text/xml", "meta.xml"),
    ("text/xml", "settings.xml"),
    ("application/vnd.sun.xml.ui.configuration", "Configurations2/"),
    ("", "Configurations2/accelerator/current.xml"),
    ("", "Configurations2/floater/"),
    ("", "Configurations2/images/Bitmaps/"),
    ("", "Configurations2/menubar/"),
    ("", "Configurations2/popupmenu/"),
    ("", "Configurations2/progressbar/"),
    ("", "Configurations2/statusbar/"),
    ("", "Configurations2/toolbar/"),
    ("", "Thumbnails/"),
];

pub(crate) fn build_manifest_xml() -> String {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_PROLOG);
    xml.push_str(
        "<manifest:manifest \
         xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\">",
    );
    for (media_type, full_path) in ENTRIES {
        xml.push_str("<manifest:file-entry manifest:media-type=\"");
        xml.push_str(media_type);
        xml.push_str("\" manifest:full-path=\"");
        xml.push_str(full_path);
        xml.push_str("\"/>");
    }
    xml.push_str("</manifest:manifest>");
    xml
}
