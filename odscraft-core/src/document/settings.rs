//! `settings.xml`: view settings and per-table config-item maps

use crate::table::Table;
use crate::xml::{XML_PROLOG, append_attribute, escape_xml};

const SETTINGS_ROOT: &str = "<office:document-settings \
     xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
     xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
     xmlns:config=\"urn:oasis:names:tc:opendocument:xmlns:config:1.0\" \
     xmlns:ooo=\"http://openoffice.org/2004/office\" office:version=\"1.1\">";

/// Append one `<config:config-item>` element.
pub(crate) fn append_config_item(xml: &mut String, name: &str, item_type: &str, value: &str) {
    xml.push_str("<config:config-item");
    append_attribute(xml, "config:name", name);
    append_attribute(xml, "config:type", item_type);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</config:config-item>");
}

/// Build the whole settings part. The active table and grid visibility are
/// snapshots of the document state at save time.
pub(crate) fn build_settings_xml(tables: &[Table], active_table: &str, show_grid: bool) -> String {
    let grid = if show_grid { "true" } else { "false" };
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_PROLOG);
    xml.push_str(SETTINGS_ROOT);
    xml.push_str("<office:settings>");

    xml.push_str("<config:config-item-set config:name=\"ooo:view-settings\">");
    append_config_item(&mut xml, "VisibleAreaTop", "int", "0");
    append_config_item(&mut xml, "VisibleAreaLeft", "int", "0");
    append_config_item(&mut xml, "VisibleAreaWidth", "int", "680");
    append_config_item(&mut xml, "VisibleAreaHeight", "int", "400");
    xml.push_str("<config:config-item-map-indexed config:name=\"Views\">");
    xml.push_str("<config:config-item-map-entry>");
    append_config_item(&mut xml, "ViewId", "string", "View1");

    xml.push_str("<config:config-item-map-named config:name=\"Tables\">");
    for table in tables {
        table.append_settings_xml(&mut xml);
    }
    xml.push_str("</config:config-item-map-named>");

    append_config_item(&mut xml, "ActiveTable", "string", active_table);
    append_config_item(&mut xml, "HorizontalScrollbarWidth", "int", "270");
    append_config_item(&mut xml, "ZoomType", "short", "0");
    append_config_item(&mut xml, "ZoomValue", "int", "100");
    append_config_item(&mut xml, "PageViewZoomValue", "int", "60");
    append_config_item(&mut xml, "ShowPageBreakPreview", "boolean", "false");
    append_config_item(&mut xml, "ShowZeroValues", "boolean", "true");
    append_config_item(&mut xml, "ShowNotes", "boolean", "true");
    append_config_item(&mut xml, "ShowGrid", "boolean", grid);
    append_config_item(&mut xml, "GridColor", "long", "12632256");
    append_config_item(&mut xml, "ShowPageBreaks", "boolean", "true");
    append_config_item(&mut xml, "HasColumnRowHeaders", "boolean", "true");
    append_config_item(&mut xml, "IsOutlineSymbolsSet", "boolean", "true");
    append_config_item(&mut xml, "HasSheetTabs", "boolean", "true");
    append_config_item(&mut xml, "IsSnapToRaster", "boolean", "false");
    append_config_item(&mut xml, "RasterIsVisible", "boolean", "false");
    append_config_item(&mut xml, "RasterResolutionX", "int", "1000");
    append_config_item(&mut xml, "RasterResolutionY", "int", "1000");
    append_config_item(&mut xml, "RasterSubdivisionX", "int", "1");
    append_config_item(&mut xml, "RasterSubdivisionY", "int", "1");
    append_config_item(&mut xml, "IsRasterAxisSynchronized", "boolean", "true");
    xml.push_str("</config:config-item-map-entry>");
    xml.push_str("</config:config-item-map-indexed>");
    xml.push_str("</config:config-item-set>");

    xml.push_str("<config:config-item-set config:name=\"ooo:configuration-settings\">");
    append_config_item(&mut xml, "ShowZeroValues", "boolean", "true");
    append_config_item(&mut xml, "ShowNotes", "boolean", "true");
    append_config_item(&mut xml, "ShowGrid", "boolean", grid);
    append_config_item(&mut xml, "GridColor", "long", "12632256");
    append_config_item(&mut xml, "ShowPageBreaks", "boolean", "true");
    append_config_item(&mut xml, "LinkUpdateMode", "short", "3");
    append_config_item(&mut xml, "HasColumnRowHeaders", "boolean", "true");
    append_config_item(&mut xml, "HasSheetTabs", "boolean", "true");
    append_config_item(&mut xml, "IsOutlineSymbolsSet", "boolean", "true");
    append_config_item(&mut xml, "IsSnapToRaster", "boolean", "false");
    append_config_item(&mut xml, "RasterIsVisible", "boolean", "false");
    append_config_item(&mut xml, "RasterResolutionX", "int", "1000");
    append_config_item(&mut xml, "RasterResolutionY", "int", "1000");
    append_config_item(&mut xml, "RasterSubdivisionX", "int", "1");
    append_config_item(&mut xml, "RasterSubdivisionY", "int", "1");
    append_config_item(&mut xml, "IsRasterAxisSynchronized", "boolean", "true");
    append_config_item(&mut xml, "AutoCalculate", "boolean", "true");
    append_config_item(&mut xml, "PrinterName", "string", "");
    append_config_item(&mut xml, "PrinterSetup", "base64Binary", "");
    append_config_item(&mut xml, "ApplyUserData", "boolean", "true");
    append_config_item(&mut xml, "CharacterCompressionType", "short", "0");
    append_config_item(&mut xml, "IsKernAsianPunctuation", "boolean", "false");
    append_config_item(&mut xml, "SaveVersionOnClose", "boolean", "false");
    append_config_item(&mut xml, "UpdateFromTemplate", "boolean", "true");
    append_config_item(&mut xml, "AllowPrintJobCancel", "boolean", "true");
    append_config_item(&mut xml, "LoadReadonly", "boolean", "false");
    xml.push_str("</config:config-item-set>");

    xml.push_str("</office:settings></office:document-settings>");
    xml
}
