//! Low-level XML emission helpers shared by every serializable entity
//!
//! All document parts are written in forward, single-pass order: entities
//! append markup to a growing buffer, no intermediate tree is built.

use quick_xml::escape::escape;

/// The prolog every part of the package starts with.
pub const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Append ` name="value"`, escaping the value.
pub fn append_attribute(xml: &mut String, name: &str, value: &str) {
    xml.push(' ');
    xml.push_str(name);
    xml.push_str("=\"");
    xml.push_str(&escape(value));
    xml.push('"');
}

/// Append ` name="value"` for a value known to need no escaping
/// (style names, numbers, keywords).
pub fn append_raw_attribute(xml: &mut String, name: &str, value: &str) {
    xml.push(' ');
    xml.push_str(name);
    xml.push_str("=\"");
    xml.push_str(value);
    xml.push('"');
}

pub fn append_int_attribute(xml: &mut String, name: &str, value: i64) {
    append_raw_attribute(xml, name, &value.to_string());
}

pub fn append_bool_attribute(xml: &mut String, name: &str, value: bool) {
    append_raw_attribute(xml, name, if value { "true" } else { "false" });
}

/// Append `<tag>content</tag>`, escaping the content.
pub fn append_text_element(xml: &mut String, tag: &str, content: &str) {
    xml.push('<');
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape(content));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push('>');
}

/// Escape text for use in attribute values or element content.
pub fn escape_xml(value: &str) -> String {
    escape(value).into_owned()
}
