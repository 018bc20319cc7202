//! Page styles: page layouts, master pages and header/footer sections

use crate::xml::{append_attribute, append_raw_attribute, escape_xml};

/// The master page every table style points at.
pub(crate) const DEFAULT_MASTER_PAGE: &str = "DefaultMasterPage";

/// A page header or footer: a minimum height plus up to three text regions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSection {
    min_height: String,
    margin: String,
    left: Option<String>,
    center: Option<String>,
    right: Option<String>,
    text_style: Option<String>,
}

impl PageSection {
    pub fn new() -> Self {
        Self {
            min_height: "0cm".to_string(),
            margin: "0cm".to_string(),
            ..Self::default()
        }
    }

    pub fn with_center(mut self, text: &str) -> Self {
        self.center = Some(text.to_string());
        self
    }

    pub fn with_left(mut self, text: &str) -> Self {
        self.left = Some(text.to_string());
        self
    }

    pub fn with_right(mut self, text: &str) -> Self {
        self.right = Some(text.to_string());
        self
    }

    pub fn with_min_height(mut self, height: &str) -> Self {
        self.min_height = height.to_string();
        self
    }

    /// Render the region text through a named text style.
    pub fn with_text_style(mut self, style: &super::TextStyle) -> Self {
        self.text_style = Some(style.name().to_string());
        self
    }

    fn append_paragraph(&self, xml: &mut String, text: &str) {
        xml.push_str("<text:p>");
        if let Some(style) = &self.text_style {
            xml.push_str("<text:span");
            append_attribute(xml, "text:style-name", style);
            xml.push('>');
            xml.push_str(&escape_xml(text));
            xml.push_str("</text:span>");
        } else {
            xml.push_str(&escape_xml(text));
        }
        xml.push_str("</text:p>");
    }

    /// The `style:header-style`/`style:footer-style` block of a page layout.
    pub(crate) fn append_layout_xml(&self, xml: &mut String, tag: &str) {
        xml.push('<');
        xml.push_str(tag);
        xml.push_str("><style:header-footer-properties");
        append_attribute(xml, "fo:min-height", &self.min_height);
        append_attribute(xml, "fo:margin-left", &self.margin);
        append_attribute(xml, "fo:margin-right", &self.margin);
        append_attribute(xml, "fo:margin-bottom", "0cm");
        xml.push_str("/></");
        xml.push_str(tag);
        xml.push('>');
    }

    /// The region content inside `style:header`/`style:footer` of the
    /// master page.
    pub(crate) fn append_master_xml(&self, xml: &mut String) {
        if self.left.is_none() && self.right.is_none() {
            self.append_paragraph(xml, self.center.as_deref().unwrap_or(""));
            return;
        }
        xml.push_str("<style:region-left>");
        self.append_paragraph(xml, self.left.as_deref().unwrap_or(""));
        xml.push_str("</style:region-left><style:region-center>");
        self.append_paragraph(xml, self.center.as_deref().unwrap_or(""));
        xml.push_str("</style:region-center><style:region-right>");
        self.append_paragraph(xml, self.right.as_deref().unwrap_or(""));
        xml.push_str("</style:region-right>");
    }
}

/// A page style: one `style:page-layout` in the automatic styles and one
/// `style:master-page` in the master styles of `styles.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStyle {
    name: String,
    page_width: String,
    page_height: String,
    num_format: String,
    landscape: bool,
    background_color: Option<String>,
    margin_top: String,
    margin_bottom: String,
    margin_left: String,
    margin_right: String,
    header: Option<PageSection>,
    footer: Option<PageSection>,
}

impl PageStyle {
    pub fn builder(name: &str) -> PageStyleBuilder {
        PageStyleBuilder {
            style: PageStyle {
                name: name.to_string(),
                page_width: "21.0cm".to_string(),
                page_height: "29.7cm".to_string(),
                num_format: "1".to_string(),
                landscape: false,
                background_color: None,
                margin_top: "1.5cm".to_string(),
                margin_bottom: "1.5cm".to_string(),
                margin_left: "1.5cm".to_string(),
                margin_right: "1.5cm".to_string(),
                header: None,
                footer: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> Option<&PageSection> {
        self.header.as_ref()
    }

    pub fn footer(&self) -> Option<&PageSection> {
        self.footer.as_ref()
    }

    pub(crate) fn append_automatic_xml(&self, xml: &mut String) {
        xml.push_str("<style:page-layout");
        append_attribute(xml, "style:name", &self.name);
        xml.push_str("><style:page-layout-properties");
        append_attribute(xml, "fo:page-width", &self.page_width);
        append_attribute(xml, "fo:page-height", &self.page_height);
        append_attribute(xml, "style:num-format", &self.num_format);
        append_raw_attribute(xml, "style:writing-mode", "lr-tb");
        append_raw_attribute(
            xml,
            "style:print-orientation",
            if self.landscape { "landscape" } else { "portrait" },
        );
        if let Some(color) = &self.background_color {
            append_attribute(xml, "fo:background-color", color);
        }
        append_attribute(xml, "fo:margin-top", &self.margin_top);
        append_attribute(xml, "fo:margin-bottom", &self.margin_bottom);
        append_attribute(xml, "fo:margin-left", &self.margin_left);
        append_attribute(xml, "fo:margin-right", &self.margin_right);
        xml.push_str("/>");
        match &self.header {
            Some(header) => header.append_layout_xml(xml, "style:header-style"),
            None => xml.push_str("<style:header-style/>"),
        }
        match &self.footer {
            Some(footer) => footer.append_layout_xml(xml, "style:footer-style"),
            None => xml.push_str("<style:footer-style/>"),
        }
        xml.push_str("</style:page-layout>");
    }

    pub(crate) fn append_master_xml(&self, xml: &mut String) {
        xml.push_str("<style:master-page");
        append_raw_attribute(xml, "style:name", DEFAULT_MASTER_PAGE);
        append_attribute(xml, "style:page-layout-name", &self.name);
        xml.push_str("><style:header>");
        if let Some(header) = &self.header {
            header.append_master_xml(xml);
        }
        xml.push_str("</style:header><style:header-left style:display=\"false\"/>");
        xml.push_str("<style:footer>");
        if let Some(footer) = &self.footer {
            footer.append_master_xml(xml);
        }
        xml.push_str("</style:footer><style:footer-left style:display=\"false\"/>");
        xml.push_str("</style:master-page>");
    }
}

pub struct PageStyleBuilder {
    style: PageStyle,
}

impl PageStyleBuilder {
    pub fn page_size(mut self, width: &str, height: &str) -> Self {
        self.style.page_width = width.to_string();
        self.style.page_height = height.to_string();
        self
    }

    pub fn landscape(mut self) -> Self {
        self.style.landscape = true;
        self
    }

    pub fn background_color(mut self, color: &str) -> Self {
        self.style.background_color = Some(color.to_string());
        self
    }

    pub fn margins(mut self, all: &str) -> Self {
        self.style.margin_top = all.to_string();
        self.style.margin_bottom = all.to_string();
        self.style.margin_left = all.to_string();
        self.style.margin_right = all.to_string();
        self
    }

    pub fn header(mut self, header: PageSection) -> Self {
        self.style.header = Some(header);
        self
    }

    pub fn footer(mut self, footer: PageSection) -> Self {
        self.style.footer = Some(footer);
        self
    }

    pub fn build(self) -> PageStyle {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_layout_without_sections_self_closes_them() {
        let style = PageStyle::builder("pm1").build();
        let mut xml = String::new();
        style.append_automatic_xml(&mut xml);
        assert!(xml.contains("<style:header-style/>"));
        assert!(xml.contains("<style:footer-style/>"));
    }

    #[test]
    fn master_page_regions() {
        let style = PageStyle::builder("pm1")
            .footer(PageSection::new().with_left("l").with_center("c").with_right("r"))
            .build();
        let mut xml = String::new();
        style.append_master_xml(&mut xml);
        assert!(xml.contains("<style:region-left><text:p>l</text:p></style:region-left>"));
        assert!(xml.contains("<style:region-center><text:p>c</text:p></style:region-center>"));
        assert!(xml.contains("<style:region-right><text:p>r</text:p></style:region-right>"));
    }
}
