//! Data styles: number, date, currency and friends (`number:*-style` elements)

use crate::style::CellStyle;
use crate::xml::{append_attribute, append_int_attribute, append_raw_attribute};

/// Date display formats supported by [`DataStyle::date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `1999-09-30`
    IsoDate,
    /// `30.09.1999`
    DayMonthYear,
    /// `09.99`
    MonthYear,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DataKind {
    Boolean,
    Float {
        decimal_places: u8,
        grouping: bool,
    },
    Percentage {
        decimal_places: u8,
    },
    Currency {
        symbol: String,
        decimal_places: u8,
    },
    Date {
        format: DateFormat,
    },
    Time,
}

/// A named data style, referenced by cell styles through
/// `style:data-style-name` and defined once in `styles.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStyle {
    name: String,
    kind: DataKind,
}

impl DataStyle {
    pub fn boolean(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: DataKind::Boolean,
        }
    }

    pub fn float(name: &str, decimal_places: u8, grouping: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: DataKind::Float {
                decimal_places,
                grouping,
            },
        }
    }

    pub fn percentage(name: &str, decimal_places: u8) -> Self {
        Self {
            name: name.to_string(),
            kind: DataKind::Percentage { decimal_places },
        }
    }

    pub fn currency(name: &str, symbol: &str, decimal_places: u8) -> Self {
        Self {
            name: name.to_string(),
            kind: DataKind::Currency {
                symbol: symbol.to_string(),
                decimal_places,
            },
        }
    }

    pub fn date(name: &str, format: DateFormat) -> Self {
        Self {
            name: name.to_string(),
            kind: DataKind::Date { format },
        }
    }

    pub fn time(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: DataKind::Time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn append_number(xml: &mut String, decimal_places: u8, grouping: bool) {
        xml.push_str("<number:number");
        append_int_attribute(xml, "number:decimal-places", i64::from(decimal_places));
        append_raw_attribute(xml, "number:min-integer-digits", "1");
        if grouping {
            append_raw_attribute(xml, "number:grouping", "true");
        }
        xml.push_str("/>");
    }

    pub(crate) fn append_xml(&self, xml: &mut String) {
        match &self.kind {
            DataKind::Boolean => {
                xml.push_str("<number:boolean-style");
                append_attribute(xml, "style:name", &self.name);
                xml.push_str("><number:boolean/></number:boolean-style>");
            }
            DataKind::Float {
                decimal_places,
                grouping,
            } => {
                xml.push_str("<number:number-style");
                append_attribute(xml, "style:name", &self.name);
                xml.push('>');
                Self::append_number(xml, *decimal_places, *grouping);
                xml.push_str("</number:number-style>");
            }
            DataKind::Percentage { decimal_places } => {
                xml.push_str("<number:percentage-style");
                append_attribute(xml, "style:name", &self.name);
                xml.push('>');
                Self::append_number(xml, *decimal_places, false);
                xml.push_str("<number:text>%</number:text></number:percentage-style>");
            }
            DataKind::Currency {
                symbol,
                decimal_places,
            } => {
                xml.push_str("<number:currency-style");
                append_attribute(xml, "style:name", &self.name);
                xml.push('>');
                Self::append_number(xml, *decimal_places, false);
                xml.push_str("<number:text> </number:text><number:currency-symbol>");
                xml.push_str(&crate::xml::escape_xml(symbol));
                xml.push_str("</number:currency-symbol></number:currency-style>");
            }
            DataKind::Date { format } => {
                xml.push_str("<number:date-style");
                append_attribute(xml, "style:name", &self.name);
                append_raw_attribute(xml, "number:automatic-order", "true");
                xml.push('>');
                match format {
                    DateFormat::IsoDate => xml.push_str(
                        "<number:year number:style=\"long\"/><number:text>-</number:text>\
                         <number:month number:style=\"long\"/><number:text>-</number:text>\
                         <number:day number:style=\"long\"/>",
                    ),
                    DateFormat::DayMonthYear => xml.push_str(
                        "<number:day number:style=\"long\"/><number:text>.</number:text>\
                         <number:month number:style=\"long\"/><number:text>.</number:text>\
                         <number:year number:style=\"long\"/>",
                    ),
                    DateFormat::MonthYear => xml.push_str(
                        "<number:month number:style=\"long\"/><number:text>.</number:text>\
                         <number:year/>",
                    ),
                }
                xml.push_str("</number:date-style>");
            }
            DataKind::Time => {
                xml.push_str("<number:time-style");
                append_attribute(xml, "style:name", &self.name);
                xml.push_str(
                    "><number:hours number:style=\"long\"/><number:text>:</number:text>\
                     <number:minutes number:style=\"long\"/><number:text>:</number:text>\
                     <number:seconds number:style=\"long\"/></number:time-style>",
                );
            }
        }
    }
}

/// The default data-backed cell styles attached to typed cell values.
///
/// Writing a float, date, currency, percentage, boolean or time value without
/// an explicit style gives the cell the matching style from this set, so
/// readers render the value sensibly out of the box.
#[derive(Debug)]
pub struct DataStyleSet {
    boolean: CellStyle,
    currency: CellStyle,
    date: CellStyle,
    float: CellStyle,
    percentage: CellStyle,
    time: CellStyle,
}

impl DataStyleSet {
    pub fn new() -> Self {
        Self {
            boolean: CellStyle::builder("boolean-style")
                .data_style(DataStyle::boolean("boolean-data"))
                .build(),
            currency: CellStyle::builder("currency-style")
                .data_style(DataStyle::currency("currency-data", "€", 2))
                .build(),
            date: CellStyle::builder("date-style")
                .data_style(DataStyle::date("date-data", DateFormat::IsoDate))
                .build(),
            float: CellStyle::builder("number-style")
                .data_style(DataStyle::float("float-data", 2, false))
                .build(),
            percentage: CellStyle::builder("percentage-style")
                .data_style(DataStyle::percentage("percentage-data", 2))
                .build(),
            time: CellStyle::builder("time-style")
                .data_style(DataStyle::time("time-data"))
                .build(),
        }
    }

    pub fn boolean_style(&self) -> &CellStyle {
        &self.boolean
    }

    pub fn currency_style(&self) -> &CellStyle {
        &self.currency
    }

    pub fn date_style(&self) -> &CellStyle {
        &self.date
    }

    pub fn float_style(&self) -> &CellStyle {
        &self.float
    }

    pub fn percentage_style(&self) -> &CellStyle {
        &self.percentage
    }

    pub fn time_style(&self) -> &CellStyle {
        &self.time
    }
}

impl Default for DataStyleSet {
    fn default() -> Self {
        Self::new()
    }
}
