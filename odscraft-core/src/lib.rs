//! odscraft-core: incremental, memory-bounded generation of OpenDocument
//! Spreadsheet files
//!
//! Documents are built cell by cell into a sparse, blank-compressed row
//! store and serialized in one forward pass: untouched rows and cells are
//! run-length encoded, styles are deduplicated by name and emitted exactly
//! once, and the whole package is streamed into the ZIP container without
//! materializing a document tree.
//!
//! ```no_run
//! use odscraft_core::OdsDocument;
//!
//! # fn main() -> Result<(), odscraft_core::OdsError> {
//! let mut doc = OdsDocument::new();
//! let table = doc.add_table("Sheet1")?;
//! table.row(0)?.set_text(0, "hello");
//! table.row(0)?.set_float(1, 42.0);
//! doc.save("hello.ods")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod document;
pub mod error;
pub mod position;
pub mod style;
pub mod table;
pub mod writer;
pub mod xml;

pub use config::DocumentConfig;
pub use document::OdsDocument;
pub use error::OdsError;
pub use position::{Position, parse_position};
pub use style::{
    Border, BorderPosition, CellStyle, ColumnStyle, DataStyle, DateFormat, PageSection, PageStyle,
    RowStyle, StyleRegistry, TableStyle, TextAlign, TextProperties, TextStyle, VerticalAlign,
};
pub use table::{CellValue, CellWalker, Row, Table};
