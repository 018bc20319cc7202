//! ZIP packaging of the document parts
//!
//! The container format requires the `mimetype` entry to come first, stored
//! uncompressed, so "file"-style tools can sniff the media type from the
//! first bytes of the archive.

use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::OdsError;

/// Exact bytes of the `mimetype` entry.
pub const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const SUPPORT_DIRECTORIES: &[&str] = &[
    "Thumbnails",
    "Configurations2/floater",
    "Configurations2/images/Bitmaps",
    "Configurations2/menubar",
    "Configurations2/popupmenu",
    "Configurations2/progressbar",
    "Configurations2/statusbar",
    "Configurations2/toolbar",
];

/// Writes named UTF-8 parts into the ZIP container.
pub struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> PackageWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            zip: ZipWriter::new(sink),
        }
    }

    /// Write the mandatory first entry: stored, uncompressed, exact bytes.
    pub fn write_mimetype(&mut self) -> Result<(), OdsError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        self.zip.start_file("mimetype", options)?;
        self.zip.write_all(MIMETYPE.as_bytes())?;
        tracing::debug!(part = "mimetype", "package part written");
        Ok(())
    }

    /// Write one XML part, deflate-compressed.
    pub fn write_part(&mut self, name: &str, content: &str) -> Result<(), OdsError> {
        self.zip.start_file(name, SimpleFileOptions::default())?;
        self.zip.write_all(content.as_bytes())?;
        tracing::debug!(part = name, bytes = content.len(), "package part written");
        Ok(())
    }

    /// The empty configuration entries office suites expect to find.
    pub fn write_support_entries(&mut self) -> Result<(), OdsError> {
        let options = SimpleFileOptions::default();
        self.zip
            .start_file("Configurations2/accelerator/current.xml", options)?;
        for directory in SUPPORT_DIRECTORIES {
            self.zip.add_directory(*directory, options)?;
        }
        Ok(())
    }

    /// Finalize the archive and release the underlying sink.
    pub fn finish(self) -> Result<(), OdsError> {
        self.zip.finish()?;
        Ok(())
    }
}
