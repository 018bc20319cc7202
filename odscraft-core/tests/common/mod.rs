#![allow(dead_code)]

use std::io::Read;
use std::path::{Path, PathBuf};

use odscraft_core::OdsDocument;

/// Save `doc` into `dir` and return the file path.
pub fn save_to_dir(
    doc: OdsDocument,
    dir: &tempfile::TempDir,
    name: &str,
) -> anyhow::Result<PathBuf> {
    let path = dir.path().join(name);
    doc.save(&path)?;
    Ok(path)
}

/// Read one named part of the package back as a string.
pub fn read_part(path: &Path, part: &str) -> anyhow::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut entry = zip.by_name(part)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

/// Extract merged cell ranges (start_row, start_col, end_row, end_col) from
/// a serialized content.xml, tracking repeat counts the way a conformant
/// reader does.
pub fn extract_merged_cells(content: &str, sheet_name: &str) -> anyhow::Result<Vec<(u32, u32, u32, u32)>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut merged_cells = Vec::new();
    let mut reader = Reader::from_str(content);
    let mut in_target_sheet = false;
    let mut current_row = 0u32;
    let mut current_col = 0u32;
    let mut current_row_repeated = 1u32;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"table:table" => {
                    let mut name = String::new();
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"table:name" {
                            name = attr.unescape_value()?.to_string();
                        }
                    }
                    if name == sheet_name {
                        in_target_sheet = true;
                        current_row = 0;
                    } else if in_target_sheet {
                        break;
                    }
                }
                b"table:table-row" if in_target_sheet => {
                    current_col = 0;
                    current_row_repeated = 1;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"table:number-rows-repeated" {
                            current_row_repeated = attr.unescape_value()?.parse()?;
                        }
                    }
                }
                b"table:table-cell" | b"table:covered-table-cell" if in_target_sheet => {
                    let mut cols_spanned = 1u32;
                    let mut rows_spanned = 1u32;
                    let mut repeated = 1u32;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"table:number-columns-spanned" => {
                                cols_spanned = attr.unescape_value()?.parse()?;
                            }
                            b"table:number-rows-spanned" => {
                                rows_spanned = attr.unescape_value()?.parse()?;
                            }
                            b"table:number-columns-repeated" => {
                                repeated = attr.unescape_value()?.parse()?;
                            }
                            _ => {}
                        }
                    }
                    if cols_spanned > 1 || rows_spanned > 1 {
                        merged_cells.push((
                            current_row,
                            current_col,
                            current_row + rows_spanned - 1,
                            current_col + cols_spanned - 1,
                        ));
                    }
                    current_col += repeated;
                }
                _ => {}
            },
            Event::End(e) if in_target_sheet => match e.name().as_ref() {
                b"table:table-row" => current_row += current_row_repeated,
                b"table:table" => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(merged_cells)
}

/// Count the `<table:table-row>` blocks of one sheet and the total row count
/// they stand for after expanding repeats.
pub fn row_blocks(content: &str, sheet_name: &str) -> anyhow::Result<(usize, u32)> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut blocks = 0usize;
    let mut expanded = 0u32;
    let mut reader = Reader::from_str(content);
    let mut in_target_sheet = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"table:table" => {
                    let mut name = String::new();
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"table:name" {
                            name = attr.unescape_value()?.to_string();
                        }
                    }
                    if name == sheet_name {
                        in_target_sheet = true;
                    } else if in_target_sheet {
                        break;
                    }
                }
                b"table:table-row" if in_target_sheet => {
                    blocks += 1;
                    let mut repeated = 1u32;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"table:number-rows-repeated" {
                            repeated = attr.unescape_value()?.parse()?;
                        }
                    }
                    expanded += repeated;
                }
                _ => {}
            },
            Event::End(e) if in_target_sheet && e.name().as_ref() == b"table:table" => break,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((blocks, expanded))
}
