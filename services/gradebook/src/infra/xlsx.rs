//! Minimal Office Open XML (`.xlsx`) writer for [`TabularDocument`]s.
//!
//! Cells are written as numbers or inline strings, so no shared-string table is
//! needed. Each [`RowStyle`] maps to one entry of `cellXfs` in `styles.xml`.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::{Cursor, Write as _};

use anyhow::Context as _;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::repository::TabularExportPort;
use crate::domain::tabular::{Cell, RowStyle, Sheet, TabularDocument};
use crate::error::GradebookServiceError;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MAX_SHEET_NAME_LEN: usize = 31;

const EMPTY_SHEET_NAME: &str = "Report";

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

// Fonts: 0 regular, 1 bold, 2 bold 12pt. Fills 0 and 1 are reserved by the format;
// 2 is the grade header grey, 3 the summary header yellow.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="3"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="12"/><name val="Calibri"/></font></fonts><fills count="4"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill><fill><patternFill patternType="solid"><fgColor rgb="FFE0E0E0"/><bgColor indexed="64"/></patternFill></fill><fill><patternFill patternType="solid"><fgColor rgb="FFFFCC00"/><bgColor indexed="64"/></patternFill></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="2" borderId="0" xfId="0" applyFont="1" applyFill="1"/><xf numFmtId="0" fontId="2" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="1" fillId="3" borderId="0" xfId="0" applyFont="1" applyFill="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

/// Encodes documents as `.xlsx` workbooks.
#[derive(Clone, Copy, Default)]
pub struct XlsxExporter;

impl TabularExportPort for XlsxExporter {
    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn file_extension(&self) -> &'static str {
        "xlsx"
    }

    fn encode(&self, document: &TabularDocument) -> Result<Vec<u8>, GradebookServiceError> {
        Ok(write_workbook(document)?)
    }
}

fn write_workbook(document: &TabularDocument) -> anyhow::Result<Vec<u8>> {
    // A workbook needs at least one sheet to open.
    let placeholder;
    let sheets: &[Sheet] = if document.sheets.is_empty() {
        placeholder = [Sheet {
            name: EMPTY_SHEET_NAME.to_owned(),
            column_widths: Vec::new(),
            rows: Vec::new(),
        }];
        &placeholder
    } else {
        &document.sheets
    };
    let sheet_names = unique_sheet_names(sheets);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries: Vec<(String, String)> = vec![
        (
            "[Content_Types].xml".to_owned(),
            content_types(sheets.len()),
        ),
        ("_rels/.rels".to_owned(), ROOT_RELS.to_owned()),
        ("docProps/core.xml".to_owned(), core_properties(&document.creator)),
        ("xl/workbook.xml".to_owned(), workbook(&sheet_names)),
        (
            "xl/_rels/workbook.xml.rels".to_owned(),
            workbook_rels(sheets.len()),
        ),
        ("xl/styles.xml".to_owned(), STYLES.to_owned()),
    ];
    for (i, sheet) in sheets.iter().enumerate() {
        entries.push((format!("xl/worksheets/sheet{}.xml", i + 1), worksheet(sheet)));
    }

    for (name, body) in entries {
        zip.start_file(name.as_str(), opts)
            .with_context(|| format!("failed to start {name}"))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("failed to write {name}"))?;
    }

    let cursor = zip.finish().context("failed to finalize workbook")?;
    Ok(cursor.into_inner())
}

fn content_types(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    );
    for i in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        );
    }
    xml.push_str("</Types>");
    xml
}

fn core_properties(creator: &str) -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>{creator}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created></cp:coreProperties>"#,
        creator = escape(creator),
    )
}

fn workbook(sheet_names: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    for (i, name) in sheet_names.iter().enumerate() {
        let n = i + 1;
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape(name)
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        sheet_count + 1
    );
    xml.push_str("</Relationships>");
    xml
}

fn worksheet(sheet: &Sheet) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    if !sheet.column_widths.is_empty() {
        xml.push_str("<cols>");
        for (i, width) in sheet.column_widths.iter().enumerate() {
            let n = i + 1;
            let _ = write!(
                xml,
                r#"<col min="{n}" max="{n}" width="{width}" customWidth="1"/>"#
            );
        }
        xml.push_str("</cols>");
    }

    xml.push_str("<sheetData>");
    for (r, row) in sheet.rows.iter().enumerate() {
        let row_num = r + 1;
        if row.cells.is_empty() {
            continue;
        }
        let style = style_index(row.style);
        let _ = write!(xml, r#"<row r="{row_num}">"#);
        for (c, cell) in row.cells.iter().enumerate() {
            let reference = format!("{}{row_num}", column_name(c));
            let style_attr = if style == 0 {
                String::new()
            } else {
                format!(r#" s="{style}""#)
            };
            match cell {
                Cell::Number(v) if v.is_finite() => {
                    let _ = write!(xml, r#"<c r="{reference}"{style_attr}><v>{v}</v></c>"#);
                }
                Cell::Number(v) => {
                    let _ = write!(
                        xml,
                        r#"<c r="{reference}"{style_attr} t="inlineStr"><is><t>{v}</t></is></c>"#
                    );
                }
                Cell::Text(t) => {
                    let _ = write!(
                        xml,
                        r#"<c r="{reference}"{style_attr} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        escape(t)
                    );
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn style_index(style: RowStyle) -> u8 {
    match style {
        RowStyle::Plain => 0,
        RowStyle::Header => 1,
        RowStyle::Title => 2,
        RowStyle::SummaryHeader => 3,
    }
}

/// Zero-based column index to letters: 0 → `A`, 25 → `Z`, 26 → `AA`.
fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Sheet names are limited to 31 characters, may not contain `[]:*?/\`, and must be
/// unique within a workbook.
fn unique_sheet_names(sheets: &[Sheet]) -> Vec<String> {
    let mut seen = HashSet::new();
    sheets
        .iter()
        .enumerate()
        .map(|(i, sheet)| {
            let base: String = sheet
                .name
                .chars()
                .map(|c| match c {
                    '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
                    c => c,
                })
                .take(MAX_SHEET_NAME_LEN)
                .collect();
            let base = if base.trim().is_empty() {
                format!("Sheet{}", i + 1)
            } else {
                base
            };

            let mut name = base.clone();
            let mut n = 2;
            while !seen.insert(name.to_lowercase()) {
                let suffix = format!(" ({n})");
                let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
                name = base.chars().take(keep).collect::<String>() + &suffix;
                n += 1;
            }
            name
        })
        .collect()
}

/// XML-escape text and drop control characters XML 1.0 cannot carry.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
