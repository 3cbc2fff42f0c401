use crate::error::{Result, TableError};
use crate::syllable_table::{SyllableTable, SyllableUnit};
use anyhow::Context;
use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads a syllable table file (`key,spelling,spelling,...` per line).
pub fn load_table<P: AsRef<Path>>(path: P) -> anyhow::Result<SyllableTable> {
    let path = path.as_ref();
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode_table_bytes(&raw);
    let table = parse_table_content(text.as_ref())
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(
        "Loaded table {:?} with {} units from {}",
        table.name,
        table.len(),
        path.display()
    );
    Ok(table)
}

/// BOM wins, then strict UTF-8, then Shift_JIS for legacy table files.
fn decode_table_bytes(raw: &[u8]) -> Cow<'_, str> {
    let (encoding, body) = match Encoding::for_bom(raw) {
        Some((encoding, bom_len)) => (encoding, &raw[bom_len..]),
        None if std::str::from_utf8(raw).is_ok() => (UTF_8, raw),
        None => (SHIFT_JIS, raw),
    };
    let (text, lossy) = encoding.decode_without_bom_handling(body);
    if lossy {
        warn!("table text is not clean {}, bad bytes replaced", encoding.name());
    } else {
        debug!("table text read as {}", encoding.name());
    }
    text
}

/// Parses table text. The first `;` comment names the table; other `;`
/// lines and blank lines are skipped. A field in double quotes is taken
/// literally, so `","` declares a comma.
pub fn parse_table_content(content: &str) -> Result<SyllableTable> {
    let mut name = None;
    let mut units = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if let Some(comment) = line.strip_prefix(';') {
            let comment = comment.trim();
            if name.is_none() && !comment.is_empty() {
                name = Some(comment.to_string());
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let mut fields = split_fields(line).into_iter();
        let key = fields.next().unwrap_or_default();
        if key.is_empty() {
            return Err(TableError::EmptyKey { line: line_no });
        }
        let spellings: Vec<String> = fields.collect();
        if spellings.iter().any(|s| s.is_empty()) {
            return Err(TableError::EmptySpelling { line: line_no, key });
        }
        units.push(SyllableUnit::new(key, spellings));
    }

    let mut table = SyllableTable::new(units)?;
    table.name = name;
    Ok(table)
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
        .into_iter()
        .map(|f| f.trim().to_string())
        .collect()
}
