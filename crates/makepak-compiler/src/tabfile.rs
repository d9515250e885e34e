//! Text object records.
//!
//! A source file holds records of `key=value` lines. Keys are case
//! insensitive. Lines starting with `#` are comments, and a line starting
//! with `-` ends the current record:
//!
//! ```text
//! obj=good
//! name=Coal
//! value=1
//! ---
//! ```

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use makepak_core::date::month_count;

/// Read-only view of one record, as seen by the encoders.
pub trait ValueSource {
    /// Value of `key`, or the empty string when absent.
    fn get(&self, key: &str) -> &str;

    /// Directory image paths are resolved against.
    fn source_dir(&self) -> Option<&Path> {
        None
    }

    /// Integer value, `default` when absent or malformed.
    fn get_int(&self, key: &str, default: i64) -> i64 {
        parse_int(self.get(key)).unwrap_or(default)
    }

    /// A comma separated pair such as `smoketile=1,0`.
    fn get_koord(&self, key: &str, default: (i64, i64)) -> (i64, i64) {
        let value = self.get(key);
        let mut parts = value.split(',').map(parse_int);
        match (parts.next().flatten(), parts.next().flatten()) {
            (Some(x), Some(y)) => (x, y),
            _ => default,
        }
    }

    /// Comma separated integers. Malformed entries are dropped.
    fn get_ints(&self, key: &str) -> Vec<i64> {
        let value = self.get(key);
        if value.trim().is_empty() {
            return Vec::new();
        }
        value.split(',').filter_map(parse_int).collect()
    }

    /// Date from `<prefix>_year` and `<prefix>_month` as a month count.
    /// The month defaults to January; without a year the result is `default`.
    /// `None` when the month is not 1-12 or the date does not fit a `u16`.
    fn get_month(&self, prefix: &str, default: u16) -> Option<u16> {
        let Some(year) = parse_int(self.get(&format!("{prefix}_year"))) else {
            return Some(default);
        };
        let month = parse_int(self.get(&format!("{prefix}_month"))).unwrap_or(1);
        if !(1..=12).contains(&month) {
            return None;
        }
        let count = year.checked_mul(12)?.checked_add(month - 1)?;
        u16::try_from(count).ok()
    }
}

/// Parse an optionally signed decimal integer.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// One record of a text source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabRecord {
    values: IndexMap<String, String>,
    source_dir: Option<PathBuf>,
    /// 1-based line of the record's first entry.
    line: usize,
}

impl TabRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value; the key is normalised to lower case.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ValueSource for TabRecord {
    fn get(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(value) => value.as_str(),
            None => self
                .values
                .get(&key.to_ascii_lowercase())
                .map_or("", String::as_str),
        }
    }

    fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }
}

/// Split source text into records.
pub fn parse(text: &str, source_dir: Option<&Path>) -> Vec<TabRecord> {
    let mut records = Vec::new();
    let mut current = new_record(source_dir);

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.starts_with('-') {
            if !current.is_empty() {
                records.push(std::mem::replace(&mut current, new_record(source_dir)));
            }
            continue;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!("line {}: ignoring '{}' without '='", index + 1, line);
            continue;
        };
        if current.is_empty() {
            current.line = index + 1;
        }
        current.insert(key, value);
    }

    if !current.is_empty() {
        records.push(current);
    }
    records
}

fn new_record(source_dir: Option<&Path>) -> TabRecord {
    TabRecord {
        source_dir: source_dir.map(Path::to_path_buf),
        ..TabRecord::default()
    }
}

/// Read a source file. Image paths in its records resolve against the
/// file's directory.
pub fn read(path: &Path) -> io::Result<Vec<TabRecord>> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse(&text, path.parent()))
}
