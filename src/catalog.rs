//! Catalog loading: delimited-text parsing and column handling.
//!
//! The catalog arrives as UTF-8 CSV with a header row. Six columns are
//! required; the class-group, credits, and catalog-code columns are picked
//! up when present. The catalog-code column is detected once here and
//! threaded through explicitly, never re-probed per call.

use crate::model::Section;
use serde::Serialize;
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 6] = ["系所", "科目名稱", "星期", "節次", "授課教師", "教室"];

/// Candidate names for the optional catalog-code column, probed in order.
pub const CODE_COLUMN_CANDIDATES: [&str; 5] = ["科目代碼", "課程代碼", "課號", "course_code", "code"];

const CLASS_GROUP_COLUMN: &str = "班級";
const CREDITS_COLUMN: &str = "學分數";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("empty catalog: no header row")]
    Empty,
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),
    #[error("no catalog row {0}")]
    BadRow(usize),
}

/// The loaded course table, in file order.
#[derive(Debug)]
pub struct Catalog {
    pub sections: Vec<Section>,
    /// Name of the detected catalog-code column, if any.
    pub code_column: Option<String>,
}

/// One search result: the catalog row number plus the section itself.
#[derive(Debug, Serialize)]
pub struct SearchHit<'a> {
    pub row: usize,
    #[serde(flatten)]
    pub section: &'a Section,
}

/// Resolved header positions.
struct Columns {
    department: usize,
    course_name: usize,
    weekday: usize,
    periods: usize,
    instructor: usize,
    room: usize,
    class_group: Option<usize>,
    credits: Option<usize>,
    code: Option<usize>,
}

impl Columns {
    fn resolve(header: &[String]) -> Result<(Columns, Option<String>), CatalogError> {
        let position = |name: &str| header.iter().position(|h| h == name);

        for name in REQUIRED_COLUMNS {
            if position(name).is_none() {
                return Err(CatalogError::MissingColumn(name));
            }
        }

        let code_column = CODE_COLUMN_CANDIDATES
            .into_iter()
            .find(|&name| position(name).is_some())
            .map(str::to_string);

        let columns = Columns {
            department: position("系所").ok_or(CatalogError::MissingColumn("系所"))?,
            course_name: position("科目名稱").ok_or(CatalogError::MissingColumn("科目名稱"))?,
            weekday: position("星期").ok_or(CatalogError::MissingColumn("星期"))?,
            periods: position("節次").ok_or(CatalogError::MissingColumn("節次"))?,
            instructor: position("授課教師").ok_or(CatalogError::MissingColumn("授課教師"))?,
            room: position("教室").ok_or(CatalogError::MissingColumn("教室"))?,
            class_group: position(CLASS_GROUP_COLUMN),
            credits: position(CREDITS_COLUMN),
            code: code_column.as_deref().and_then(position),
        };
        Ok((columns, code_column))
    }
}

impl Catalog {
    pub fn parse(input: &str) -> Result<Catalog, CatalogError> {
        let mut records = read_records(input)?.into_iter().filter(|r| !is_blank(r));

        let header: Vec<String> = records
            .next()
            .ok_or(CatalogError::Empty)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let (columns, code_column) = Columns::resolve(&header)?;

        let sections = records.map(|record| to_section(&record, &columns)).collect();
        Ok(Catalog { sections, code_column })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Case-insensitive substring search over course names and catalog codes.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                s.course_name.to_lowercase().contains(&query)
                    || s.code.as_ref().is_some_and(|c| c.to_lowercase().contains(&query))
            })
            .map(|(row, section)| SearchHit { row, section })
            .collect()
    }

    /// Sorted, deduplicated department names.
    pub fn departments(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .sections
            .iter()
            .map(|s| s.department.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Resolve a selection's row numbers to sections, in the given order.
    pub fn select(&self, rows: &[usize]) -> Result<Vec<&Section>, CatalogError> {
        rows.iter()
            .map(|&row| self.sections.get(row).ok_or(CatalogError::BadRow(row)))
            .collect()
    }
}

fn to_section(record: &[String], columns: &Columns) -> Section {
    let cell = |index: usize| {
        record
            .get(index)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    let optional = |index: Option<usize>| index.map(&cell).filter(|s| !s.is_empty());

    Section {
        department: cell(columns.department),
        course_name: cell(columns.course_name),
        class_group: optional(columns.class_group),
        instructor: cell(columns.instructor),
        room: cell(columns.room),
        weekday: cell(columns.weekday),
        periods: cell(columns.periods),
        credits: optional(columns.credits).and_then(|s| s.parse().ok()),
        code: optional(columns.code),
    }
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Minimal quoted-CSV reader: commas split fields, newlines split records,
/// `"` opens a quoted run where `""` is a literal quote. A leading BOM is
/// stripped; CR before LF is swallowed.
fn read_records(input: &str) -> Result<Vec<Vec<String>>, CatalogError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut line = 1usize;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let start_line = line;
                loop {
                    match chars.next() {
                        Some('"') => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                field.push('"');
                            } else {
                                break;
                            }
                        }
                        Some('\n') => {
                            line += 1;
                            field.push('\n');
                        }
                        Some(ch) => field.push(ch),
                        None => return Err(CatalogError::UnterminatedQuote(start_line)),
                    }
                }
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}
