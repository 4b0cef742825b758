//! Export of selection rows and records to external formats.

use crate::conflict::Conflict;
use crate::model::{Section, SelectionSummary};

/// Byte-order mark so spreadsheet software decodes the CSV as UTF-8.
const BOM: char = '\u{feff}';

/// Serialize the selected rows back to CSV, detected code column first.
pub fn export_selection_csv(selection: &[&Section], code_column: Option<&str>) -> String {
    let mut out = String::new();
    out.push(BOM);

    let mut header: Vec<&str> = Vec::new();
    if let Some(name) = code_column {
        header.push(name);
    }
    header.extend(["科目名稱", "系所", "班級", "授課教師", "星期", "節次", "學分數", "教室"]);
    push_record(&mut out, &header);

    for section in selection {
        let credits = section.credits.map(|c| c.to_string()).unwrap_or_default();
        let mut record: Vec<&str> = Vec::new();
        if code_column.is_some() {
            record.push(section.code.as_deref().unwrap_or(""));
        }
        record.extend([
            section.course_name.as_str(),
            section.department.as_str(),
            section.class_group.as_deref().unwrap_or(""),
            section.instructor.as_str(),
            section.weekday.as_str(),
            section.periods.as_str(),
            credits.as_str(),
            section.room.as_str(),
        ]);
        push_record(&mut out, &record);
    }
    out
}

fn push_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    let needs_quoting = field.contains([',', '"', '\n', '\r']);
    if needs_quoting {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

pub fn conflicts_json(conflicts: &[Conflict]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(conflicts)
}

pub fn summary_json(summary: &SelectionSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::detect_conflicts;
    use crate::model::summarize;

    fn section(name: &str, code: Option<&str>) -> Section {
        Section {
            department: "數學系".to_string(),
            course_name: name.to_string(),
            class_group: Some("甲".to_string()),
            instructor: "王大明".to_string(),
            room: "A101".to_string(),
            weekday: "一".to_string(),
            periods: "34".to_string(),
            credits: Some(3.0),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_csv_starts_with_bom() {
        let out = export_selection_csv(&[], None);
        assert!(out.starts_with('\u{feff}'));
    }

    #[test]
    fn test_csv_without_code_column() {
        let a = section("微積分", None);
        let out = export_selection_csv(&[&a], None);
        let mut lines = out.trim_start_matches('\u{feff}').lines();
        assert_eq!(
            lines.next(),
            Some("科目名稱,系所,班級,授課教師,星期,節次,學分數,教室")
        );
        assert_eq!(lines.next(), Some("微積分,數學系,甲,王大明,一,34,3,A101"));
    }

    #[test]
    fn test_csv_with_detected_code_column_first() {
        let a = section("微積分", Some("MATH101"));
        let out = export_selection_csv(&[&a], Some("課號"));
        let mut lines = out.trim_start_matches('\u{feff}').lines();
        assert_eq!(
            lines.next(),
            Some("課號,科目名稱,系所,班級,授課教師,星期,節次,學分數,教室")
        );
        assert!(lines.next().unwrap().starts_with("MATH101,微積分"));
    }

    #[test]
    fn test_csv_quotes_awkward_fields() {
        let mut a = section("微積分, 進階", None);
        a.instructor = "王\"大明\"".to_string();
        let out = export_selection_csv(&[&a], None);
        assert!(out.contains("\"微積分, 進階\""));
        assert!(out.contains("\"王\"\"大明\"\"\""));
    }

    #[test]
    fn test_fractional_credits_kept() {
        let mut a = section("普通物理", None);
        a.credits = Some(2.5);
        let out = export_selection_csv(&[&a], None);
        assert!(out.contains(",2.5,"));
    }

    #[test]
    fn test_conflicts_json_round_trips_fields() {
        let a = section("微積分", Some("MATH101"));
        let b = section("線性代數", Some("MATH201"));
        let conflicts = detect_conflicts(&[&a, &b], true);
        let json = conflicts_json(&conflicts).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["weekday"], "一");
        assert_eq!(value[0]["period"], "3");
        assert_eq!(value[0]["time"], "10:10-11:00");
        assert_eq!(value[0]["first"]["code"], "MATH101");
        assert_eq!(value[0]["second"]["course_name"], "線性代數");
    }

    #[test]
    fn test_code_omitted_from_json_when_not_detected() {
        let a = section("微積分", Some("MATH101"));
        let b = section("線性代數", Some("MATH201"));
        let conflicts = detect_conflicts(&[&a, &b], false);
        let json = conflicts_json(&conflicts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["first"].get("code").is_none());
    }

    #[test]
    fn test_summary_json() {
        let a = section("微積分", None);
        let json = summary_json(&summarize(&[&a])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["courses"], 1);
        assert_eq!(value["total_credits"], 3.0);
        assert_eq!(value["departments"], 1);
    }
}
