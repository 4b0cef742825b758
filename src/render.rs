//! Renderers for the timetable grid and the conflict list.

use crate::conflict::{Conflict, ConflictSide};
use crate::grid::{CellEntry, TimetableGrid};
use crate::period;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Renders the grid as a standalone HTML document.
#[derive(Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn render(&self, grid: &TimetableGrid) -> String {
        let mut html = String::new();

        writeln!(&mut html, "<!DOCTYPE html>").unwrap();
        writeln!(&mut html, r#"<html lang="zh-Hant">"#).unwrap();
        writeln!(
            &mut html,
            r#"<head>
<meta charset="utf-8">
<title>課程時間表</title>
<style>
  body {{ font-family: "Microsoft JhengHei", Arial, sans-serif; background: #fff; margin: 24px; }}
  h1 {{ text-align: center; font-size: 20px; }}
  table {{ border-collapse: collapse; margin: 0 auto; }}
  th {{ background: #4A90E2; color: #fff; padding: 10px 14px; font-size: 15px; }}
  td {{ border: 1px solid #ddd; padding: 8px 12px; text-align: center; font-size: 12px; min-width: 7em; }}
  td.period, td.time {{ background: #f5f7fa; white-space: nowrap; }}
</style>
</head>"#
        )
        .unwrap();
        writeln!(&mut html, "<body>").unwrap();
        writeln!(&mut html, "<h1>課程時間表</h1>").unwrap();
        writeln!(&mut html, "<table>").unwrap();

        // Header: period, time, then the weekday columns
        write!(&mut html, "<tr><th>節次</th><th>時間</th>").unwrap();
        for &day in grid.weekdays() {
            write!(&mut html, "<th>{}</th>", day.label()).unwrap();
        }
        writeln!(&mut html, "</tr>").unwrap();

        for &code in grid.periods() {
            write!(
                &mut html,
                r#"<tr><td class="period">{}</td><td class="time">{}</td>"#,
                code,
                period::time_range(code).unwrap_or("")
            )
            .unwrap();
            for &day in grid.weekdays() {
                let entries = grid.cell(code, day).unwrap_or(&[]);
                write!(&mut html, "<td>{}</td>", cell_html(entries)).unwrap();
            }
            writeln!(&mut html, "</tr>").unwrap();
        }

        writeln!(&mut html, "</table>").unwrap();
        writeln!(&mut html, "</body>").unwrap();
        writeln!(&mut html, "</html>").unwrap();
        html
    }
}

fn cell_html(entries: &[CellEntry]) -> String {
    let rendered: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "<b>{}</b><br>{}<br>{}",
                join_escaped(&e.course_name),
                join_escaped(&e.instructor),
                join_escaped(&e.room)
            )
        })
        .collect();
    rendered.join("<br>━━━━━<br>")
}

fn join_escaped(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| escape_html(l))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the grid as a box-drawing table for terminal display.
#[derive(Default)]
pub struct TextRenderer;

enum Rule {
    Top,
    Middle,
    Bottom,
}

impl TextRenderer {
    pub fn render(&self, grid: &TimetableGrid) -> String {
        let mut header: Vec<Vec<String>> = vec![
            vec!["節次".to_string()],
            vec!["時間".to_string()],
        ];
        header.extend(grid.weekdays().iter().map(|d| vec![d.label().to_string()]));

        let mut body: Vec<Vec<Vec<String>>> = Vec::new();
        for &code in grid.periods() {
            let mut row: Vec<Vec<String>> = vec![
                vec![code.to_string()],
                vec![period::time_range(code).unwrap_or("").to_string()],
            ];
            for &day in grid.weekdays() {
                row.push(cell_lines(grid.cell(code, day).unwrap_or(&[])));
            }
            body.push(row);
        }

        let mut widths: Vec<usize> = header
            .iter()
            .map(|cell| cell.iter().map(|l| l.width()).max().unwrap_or(0))
            .collect();
        for row in &body {
            for (i, cell) in row.iter().enumerate() {
                for line in cell {
                    widths[i] = widths[i].max(line.width());
                }
            }
        }

        let mut out = String::new();
        out.push_str(&rule(&widths, Rule::Top));
        out.push_str(&row_lines(&header, &widths));
        for row in &body {
            out.push_str(&rule(&widths, Rule::Middle));
            out.push_str(&row_lines(row, &widths));
        }
        out.push_str(&rule(&widths, Rule::Bottom));
        out
    }
}

fn cell_lines(entries: &[CellEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            lines.push("━━━━━".to_string());
        }
        lines.extend(entry.course_name.iter().cloned());
        lines.extend(entry.instructor.iter().cloned());
        lines.extend(entry.room.iter().cloned());
    }
    lines
}

fn rule(widths: &[usize], position: Rule) -> String {
    let (left, joint, right) = match position {
        Rule::Top => ('┌', '┬', '┐'),
        Rule::Middle => ('├', '┼', '┤'),
        Rule::Bottom => ('└', '┴', '┘'),
    };
    let mut s = String::new();
    s.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            s.push(joint);
        }
        for _ in 0..width + 2 {
            s.push('─');
        }
    }
    s.push(right);
    s.push('\n');
    s
}

fn row_lines(cells: &[Vec<String>], widths: &[usize]) -> String {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let mut out = String::new();
    for line in 0..height {
        for (i, cell) in cells.iter().enumerate() {
            out.push('│');
            let text = cell.get(line).map(String::as_str).unwrap_or("");
            out.push(' ');
            out.push_str(text);
            for _ in text.width()..widths[i] {
                out.push(' ');
            }
            out.push(' ');
        }
        out.push('│');
        out.push('\n');
    }
    out
}

/// Renders the conflict list as an aligned text report.
pub fn render_conflicts_text(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "沒有課程時間衝突\n".to_string();
    }
    let mut out = String::new();
    writeln!(&mut out, "發現 {} 個課程時間衝突:", conflicts.len()).unwrap();
    for (i, conflict) in conflicts.iter().enumerate() {
        writeln!(&mut out, "{}. {}", i + 1, conflict.slot_label()).unwrap();
        writeln!(&mut out, "   課程1: {}", side_line(&conflict.first)).unwrap();
        writeln!(&mut out, "   課程2: {}", side_line(&conflict.second)).unwrap();
    }
    out
}

fn side_line(side: &ConflictSide) -> String {
    let name = match &side.code {
        Some(code) => format!("[{}] {}", code, side.course_name),
        None => side.course_name.clone(),
    };
    format!("{} ({}) {} / {}", name, side.department, side.instructor, side.room)
}
