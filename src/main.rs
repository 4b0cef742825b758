use rustable::catalog::{Catalog, SearchHit};
use rustable::conflict::detect_conflicts;
use rustable::export;
use rustable::grid::build_grid;
use rustable::model::summarize;
use rustable::render::{HtmlRenderer, TextRenderer, render_conflicts_text};
use std::env;
use std::fs;
use std::process;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Html,
    Csv,
    Json,
}

impl Format {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "html" => Some(Self::Html),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <catalog.csv> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -s, --select <n[,n...]>  Catalog row numbers to put on the timetable");
        eprintln!("  -q, --query <text>       Search course names and codes, then exit");
        eprintln!("  -d, --departments        List the catalog's departments, then exit");
        eprintln!("  -f, --format <fmt>       Output format: text, html, csv, json (default: text)");
        eprintln!("  -w, --weekend            Include Saturday and Sunday columns");
        eprintln!("  -o, --output <file>      Output file (default: stdout)");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut query: Option<String> = None;
    let mut rows: Vec<usize> = Vec::new();
    let mut format = Format::Text;
    let mut weekend = false;
    let mut departments = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--select" => {
                i += 1;
                if i < args.len() {
                    rows = parse_rows(&args[i]).unwrap_or_else(|bad| {
                        eprintln!("Invalid row number: {}", bad);
                        process::exit(1);
                    });
                }
            }
            "-q" | "--query" => {
                i += 1;
                if i < args.len() {
                    query = Some(args[i].clone());
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = Format::from_str(&args[i]).unwrap_or_else(|| {
                        eprintln!("Invalid format: {}", args[i]);
                        process::exit(1);
                    });
                }
            }
            "-w" | "--weekend" => weekend = true,
            "-d" | "--departments" => departments = true,
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let catalog = match Catalog::parse(&input) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    if departments {
        for department in catalog.departments() {
            println!("{}", department);
        }
        return;
    }

    if let Some(query) = query {
        let hits = catalog.search(&query);
        if hits.is_empty() {
            println!("找不到符合「{}」的課程", query);
        } else {
            println!("找到 {} 門課程:", hits.len());
            for hit in &hits {
                println!("{:>4}  {}", hit.row, describe(hit));
            }
        }
        return;
    }

    let selection = match catalog.select(&rows) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid selection: {}", e);
            process::exit(1);
        }
    };
    let include_codes = catalog.code_column.is_some();

    let output = match format {
        Format::Text => {
            let conflicts = detect_conflicts(&selection, include_codes);
            let grid = build_grid(&selection, weekend);
            let summary = summarize(&selection);
            format!(
                "{}\n{}\n已選 {} 門課程 | 總學分 {} | 涉及 {} 個系所\n",
                render_conflicts_text(&conflicts),
                TextRenderer::default().render(&grid),
                summary.courses,
                summary.total_credits,
                summary.departments
            )
        }
        Format::Html => {
            let grid = build_grid(&selection, weekend);
            HtmlRenderer::default().render(&grid)
        }
        Format::Csv => export::export_selection_csv(&selection, catalog.code_column.as_deref()),
        Format::Json => {
            let conflicts = detect_conflicts(&selection, include_codes);
            export::conflicts_json(&conflicts).unwrap_or_else(|e| {
                eprintln!("Failed to serialize conflicts: {}", e);
                process::exit(1);
            })
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}

/// Parse "3,14,27" into row numbers, dropping duplicates but keeping order.
fn parse_rows(s: &str) -> Result<Vec<usize>, String> {
    let mut rows = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let row: usize = part.parse().map_err(|_| part.to_string())?;
        if !rows.contains(&row) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn describe(hit: &SearchHit) -> String {
    let section = hit.section;
    let mut s = String::new();
    if let Some(code) = &section.code {
        s.push_str(&format!("[{}] ", code));
    }
    if let Some(group) = &section.class_group {
        s.push_str(&format!("[{}] ", group));
    }
    s.push_str(&format!(
        "{} ({}) {} | {}{}",
        section.course_name, section.department, section.instructor, section.weekday, section.periods
    ));
    s
}
