pub mod catalog;
pub mod conflict;
pub mod export;
pub mod grid;
pub mod model;
pub mod period;
pub mod render;
pub mod wrap;

use wasm_bindgen::prelude::*;

use catalog::Catalog;
use conflict::detect_conflicts;
use grid::build_grid;
use model::Section;
use render::HtmlRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn selection<'a>(catalog: &'a Catalog, selected: &str) -> Result<Vec<&'a Section>, String> {
    let rows: Vec<usize> = serde_json::from_str(selected).map_err(|e| e.to_string())?;
    catalog.select(&rows).map_err(|e| e.to_string())
}

/// Detect slot conflicts in a selection. `selected` is a JSON array of
/// catalog row numbers; returns the conflict records as JSON.
#[wasm_bindgen(js_name = "checkConflicts")]
pub fn check_conflicts(catalog_csv: &str, selected: &str) -> Result<String, String> {
    let catalog = Catalog::parse(catalog_csv).map_err(|e| e.to_string())?;
    let selection = selection(&catalog, selected)?;
    let conflicts = detect_conflicts(&selection, catalog.code_column.is_some());
    export::conflicts_json(&conflicts).map_err(|e| e.to_string())
}

/// Render a selection's weekly timetable as an HTML document.
#[wasm_bindgen(js_name = "timetableHtml")]
pub fn timetable_html(
    catalog_csv: &str,
    selected: &str,
    include_weekend: bool,
) -> Result<String, String> {
    let catalog = Catalog::parse(catalog_csv).map_err(|e| e.to_string())?;
    let selection = selection(&catalog, selected)?;
    let grid = build_grid(&selection, include_weekend);
    Ok(HtmlRenderer::default().render(&grid))
}

/// Search course names and catalog codes; returns matches as JSON,
/// each with its catalog row number.
#[wasm_bindgen(js_name = "searchCatalog")]
pub fn search_catalog(catalog_csv: &str, query: &str) -> Result<String, String> {
    let catalog = Catalog::parse(catalog_csv).map_err(|e| e.to_string())?;
    let hits = catalog.search(query);
    serde_json::to_string(&hits).map_err(|e| e.to_string())
}

/// Headline numbers for a selection (course count, credits, departments)
/// as JSON.
#[wasm_bindgen(js_name = "selectionSummary")]
pub fn selection_summary(catalog_csv: &str, selected: &str) -> Result<String, String> {
    let catalog = Catalog::parse(catalog_csv).map_err(|e| e.to_string())?;
    let selection = selection(&catalog, selected)?;
    export::summary_json(&model::summarize(&selection)).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
課號,系所,科目名稱,星期,節次,授課教師,教室
MATH101,數學系,微積分,一,12,王大明,A101
MATH201,數學系,線性代數,一,23,李小華,A102
CS101,資工系,程式設計,二,56,林老師,C301
";

    #[test]
    fn test_check_conflicts_end_to_end() {
        let json = check_conflicts(CATALOG, "[0, 1, 2]").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["period"], "2");
        assert_eq!(value[0]["first"]["code"], "MATH101");
    }

    #[test]
    fn test_check_conflicts_rejects_bad_row() {
        assert!(check_conflicts(CATALOG, "[0, 99]").is_err());
        assert!(check_conflicts(CATALOG, "nonsense").is_err());
    }

    #[test]
    fn test_timetable_html_end_to_end() {
        let html = timetable_html(CATALOG, "[0, 2]", false).unwrap();
        assert!(html.contains("微積分"));
        assert!(html.contains("程式設計"));
        assert!(html.contains("<th>星期二</th>"));
    }

    #[test]
    fn test_search_catalog_end_to_end() {
        let json = search_catalog(CATALOG, "math").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["row"], 0);
        assert_eq!(value[0]["course_name"], "微積分");
    }

    #[test]
    fn test_selection_summary_end_to_end() {
        let json = selection_summary(CATALOG, "[0, 1]").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["courses"], 2);
        assert_eq!(value["departments"], 1);
    }

    #[test]
    fn test_malformed_catalog_is_reported() {
        let err = check_conflicts("not,a,catalog\n1,2,3\n", "[]").unwrap_err();
        assert!(err.contains("missing required column"));
    }
}
