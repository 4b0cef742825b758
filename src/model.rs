use serde::Serialize;

/// One schedulable catalog row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub department: String,
    pub course_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_group: Option<String>,
    pub instructor: String,
    pub room: String,
    /// Raw weekday glyph from the catalog (一..日, or an opaque value).
    pub weekday: String,
    /// Raw period string; each char is one period-code.
    pub periods: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Section {
    /// Period-codes in field order. An empty field yields no slots.
    pub fn period_codes(&self) -> impl Iterator<Item = char> + '_ {
        self.periods.chars()
    }
}

/// Headline numbers for a selection: the original statistics panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub courses: usize,
    pub total_credits: f64,
    pub departments: usize,
}

pub fn summarize(selection: &[&Section]) -> SelectionSummary {
    let total_credits = selection.iter().filter_map(|s| s.credits).sum();
    let mut departments: Vec<&str> = selection.iter().map(|s| s.department.as_str()).collect();
    departments.sort();
    departments.dedup();
    SelectionSummary {
        courses: selection.len(),
        total_credits,
        departments: departments.len(),
    }
}
