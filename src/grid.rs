//! Weekly timetable grid assembly.
//!
//! The grid is a (period-code, weekday) matrix of rendered section
//! summaries. The full 13 x 7 cell matrix is allocated up front, then the
//! displayed row/column key sets are chosen: rows are the valid
//! period-codes the selection actually uses (all 13 as the empty-selection
//! skeleton), columns are always the canonical Monday..Friday or
//! Monday..Sunday set.

use crate::model::Section;
use crate::period::{self, PERIOD_CODES, Weekday};
use crate::wrap::wrap;
use std::collections::HashMap;

/// Display-column limit for wrapped course names.
pub const NAME_WRAP_COLS: usize = 24;
/// Display-column limit for wrapped instructor and room text.
pub const FIELD_WRAP_COLS: usize = 20;

/// One section's rendered summary inside a cell, each field pre-wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry {
    pub course_name: Vec<String>,
    pub instructor: Vec<String>,
    pub room: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimetableGrid {
    periods: Vec<char>,
    weekdays: Vec<Weekday>,
    cells: HashMap<(char, Weekday), Vec<CellEntry>>,
}

impl TimetableGrid {
    /// Row keys in display order.
    pub fn periods(&self) -> &[char] {
        &self.periods
    }

    /// Column keys in display order.
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Entries at (period, weekday). Every pair inside the declared
    /// row/column sets is addressable (possibly empty); pairs outside
    /// yield nothing.
    pub fn cell(&self, code: char, day: Weekday) -> Option<&[CellEntry]> {
        if !self.periods.contains(&code) || !self.weekdays.contains(&day) {
            return None;
        }
        self.cells.get(&(code, day)).map(Vec::as_slice)
    }
}

fn cell_entry(section: &Section) -> CellEntry {
    CellEntry {
        course_name: wrap(&section.course_name, NAME_WRAP_COLS),
        instructor: wrap(&section.instructor, FIELD_WRAP_COLS),
        room: wrap(&section.room, FIELD_WRAP_COLS),
    }
}

/// Build the timetable grid for a selection.
///
/// Placement walks the selection in order, so multiple sections in one
/// cell keep selection order. Sections whose weekday glyph maps to no
/// canonical day occupy row keys but no cell; period-codes outside the
/// fixed table are ignored entirely.
pub fn build_grid(selection: &[&Section], include_weekend: bool) -> TimetableGrid {
    let mut cells: HashMap<(char, Weekday), Vec<CellEntry>> = HashMap::new();
    for code in PERIOD_CODES {
        for day in Weekday::ALL {
            cells.insert((code, day), Vec::new());
        }
    }

    let mut used: Vec<char> = Vec::new();
    for section in selection {
        let day = Weekday::from_glyph(&section.weekday);
        let entry = cell_entry(section);
        for code in section.period_codes() {
            if !period::is_period_code(code) {
                continue;
            }
            if !used.contains(&code) {
                used.push(code);
            }
            if let Some(day) = day {
                if let Some(cell) = cells.get_mut(&(code, day)) {
                    cell.push(entry.clone());
                }
            }
        }
    }

    let periods = if used.is_empty() {
        PERIOD_CODES.to_vec()
    } else {
        used.sort_by_key(|&c| period::period_sort_key(c));
        used
    };
    let weekdays = if include_weekend {
        Weekday::ALL.to_vec()
    } else {
        Weekday::MONDAY_TO_FRIDAY.to_vec()
    };

    TimetableGrid { periods, weekdays, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, weekday: &str, periods: &str) -> Section {
        Section {
            department: "數學系".to_string(),
            course_name: name.to_string(),
            class_group: None,
            instructor: "王大明".to_string(),
            room: "A101".to_string(),
            weekday: weekday.to_string(),
            periods: periods.to_string(),
            credits: None,
            code: None,
        }
    }

    #[test]
    fn test_empty_selection_renders_full_skeleton() {
        let grid = build_grid(&[], false);
        assert_eq!(grid.periods(), PERIOD_CODES);
        assert_eq!(grid.weekdays().len(), 5);
        for &code in grid.periods() {
            for &day in grid.weekdays() {
                assert_eq!(grid.cell(code, day), Some(&[][..]));
            }
        }
    }

    #[test]
    fn test_rows_are_used_codes_in_two_key_order() {
        let a = section("微積分", "一", "A2");
        let b = section("普通物理", "三", "9B");
        let grid = build_grid(&[&a, &b], false);
        assert_eq!(grid.periods(), ['2', '9', 'A', 'B']);
    }

    #[test]
    fn test_placement_lands_on_mapped_weekday() {
        let a = section("微積分", "一", "34");
        let grid = build_grid(&[&a], false);

        let cell = grid.cell('3', Weekday::Monday).unwrap();
        assert_eq!(cell.len(), 1);
        assert_eq!(cell[0].course_name, vec!["微積分"]);
        assert_eq!(grid.cell('4', Weekday::Monday).map(<[_]>::len), Some(1));
        assert_eq!(grid.cell('3', Weekday::Tuesday), Some(&[][..]));
    }

    #[test]
    fn test_shared_cell_keeps_selection_order() {
        let a = section("微積分", "一", "3");
        let b = section("線性代數", "一", "3");
        let grid = build_grid(&[&a, &b], false);
        let cell = grid.cell('3', Weekday::Monday).unwrap();
        assert_eq!(cell.len(), 2);
        assert_eq!(cell[0].course_name, vec!["微積分"]);
        assert_eq!(cell[1].course_name, vec!["線性代數"]);
    }

    #[test]
    fn test_weekend_column_toggle() {
        let sunday = section("日文", "日", "5");

        let weekend = build_grid(&[&sunday], true);
        assert_eq!(weekend.weekdays().len(), 7);
        assert_eq!(weekend.cell('5', Weekday::Sunday).map(<[_]>::len), Some(1));

        // without weekend columns the section shows up nowhere,
        // but its period still claims a row
        let weekday_only = build_grid(&[&sunday], false);
        assert_eq!(weekday_only.weekdays().len(), 5);
        assert_eq!(weekday_only.periods(), ['5']);
        assert_eq!(weekday_only.cell('5', Weekday::Sunday), None);
        for &day in weekday_only.weekdays() {
            assert_eq!(weekday_only.cell('5', day), Some(&[][..]));
        }
    }

    #[test]
    fn test_unmapped_weekday_claims_rows_but_no_cell() {
        let odd = section("彈性課程", "彈", "5");
        let grid = build_grid(&[&odd], true);
        assert_eq!(grid.periods(), ['5']);
        for &day in grid.weekdays() {
            assert_eq!(grid.cell('5', day), Some(&[][..]));
        }
    }

    #[test]
    fn test_invalid_period_codes_never_enter_grid() {
        let bad = section("實驗", "一", "X5");
        let grid = build_grid(&[&bad], false);
        assert_eq!(grid.periods(), ['5']);
        assert_eq!(grid.cell('X', Weekday::Monday), None);
        assert_eq!(grid.cell('5', Weekday::Monday).map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_cell_outside_declared_rows_is_not_addressable() {
        let a = section("微積分", "一", "3");
        let grid = build_grid(&[&a], false);
        assert_eq!(grid.cell('4', Weekday::Monday), None);
    }

    #[test]
    fn test_long_fields_are_wrapped() {
        let mut a = section("高等微積分與向量分析專題討論", "一", "3");
        a.instructor = "王大明、李小華、張三豐".to_string();
        let grid = build_grid(&[&a], false);
        let cell = grid.cell('3', Weekday::Monday).unwrap();
        assert_eq!(
            cell[0].course_name,
            vec!["高等微積分與向量分析專題", "討論"]
        );
        assert!(cell[0].instructor.len() > 1);
    }

    #[test]
    fn test_build_is_idempotent() {
        let a = section("微積分", "一", "34");
        let b = section("線性代數", "一", "4");
        let first = build_grid(&[&a, &b], true);
        let second = build_grid(&[&a, &b], true);
        assert_eq!(first, second);
    }
}
