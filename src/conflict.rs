//! Pairwise slot-collision detection over a selection of sections.

use crate::model::Section;
use crate::period;
use serde::Serialize;
use std::collections::HashMap;

/// One colliding pair at one (weekday, period) slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    /// Raw weekday glyph of the slot.
    pub weekday: String,
    pub period: char,
    /// Clock range of the period, empty for a code outside the fixed table.
    pub time: String,
    pub first: ConflictSide,
    pub second: ConflictSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictSide {
    pub course_name: String,
    pub instructor: String,
    pub department: String,
    pub room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Conflict {
    /// Slot label in the catalog's own notation, e.g. `一 第3節 (10:10-11:00)`.
    pub fn slot_label(&self) -> String {
        format!("{} 第{}節 ({})", self.weekday, self.period, self.time)
    }
}

fn side(section: &Section, include_codes: bool) -> ConflictSide {
    ConflictSide {
        course_name: section.course_name.clone(),
        instructor: section.instructor.clone(),
        department: section.department.clone(),
        room: section.room.clone(),
        code: if include_codes { section.code.clone() } else { None },
    }
}

/// Find every pair of sections sharing a (weekday, period) slot.
///
/// Sections are processed in selection order, each period-code in field
/// order. A section landing on a slot with k earlier occupants emits k
/// records, each pairing an occupant (`first`) with the newcomer
/// (`second`), so a three-way collision reports all three pairs. Slots key
/// on the raw weekday glyph: sections sharing an unmapped glyph still
/// collide. Codes are attached only when the catalog-code column was
/// detected (`include_codes`).
pub fn detect_conflicts<'a>(selection: &[&'a Section], include_codes: bool) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut occupants: HashMap<(&'a str, char), Vec<usize>> = HashMap::new();

    for (index, section) in selection.iter().enumerate() {
        for code in section.period_codes() {
            let slot = occupants.entry((section.weekday.as_str(), code)).or_default();
            for &prior in slot.iter() {
                conflicts.push(Conflict {
                    weekday: section.weekday.clone(),
                    period: code,
                    time: period::time_range(code).unwrap_or("").to_string(),
                    first: side(selection[prior], include_codes),
                    second: side(section, include_codes),
                });
            }
            slot.push(index);
        }
    }
    conflicts
}
