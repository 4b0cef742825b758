//! Fixed reference data: the 13 teaching periods and the weekday glyphs.

/// All period-codes in display order: numeric codes, then letter codes.
pub const PERIOD_CODES: [char; 13] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D',
];

/// Clock range of a period-code, e.g. `'3'` -> `"10:10-11:00"`.
pub fn time_range(code: char) -> Option<&'static str> {
    match code {
        '1' => Some("08:10-09:00"),
        '2' => Some("09:10-10:00"),
        '3' => Some("10:10-11:00"),
        '4' => Some("11:10-12:00"),
        '5' => Some("12:10-13:00"),
        '6' => Some("13:10-14:00"),
        '7' => Some("14:10-15:00"),
        '8' => Some("15:10-16:00"),
        '9' => Some("16:10-17:00"),
        'A' => Some("17:10-18:00"),
        'B' => Some("18:10-19:00"),
        'C' => Some("19:10-20:00"),
        'D' => Some("20:10-21:00"),
        _ => None,
    }
}

pub fn is_period_code(code: char) -> bool {
    time_range(code).is_some()
}

/// Two-key row ordering: numeric codes before letter codes,
/// each group in its natural order.
pub fn period_sort_key(code: char) -> (bool, char) {
    (code.is_ascii_alphabetic(), code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub const MONDAY_TO_FRIDAY: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Map a catalog weekday glyph to its canonical day.
    /// Anything outside the seven glyphs is an opaque key and maps to nothing.
    pub fn from_glyph(glyph: &str) -> Option<Weekday> {
        match glyph.trim() {
            "一" => Some(Weekday::Monday),
            "二" => Some(Weekday::Tuesday),
            "三" => Some(Weekday::Wednesday),
            "四" => Some(Weekday::Thursday),
            "五" => Some(Weekday::Friday),
            "六" => Some(Weekday::Saturday),
            "日" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Weekday::Monday => '一',
            Weekday::Tuesday => '二',
            Weekday::Wednesday => '三',
            Weekday::Thursday => '四',
            Weekday::Friday => '五',
            Weekday::Saturday => '六',
            Weekday::Sunday => '日',
        }
    }

    /// Display label for grid headers.
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "星期一",
            Weekday::Tuesday => "星期二",
            Weekday::Wednesday => "星期三",
            Weekday::Thursday => "星期四",
            Weekday::Friday => "星期五",
            Weekday::Saturday => "星期六",
            Weekday::Sunday => "星期日",
        }
    }
}
