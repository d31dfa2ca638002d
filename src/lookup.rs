//! Fixed lookup tables shared by the entry form and the report engine.

/// Closed set of category codes accepted at entry time, stored upper-cased.
pub const VALID_CATEGORIES: [&str; 15] = [
    "GROC", "HOME", "TAKE", "PERS", "MISC", "EAT", "FUEL", "SUB", "REB", "BILL", "VET", "MORT",
    "PHON", "PETS", "CAR",
];

/// Synthetic category assigned to totals rows; never a valid entry category.
pub const TOTAL_CATEGORY: &str = "TOTAL";

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn is_valid_category(code: &str) -> bool {
    VALID_CATEGORIES.contains(&code)
}

/// Resolves a three-letter month prefix (any case) to its 1-based number.
pub fn month_from_abbrev(token: &str) -> Option<u32> {
    let lowered = token.to_lowercase();
    let prefix: String = lowered.chars().take(3).collect();
    MONTH_ABBREVS
        .iter()
        .position(|abbrev| *abbrev == prefix)
        .map(|index| index as u32 + 1)
}

pub fn month_abbrev(month: u32) -> &'static str {
    debug_assert!((1..=12).contains(&month));
    &MONTH_NAMES[(month - 1) as usize][..3]
}

pub fn month_name(month: u32) -> &'static str {
    debug_assert!((1..=12).contains(&month));
    MONTH_NAMES[(month - 1) as usize]
}
