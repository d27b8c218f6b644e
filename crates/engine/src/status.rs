//! Status token classification
//!
//! Raw status tokens are free text from the terminal ("P", "A *", "WO",
//! "SUBSTITUTE", ...). Tokens are not mutually exclusive substrings —
//! "SUBL" contains "L", "A *" contains "A" — so the rule order below is
//! the tie-break mechanism and must not be rearranged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical attendance category for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Present,
    Absent,
    /// Weekly off / holiday; counts as present, with conditional allowance
    WeeklyOff,
    PersonalLeave,
    SickLeave,
    CasualLeave,
    SubstituteLeave,
    /// Duty leave also increments the other-leave counter (see summary)
    DutyLeave,
    OtherLeave,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Present => "Present",
            Category::Absent => "Absent",
            Category::WeeklyOff => "Weekly Off",
            Category::PersonalLeave => "Personal Leave",
            Category::SickLeave => "Sick Leave",
            Category::CasualLeave => "Casual Leave",
            Category::SubstituteLeave => "Substitute Leave",
            Category::DutyLeave => "Duty Leave",
            Category::OtherLeave => "Other Leave",
        };
        write!(f, "{name}")
    }
}

/// Classify a raw status token
///
/// Case-insensitive substring rules evaluated in fixed priority order;
/// the first match wins.
#[must_use]
pub fn classify(raw_status: &str) -> Category {
    let status = raw_status.trim().to_uppercase();

    if status.contains('P') || status.contains("A *") {
        Category::Present
    } else if status == "A" {
        Category::Absent
    } else if status.contains("WO") || status.contains("HO") {
        Category::WeeklyOff
    } else if status.contains("PL") {
        Category::PersonalLeave
    } else if status.contains("SL") {
        Category::SickLeave
    } else if status.contains("CL") {
        Category::CasualLeave
    } else if status.contains("SUBSTITUTE") || status.contains("SUBL") {
        Category::SubstituteLeave
    } else if status.contains("DUTY") {
        Category::DutyLeave
    } else if status.contains('L') {
        Category::OtherLeave
    } else {
        Category::OtherLeave
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_tokens() {
        assert_eq!(classify("P"), Category::Present);
        assert_eq!(classify("P 09:00 18:00"), Category::Present);
        assert_eq!(classify("a *"), Category::Present);
        assert_eq!(classify("Present"), Category::Present);
    }

    #[test]
    fn test_exact_absent() {
        assert_eq!(classify("A"), Category::Absent);
        assert_eq!(classify(" a "), Category::Absent);
    }

    #[test]
    fn test_weekly_off() {
        assert_eq!(classify("WO"), Category::WeeklyOff);
        assert_eq!(classify("HO"), Category::WeeklyOff);
    }

    #[test]
    fn test_leave_tokens() {
        assert_eq!(classify("SL"), Category::SickLeave);
        assert_eq!(classify("CL"), Category::CasualLeave);
        assert_eq!(classify("SUBSTITUTE"), Category::SubstituteLeave);
        assert_eq!(classify("SUBL"), Category::SubstituteLeave);
        assert_eq!(classify("DUTY"), Category::DutyLeave);
    }

    #[test]
    fn test_rule_order_is_the_tie_break() {
        // "PL" contains "P", so the Present rule wins over the PL rule, and
        // "SUBL" contains "L" but the substitute rule outranks residual L.
        assert_eq!(classify("PL"), Category::Present);
        assert_eq!(classify("SUBL"), Category::SubstituteLeave);
    }

    #[test]
    fn test_residual_l_and_unknown() {
        assert_eq!(classify("EL"), Category::OtherLeave);
        assert_eq!(classify("XYZ"), Category::OtherLeave);
        assert_eq!(classify(""), Category::OtherLeave);
    }
}
