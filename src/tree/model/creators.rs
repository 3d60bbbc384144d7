use super::objects::ProbabilityTable;

/// Root table from `P(false)` and `P(true)`.
pub fn prior(absent: f64, present: f64) -> ProbabilityTable {
    ProbabilityTable::Prior([absent, present])
}

/// Conditional table from its two rows.
///
/// `absent_row = [P(child=0 | parent=0), P(child=0 | parent=1)]`,
/// `present_row = [P(child=1 | parent=0), P(child=1 | parent=1)]`.
pub fn conditional(absent_row: [f64; 2], present_row: [f64; 2]) -> ProbabilityTable {
    ProbabilityTable::Conditional([absent_row, present_row])
}

/// Conditional table from `P(child=1 | parent=0)` and `P(child=1 | parent=1)`.
pub fn conditional_on(present_given_absent: f64, present_given_present: f64) -> ProbabilityTable {
    conditional(
        [1.0 - present_given_absent, 1.0 - present_given_present],
        [present_given_absent, present_given_present],
    )
}
