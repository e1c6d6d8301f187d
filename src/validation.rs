//! Input validation helpers for the interactive menu
//!
//! Parsing happens here, at the terminal boundary, so `TaskStore` only ever
//! receives integer indices.

use crate::error::TaskError;
use crate::tasks::Priority;
use std::num::IntErrorKind;

/// Parse a 1-based task number typed by the user
///
/// # Arguments
/// * `input` - Raw line as read from the terminal
/// * `len` - Number of tasks currently listed
///
/// # Returns
/// The number when it lies in `[1, len]`. Input that is not an integer is
/// `TaskError::InvalidNumber`; any integer outside the range, negative or too
/// large to represent included, is `TaskError::IndexOutOfRange`.
pub fn parse_task_number(input: &str, len: usize) -> Result<usize, TaskError> {
    let trimmed = input.trim();
    let number = match trimmed.parse::<i64>() {
        Ok(number) => number,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        Err(_) => return Err(TaskError::InvalidNumber(trimmed.to_string())),
    };

    usize::try_from(number)
        .ok()
        .filter(|index| (1..=len).contains(index))
        .ok_or(TaskError::IndexOutOfRange { index: number, len })
}

/// True when the priority input will be replaced by the Medium fallback
pub fn is_unknown_priority(input: &str) -> bool {
    Priority::from_input(input).1
}

/// Interpret a confirmation answer; only `yes` (any case) confirms
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}
