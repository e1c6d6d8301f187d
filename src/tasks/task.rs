use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format expected for target dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Task priority
///
/// Serialized in lowercase (`high`, `medium`, `low`) in both store formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort key: High = 1, Medium = 2, Low = 3
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Lowercase form used for display and storage
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse user input, falling back to Medium for anything unrecognized
    ///
    /// Returns the priority and whether the fallback was applied.
    pub fn from_input(input: &str) -> (Priority, bool) {
        match input.parse::<Priority>() {
            Ok(priority) => (priority, false),
            Err(_) => (Priority::Medium, true),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: high, medium, low",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a task computed at query time (never stored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Done,
    Overdue,
    Pending,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Done => "Done",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Pending => "Pending",
        };
        f.write_str(label)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Non-empty description of the work
    pub description: String,
    pub priority: Priority,
    /// Raw target date as entered, expected as YYYY-MM-DD but not enforced
    pub target_date: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(
        description: impl Into<String>,
        priority: Priority,
        target_date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            priority,
            target_date: target_date.into(),
            completed: false,
        }
    }

    /// Parsed target date, or `None` when the stored string is not a valid YYYY-MM-DD date
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.target_date, DATE_FORMAT).ok()
    }

    /// Not completed and due strictly before `today`
    ///
    /// An unparseable target date is never overdue.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date().is_some_and(|due| due < today)
    }

    pub fn status_on(&self, today: NaiveDate) -> TaskStatus {
        if self.completed {
            TaskStatus::Done
        } else if self.is_overdue_on(today) {
            TaskStatus::Overdue
        } else {
            TaskStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
        assert_eq!(Priority::High.rank(), 1);
        assert_eq!(Priority::Low.rank(), 3);
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" Low ".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("mEdIuM".parse::<Priority>(), Ok(Priority::Medium));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_from_input_falls_back_to_medium() {
        assert_eq!(Priority::from_input("urgent"), (Priority::Medium, true));
        assert_eq!(Priority::from_input(""), (Priority::Medium, true));
        assert_eq!(Priority::from_input("High"), (Priority::High, false));
    }

    #[test]
    fn test_old_task_is_overdue() {
        let task = Task::new("Old", Priority::Low, "2000-01-01");
        assert!(task.is_overdue_on(date("2000-01-02")));
        assert_eq!(task.status_on(date("2024-06-30")), TaskStatus::Overdue);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let task = Task::new("Today", Priority::High, "2024-05-10");
        assert!(!task.is_overdue_on(date("2024-05-10")));
        assert_eq!(task.status_on(date("2024-05-10")), TaskStatus::Pending);
    }

    #[test]
    fn test_completed_task_is_always_done() {
        let mut task = Task::new("Old", Priority::Low, "2000-01-01");
        task.completed = true;
        assert!(!task.is_overdue_on(date("2030-01-01")));
        assert_eq!(task.status_on(date("2030-01-01")), TaskStatus::Done);
        assert_eq!(task.status_on(date("1999-01-01")), TaskStatus::Done);
    }

    #[test]
    fn test_malformed_date_is_never_overdue() {
        for raw in ["not-a-date", "", "2024/01/01", "2024-13-01", "01-01-2000"] {
            let task = Task::new("Odd", Priority::Medium, raw);
            assert_eq!(task.due_date(), None, "{raw} should not parse");
            assert_eq!(task.status_on(date("2099-12-31")), TaskStatus::Pending);
        }
    }
}
