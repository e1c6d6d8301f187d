//! Interactive menu loop
//!
//! Reads menu choices and prompt answers line by line from any `BufRead` and
//! writes everything to any `Write`, so a whole session can be scripted.

use crate::error::TaskError;
use crate::formatting;
use crate::tasks::{Task, TaskStore};
use crate::validation;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::warn;

const MENU: &str = "To-Do List App
1. Add Task
2. View Tasks
3. Mark Task as Completed
4. Remove Task
5. View Overdue Tasks
6. Exit
";

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Complete,
    Remove,
    Overdue,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::View),
            "3" => Ok(MenuChoice::Complete),
            "4" => Ok(MenuChoice::Remove),
            "5" => Ok(MenuChoice::Overdue),
            "6" => Ok(MenuChoice::Exit),
            other => Err(format!("Invalid menu choice '{}'", other)),
        }
    }
}

/// Run the menu until the user exits or input ends
///
/// Task errors are reported to `output` and never end the loop. The store is
/// saved once more on exit. Only terminal I/O failures are returned.
pub fn run<R: BufRead, W: Write>(store: &mut TaskStore, input: R, output: W) -> Result<()> {
    Session {
        store,
        input,
        output,
    }
    .run()
}

struct Session<'a, R, W> {
    store: &'a mut TaskStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            // EOF behaves like Exit
            let Some(line) = self.prompt("Choose an option: ")? else {
                return self.exit();
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Add) => self.add_task()?,
                Ok(MenuChoice::View) => self.view_tasks()?,
                Ok(MenuChoice::Complete) => self.complete_task()?,
                Ok(MenuChoice::Remove) => self.remove_task()?,
                Ok(MenuChoice::Overdue) => self.view_overdue()?,
                Ok(MenuChoice::Exit) => return self.exit(),
                Err(_) => writeln!(
                    self.output,
                    "Invalid choice! Please enter a number between 1 and 6."
                )?,
            }
        }
    }

    /// Print `message` and read one trimmed line, `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &TaskError) -> Result<()> {
        match err {
            TaskError::IndexOutOfRange { .. } => writeln!(self.output, "Invalid task number!")?,
            TaskError::InvalidNumber(_) => {
                writeln!(self.output, "Invalid input! Please enter a valid number.")?
            }
            other => {
                if other.is_storage() {
                    warn!(error = %other, "store file operation failed");
                }
                writeln!(self.output, "{}", other)?
            }
        }
        Ok(())
    }

    /// Report a failed save after a mutation; the in-memory change stands
    fn after_mutation(&mut self, result: Result<Task, TaskError>) -> Result<bool> {
        match result {
            Ok(_) => Ok(true),
            Err(e) if e.is_storage() => {
                self.report(&e)?;
                Ok(true)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(false)
            }
        }
    }

    fn add_task(&mut self) -> Result<()> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(());
        };
        if description.is_empty() {
            return self.report(&TaskError::EmptyDescription);
        }

        let Some(priority) = self.prompt("Enter priority (High/Medium/Low): ")? else {
            return Ok(());
        };
        if validation::is_unknown_priority(&priority) {
            writeln!(self.output, "Invalid priority! Setting to Medium.")?;
        }

        let Some(target_date) = self.prompt("Enter target completion date (YYYY-MM-DD): ")?
        else {
            return Ok(());
        };

        let result = self.store.add(&description, &priority, &target_date);
        if self.after_mutation(result)? {
            self.view_tasks()?;
        }
        Ok(())
    }

    fn view_tasks(&mut self) -> Result<()> {
        let table = formatting::format_task_table(&self.store.list());
        write!(self.output, "{}", table)?;
        Ok(())
    }

    /// Show the table and read a task number in range; `None` when there is nothing to act on
    fn select_task(&mut self, message: &str) -> Result<Option<usize>> {
        self.view_tasks()?;
        if self.store.is_empty() {
            return Ok(None);
        }
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match validation::parse_task_number(&raw, self.store.len()) {
            Ok(index) => Ok(Some(index)),
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    fn complete_task(&mut self) -> Result<()> {
        let Some(index) = self.select_task("Enter task number to mark as completed: ")? else {
            return Ok(());
        };

        let result = self.store.complete(index);
        if self.after_mutation(result)? {
            writeln!(self.output, "Task marked as completed!")?;
            self.view_tasks()?;
        }
        Ok(())
    }

    fn remove_task(&mut self) -> Result<()> {
        let Some(index) = self.select_task("Enter task number to remove: ")? else {
            return Ok(());
        };
        let Some(answer) = self.prompt("Are you sure you want to remove this task? (yes/no): ")?
        else {
            return Ok(());
        };
        if !validation::is_confirmed(&answer) {
            return Ok(());
        }

        let result = self.store.remove(index);
        if self.after_mutation(result)? {
            writeln!(self.output, "Task removed successfully!")?;
            self.view_tasks()?;
        }
        Ok(())
    }

    fn view_overdue(&mut self) -> Result<()> {
        let overdue = formatting::format_overdue(&self.store.overdue_tasks());
        write!(self.output, "{}", overdue)?;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        if let Err(e) = self.store.save() {
            self.report(&e)?;
        }
        writeln!(self.output, "Goodbye, have a good day!")?;
        self.output.flush()?;
        Ok(())
    }
}
