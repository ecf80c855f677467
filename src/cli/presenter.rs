//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::task::{Task, TaskStatus};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        let style = match style.template("{spinner:.cyan} {msg}") {
            Ok(style) => style,
            Err(_) => return,
        };
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual command output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Format a status as a colored badge
    pub fn status_badge(&self, status: TaskStatus) -> String {
        let label = status.label();
        match status {
            TaskStatus::Open => label.green().to_string(),
            TaskStatus::Pause => label.yellow().to_string(),
            TaskStatus::Continue => label.cyan().to_string(),
            TaskStatus::Important => label.red().bold().to_string(),
            TaskStatus::Close => label.dimmed().to_string(),
        }
    }

    /// Print a one-line task summary to stdout
    pub fn task_line(&self, task: &Task) {
        let mut line = format!(
            "{:>5}  {}  {}",
            format!("#{}", task.id).cyan(),
            self.status_badge(task.status),
            task.title
        );
        if let Some(description) = task.description.as_deref() {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        println!("{}", line);
    }

    /// Print a key-value pair (for config list and task details)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
