//! Color and styling helpers for CLI output.
//!
//! Semantic theme:
//!   - green:   active employees, successful actions
//!   - yellow:  on leave, warnings
//!   - red:     terminated, errors
//!   - cyan:    record ids
//!   - dimmed:  field labels, tree connectors
//!   - bold:    names, section headers

use colored::Colorize;

use super::OutputConfig;
use crate::domain::EmployeeStatus;

/// Green text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Yellow text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Cyan record id.
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Status text colored by status.
pub(crate) fn colorize_status(status: EmployeeStatus, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        EmployeeStatus::Active => text.green().to_string(),
        EmployeeStatus::OnLeave => text.yellow().to_string(),
        EmployeeStatus::Terminated => text.red().to_string(),
    }
}

/// Status icon, with ASCII fallback.
pub(crate) fn status_icon(status: EmployeeStatus, config: &OutputConfig) -> String {
    let icon = match (status, config.use_ascii) {
        (EmployeeStatus::Active, true) => "+",
        (EmployeeStatus::OnLeave, true) => "~",
        (EmployeeStatus::Terminated, true) => "x",
        (EmployeeStatus::Active, false) => "●",
        (EmployeeStatus::OnLeave, false) => "◐",
        (EmployeeStatus::Terminated, false) => "○",
    };
    if !config.use_colors {
        return icon.to_string();
    }
    match status {
        EmployeeStatus::Active => icon.green().to_string(),
        EmployeeStatus::OnLeave => icon.yellow().to_string(),
        EmployeeStatus::Terminated => icon.red().to_string(),
    }
}

/// Dimmed text.
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Bold text.
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
