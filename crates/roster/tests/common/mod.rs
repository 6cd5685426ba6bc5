//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use chrono::Utc;
use roster::app::App;
use roster::config::init;
use roster::domain::{Employee, EmployeeId, EmployeeStatus, NewEmployee};
use tempfile::TempDir;

/// An employee record with `id` reporting to `manager`.
pub fn employee(id: &str, manager: Option<&str>) -> Employee {
    let now = Utc::now();
    Employee {
        id: EmployeeId::new(id),
        name: format!("Employee {id}"),
        job_title: "Staff".to_string(),
        department: String::new(),
        manager_id: manager.map(EmployeeId::new),
        status: EmployeeStatus::Active,
        email: None,
        position_id: None,
        hire_date: None,
        created_at: now,
        updated_at: now,
    }
}

/// Employees `0..parents.len()` where `parents[i]` names the manager index.
pub fn forest(parents: &[Option<usize>]) -> Vec<Employee> {
    parents
        .iter()
        .enumerate()
        .map(|(i, parent)| {
            let manager = parent.map(|p| format!("e{p}"));
            employee(&format!("e{i}"), manager.as_deref())
        })
        .collect()
}

/// Payload for `App::create_employee`.
pub fn new_employee(name: &str, department: &str, manager: Option<&EmployeeId>) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        job_title: "Staff".to_string(),
        department: department.to_string(),
        manager_id: manager.cloned(),
        ..Default::default()
    }
}

/// A fresh workspace and an admin app opened on it.
pub async fn workspace() -> (TempDir, App) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    init(temp.path(), Some("Acme"), None)
        .await
        .expect("Failed to initialize workspace");
    let app = App::from_directory(temp.path(), None)
        .await
        .expect("Failed to open workspace");
    (temp, app)
}

/// Run the roster binary in `dir` with colors off.
pub fn run_roster_in_dir(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_roster"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("ROSTER_ASCII", "1")
        .output()
        .expect("Failed to execute roster binary")
}

/// Run a command that must succeed and return its stdout.
pub fn roster_ok(dir: &std::path::Path, args: &[&str]) -> String {
    let output = run_roster_in_dir(dir, args);
    assert!(
        output.status.success(),
        "roster {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
