//! End-to-end workflows through `App` on a file-backed workspace.

use rstest::rstest;

use roster::access::Role;
use roster::app::{App, ReportSource};
use roster::domain::{EmployeeFilter, EmployeeUpdate, NewPosition, PositionUpdate};
use roster::error::{Error, GuardError, StoreError};
use roster::report::{to_csv, Predicate};

mod common;
use common::{new_employee, workspace};

#[tokio::test]
async fn test_reassignment_is_guarded_and_persisted() {
    let (temp, mut app) = workspace().await;
    let ceo = app.create_employee(new_employee("Dana", "Exec", None)).await.unwrap();
    let cto = app
        .create_employee(new_employee("Lee", "Engineering", Some(&ceo.id)))
        .await
        .unwrap();
    let dev = app
        .create_employee(new_employee("Sam", "Engineering", Some(&cto.id)))
        .await
        .unwrap();

    let err = app.assign_manager(&ceo.id, &dev.id).await.unwrap_err();
    assert!(matches!(err, Error::Guard(GuardError::WouldCreateCycle { .. })));
    assert!(err.to_string().contains("circular reporting structure"));

    app.assign_manager(&dev.id, &ceo.id).await.unwrap();

    let reopened = App::from_directory(temp.path(), None).await.unwrap();
    let tree = reopened.employee_tree(None, None).await.unwrap();
    assert_eq!(tree.len(), 1);
    let labels: Vec<_> = tree[0].children.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["Lee", "Sam"]);
}

#[tokio::test]
async fn test_deleting_a_manager_promotes_reports_to_roots() {
    let (_temp, mut app) = workspace().await;
    let boss = app.create_employee(new_employee("Boss", "Ops", None)).await.unwrap();
    let report = app
        .create_employee(new_employee("Report", "Ops", Some(&boss.id)))
        .await
        .unwrap();

    app.delete_employee(&boss.id).await.unwrap();

    let tree = app.employee_tree(None, None).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].id, report.id.to_string());

    let checks = app.check_structure().await.unwrap();
    assert_eq!(checks[0].dangling, vec![(report.id.to_string(), boss.id.to_string())]);
}

#[tokio::test]
async fn test_unknown_records_are_not_found() {
    let (_temp, mut app) = workspace().await;
    let ghost = roster::domain::EmployeeId::new("acme-zzzz");

    let err = app
        .update_employee(
            &ghost,
            EmployeeUpdate {
                department: Some("Sales".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NotFound { .. })));
    assert!(app.employee_tree(Some(&ghost), None).await.is_err());
}

#[tokio::test]
async fn test_position_moves_are_guarded() {
    let (_temp, mut app) = workspace().await;
    let head = app
        .create_position(NewPosition {
            title: "Head of Engineering".to_string(),
            code: "eng-head".to_string(),
            headcount: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(head.code, "ENG-HEAD");

    let lead = app
        .create_position(NewPosition {
            title: "Team Lead".to_string(),
            code: "ENG-LEAD".to_string(),
            reports_to_position_id: Some(head.id.clone()),
            headcount: 3,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(app.assign_position_parent(&head.id, Some(&lead.id)).await.is_err());
    let moved = app.assign_position_parent(&lead.id, None).await.unwrap();
    assert!(moved.reports_to_position_id.is_none());
    assert_eq!(app.position_tree(None, None).await.unwrap().len(), 2);
}

#[rstest]
#[case::manager(Role::Manager, 2)]
#[case::employee(Role::Employee, 1)]
#[case::hr(Role::HrManager, 3)]
#[tokio::test]
async fn test_visible_scope_by_role(#[case] role: Role, #[case] expected: usize) {
    let (temp, mut app) = workspace().await;
    let top = app.create_employee(new_employee("Top", "Exec", None)).await.unwrap();
    let mid = app
        .create_employee(new_employee("Mid", "Ops", Some(&top.id)))
        .await
        .unwrap();
    app.create_employee(new_employee("Low", "Ops", Some(&mid.id)))
        .await
        .unwrap();

    // Link the session to `mid`.
    let config_path = temp.path().join(".roster/config.yaml");
    let mut config = roster::config::RosterConfig::load(&config_path).await.unwrap();
    config.session.employee_id = Some(mid.id.clone());
    config.save(&config_path).await.unwrap();

    let scoped = App::from_directory(temp.path(), Some(role)).await.unwrap();
    if role == Role::Employee {
        // No access to the employee module; self-service lookup only.
        assert!(scoped.list_employees(&EmployeeFilter::default()).await.is_err());
        assert!(scoped.employee_details(&mid.id).await.is_ok());
        assert!(scoped.employee_details(&top.id).await.is_err());
    } else {
        let visible = scoped.list_employees(&EmployeeFilter::default()).await.unwrap();
        assert_eq!(visible.len(), expected);
    }
}

#[tokio::test]
async fn test_engineering_report_matches_case_insensitively() {
    let (_temp, mut app) = workspace().await;
    app.create_employee(new_employee("Ada", "Engineering", None)).await.unwrap();
    app.create_employee(new_employee("Grace", "engineering", None)).await.unwrap();
    app.create_employee(new_employee("Linus", "Sales", None)).await.unwrap();

    let predicates = ["department:equals:Engineering".parse::<Predicate>().unwrap()];
    let fields = vec!["name".to_string(), "department".to_string()];
    let table = app
        .report(ReportSource::Employees, &predicates, &fields)
        .await
        .unwrap();

    assert_eq!(
        to_csv(&table),
        "name,department\nAda,Engineering\nGrace,engineering"
    );
}

#[tokio::test]
async fn test_manager_cannot_read_payroll_reports() {
    let (temp, _app) = workspace().await;
    let manager = App::from_directory(temp.path(), Some(Role::Manager)).await.unwrap();

    let err = manager
        .report(ReportSource::Payroll, &[], &[])
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Role 'manager' is not allowed to read payroll"
    );
}

fn employee_line(id: &str, name: &str, manager: Option<&str>) -> String {
    let manager = manager.map_or("null".to_string(), |m| format!("\"{m}\""));
    format!(
        "{{\"id\":\"{id}\",\"name\":\"{name}\",\"job_title\":\"Engineer\",\
         \"manager_id\":{manager},\"created_at\":\"2024-01-01T00:00:00Z\",\
         \"updated_at\":\"2024-01-01T00:00:00Z\"}}\n"
    )
}

#[tokio::test]
async fn test_records_outside_field_rules_survive_unrelated_saves() {
    let (temp, _) = workspace().await;
    let long_name = "x".repeat(250);
    let snapshot = temp.path().join(".roster").join("employees.jsonl");
    let content = format!(
        "{}{}",
        employee_line("acme-aaaa", &long_name, None),
        employee_line("acme-bbbb", "Report", Some("acme-aaaa"))
    );
    tokio::fs::write(&snapshot, content).await.unwrap();

    let mut app = App::from_directory(temp.path(), None).await.unwrap();
    assert!(app.load_warnings().is_empty());
    app.create_employee(new_employee("New", "Sales", None))
        .await
        .unwrap();

    let reopened = App::from_directory(temp.path(), None).await.unwrap();
    let all = reopened
        .list_employees(&EmployeeFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].name, long_name);

    let tree = reopened.employee_tree(None, None).await.unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].children[0].id, "acme-bbbb");
}

#[tokio::test]
async fn test_snapshot_with_unreadable_lines_is_not_overwritten() {
    let (temp, _) = workspace().await;
    let snapshot = temp.path().join(".roster").join("employees.jsonl");
    let content = format!(
        "{}{{\"id\":\"acme-cccc\",\"name\":\n",
        employee_line("acme-aaaa", "Dana", None)
    );
    tokio::fs::write(&snapshot, &content).await.unwrap();

    let mut app = App::from_directory(temp.path(), None).await.unwrap();
    assert_eq!(app.load_warnings().len(), 1);

    let err = app
        .create_employee(new_employee("New", "Sales", None))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Store(StoreError::DamagedSnapshot { skipped: 1, .. })
    ));
    assert_eq!(tokio::fs::read_to_string(&snapshot).await.unwrap(), content);
}

#[tokio::test]
async fn test_position_update_persists_and_keeps_parent() {
    let (temp, mut app) = workspace().await;
    let head = app
        .create_position(NewPosition {
            title: "Head of Engineering".to_string(),
            code: "ENG-HEAD".to_string(),
            headcount: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    let lead = app
        .create_position(NewPosition {
            title: "Team Lead".to_string(),
            code: "ENG-LEAD".to_string(),
            reports_to_position_id: Some(head.id.clone()),
            headcount: 2,
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = app
        .update_position(
            &lead.id,
            PositionUpdate {
                code: Some("eng-lead-2".to_string()),
                headcount: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.code, "ENG-LEAD-2");
    assert_eq!(updated.headcount, 4);
    assert_eq!(updated.reports_to_position_id, Some(head.id.clone()));

    let reopened = App::from_directory(temp.path(), None).await.unwrap();
    let positions = reopened.list_positions().await.unwrap();
    assert_eq!(positions[1].code, "ENG-LEAD-2");

    let blank_title = PositionUpdate {
        title: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        app.update_position(&lead.id, blank_title).await,
        Err(Error::Validation(_))
    ));
}
