//! Command execution logic.

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;

use super::args::{
    EmployeeAction, EmployeeAddArgs, EmployeeArgs, EmployeeListArgs, EmployeeUpdateArgs,
    InitArgs, OrgAction, OrgArgs, PayrollAction, PayrollAddArgs, PayrollArgs, PositionAction,
    PositionAddArgs, PositionArgs, PositionUpdateArgs, ReportArgs, TreeArgs,
};
use super::types::FormatArg;
use crate::app::App;
use crate::domain::{
    EmployeeFilter, EmployeeId, EmployeeUpdate, NewEmployee, NewPayrollRecord, NewPosition,
    PayrollId, PositionId, PositionUpdate,
};
use crate::export::{org_chart_json, render_org_chart, Connectors};
use crate::output::{self, OutputConfig, OutputMode};
use crate::report::{render_text, to_csv, TextOptions};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::config::init;

    let current_dir = std::env::current_dir()?;
    let result = init(&current_dir, args.company.as_deref(), args.prefix.as_deref()).await?;

    if !args.quiet {
        let config = OutputConfig::from_env();
        println!(
            "{}",
            output::success(
                &format!("Initialized roster in {}", result.roster_dir.display()),
                &config
            )
        );
        println!("  Config:    {}", result.config_file.display());
        for file in &result.data_files {
            println!("  Data:      {}", file.display());
        }
        println!("  Id prefix: {}", result.prefix);
    }

    Ok(())
}

/// Print snapshot load problems once, to stderr.
pub fn report_load_warnings(app: &App) {
    let warnings = app.load_warnings();
    if warnings.is_empty() {
        return;
    }

    let config = OutputConfig::from_env();
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    for (kind, warning) in warnings {
        // Best effort; nothing sensible to do if stderr is gone.
        let _ = writeln!(
            handle,
            "{}",
            output::warning(&format!("{kind} snapshot: {warning}"), &config)
        );
    }
}

/// Execute an `employee` subcommand
pub async fn execute_employee(app: &mut App, args: &EmployeeArgs, mode: OutputMode) -> Result<()> {
    match &args.action {
        EmployeeAction::Add(add) => employee_add(app, add, mode).await,
        EmployeeAction::List(list) => employee_list(app, list, mode).await,
        EmployeeAction::Show { id } => {
            let (employee, manager, reports) =
                app.employee_details(&EmployeeId::new(id.as_str())).await?;
            output::print_employee_details(&employee, manager.as_ref(), &reports, mode)?;
            Ok(())
        }
        EmployeeAction::Update(update) => employee_update(app, update, mode).await,
        EmployeeAction::Delete { id } => {
            app.delete_employee(&EmployeeId::new(id.as_str())).await?;
            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({ "deleted": id }))?,
                OutputMode::Text => println!("Deleted employee: {id}"),
            }
            Ok(())
        }
    }
}

async fn employee_add(app: &mut App, args: &EmployeeAddArgs, mode: OutputMode) -> Result<()> {
    let new = NewEmployee {
        name: args.name.clone(),
        job_title: args.job_title.clone(),
        department: args.department.clone().unwrap_or_default(),
        manager_id: args.manager.as_deref().map(EmployeeId::from),
        status: args.status.into(),
        email: args.email.clone(),
        position_id: args.position.as_deref().map(PositionId::from),
        hire_date: args.hire_date,
    };

    let employee = app.create_employee(new).await?;
    match mode {
        OutputMode::Json => output::print_json(&employee)?,
        OutputMode::Text => println!("Created employee: {}", employee.id),
    }
    Ok(())
}

async fn employee_list(app: &App, args: &EmployeeListArgs, mode: OutputMode) -> Result<()> {
    let filter = EmployeeFilter {
        department: args.department.clone(),
        status: args.status.map(Into::into),
        manager_id: args.manager.as_deref().map(EmployeeId::from),
    };
    let employees = app.list_employees(&filter).await?;
    output::print_employees(&employees, mode)?;
    Ok(())
}

async fn employee_update(app: &mut App, args: &EmployeeUpdateArgs, mode: OutputMode) -> Result<()> {
    let email = if args.no_email {
        Some(None)
    } else {
        args.email.clone().map(Some)
    };
    let position_id = if args.no_position {
        Some(None)
    } else {
        args.position.as_deref().map(|p| Some(PositionId::from(p)))
    };

    let update = EmployeeUpdate {
        name: args.name.clone(),
        job_title: args.job_title.clone(),
        department: args.department.clone(),
        status: args.status.map(Into::into),
        email,
        position_id,
    };

    let employee = app
        .update_employee(&EmployeeId::new(args.id.as_str()), update)
        .await?;
    match mode {
        OutputMode::Json => output::print_json(&employee)?,
        OutputMode::Text => println!("Updated employee: {}", employee.id),
    }
    Ok(())
}

/// Execute a `position` subcommand
pub async fn execute_position(app: &mut App, args: &PositionArgs, mode: OutputMode) -> Result<()> {
    match &args.action {
        PositionAction::Add(add) => position_add(app, add, mode).await,
        PositionAction::List => {
            let positions = app.list_positions().await?;
            output::print_positions(&positions, mode)?;
            Ok(())
        }
        PositionAction::Update(update) => position_update(app, update, mode).await,
        PositionAction::Move {
            id,
            reports_to,
            root: _,
        } => {
            let parent = reports_to.as_deref().map(PositionId::from);
            let position = app
                .assign_position_parent(&PositionId::new(id.as_str()), parent.as_ref())
                .await?;
            match mode {
                OutputMode::Json => output::print_json(&position)?,
                OutputMode::Text => match &position.reports_to_position_id {
                    Some(parent) => println!("{} now reports to {parent}", position.id),
                    None => println!("{} is now a root position", position.id),
                },
            }
            Ok(())
        }
    }
}

async fn position_add(app: &mut App, args: &PositionAddArgs, mode: OutputMode) -> Result<()> {
    let new = NewPosition {
        title: args.title.clone(),
        code: args.code.clone(),
        department: args.department.clone().unwrap_or_default(),
        reports_to_position_id: args.reports_to.as_deref().map(PositionId::from),
        headcount: args.headcount,
    };

    let position = app.create_position(new).await?;
    match mode {
        OutputMode::Json => output::print_json(&position)?,
        OutputMode::Text => println!("Created position: {} ({})", position.id, position.code),
    }
    Ok(())
}

async fn position_update(app: &mut App, args: &PositionUpdateArgs, mode: OutputMode) -> Result<()> {
    let update = PositionUpdate {
        title: args.title.clone(),
        code: args.code.clone(),
        department: args.department.clone(),
        headcount: args.headcount,
    };

    let position = app
        .update_position(&PositionId::new(args.id.as_str()), update)
        .await?;
    match mode {
        OutputMode::Json => output::print_json(&position)?,
        OutputMode::Text => println!("Updated position: {} ({})", position.id, position.code),
    }
    Ok(())
}

/// Execute an `org` subcommand
pub async fn execute_org(app: &mut App, args: &OrgArgs, mode: OutputMode) -> Result<()> {
    match &args.action {
        OrgAction::Tree(tree) => org_tree(app, tree, mode).await,
        OrgAction::Assign { employee, manager } => {
            let employee = app
                .assign_manager(
                    &EmployeeId::new(employee.as_str()),
                    &EmployeeId::new(manager.as_str()),
                )
                .await?;
            match mode {
                OutputMode::Json => output::print_json(&employee)?,
                OutputMode::Text => println!("{} now reports to {manager}", employee.id),
            }
            Ok(())
        }
        OrgAction::Unassign { employee } => {
            let employee = app
                .unassign_manager(&EmployeeId::new(employee.as_str()))
                .await?;
            match mode {
                OutputMode::Json => output::print_json(&employee)?,
                OutputMode::Text => println!("{} no longer has a manager", employee.id),
            }
            Ok(())
        }
        OrgAction::Check => {
            let reports = app.check_structure().await?;
            match mode {
                OutputMode::Json => output::print_json(&reports)?,
                OutputMode::Text => {
                    let config = OutputConfig::from_env();
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    for report in &reports {
                        output::write_structure_report(&mut handle, report, &config)?;
                    }
                }
            }
            Ok(())
        }
    }
}

async fn org_tree(app: &App, args: &TreeArgs, mode: OutputMode) -> Result<()> {
    let roots = if args.positions {
        let root = args.root.as_deref().map(PositionId::from);
        app.position_tree(root.as_ref(), args.depth).await?
    } else {
        let root = args.root.as_deref().map(EmployeeId::from);
        app.employee_tree(root.as_ref(), args.depth).await?
    };

    match &args.output {
        Some(path) => {
            let content = match mode {
                OutputMode::Json => serde_json::to_string_pretty(&org_chart_json(&roots))?,
                OutputMode::Text => {
                    let connectors = Connectors::for_ascii(OutputConfig::from_env().use_ascii);
                    render_org_chart(&roots, connectors)
                }
            };
            write_output(path, &content).await
        }
        None => {
            output::print_org_tree(&roots, mode)?;
            Ok(())
        }
    }
}

/// Execute the report command
pub async fn execute_report(app: &App, args: &ReportArgs, mode: OutputMode) -> Result<()> {
    let table = app
        .report(args.source.into(), &args.predicates, &args.fields)
        .await?;

    let content = match (mode, args.format) {
        (OutputMode::Json, _) => serde_json::to_string_pretty(&table)?,
        (OutputMode::Text, FormatArg::Csv) => to_csv(&table),
        (OutputMode::Text, FormatArg::Text) => {
            let title = args
                .title
                .clone()
                .unwrap_or_else(|| format!("{} report: {}", app.config().company, args.source));
            let mut options = TextOptions::new(title);
            options.max_column_width = app.config().report.max_column_width;
            render_text(&table, &options)
        }
    };

    match &args.output {
        Some(path) => write_output(path, &content).await,
        None => {
            output::print_message(&content)?;
            Ok(())
        }
    }
}

/// Execute a `payroll` subcommand
pub async fn execute_payroll(app: &mut App, args: &PayrollArgs, mode: OutputMode) -> Result<()> {
    match &args.action {
        PayrollAction::Add(add) => payroll_add(app, add, mode).await,
        PayrollAction::List { employee } => {
            let employee = employee.as_deref().map(EmployeeId::from);
            let records = app.list_payroll(employee.as_ref()).await?;
            output::print_payroll(&records, mode)?;
            Ok(())
        }
        PayrollAction::Slip { id, output: path } => {
            let slip = app.payslip(&PayrollId::new(id.as_str())).await?;
            match path {
                Some(path) => write_output(path, &slip).await,
                None => match mode {
                    OutputMode::Json => {
                        output::print_json(&serde_json::json!({ "id": id, "payslip": slip }))?;
                        Ok(())
                    }
                    OutputMode::Text => {
                        output::print_message(&slip)?;
                        Ok(())
                    }
                },
            }
        }
    }
}

async fn payroll_add(app: &mut App, args: &PayrollAddArgs, mode: OutputMode) -> Result<()> {
    let new = NewPayrollRecord {
        employee_id: EmployeeId::new(args.employee.as_str()),
        period: args.period.clone(),
        basic_salary: args.basic,
        allowances: args.allowances,
        deductions: args.deductions,
        currency: args.currency.clone(),
    };

    let record = app.add_payroll(new).await?;
    match mode {
        OutputMode::Json => output::print_json(&record)?,
        OutputMode::Text => println!(
            "Recorded payroll {} for {} ({}): net {:.2} {}",
            record.id,
            record.employee_id,
            record.period,
            record.net(),
            record.currency
        ),
    }
    Ok(())
}

/// Write exported content to `path`, with a trailing newline.
async fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut data = content.to_string();
    if !data.ends_with('\n') {
        data.push('\n');
    }
    tokio::fs::write(path, data).await?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote export");
    eprintln!("Wrote {}", path.display());
    Ok(())
}
