//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a roster workspace
//! - `employee`: Add, list, show, update and delete employees
//! - `position`: Add, list, update and move positions
//! - `org`: Print the org chart, reassign managers, check the structure
//! - `report`: Filtered CSV or text reports over any collection
//! - `payroll`: Record pay periods and render payslips
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--role`: Act as a different session role than the configured one
//!
//! # Example
//!
//! ```bash
//! roster employee add --name "Dana Ruiz" --title CEO
//! roster org assign acme-k3v9 acme-0a1b
//! roster org tree --depth 2
//! roster report --where department:equals:engineering --fields name,job_title --format csv
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::App;
use crate::output::OutputMode;

pub use args::{
    EmployeeAction, EmployeeAddArgs, EmployeeArgs, EmployeeListArgs, EmployeeUpdateArgs,
    InitArgs, OrgAction, OrgArgs, PayrollAction, PayrollAddArgs, PayrollArgs, PositionAction,
    PositionAddArgs, PositionArgs, PositionUpdateArgs, ReportArgs, TreeArgs,
};
pub use types::{FormatArg, RoleArg, SourceArg, StatusArg};
pub use validators::{
    parse_amount, parse_date, parse_predicate, validate_period, validate_prefix,
    validate_record_id,
};

/// Roster - org structure, reporting lines and reports for an HR workspace
///
/// Employees, positions and payroll are stored as JSONL under `.roster/`.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Session role (overrides `session.role` in the config)
    #[arg(long, global = true, value_enum)]
    pub role: Option<RoleArg>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new roster workspace
    ///
    /// Creates `.roster/` with configuration and empty data files.
    Init(InitArgs),

    /// Manage employee records
    Employee(EmployeeArgs),

    /// Manage the position structure
    Position(PositionArgs),

    /// Org chart and reporting lines
    Org(OrgArgs),

    /// Build a filtered report
    Report(ReportArgs),

    /// Payroll records and payslips
    Payroll(PayrollArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Employee(args)) => {
                let mut app = self.open_app().await?;
                execute::execute_employee(&mut app, args, output_mode).await
            }
            Some(Commands::Position(args)) => {
                let mut app = self.open_app().await?;
                execute::execute_position(&mut app, args, output_mode).await
            }
            Some(Commands::Org(args)) => {
                let mut app = self.open_app().await?;
                execute::execute_org(&mut app, args, output_mode).await
            }
            Some(Commands::Report(args)) => {
                let app = self.open_app().await?;
                execute::execute_report(&app, args, output_mode).await
            }
            Some(Commands::Payroll(args)) => {
                let mut app = self.open_app().await?;
                execute::execute_payroll(&mut app, args, output_mode).await
            }
            None => {
                println!("Roster HR workspace tool");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }

    /// Open the workspace around the current directory and surface any
    /// snapshot load warnings.
    async fn open_app(&self) -> Result<App> {
        let app =
            App::from_directory(&std::env::current_dir()?, self.role.map(Into::into)).await?;
        execute::report_load_warnings(&app);
        Ok(app)
    }
}
