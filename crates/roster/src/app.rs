//! Application context: configuration, session and entity stores.
//!
//! `App` is the composition root. Commands go through its methods, which
//! check the session's permissions, run validation (including the cycle
//! guard) before any write, persist, and re-read the affected record so the
//! caller always renders stored state.
//!
//! ```no_run
//! use roster::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new("."), None).await?;
//!     for employee in app.list_employees(&Default::default()).await? {
//!         println!("{}", employee.name);
//!     }
//!     Ok(())
//! }
//! ```

use chrono::Utc;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::access::{Access, Module, Role};
use crate::config::{find_roster_root, RosterConfig, CONFIG_FILE_NAME, ROSTER_DIR_NAME};
use crate::domain::{
    Employee, EmployeeFilter, EmployeeId, EmployeeUpdate, EntityKind, HierarchyNode,
    NewEmployee, NewPayrollRecord, NewPosition, PayrollId, PayrollRecord, Position, PositionId,
    PositionUpdate,
};
use crate::error::{ConfigError, Error, Result, StoreError, ValidationError};
use crate::export::render_payslip;
use crate::hierarchy::{
    check_manager_assignment, check_parent_assignment, Hierarchy, OrgTreeNode, StructureReport,
};
use crate::report::{build_report, to_records, Predicate, ReportTable};
use crate::session::{SessionContext, SessionUser};
use crate::store::{open_store, Entity, EntityStore, InMemoryStore, LoadWarning, StorageBackend};
use crate::view::ExpansionState;

/// Record collections a report can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// Employee records.
    Employees,
    /// Position records.
    Positions,
    /// Payroll records.
    Payroll,
}

impl ReportSource {
    fn module(self) -> Module {
        match self {
            Self::Employees => Module::Employees,
            Self::Positions => Module::Positions,
            Self::Payroll => Module::Payroll,
        }
    }
}

/// Application context for CLI operations.
pub struct App {
    employees: Box<dyn EntityStore<Employee>>,
    positions: Box<dyn EntityStore<Position>>,
    payroll: Box<dyn EntityStore<PayrollRecord>>,
    session: SessionContext,
    config: RosterConfig,
    roster_dir: Option<PathBuf>,
    warnings: Vec<(EntityKind, LoadWarning)>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("roster_dir", &self.roster_dir)
            .field("company", &self.config.company)
            .field("role", &self.session.user.role)
            .field("stores", &"<dyn EntityStore>")
            .finish_non_exhaustive()
    }
}

impl App {
    /// Open the workspace containing `working_dir`.
    ///
    /// `role` overrides the configured session role.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotInitialized`] if no `.roster/` is found
    /// - configuration or snapshot read failures
    pub async fn from_directory(working_dir: &Path, role: Option<Role>) -> Result<Self> {
        let root_dir = find_roster_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let roster_dir = root_dir.join(ROSTER_DIR_NAME);
        let config = RosterConfig::load(&roster_dir.join(CONFIG_FILE_NAME)).await?;

        let backend = config.storage_backend(&root_dir);
        let prefix = config.id_prefix.clone();

        let mut warnings = Vec::new();
        let (employees, w) = open_store::<Employee>(&backend, &prefix).await?;
        warnings.extend(w.into_iter().map(|w| (EntityKind::Employee, w)));
        let (positions, w) = open_store::<Position>(&backend, &prefix).await?;
        warnings.extend(w.into_iter().map(|w| (EntityKind::Position, w)));
        let (payroll, w) = open_store::<PayrollRecord>(&backend, &prefix).await?;
        warnings.extend(w.into_iter().map(|w| (EntityKind::Payroll, w)));

        let session = session_from_config(&config, role);
        tracing::debug!(
            root = %root_dir.display(),
            role = %session.user.role,
            persistent = matches!(backend, StorageBackend::Jsonl(_)),
            "Opened workspace"
        );

        Ok(Self {
            employees,
            positions,
            payroll,
            session,
            config,
            roster_dir: Some(roster_dir),
            warnings,
        })
    }

    /// An ephemeral app with empty in-memory stores.
    pub fn in_memory(config: RosterConfig, role: Option<Role>) -> Self {
        let prefix = config.id_prefix.clone();
        Self {
            employees: Box::new(InMemoryStore::<Employee>::new(&prefix)),
            positions: Box::new(InMemoryStore::<Position>::new(&prefix)),
            payroll: Box::new(InMemoryStore::<PayrollRecord>::new(&prefix)),
            session: session_from_config(&config, role),
            config,
            roster_dir: None,
            warnings: Vec::new(),
        }
    }

    /// The current session.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The loaded configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// The `.roster` directory, if file-backed.
    pub fn roster_dir(&self) -> Option<&Path> {
        self.roster_dir.as_deref()
    }

    /// Problems found while loading snapshots.
    pub fn load_warnings(&self) -> &[(EntityKind, LoadWarning)] {
        &self.warnings
    }

    // ========== Employees ==========

    /// Employees matching `filter`, limited to the session's visible scope.
    ///
    /// # Errors
    ///
    /// Access denial or store failure.
    pub async fn list_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        self.require(Module::Employees, Access::Read)?;
        let all = self.employees.list().await?;
        let scope = self.session.visible_scope(&all);
        Ok(scope
            .apply(all)
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect())
    }

    /// One employee with their resolved manager and direct reports.
    ///
    /// Employees without access to the employee module may still look up
    /// their own record through self-service.
    ///
    /// # Errors
    ///
    /// Access denial, [`StoreError::NotFound`] (also for records outside
    /// the visible scope), or store failure.
    pub async fn employee_details(
        &self,
        id: &EmployeeId,
    ) -> Result<(Employee, Option<Employee>, Vec<Employee>)> {
        self.require_employee_read(id)?;

        let all = self.employees.list().await?;
        let scope = self.session.visible_scope(&all);
        if !scope.contains(id) {
            return Err(not_found(EntityKind::Employee, id));
        }

        let hierarchy = Hierarchy::build(&all);
        let employee = hierarchy
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Employee, id))?;
        let manager = hierarchy.parent_of(id).cloned();
        let reports = hierarchy
            .subordinates_of(id)
            .into_iter()
            .filter(|e| scope.contains(&e.id))
            .cloned()
            .collect();
        Ok((employee, manager, reports))
    }

    /// Create an employee. A manager given up front must exist.
    ///
    /// # Errors
    ///
    /// Access denial, validation failure, or store failure.
    pub async fn create_employee(&mut self, new: NewEmployee) -> Result<Employee> {
        self.require(Module::Employees, Access::Write)?;
        new.validate()?;
        if let Some(manager) = &new.manager_id {
            ensure_exists(&*self.employees, manager, "manager_id").await?;
        }
        if let Some(position) = &new.position_id {
            ensure_exists(&*self.positions, position, "position_id").await?;
        }

        let created = self.employees.create(new).await?;
        self.employees.save().await?;
        refetch(&*self.employees, created.id()).await
    }

    /// Change non-hierarchy fields of an employee.
    ///
    /// # Errors
    ///
    /// Access denial, validation failure, [`StoreError::NotFound`], or store
    /// failure.
    pub async fn update_employee(
        &mut self,
        id: &EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<Employee> {
        self.require(Module::Employees, Access::Write)?;
        update.validate()?;
        if let Some(Some(position)) = &update.position_id {
            ensure_exists(&*self.positions, position, "position_id").await?;
        }
        if update.is_empty() {
            return refetch(&*self.employees, id).await;
        }

        self.employees.update(id, update.into_patch()).await?;
        self.employees.save().await?;
        refetch(&*self.employees, id).await
    }

    /// Delete an employee. Their direct reports keep the now-dangling
    /// manager reference and show up as roots.
    ///
    /// # Errors
    ///
    /// Access denial, [`StoreError::NotFound`], or store failure.
    pub async fn delete_employee(&mut self, id: &EmployeeId) -> Result<()> {
        self.require(Module::Employees, Access::Write)?;
        self.employees.delete(id).await?;
        self.employees.save().await
    }

    /// Make `manager` the manager of `employee`, after the cycle guard
    /// approves.
    ///
    /// # Errors
    ///
    /// - access denial
    /// - [`StoreError::NotFound`] for an unknown employee
    /// - [`ValidationError::UnknownReference`] for an unknown manager
    /// - [`GuardError`](crate::error::GuardError) if the change would close a loop
    pub async fn assign_manager(
        &mut self,
        employee: &EmployeeId,
        manager: &EmployeeId,
    ) -> Result<Employee> {
        self.require(Module::OrgChart, Access::Write)?;
        let all = self.employees.list().await?;
        ensure_listed(&all, employee)?;
        if !all.iter().any(|e| &e.id == manager) {
            return Err(unknown_reference("manager_id", manager));
        }

        check_manager_assignment(&all, employee, manager)?;

        self.set_parent(employee, "manager_id", Value::String(manager.to_string()))
            .await
    }

    /// Clear the manager of `employee`, making them a root.
    ///
    /// # Errors
    ///
    /// Access denial, [`StoreError::NotFound`], or store failure.
    pub async fn unassign_manager(&mut self, employee: &EmployeeId) -> Result<Employee> {
        self.require(Module::OrgChart, Access::Write)?;
        self.set_parent(employee, "manager_id", Value::Null).await
    }

    async fn set_parent(&mut self, id: &EmployeeId, field: &str, value: Value) -> Result<Employee> {
        let patch = Map::from_iter([(field.to_string(), value)]);
        self.employees.update(id, patch).await?;
        self.employees.save().await?;
        refetch(&*self.employees, id).await
    }

    // ========== Positions ==========

    /// All positions.
    ///
    /// # Errors
    ///
    /// Access denial or store failure.
    pub async fn list_positions(&self) -> Result<Vec<Position>> {
        self.require(Module::Positions, Access::Read)?;
        self.positions.list().await
    }

    /// Create a position. A parent given up front must exist.
    ///
    /// # Errors
    ///
    /// Access denial, validation failure, or store failure.
    pub async fn create_position(&mut self, new: NewPosition) -> Result<Position> {
        self.require(Module::Positions, Access::Write)?;
        new.validate()?;
        if let Some(parent) = &new.reports_to_position_id {
            ensure_exists(&*self.positions, parent, "reports_to_position_id").await?;
        }

        let created = self.positions.create(new).await?;
        self.positions.save().await?;
        refetch(&*self.positions, created.id()).await
    }

    /// Change non-hierarchy fields of a position.
    ///
    /// # Errors
    ///
    /// Access denial, validation failure, [`StoreError::NotFound`], or store
    /// failure.
    pub async fn update_position(
        &mut self,
        id: &PositionId,
        update: PositionUpdate,
    ) -> Result<Position> {
        self.require(Module::Positions, Access::Write)?;
        update.validate()?;
        self.positions.update(id, update.into_patch()).await?;
        self.positions.save().await?;
        refetch(&*self.positions, id).await
    }

    /// Make `parent` the position `position` reports to, after the cycle
    /// guard approves. `None` makes it a root.
    ///
    /// # Errors
    ///
    /// Access denial, unknown ids, or a guard rejection.
    pub async fn assign_position_parent(
        &mut self,
        position: &PositionId,
        parent: Option<&PositionId>,
    ) -> Result<Position> {
        self.require(Module::Positions, Access::Write)?;
        let all = self.positions.list().await?;
        if !all.iter().any(|p| &p.id == position) {
            return Err(not_found(EntityKind::Position, position));
        }

        let value = match parent {
            Some(parent) => {
                if !all.iter().any(|p| &p.id == parent) {
                    return Err(unknown_reference("reports_to_position_id", parent));
                }
                check_parent_assignment(&all, position, parent)?;
                Value::String(parent.to_string())
            }
            None => Value::Null,
        };

        let patch = Map::from_iter([("reports_to_position_id".to_string(), value)]);
        self.positions.update(position, patch).await?;
        self.positions.save().await?;
        refetch(&*self.positions, position).await
    }

    // ========== Org chart ==========

    /// The employee org chart.
    ///
    /// `root` limits it to one subtree; `depth` limits how many levels below
    /// the top are expanded (collapsed nodes report their hidden count).
    ///
    /// # Errors
    ///
    /// Access denial, unknown `root`, or store failure.
    pub async fn employee_tree(
        &self,
        root: Option<&EmployeeId>,
        depth: Option<usize>,
    ) -> Result<Vec<OrgTreeNode>> {
        self.require(Module::OrgChart, Access::Read)?;
        let all = self.employees.list().await?;
        project_tree(&all, root, depth, EntityKind::Employee)
    }

    /// The position chart. Same options as [`employee_tree`](Self::employee_tree).
    ///
    /// # Errors
    ///
    /// Access denial, unknown `root`, or store failure.
    pub async fn position_tree(
        &self,
        root: Option<&PositionId>,
        depth: Option<usize>,
    ) -> Result<Vec<OrgTreeNode>> {
        self.require(Module::OrgChart, Access::Read)?;
        self.require(Module::Positions, Access::Read)?;
        let all = self.positions.list().await?;
        project_tree(&all, root, depth, EntityKind::Position)
    }

    /// Roots, dangling references and pre-existing loops for both forests.
    ///
    /// # Errors
    ///
    /// Access denial or store failure.
    pub async fn check_structure(&self) -> Result<Vec<StructureReport>> {
        self.require(Module::OrgChart, Access::Read)?;
        let employees = self.employees.list().await?;
        let mut reports = vec![Hierarchy::build(&employees).structure_report("Employees")];
        if self.session.permissions.can_read(Module::Positions) {
            let positions = self.positions.list().await?;
            reports.push(Hierarchy::build(&positions).structure_report("Positions"));
        }
        Ok(reports)
    }

    // ========== Payroll ==========

    /// Record one pay period for an existing employee.
    ///
    /// # Errors
    ///
    /// Access denial, validation failure, or store failure.
    pub async fn add_payroll(&mut self, new: NewPayrollRecord) -> Result<PayrollRecord> {
        self.require(Module::Payroll, Access::Write)?;
        new.validate()?;
        ensure_exists(&*self.employees, &new.employee_id, "employee_id").await?;

        let created = self.payroll.create(new).await?;
        self.payroll.save().await?;
        refetch(&*self.payroll, created.id()).await
    }

    /// Payroll records, optionally for one employee.
    ///
    /// Sessions without payroll access see only their own records through
    /// self-service.
    ///
    /// # Errors
    ///
    /// Access denial or store failure.
    pub async fn list_payroll(&self, employee: Option<&EmployeeId>) -> Result<Vec<PayrollRecord>> {
        let own_only = self.payroll_self_service()?;
        let records = self.payroll.list().await?;
        Ok(records
            .into_iter()
            .filter(|r| employee.is_none_or(|id| &r.employee_id == id))
            .filter(|r| own_only.as_ref().is_none_or(|me| &r.employee_id == me))
            .collect())
    }

    /// Render the payslip for a payroll record.
    ///
    /// # Errors
    ///
    /// Access denial, [`StoreError::NotFound`], or store failure.
    pub async fn payslip(&self, id: &PayrollId) -> Result<String> {
        let own_only = self.payroll_self_service()?;
        let record = self
            .payroll
            .get(id)
            .await?
            .filter(|r| own_only.as_ref().is_none_or(|me| &r.employee_id == me))
            .ok_or_else(|| not_found(EntityKind::Payroll, id))?;
        let employee = self.employees.get(&record.employee_id).await?;

        Ok(render_payslip(
            &self.config.company,
            &record,
            employee.as_ref(),
            Utc::now(),
        ))
    }

    /// `Ok(None)` with full payroll access, `Ok(Some(me))` for self-service.
    fn payroll_self_service(&self) -> Result<Option<EmployeeId>> {
        let permissions = &self.session.permissions;
        if permissions.can_read(Module::Payroll) {
            return Ok(None);
        }
        match &self.session.user.employee_id {
            Some(me) if permissions.can_read(Module::SelfService) => Ok(Some(me.clone())),
            _ => self.require(Module::Payroll, Access::Read).map(|()| None),
        }
    }

    // ========== Reports ==========

    /// Build a report over `source`.
    ///
    /// # Errors
    ///
    /// Access denial (reports module and the source's module) or store
    /// failure.
    pub async fn report(
        &self,
        source: ReportSource,
        predicates: &[Predicate],
        fields: &[String],
    ) -> Result<ReportTable> {
        self.require(Module::Reports, Access::Read)?;
        self.require(source.module(), Access::Read)?;

        let records = match source {
            ReportSource::Employees => {
                let all = self.employees.list().await?;
                to_records(&self.session.visible_scope(&all).apply(all))?
            }
            ReportSource::Positions => to_records(&self.positions.list().await?)?,
            ReportSource::Payroll => to_records(&self.payroll.list().await?)?,
        };

        let table = build_report(&records, predicates, fields);
        tracing::debug!(
            source = ?source,
            predicates = predicates.len(),
            rows = table.len(),
            "Built report"
        );
        Ok(table)
    }

    // ========== Helpers ==========

    fn require(&self, module: Module, needed: Access) -> Result<()> {
        self.session.permissions.require(module, needed)?;
        Ok(())
    }

    fn require_employee_read(&self, id: &EmployeeId) -> Result<()> {
        let permissions = &self.session.permissions;
        if permissions.can_read(Module::Employees) {
            return Ok(());
        }
        let is_self = self.session.user.employee_id.as_ref() == Some(id);
        if is_self && permissions.can_read(Module::SelfService) {
            return Ok(());
        }
        self.require(Module::Employees, Access::Read)
    }
}

fn session_from_config(config: &RosterConfig, role: Option<Role>) -> SessionContext {
    SessionContext::new(
        config.company.clone(),
        config.language.clone(),
        SessionUser {
            name: config.session.user.clone(),
            role: role.unwrap_or(config.session.role),
            employee_id: config.session.employee_id.clone(),
        },
    )
}

fn project_tree<T: HierarchyNode>(
    records: &[T],
    root: Option<&T::Id>,
    depth: Option<usize>,
    kind: EntityKind,
) -> Result<Vec<OrgTreeNode>> {
    let hierarchy = Hierarchy::build(records);
    let mut expansion = ExpansionState::new();

    match root {
        Some(root) => {
            if !hierarchy.contains(root) {
                return Err(not_found(kind, root));
            }
            if let Some(depth) = depth {
                expansion.expand_subtree_to_depth(root, &hierarchy, depth);
            }
            let state = depth.map(|_| &expansion);
            Ok(hierarchy.subtree(root, state).into_iter().collect())
        }
        None => {
            if let Some(depth) = depth {
                expansion.expand_to_depth(&hierarchy, depth);
            }
            Ok(hierarchy.to_tree(depth.map(|_| &expansion)))
        }
    }
}

async fn ensure_exists<T: Entity>(
    store: &dyn EntityStore<T>,
    id: &T::Id,
    field: &'static str,
) -> Result<()> {
    match store.get(id).await? {
        Some(_) => Ok(()),
        None => Err(unknown_reference(field, id)),
    }
}

async fn refetch<T: Entity>(store: &dyn EntityStore<T>, id: &T::Id) -> Result<T> {
    store
        .get(id)
        .await?
        .ok_or_else(|| not_found(T::KIND, id))
}

fn ensure_listed(employees: &[Employee], id: &EmployeeId) -> Result<()> {
    if employees.iter().any(|e| &e.id == id) {
        Ok(())
    } else {
        Err(not_found(EntityKind::Employee, id))
    }
}

fn not_found(kind: EntityKind, id: &impl std::fmt::Display) -> Error {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
    .into()
}

fn unknown_reference(field: &'static str, id: &impl std::fmt::Display) -> Error {
    ValidationError::UnknownReference {
        field,
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::init;
    use crate::error::GuardError;
    use tempfile::TempDir;

    fn new_employee(name: &str, manager: Option<&EmployeeId>) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            job_title: "Staff".to_string(),
            manager_id: manager.cloned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_app_from_initialized_directory() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), Some("Globex"), None).await.unwrap();

        let app = App::from_directory(temp.path(), None).await.unwrap();
        assert_eq!(app.config().id_prefix, "globex");
        assert!(app.roster_dir().unwrap().ends_with(".roster"));
        assert_eq!(app.session().user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_app_from_uninitialized_directory() {
        let temp = TempDir::new().unwrap();
        let err = App::from_directory(temp.path(), None).await.unwrap_err();
        assert!(err.to_string().contains("Not a roster workspace"));
    }

    #[tokio::test]
    async fn test_changes_persist_across_opens() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), None, None).await.unwrap();

        let mut app = App::from_directory(temp.path(), None).await.unwrap();
        let boss = app.create_employee(new_employee("Boss", None)).await.unwrap();
        let worker = app.create_employee(new_employee("Worker", None)).await.unwrap();
        app.assign_manager(&worker.id, &boss.id).await.unwrap();

        let reopened = App::from_directory(temp.path(), None).await.unwrap();
        let (_, manager, _) = reopened.employee_details(&worker.id).await.unwrap();
        assert_eq!(manager.unwrap().id, boss.id);
    }

    #[tokio::test]
    async fn test_assign_manager_rejects_cycle_without_writing() {
        let mut app = App::in_memory(RosterConfig::default(), None);
        let a = app.create_employee(new_employee("A", None)).await.unwrap();
        let b = app.create_employee(new_employee("B", Some(&a.id))).await.unwrap();

        let err = app.assign_manager(&a.id, &b.id).await.unwrap_err();
        assert!(matches!(err, Error::Guard(GuardError::WouldCreateCycle { .. })));

        let (a_now, manager, _) = app.employee_details(&a.id).await.unwrap();
        assert!(manager.is_none());
        assert_eq!(a_now, a);
    }

    #[tokio::test]
    async fn test_create_with_unknown_manager_fails() {
        let mut app = App::in_memory(RosterConfig::default(), None);
        let err = app
            .create_employee(new_employee("Orphan", Some(&EmployeeId::new("acme-none"))))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownReference { field: "manager_id", .. })
        ));
    }

    #[tokio::test]
    async fn test_employee_role_cannot_write() {
        let mut app = App::in_memory(RosterConfig::default(), Some(Role::Employee));
        let err = app
            .create_employee(new_employee("Nope", None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Access(_)));
    }

    #[tokio::test]
    async fn test_tree_depth_hides_lower_levels() {
        let mut app = App::in_memory(RosterConfig::default(), None);
        let a = app.create_employee(new_employee("A", None)).await.unwrap();
        let b = app.create_employee(new_employee("B", Some(&a.id))).await.unwrap();
        app.create_employee(new_employee("C", Some(&b.id))).await.unwrap();

        let full = app.employee_tree(None, None).await.unwrap();
        assert_eq!(full[0].count(), 3);

        let shallow = app.employee_tree(None, Some(1)).await.unwrap();
        assert_eq!(shallow[0].count(), 2);
        assert_eq!(shallow[0].children[0].hidden_reports, 1);

        let sub = app.employee_tree(Some(&b.id), None).await.unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].label, "B");
    }

    #[tokio::test]
    async fn test_payslip_self_service() {
        let mut config = RosterConfig::default();
        let mut admin = App::in_memory(config.clone(), None);
        let me = admin.create_employee(new_employee("Me", None)).await.unwrap();
        let other = admin.create_employee(new_employee("Other", None)).await.unwrap();
        let mine = admin
            .add_payroll(NewPayrollRecord {
                employee_id: me.id.clone(),
                period: "2024-05".to_string(),
                basic_salary: 1000.0,
                allowances: 0.0,
                deductions: 100.0,
                currency: "EUR".to_string(),
            })
            .await
            .unwrap();
        admin
            .add_payroll(NewPayrollRecord {
                employee_id: other.id.clone(),
                period: "2024-05".to_string(),
                basic_salary: 2000.0,
                allowances: 0.0,
                deductions: 100.0,
                currency: "EUR".to_string(),
            })
            .await
            .unwrap();

        // Same stores, employee session linked to `me`.
        config.session.employee_id = Some(me.id.clone());
        let ess = App {
            session: session_from_config(&config, Some(Role::Employee)),
            ..admin
        };

        let visible = ess.list_payroll(None).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert!(ess.payslip(&mine.id).await.unwrap().contains("Net Pay:      900.00"));
    }
}
