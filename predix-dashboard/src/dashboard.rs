//! Dashboard session context
//!
//! [`Dashboard`] ties one monitoring session to the stored records: it
//! loads every collection on open, routes evaluations through the remote
//! predictor when one is configured, and writes each changed collection back
//! right after the operation that changed it.
//!
//! ```text
//! open ──▶ load machines, maintenance, users, alerts ──▶ seed defaults
//!
//! refresh ──▶ Monitor::evaluate (remote, else local)
//!         ──▶ current machine ◀── prediction
//!         ──▶ system check alert
//!         ──▶ save machines + alerts
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use predix_connectors::{ConnectionStats, HttpConfig, HttpPredictor};
use predix_core::{Alert, AlertLog, Evaluation, HealthStatus, Monitor, SensorSnapshot, Timestamp};
use rand::Rng;

use crate::accounts::{Accounts, SignupForm, User};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult, StoreError};
use crate::machines::{Machine, MachineForm, MachineRegistry};
use crate::maintenance::{sample_records, MaintenanceForm, MaintenanceRecord, MaintenanceSchedule, Priority};
use crate::report::MaintenanceReport;
use crate::store::{
    KeyValueStore, TypedStore, ALERTS_KEY, CURRENT_MACHINE_KEY, CURRENT_USER_KEY, MACHINES_KEY, MAINTENANCE_KEY,
    USERS_KEY,
};

/// Engine timestamp for a wall-clock instant; instants before 1970 map to zero
fn timestamp(now: DateTime<Utc>) -> Timestamp {
    u64::try_from(now.timestamp_millis()).unwrap_or(0)
}

/// One dashboard session over a key-value store
#[derive(Debug)]
pub struct Dashboard<S> {
    store: S,
    monitor: Monitor,
    remote: Option<HttpPredictor>,
    machines: MachineRegistry,
    maintenance: MaintenanceSchedule,
    accounts: Accounts,
    current_user: Option<User>,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Open a session using the configured prediction service
    pub fn open(config: &DashboardConfig, store: S) -> DashboardResult<Self> {
        Self::open_at(config, store, Utc::now())
    }

    /// Open a session with an explicit clock reading for seeded records
    pub fn open_at(config: &DashboardConfig, store: S, now: DateTime<Utc>) -> DashboardResult<Self> {
        let remote = match &config.api_url {
            Some(url) => {
                let timeout_ms = u64::try_from(config.api_timeout.as_millis()).unwrap_or(u64::MAX);
                let predictor = HttpPredictor::new(HttpConfig::new(url.clone()).timeout_ms(timeout_ms))
                    .map_err(|e| DashboardError::Config(e.to_string()))?;
                Some(predictor)
            }
            None => None,
        };
        Self::load(store, remote, now)
    }

    /// Open a session over `store` with an explicit remote predictor
    pub fn load(mut store: S, remote: Option<HttpPredictor>, now: DateTime<Utc>) -> DashboardResult<Self> {
        let mut machines = MachineRegistry::from_parts(
            store.load_collection(MACHINES_KEY)?,
            store.load_value(CURRENT_MACHINE_KEY)?,
        );
        if machines.ensure_default(now) {
            store.save_collection(MACHINES_KEY, machines.machines())?;
        }

        let mut maintenance = MaintenanceSchedule::from_records(store.load_collection(MAINTENANCE_KEY)?);
        if maintenance.is_empty() {
            maintenance = MaintenanceSchedule::from_records(sample_records(now));
            store.save_collection(MAINTENANCE_KEY, maintenance.records())?;
            log::info!("seeded {} sample maintenance records", maintenance.len());
        }

        let accounts = Accounts::from_users(store.load_collection(USERS_KEY)?);
        let current_user = store.load_value(CURRENT_USER_KEY)?;
        let alerts = AlertLog::from_alerts(store.load_collection::<Alert>(ALERTS_KEY)?);

        log::info!(
            "dashboard opened: {} machines, {} maintenance records, {} alerts, remote {}",
            machines.len(),
            maintenance.len(),
            alerts.len(),
            if remote.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            store,
            monitor: Monitor::new().with_alerts(alerts),
            remote,
            machines,
            maintenance,
            accounts,
            current_user,
        })
    }

    // ===== MONITORING =====

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Replace the readings from operator input
    pub fn set_readings(&mut self, snapshot: SensorSnapshot) -> DashboardResult<()> {
        self.monitor.set_snapshot(snapshot)?;
        Ok(())
    }

    pub fn reset_readings(&mut self) {
        self.monitor.reset_snapshot();
    }

    pub fn simulate_anomaly(&mut self) {
        self.monitor.simulate_anomaly();
    }

    /// Evaluate the current readings once
    ///
    /// The prediction is stored on the current machine whichever path
    /// produced it.
    pub fn analyse_with<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> DashboardResult<Evaluation> {
        let evaluation = self.monitor.evaluate(self.remote.as_mut(), timestamp(now), rng);

        if let Some(prediction) = self.monitor.latest() {
            self.machines.record_prediction(prediction, now);
        }
        self.save_machines()?;
        self.save_alerts()?;

        Ok(evaluation)
    }

    pub fn analyse(&mut self, now: DateTime<Utc>) -> DashboardResult<Evaluation> {
        self.analyse_with(now, &mut rand::thread_rng())
    }

    /// One timer tick: evaluate, then append the system check alert
    pub fn refresh_with<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> DashboardResult<Evaluation> {
        let evaluation = self.analyse_with(now, rng)?;
        self.monitor.record_system_check(timestamp(now));
        self.save_alerts()?;
        Ok(evaluation)
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) -> DashboardResult<Evaluation> {
        self.refresh_with(now, &mut rand::thread_rng())
    }

    pub fn clear_alerts(&mut self) -> DashboardResult<()> {
        self.monitor.clear_alerts();
        self.save_alerts()
    }

    /// Remote client statistics, `None` when running local-only
    pub fn remote_stats(&self) -> Option<&ConnectionStats> {
        self.remote.as_ref().map(HttpPredictor::stats)
    }

    // ===== ACCOUNTS =====

    pub fn signup(&mut self, form: &SignupForm, now: DateTime<Utc>) -> DashboardResult<User> {
        let user = self.accounts.signup(form, now)?.clone();
        self.store.save_collection(USERS_KEY, self.accounts.users())?;
        Ok(user)
    }

    /// Check credentials and start a session
    pub fn login(&mut self, email: &str, password: &str) -> DashboardResult<User> {
        let user = self.accounts.login(email, password)?.clone();
        self.store.save_value(CURRENT_USER_KEY, &user)?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) -> DashboardResult<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        self.current_user = None;
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    // ===== MACHINES =====

    pub fn machines(&self) -> &MachineRegistry {
        &self.machines
    }

    pub fn add_machine(&mut self, form: &MachineForm, now: DateTime<Utc>) -> DashboardResult<Machine> {
        let machine = self.machines.add(form, now)?.clone();
        self.save_machines()?;
        Ok(machine)
    }

    pub fn update_machine(&mut self, id: u64, form: &MachineForm, now: DateTime<Utc>) -> DashboardResult<Machine> {
        let machine = self.machines.update(id, form, now)?.clone();
        self.save_machines()?;
        Ok(machine)
    }

    /// Delete a machine together with its maintenance records
    pub fn remove_machine(&mut self, id: u64) -> DashboardResult<Machine> {
        let machine = self.machines.remove(id)?;
        let dropped = self.maintenance.remove_for_machine(&machine.name);
        log::info!("machine #{} removed with {} maintenance records", id, dropped);

        self.save_machines()?;
        self.store.save_collection(MAINTENANCE_KEY, self.maintenance.records())?;
        Ok(machine)
    }

    /// Switch the monitored machine; it takes over the latest prediction
    pub fn select_machine(&mut self, id: u64, now: DateTime<Utc>) -> DashboardResult<Machine> {
        self.machines.select(id)?;
        if let Some(prediction) = self.monitor.latest() {
            self.machines.record_prediction(prediction, now);
        }
        self.save_machines()?;

        self.machines
            .get(id)
            .cloned()
            .ok_or_else(|| DashboardError::NotFound(format!("Machine #{}", id)))
    }

    // ===== MAINTENANCE =====

    pub fn maintenance(&self) -> &MaintenanceSchedule {
        &self.maintenance
    }

    /// Form pre-filled from the current machine and latest prediction
    pub fn maintenance_draft(&self, scheduled_date: NaiveDate) -> MaintenanceForm {
        let latest = self.monitor.latest();
        MaintenanceForm {
            machine_name: self.machines.current().map(|m| m.name.clone()).unwrap_or_default(),
            machine_health: latest.map_or(HealthStatus::Healthy, |p| p.health_status),
            predicted_rul: latest.map_or(0, |p| p.remaining_useful_life),
            maintenance_type: String::new(),
            priority: match latest.map(|p| p.health_status) {
                Some(HealthStatus::Critical) => Priority::High,
                Some(HealthStatus::Warning) => Priority::Medium,
                _ => Priority::Low,
            },
            assigned_engineer: String::new(),
            notes: String::new(),
            scheduled_date,
        }
    }

    pub fn schedule_maintenance(&mut self, form: &MaintenanceForm, now: DateTime<Utc>) -> DashboardResult<MaintenanceRecord> {
        let record = self.maintenance.schedule(form, now)?.clone();
        self.store.save_collection(MAINTENANCE_KEY, self.maintenance.records())?;
        Ok(record)
    }

    pub fn complete_maintenance(&mut self, id: u64, now: DateTime<Utc>) -> DashboardResult<MaintenanceRecord> {
        let record = self.maintenance.complete(id, now)?.clone();
        self.store.save_collection(MAINTENANCE_KEY, self.maintenance.records())?;
        Ok(record)
    }

    // ===== REPORTS & PERSISTENCE =====

    pub fn report(&self, date: NaiveDate) -> MaintenanceReport {
        let machine = self.machines.current().map(|m| m.name.as_str());
        MaintenanceReport::from_monitor(&self.monitor, machine, date)
    }

    /// Write every collection back to the store
    pub fn persist(&mut self) -> DashboardResult<()> {
        self.save_machines()?;
        self.save_alerts()?;
        self.store.save_collection(MAINTENANCE_KEY, self.maintenance.records())?;
        self.store.save_collection(USERS_KEY, self.accounts.users())?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn save_machines(&mut self) -> Result<(), StoreError> {
        self.store.save_collection(MACHINES_KEY, self.machines.machines())?;
        match self.machines.current_id() {
            Some(id) => self.store.save_value(CURRENT_MACHINE_KEY, &id),
            None => self.store.remove(CURRENT_MACHINE_KEY),
        }
    }

    fn save_alerts(&mut self) -> DashboardResult<()> {
        self.store.save_collection(ALERTS_KEY, &self.monitor.alerts().to_vec())?;
        Ok(())
    }
}
