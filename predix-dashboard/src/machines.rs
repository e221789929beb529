//! Machine registry
//!
//! The registry holds every machine the operator has registered and which
//! one is currently being monitored. Each evaluation writes its result onto
//! the current machine.

use chrono::{DateTime, NaiveDate, Utc};
use predix_core::{HealthStatus, SystemPrediction};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Name given to the machine seeded into an empty registry
pub const DEFAULT_MACHINE_NAME: &str = "PredixAI Industrial Equipment";

/// Kind of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    #[default]
    Pump,
    Motor,
    Compressor,
    Conveyor,
    Fan,
    Gearbox,
    Valve,
    Other,
}

/// A registered machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub location: String,
    pub model: String,
    pub manufacturer: String,
    pub installation_date: Option<NaiveDate>,
    pub description: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Status from the last evaluation while this machine was current
    #[serde(default)]
    pub health_status: Option<HealthStatus>,
    #[serde(default)]
    pub last_prediction: Option<SystemPrediction>,
}

/// Operator input for adding or editing a machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineForm {
    pub name: String,
    pub machine_type: MachineType,
    pub location: String,
    pub model: String,
    pub manufacturer: String,
    pub installation_date: Option<NaiveDate>,
    pub description: String,
    pub notes: String,
}

impl MachineForm {
    /// Form with only the required name filled in
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn trimmed(&self) -> DashboardResult<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DashboardError::Validation("Machine name is required".into()));
        }

        Ok(Self {
            name: name.to_string(),
            machine_type: self.machine_type,
            location: self.location.trim().to_string(),
            model: self.model.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
            installation_date: self.installation_date,
            description: self.description.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Machine counts by last known status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MachineStats {
    pub total: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
}

/// Registered machines plus the current selection
#[derive(Debug, Clone, Default)]
pub struct MachineRegistry {
    machines: Vec<Machine>,
    current: Option<u64>,
}

impl MachineRegistry {
    /// Rebuild a registry from stored records
    ///
    /// A stored selection that no longer matches a machine is dropped.
    pub fn from_parts(machines: Vec<Machine>, current: Option<u64>) -> Self {
        let current = current.filter(|id| machines.iter().any(|m| m.id == *id));
        Self { machines, current }
    }

    /// Seed the default machine when the registry is empty; returns whether it did
    pub fn ensure_default(&mut self, now: DateTime<Utc>) -> bool {
        if !self.machines.is_empty() {
            return false;
        }

        self.machines.push(Machine {
            id: 1,
            name: DEFAULT_MACHINE_NAME.to_string(),
            machine_type: MachineType::Pump,
            location: "Production Line 1".to_string(),
            model: "PM-2000".to_string(),
            manufacturer: "PredixAI Corp".to_string(),
            installation_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            description: "High-performance industrial pump for manufacturing operations".to_string(),
            notes: "Regular maintenance required every 6 months".to_string(),
            created_at: now,
            last_updated: now,
            health_status: None,
            last_prediction: None,
        });
        true
    }

    /// Register a machine
    pub fn add(&mut self, form: &MachineForm, now: DateTime<Utc>) -> DashboardResult<&Machine> {
        let form = form.trimmed()?;
        let id = self.machines.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        log::info!("registering machine #{} {:?}", id, form.name);

        self.machines.push(Machine {
            id,
            name: form.name,
            machine_type: form.machine_type,
            location: form.location,
            model: form.model,
            manufacturer: form.manufacturer,
            installation_date: form.installation_date,
            description: form.description,
            notes: form.notes,
            created_at: now,
            last_updated: now,
            health_status: None,
            last_prediction: None,
        });
        Ok(&self.machines[self.machines.len() - 1])
    }

    /// Overwrite the editable fields of a machine
    pub fn update(&mut self, id: u64, form: &MachineForm, now: DateTime<Utc>) -> DashboardResult<&Machine> {
        let form = form.trimmed()?;
        let machine = self.find_mut(id)?;

        machine.name = form.name;
        machine.machine_type = form.machine_type;
        machine.location = form.location;
        machine.model = form.model;
        machine.manufacturer = form.manufacturer;
        machine.installation_date = form.installation_date;
        machine.description = form.description;
        machine.notes = form.notes;
        machine.last_updated = now;

        Ok(&*machine)
    }

    /// Delete a machine and return it
    ///
    /// Removing the current machine moves the selection to the first
    /// remaining one.
    pub fn remove(&mut self, id: u64) -> DashboardResult<Machine> {
        let index = self
            .machines
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("Machine #{}", id)))?;
        let removed = self.machines.remove(index);

        if self.current == Some(id) {
            self.current = self.machines.first().map(|m| m.id);
        }

        Ok(removed)
    }

    /// Start monitoring a machine
    pub fn select(&mut self, id: u64) -> DashboardResult<&Machine> {
        let index = self
            .machines
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("Machine #{}", id)))?;
        self.current = Some(id);
        Ok(&self.machines[index])
    }

    /// Machine being monitored, the first one when nothing is selected
    pub fn current(&self) -> Option<&Machine> {
        match self.current {
            Some(id) => self.get(id),
            None => self.machines.first(),
        }
    }

    /// Explicit selection, if any
    pub fn current_id(&self) -> Option<u64> {
        self.current
    }

    /// Store an evaluation result on the current machine
    pub fn record_prediction(&mut self, prediction: &SystemPrediction, now: DateTime<Utc>) -> Option<&Machine> {
        let id = self.current()?.id;
        let machine = self.machines.iter_mut().find(|m| m.id == id)?;

        machine.health_status = Some(prediction.health_status);
        machine.last_prediction = Some(prediction.clone());
        machine.last_updated = now;
        Some(&*machine)
    }

    pub fn get(&self, id: u64) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == id)
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Count machines by status; unevaluated machines count as healthy
    pub fn stats(&self) -> MachineStats {
        self.machines.iter().fold(
            MachineStats {
                total: self.machines.len(),
                ..MachineStats::default()
            },
            |mut stats, machine| {
                match machine.health_status {
                    Some(HealthStatus::Critical) => stats.critical += 1,
                    Some(HealthStatus::Warning) => stats.warning += 1,
                    Some(HealthStatus::Healthy) | None => stats.healthy += 1,
                }
                stats
            },
        )
    }

    fn find_mut(&mut self, id: u64) -> DashboardResult<&mut Machine> {
        self.machines
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("Machine #{}", id)))
    }
}
