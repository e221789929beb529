//! Maintenance schedule
//!
//! Records are created as `scheduled` and move to `completed` once. A
//! scheduled record whose date has passed is reported as overdue; overdue is
//! derived on read and never stored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use predix_core::HealthStatus;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Urgency of a maintenance job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Lifecycle of a maintenance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Scheduled,
    Completed,
}

/// One scheduled or completed maintenance job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: u64,
    pub machine_name: String,
    pub machine_health: HealthStatus,
    /// Remaining useful life at scheduling time, hours
    pub predicted_rul: u32,
    pub maintenance_type: String,
    pub priority: Priority,
    pub assigned_engineer: String,
    pub notes: String,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl MaintenanceRecord {
    /// Still scheduled and dated before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == MaintenanceStatus::Scheduled && self.scheduled_date < today
    }
}

/// Operator input for scheduling a job
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceForm {
    pub machine_name: String,
    pub machine_health: HealthStatus,
    pub predicted_rul: u32,
    pub maintenance_type: String,
    pub priority: Priority,
    pub assigned_engineer: String,
    pub notes: String,
    pub scheduled_date: NaiveDate,
}

/// History view selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaintenanceFilter {
    #[default]
    All,
    Scheduled,
    Completed,
    Overdue,
}

impl MaintenanceFilter {
    fn matches(&self, record: &MaintenanceRecord, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Scheduled => record.status == MaintenanceStatus::Scheduled,
            Self::Completed => record.status == MaintenanceStatus::Completed,
            Self::Overdue => record.is_overdue(today),
        }
    }
}

impl FromStr for MaintenanceFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            other => Err(DashboardError::Validation(format!("Unknown maintenance filter: {}", other))),
        }
    }
}

impl fmt::Display for MaintenanceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        })
    }
}

/// Counters for the history tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceStats {
    pub scheduled: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// All maintenance records
#[derive(Debug, Clone, Default)]
pub struct MaintenanceSchedule {
    records: Vec<MaintenanceRecord>,
}

impl MaintenanceSchedule {
    pub fn from_records(records: Vec<MaintenanceRecord>) -> Self {
        Self { records }
    }

    /// Add a scheduled job
    pub fn schedule(&mut self, form: &MaintenanceForm, now: DateTime<Utc>) -> DashboardResult<&MaintenanceRecord> {
        let machine_name = form.machine_name.trim();
        if machine_name.is_empty() {
            return Err(DashboardError::Validation("Machine name is required".into()));
        }
        let maintenance_type = form.maintenance_type.trim();
        if maintenance_type.is_empty() {
            return Err(DashboardError::Validation("Maintenance type is required".into()));
        }

        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.records.push(MaintenanceRecord {
            id,
            machine_name: machine_name.to_string(),
            machine_health: form.machine_health,
            predicted_rul: form.predicted_rul,
            maintenance_type: maintenance_type.to_string(),
            priority: form.priority,
            assigned_engineer: form.assigned_engineer.trim().to_string(),
            notes: form.notes.trim().to_string(),
            status: MaintenanceStatus::Scheduled,
            created_at: now,
            scheduled_date: form.scheduled_date,
            completed_at: None,
        });
        log::info!("maintenance #{} scheduled for {} on {}", id, machine_name, form.scheduled_date);

        Ok(&self.records[self.records.len() - 1])
    }

    /// Mark a job done
    ///
    /// Completing an already completed job keeps its original completion time.
    pub fn complete(&mut self, id: u64, now: DateTime<Utc>) -> DashboardResult<&MaintenanceRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("Maintenance record #{}", id)))?;

        if record.status == MaintenanceStatus::Scheduled {
            record.status = MaintenanceStatus::Completed;
            record.completed_at = Some(now);
        }
        Ok(&*record)
    }

    /// Drop every record for a machine; returns how many were removed
    pub fn remove_for_machine(&mut self, machine_name: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.machine_name != machine_name);
        before - self.records.len()
    }

    /// Records matching `filter`, latest scheduled date first
    pub fn filtered(&self, filter: MaintenanceFilter, today: NaiveDate) -> Vec<&MaintenanceRecord> {
        let mut records: Vec<_> = self.records.iter().filter(|r| filter.matches(r, today)).collect();
        records.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date));
        records
    }

    pub fn stats(&self, today: NaiveDate) -> MaintenanceStats {
        let mut stats = MaintenanceStats::default();
        for record in &self.records {
            match record.status {
                MaintenanceStatus::Scheduled => stats.scheduled += 1,
                MaintenanceStatus::Completed => stats.completed += 1,
            }
            if record.is_overdue(today) {
                stats.overdue += 1;
            }
        }
        stats
    }

    pub fn get(&self, id: u64) -> Option<&MaintenanceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[MaintenanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Demo history seeded when nothing is stored yet
///
/// Dates are relative to `now`: three jobs ahead, three already done.
pub fn sample_records(now: DateTime<Utc>) -> Vec<MaintenanceRecord> {
    struct Sample {
        machine: &'static str,
        health: HealthStatus,
        rul: u32,
        kind: &'static str,
        priority: Priority,
        engineer: &'static str,
        notes: &'static str,
        created_days_ago: i64,
        scheduled_in_days: i64,
        completed: bool,
    }

    #[rustfmt::skip]
    let samples = [
        Sample { machine: "Pump Station A", health: HealthStatus::Warning, rul: 450, kind: "Preventive Maintenance", priority: Priority::Medium, engineer: "John Smith", notes: "Regular inspection and lubrication of bearings", created_days_ago: 2, scheduled_in_days: 7, completed: false },
        Sample { machine: "Conveyor Belt B", health: HealthStatus::Critical, rul: 120, kind: "Emergency Repair", priority: Priority::High, engineer: "Sarah Johnson", notes: "Replace worn drive belt and check motor alignment", created_days_ago: 1, scheduled_in_days: 1, completed: false },
        Sample { machine: "Cooling Fan C", health: HealthStatus::Healthy, rul: 780, kind: "Routine Inspection", priority: Priority::Low, engineer: "Mike Davis", notes: "Clean fan blades and check motor bearings", created_days_ago: 10, scheduled_in_days: -5, completed: true },
        Sample { machine: "Pressure Valve D", health: HealthStatus::Warning, rul: 320, kind: "Calibration", priority: Priority::Medium, engineer: "Lisa Chen", notes: "Recalibrate pressure sensor and check valve operation", created_days_ago: 8, scheduled_in_days: -3, completed: true },
        Sample { machine: "Motor Assembly E", health: HealthStatus::Critical, rul: 85, kind: "Overhaul", priority: Priority::High, engineer: "David Wilson", notes: "Complete motor disassembly, inspection, and reassembly", created_days_ago: 3, scheduled_in_days: 2, completed: false },
        Sample { machine: "Gearbox F", health: HealthStatus::Healthy, rul: 650, kind: "Oil Change", priority: Priority::Low, engineer: "Tom Anderson", notes: "Change gearbox oil and inspect for leaks", created_days_ago: 18, scheduled_in_days: -14, completed: true },
    ];

    samples
        .iter()
        .zip(1u64..)
        .map(|(sample, id)| {
            let scheduled = now + Duration::days(sample.scheduled_in_days);
            MaintenanceRecord {
                id,
                machine_name: sample.machine.to_string(),
                machine_health: sample.health,
                predicted_rul: sample.rul,
                maintenance_type: sample.kind.to_string(),
                priority: sample.priority,
                assigned_engineer: sample.engineer.to_string(),
                notes: sample.notes.to_string(),
                status: if sample.completed {
                    MaintenanceStatus::Completed
                } else {
                    MaintenanceStatus::Scheduled
                },
                created_at: now - Duration::days(sample.created_days_ago),
                scheduled_date: scheduled.date_naive(),
                completed_at: sample.completed.then_some(scheduled),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn form(machine: &str, scheduled_date: NaiveDate) -> MaintenanceForm {
        MaintenanceForm {
            machine_name: machine.into(),
            machine_health: HealthStatus::Warning,
            predicted_rul: 400,
            maintenance_type: "Preventive Maintenance".into(),
            priority: Priority::Medium,
            assigned_engineer: "J. Ortiz".into(),
            notes: String::new(),
            scheduled_date,
        }
    }

    #[test]
    fn schedule_validates_and_assigns_ids() {
        let mut schedule = MaintenanceSchedule::default();

        let mut bad = form("  ", date(6, 20));
        assert!(matches!(schedule.schedule(&bad, now()), Err(DashboardError::Validation(_))));
        bad.machine_name = "Pump".into();
        bad.maintenance_type = String::new();
        assert!(schedule.schedule(&bad, now()).is_err());
        assert!(schedule.is_empty());

        let first = schedule.schedule(&form("Pump", date(6, 20)), now()).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.status, MaintenanceStatus::Scheduled);
        assert_eq!(first.created_at, now());
        assert_eq!(schedule.schedule(&form("Fan", date(6, 21)), now()).unwrap().id, 2);
    }

    #[test]
    fn complete_stamps_once() {
        let mut schedule = MaintenanceSchedule::default();
        schedule.schedule(&form("Pump", date(6, 20)), now()).unwrap();

        let later = now() + Duration::hours(3);
        let record = schedule.complete(1, later).unwrap();
        assert_eq!(record.status, MaintenanceStatus::Completed);
        assert_eq!(record.completed_at, Some(later));

        let record = schedule.complete(1, later + Duration::days(1)).unwrap();
        assert_eq!(record.completed_at, Some(later));

        assert!(matches!(schedule.complete(99, later), Err(DashboardError::NotFound(_))));
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        let mut schedule = MaintenanceSchedule::default();
        schedule.schedule(&form("Yesterday", date(6, 14)), now()).unwrap();
        schedule.schedule(&form("Today", date(6, 15)), now()).unwrap();
        schedule.schedule(&form("Done", date(6, 1)), now()).unwrap();
        schedule.complete(3, now()).unwrap();

        let today = date(6, 15);
        let overdue = schedule.filtered(MaintenanceFilter::Overdue, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].machine_name, "Yesterday");

        assert_eq!(
            schedule.stats(today),
            MaintenanceStats {
                scheduled: 2,
                completed: 1,
                overdue: 1
            }
        );
    }

    #[test]
    fn filtered_sorts_latest_first() {
        let mut schedule = MaintenanceSchedule::default();
        for (name, day) in [("b", 10), ("c", 30), ("a", 1)] {
            schedule.schedule(&form(name, date(6, day)), now()).unwrap();
        }

        let names: Vec<_> = schedule
            .filtered(MaintenanceFilter::All, date(6, 15))
            .iter()
            .map(|r| r.machine_name.as_str())
            .collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn remove_for_machine_only_touches_that_machine() {
        let mut schedule = MaintenanceSchedule::default();
        schedule.schedule(&form("Pump", date(6, 20)), now()).unwrap();
        schedule.schedule(&form("Fan", date(6, 21)), now()).unwrap();
        schedule.schedule(&form("Pump", date(6, 22)), now()).unwrap();

        assert_eq!(schedule.remove_for_machine("Pump"), 2);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.remove_for_machine("Pump"), 0);
    }

    #[test]
    fn filter_names() {
        assert_eq!("overdue".parse::<MaintenanceFilter>().unwrap(), MaintenanceFilter::Overdue);
        assert!("late".parse::<MaintenanceFilter>().is_err());
        assert_eq!(MaintenanceFilter::Completed.to_string(), "completed");
    }

    #[test]
    fn sample_history_shape() {
        let records = sample_records(now());
        assert_eq!(records.len(), 6);

        let schedule = MaintenanceSchedule::from_records(records);
        let stats = schedule.stats(now().date_naive());
        assert_eq!(stats.scheduled, 3);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.overdue, 0);

        let conveyor = schedule.get(2).unwrap();
        assert_eq!(conveyor.machine_name, "Conveyor Belt B");
        assert_eq!(conveyor.scheduled_date, date(6, 16));
        assert_eq!(conveyor.priority, Priority::High);

        // A week later the two near-term jobs have slipped
        let stats = schedule.stats(date(6, 22));
        assert_eq!(stats.overdue, 2);
    }

    #[test]
    fn stored_shape() {
        let records = sample_records(now());
        let json = serde_json::to_value(&records[2]).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["priority"], "low");
        assert_eq!(json["machine_health"], "Healthy");
        assert_eq!(json["scheduled_date"], "2025-06-10");
        assert!(json["completed_at"].is_string());
    }
}
