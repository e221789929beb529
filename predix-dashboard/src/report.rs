//! Plain-text maintenance reports

use std::fmt;

use chrono::{NaiveDate, TimeZone, Utc};
use predix_core::constants::alerts::REPORT_RECENT_ALERTS;
use predix_core::{root_cause_details, Alert, CauseDetail, Monitor, MonitorStats, SystemPrediction, Timestamp};

const UNKNOWN_MACHINE: &str = "Unknown Machine";

/// Download name for a report generated on `date`
pub fn file_name(date: NaiveDate) -> String {
    format!("maintenance-report-{}.txt", date.format("%Y-%m-%d"))
}

/// Snapshot of a session rendered as a text report
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceReport {
    pub date: NaiveDate,
    pub machine_name: String,
    pub stats: MonitorStats,
    pub latest: Option<SystemPrediction>,
    /// Breakdown of the current readings
    pub causes: Vec<CauseDetail>,
    /// Newest first
    pub recent_alerts: Vec<Alert>,
}

impl MaintenanceReport {
    /// Capture the current state of a monitoring session
    pub fn from_monitor(monitor: &Monitor, machine_name: Option<&str>, date: NaiveDate) -> Self {
        Self {
            date,
            machine_name: machine_name.unwrap_or(UNKNOWN_MACHINE).to_string(),
            stats: monitor.stats(),
            latest: monitor.latest().cloned(),
            causes: root_cause_details(monitor.snapshot()),
            recent_alerts: monitor.alerts().iter().take(REPORT_RECENT_ALERTS).cloned().collect(),
        }
    }

    pub fn file_name(&self) -> String {
        file_name(self.date)
    }
}

fn format_timestamp(ms: Timestamp) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

impl fmt::Display for MaintenanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.latest.as_ref().map_or("Unknown", |p| p.health_status.as_str());

        writeln!(f, "Maintenance Report - {}", self.date.format("%Y-%m-%d"))?;
        writeln!(f, "Machine: {}", self.machine_name)?;
        writeln!(f)?;

        writeln!(f, "EXECUTIVE SUMMARY")?;
        writeln!(f, "=================")?;
        writeln!(f, "Total sensor readings analyzed: {}", self.stats.readings_analysed)?;
        writeln!(f, "Anomalies detected: {}", self.stats.anomalies_detected)?;
        writeln!(f, "Maintenance actions required: {}", self.stats.alerts)?;
        writeln!(f, "Current system health: {}", status)?;
        writeln!(f)?;

        writeln!(f, "SYSTEM HEALTH OVERVIEW")?;
        writeln!(f, "======================")?;
        writeln!(f, "Current Status: {}", status)?;
        match &self.latest {
            Some(p) => {
                writeln!(f, "Failure Risk: {}%", p.failure_risk)?;
                writeln!(f, "Remaining Useful Life: {} hours", p.remaining_useful_life)?;
            }
            None => {
                writeln!(f, "Failure Risk: N/A")?;
                writeln!(f, "Remaining Useful Life: N/A")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "AI RECOMMENDATIONS")?;
        writeln!(f, "==================")?;
        match &self.latest {
            Some(p) => writeln!(f, "{}", p.recommendation)?,
            None => writeln!(f, "No recommendations available")?,
        }
        writeln!(f)?;

        writeln!(f, "ROOT CAUSE ANALYSIS")?;
        writeln!(f, "===================")?;
        for detail in &self.causes {
            let subject = detail.sensor.map_or("system", |kind| kind.name());
            writeln!(f, "* [{}] {}: {} ({})", detail.severity, subject, detail.cause, detail.condition)?;
            writeln!(f, "  Impact: {}", detail.impact)?;
            writeln!(f, "  Recommendation: {}", detail.recommendation)?;
        }
        writeln!(f)?;

        writeln!(f, "RECENT ALERTS")?;
        writeln!(f, "=============")?;
        for alert in &self.recent_alerts {
            writeln!(f, "- {}: {}", format_timestamp(alert.timestamp), alert.title)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "This report was generated automatically by PredixAI Predictive Maintenance System."
        )
    }
}
