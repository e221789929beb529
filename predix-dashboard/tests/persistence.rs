//! Sessions over a real data directory

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use predix_core::{HealthStatus, Severity};
use predix_dashboard::store::{KeyValueStore, ALERTS_KEY, MACHINES_KEY, MAINTENANCE_KEY};
use predix_dashboard::{
    Dashboard, DashboardConfig, DashboardError, FileStore, MachineForm, MachineType, MaintenanceFilter, SignupForm,
};
use rand::{rngs::StdRng, SeedableRng};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 8, 0, 0).unwrap()
}

fn local_config(dir: &std::path::Path) -> DashboardConfig {
    DashboardConfig {
        api_url: None,
        data_dir: dir.to_path_buf(),
        ..DashboardConfig::default()
    }
}

fn open(config: &DashboardConfig, now: DateTime<Utc>) -> Dashboard<FileStore> {
    let store = FileStore::open(&config.data_dir).unwrap();
    Dashboard::open_at(config, store, now).unwrap()
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    let mut rng = StdRng::seed_from_u64(21);

    {
        let mut dashboard = open(&config, start());
        let form = MachineForm {
            name: "Boiler Feed Pump".into(),
            machine_type: MachineType::Pump,
            location: "Boiler House".into(),
            ..MachineForm::default()
        };
        let pump = dashboard.add_machine(&form, start()).unwrap();
        dashboard.select_machine(pump.id, start()).unwrap();

        dashboard.simulate_anomaly();
        dashboard.refresh_with(start(), &mut rng).unwrap();
        dashboard.complete_maintenance(2, start()).unwrap();
    }

    let dashboard = open(&config, start() + Duration::days(1));

    let machine = dashboard.machines().current().unwrap();
    assert_eq!(machine.name, "Boiler Feed Pump");
    assert_eq!(machine.health_status, Some(HealthStatus::Critical));
    assert_eq!(machine.last_prediction.as_ref().unwrap().failure_risk, 64);

    // Sample records are only seeded into an empty history
    assert_eq!(dashboard.maintenance().len(), 6);
    assert!(dashboard.maintenance().get(2).unwrap().completed_at.is_some());

    let alerts = dashboard.monitor().alerts();
    assert_eq!(alerts.len(), 6);
    assert_eq!(alerts.latest().unwrap().severity, Severity::Critical);
    assert_eq!(alerts.badge_count(), 6);
}

#[test]
fn restored_alerts_still_deduplicate() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    let mut rng = StdRng::seed_from_u64(4);

    {
        let mut dashboard = open(&config, start());
        dashboard.simulate_anomaly();
        let first = dashboard.analyse_with(start(), &mut rng).unwrap();
        assert_eq!(first.alerts_raised, 5);
    }

    let mut dashboard = open(&config, start());
    dashboard.simulate_anomaly();

    let again = dashboard.analyse_with(start() + Duration::minutes(1), &mut rng).unwrap();
    assert_eq!(again.alerts_raised, 0);

    let later = dashboard.analyse_with(start() + Duration::minutes(6), &mut rng).unwrap();
    assert_eq!(later.alerts_raised, 5);
    assert_eq!(dashboard.monitor().alerts().len(), 10);

    // Ids continue from the stored log
    let ids: Vec<u64> = dashboard.monitor().alerts().iter().map(|a| a.id).collect();
    assert_eq!(ids, [10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
}

#[test]
fn corrupt_documents_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());

    let mut store = FileStore::open(dir.path()).unwrap();
    store.set(MACHINES_KEY, "[{\"id\": \"one\"}").unwrap();
    store.set(MAINTENANCE_KEY, "null").unwrap();
    store.set(ALERTS_KEY, "not json at all").unwrap();

    let dashboard = open(&config, start());
    assert_eq!(dashboard.machines().len(), 1);
    assert_eq!(dashboard.maintenance().len(), 6);
    assert!(dashboard.monitor().alerts().is_empty());
}

#[test]
fn accounts_persist_with_hashed_passwords() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());

    {
        let mut dashboard = open(&config, start());
        let form = SignupForm {
            first_name: "Noor".into(),
            last_name: "Haddad".into(),
            email: "noor@plant.example".into(),
            password: "turbine-42".into(),
            confirm_password: "turbine-42".into(),
            company: "Haddad Energy".into(),
            terms_accepted: true,
        };
        dashboard.signup(&form, start()).unwrap();
        dashboard.login("noor@plant.example", "turbine-42").unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(!raw.contains("turbine-42"));

    let mut dashboard = open(&config, start());
    assert_eq!(dashboard.current_user().unwrap().email, "noor@plant.example");
    assert!(matches!(
        dashboard.login("noor@plant.example", "turbine-43"),
        Err(DashboardError::InvalidCredentials)
    ));

    dashboard.logout().unwrap();
    assert!(open(&config, start()).current_user().is_none());
}

#[test]
fn overdue_view_moves_with_the_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    let dashboard = open(&config, start());

    let today = start().date_naive();
    assert!(dashboard.maintenance().filtered(MaintenanceFilter::Overdue, today).is_empty());

    let in_ten_days = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
    let overdue = dashboard.maintenance().filtered(MaintenanceFilter::Overdue, in_ten_days);
    let names: Vec<&str> = overdue.iter().map(|r| r.machine_name.as_str()).collect();
    assert_eq!(names, ["Pump Station A", "Motor Assembly E", "Conveyor Belt B"]);
}

#[test]
fn report_names_the_current_machine() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    let mut dashboard = open(&config, start());
    dashboard.refresh_with(start(), &mut StdRng::seed_from_u64(8)).unwrap();

    let report = dashboard.report(start().date_naive());
    assert_eq!(report.file_name(), "maintenance-report-2025-06-15.txt");

    let text = report.to_string();
    assert!(text.contains("Machine: PredixAI Industrial Equipment\n"));
    assert!(text.contains("Current Status: Healthy\n"));
    assert!(text.contains("Failure Risk: 0%\n"));
    assert!(text.contains("- 2025-06-15 08:00:00 UTC: System Health: Healthy\n"));
}
