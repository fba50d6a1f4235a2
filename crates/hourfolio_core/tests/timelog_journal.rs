use chrono::NaiveDate;
use hourfolio_core::db::open_db_in_memory;
use hourfolio_core::{
    ClockTime, DateRange, NewProject, NewTimeLog, ProjectId, ProjectPatch, StoreContext,
    StoreError, TimeLogPatch,
};
use uuid::Uuid;

#[test]
fn add_derives_duration_and_value_and_starts_planned() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 500.0);

    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();

    let log = &stores.time_logs.time_logs()[0];
    assert_eq!(log.id, log_id);
    assert_eq!(log.duration, 2.0);
    assert_eq!(log.value, 1000.0);
    assert!(!log.is_completed);

    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, 0.0);
    assert_eq!(project.total_value, 0.0);
    assert_eq!(stores.time_logs.total_value(DateRange::unbounded()), 1000.0);
}

#[test]
fn add_against_missing_project_fails_hard() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let ghost = Uuid::new_v4();

    let result = stores
        .time_logs
        .add_time_log(log_fields(ghost, "2024-01-02", 9, 11), &mut stores.projects);

    match result {
        Err(StoreError::ProjectNotFound(id)) => assert_eq!(id, ghost),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(stores.time_logs.is_empty());
}

#[test]
fn toggle_moves_value_into_project_totals() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 500.0);
    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();

    stores
        .time_logs
        .toggle_completion(log_id, &mut stores.projects)
        .unwrap();

    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, 2.0);
    assert_eq!(project.total_value, 1000.0);
    assert_eq!(stores.time_logs.total_value(DateRange::unbounded()), 1000.0);

    stores
        .time_logs
        .toggle_completion(log_id, &mut stores.projects)
        .unwrap();

    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, 0.0);
    assert_eq!(project.total_value, 0.0);
}

#[test]
fn global_total_counts_planned_logs_project_totals_do_not() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);

    let completed_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();
    stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-03", 13, 16),
            &mut stores.projects,
        )
        .unwrap();
    stores
        .time_logs
        .toggle_completion(completed_id, &mut stores.projects)
        .unwrap();

    // 2h + 3h logged, only the 2h log completed.
    assert_eq!(stores.time_logs.total_value(DateRange::unbounded()), 500.0);
    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, 2.0);
    assert_eq!(project.total_value, 200.0);
}

#[test]
fn rate_change_leaves_stored_value_until_the_log_is_updated() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);
    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();

    stores
        .projects
        .update_project(
            project_id,
            ProjectPatch {
                hourly_rate: Some(200.0),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    assert_eq!(stores.time_logs.time_logs()[0].value, 200.0);

    stores
        .time_logs
        .update_time_log(log_id, TimeLogPatch::default(), &mut stores.projects)
        .unwrap();

    assert_eq!(stores.time_logs.time_logs()[0].value, 400.0);
}

#[test]
fn update_merges_times_and_reprices_the_interval() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);
    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();
    stores
        .time_logs
        .toggle_completion(log_id, &mut stores.projects)
        .unwrap();

    stores
        .time_logs
        .update_time_log(
            log_id,
            TimeLogPatch {
                end_time: Some(at(12, 30)),
                ..TimeLogPatch::default()
            },
            &mut stores.projects,
        )
        .unwrap();

    let log = &stores.time_logs.time_logs()[0];
    assert_eq!(log.start_time, at(9, 0));
    assert_eq!(log.duration, 3.5);
    assert_eq!(log.value, 350.0);
    assert!(log.is_completed);

    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, 3.5);
    assert_eq!(project.total_value, 350.0);
}

#[test]
fn update_absent_id_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    add_project(&mut stores, "Startup", 100.0);

    stores
        .time_logs
        .update_time_log(
            Uuid::new_v4(),
            TimeLogPatch {
                end_time: Some(at(12, 0)),
                ..TimeLogPatch::default()
            },
            &mut stores.projects,
        )
        .unwrap();

    assert!(stores.time_logs.is_empty());
}

#[test]
fn update_of_an_orphaned_log_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);
    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();
    stores.projects.delete_project(project_id).unwrap();

    stores
        .time_logs
        .update_time_log(
            log_id,
            TimeLogPatch {
                end_time: Some(at(15, 0)),
                ..TimeLogPatch::default()
            },
            &mut stores.projects,
        )
        .unwrap();

    // The orphaned log keeps its original interval and pricing.
    let log = &stores.time_logs.time_logs()[0];
    assert_eq!(log.end_time, at(11, 0));
    assert_eq!(log.value, 200.0);
}

#[test]
fn moving_a_log_between_projects_refreshes_both_totals() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let first = add_project(&mut stores, "First", 100.0);
    let second = add_project(&mut stores, "Second", 400.0);
    let log_id = stores
        .time_logs
        .add_time_log(log_fields(first, "2024-01-02", 9, 11), &mut stores.projects)
        .unwrap();
    stores
        .time_logs
        .toggle_completion(log_id, &mut stores.projects)
        .unwrap();

    stores
        .time_logs
        .update_time_log(
            log_id,
            TimeLogPatch {
                project_id: Some(second),
                ..TimeLogPatch::default()
            },
            &mut stores.projects,
        )
        .unwrap();

    // Repriced at the prior owner's current rate, credited to the new one.
    let log = &stores.time_logs.time_logs()[0];
    assert_eq!(log.project_id, second);
    assert_eq!(log.value, 200.0);

    let first_project = stores.projects.get_project_by_id(first).unwrap();
    assert_eq!(first_project.total_hours, 0.0);
    assert_eq!(first_project.total_value, 0.0);
    let second_project = stores.projects.get_project_by_id(second).unwrap();
    assert_eq!(second_project.total_hours, 2.0);
    assert_eq!(second_project.total_value, 200.0);
}

#[test]
fn delete_refreshes_owner_totals_and_tolerates_absent_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);
    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();
    stores
        .time_logs
        .toggle_completion(log_id, &mut stores.projects)
        .unwrap();

    stores
        .time_logs
        .delete_time_log(log_id, &mut stores.projects)
        .unwrap();

    assert!(stores.time_logs.is_empty());
    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, 0.0);
    assert_eq!(project.total_value, 0.0);

    stores
        .time_logs
        .delete_time_log(Uuid::new_v4(), &mut stores.projects)
        .unwrap();
    assert!(stores.time_logs.is_empty());
}

#[test]
fn totals_match_completed_logs_after_every_mutation() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 250.0);

    let first = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 9, 11),
            &mut stores.projects,
        )
        .unwrap();
    assert_ledger_matches_journal(&stores, project_id);

    let second = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-03", 14, 18),
            &mut stores.projects,
        )
        .unwrap();
    assert_ledger_matches_journal(&stores, project_id);

    stores
        .time_logs
        .toggle_completion(first, &mut stores.projects)
        .unwrap();
    assert_ledger_matches_journal(&stores, project_id);

    stores
        .time_logs
        .toggle_completion(second, &mut stores.projects)
        .unwrap();
    assert_ledger_matches_journal(&stores, project_id);

    stores
        .time_logs
        .update_time_log(
            second,
            TimeLogPatch {
                end_time: Some(at(19, 0)),
                ..TimeLogPatch::default()
            },
            &mut stores.projects,
        )
        .unwrap();
    assert_ledger_matches_journal(&stores, project_id);

    stores
        .time_logs
        .delete_time_log(first, &mut stores.projects)
        .unwrap();
    assert_ledger_matches_journal(&stores, project_id);
}

#[test]
fn inverted_interval_flows_through_as_negative_value() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);

    let log_id = stores
        .time_logs
        .add_time_log(
            log_fields(project_id, "2024-01-02", 11, 9),
            &mut stores.projects,
        )
        .unwrap();

    let log = &stores.time_logs.time_logs()[0];
    assert_eq!(log.duration, -2.0);
    assert_eq!(log.value, -200.0);

    stores
        .time_logs
        .toggle_completion(log_id, &mut stores.projects)
        .unwrap();
    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, -2.0);
    assert_eq!(project.total_value, -200.0);
}

#[test]
fn date_and_project_queries_filter_in_encounter_order() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let first = add_project(&mut stores, "First", 100.0);
    let second = add_project(&mut stores, "Second", 100.0);

    stores
        .time_logs
        .add_time_log(log_fields(first, "2024-01-02", 9, 10), &mut stores.projects)
        .unwrap();
    stores
        .time_logs
        .add_time_log(
            log_fields(second, "2024-01-02", 10, 11),
            &mut stores.projects,
        )
        .unwrap();
    stores
        .time_logs
        .add_time_log(log_fields(first, "2024-01-05", 9, 10), &mut stores.projects)
        .unwrap();

    assert_eq!(stores.time_logs.logs_by_date(day("2024-01-02")).len(), 2);
    assert_eq!(stores.time_logs.logs_by_date(day("2024-01-04")).len(), 0);

    let first_logs = stores.time_logs.logs_by_project(first);
    assert_eq!(first_logs.len(), 2);
    assert_eq!(first_logs[0].date, day("2024-01-02"));
    assert_eq!(first_logs[1].date, day("2024-01-05"));
}

#[test]
fn total_value_bounds_are_inclusive() {
    let conn = open_db_in_memory().unwrap();
    let mut stores = StoreContext::load(&conn).unwrap();
    let project_id = add_project(&mut stores, "Startup", 100.0);

    for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        stores
            .time_logs
            .add_time_log(log_fields(project_id, date, 9, 10), &mut stores.projects)
            .unwrap();
    }

    let range = DateRange::between(day("2024-01-01"), day("2024-01-02"));
    assert_eq!(stores.time_logs.total_value(range), 200.0);

    let from_second = DateRange {
        start: Some(day("2024-01-02")),
        end: None,
    };
    assert_eq!(stores.time_logs.total_value(from_second), 200.0);
}

fn add_project(stores: &mut StoreContext<'_>, name: &str, hourly_rate: f64) -> ProjectId {
    stores
        .projects
        .add_project(NewProject {
            name: name.to_string(),
            description: "client work".to_string(),
            color: "#2e7d32".to_string(),
            hourly_rate,
        })
        .unwrap()
}

fn log_fields(project_id: ProjectId, date: &str, start_hour: u8, end_hour: u8) -> NewTimeLog {
    NewTimeLog {
        project_id,
        date: day(date),
        start_time: at(start_hour, 0),
        end_time: at(end_hour, 0),
    }
}

fn assert_ledger_matches_journal(stores: &StoreContext<'_>, project_id: ProjectId) {
    let completed: Vec<_> = stores
        .time_logs
        .logs_by_project(project_id)
        .into_iter()
        .filter(|log| log.is_completed)
        .collect();
    let hours: f64 = completed.iter().map(|log| log.duration).sum();
    let value: f64 = completed.iter().map(|log| log.value).sum();

    let project = stores.projects.get_project_by_id(project_id).unwrap();
    assert_eq!(project.total_hours, hours);
    assert_eq!(project.total_value, value);
}

fn at(hour: u8, minute: u8) -> ClockTime {
    ClockTime::new(hour, minute).unwrap()
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}
