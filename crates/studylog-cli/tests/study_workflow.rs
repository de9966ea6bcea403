//! Study plan workflow integration tests.
//!
//! Exercises the library end-to-end: catalog import, semester planning,
//! grade recording, persistence, and the overview statistics.

use studylog_core::catalog::import_catalog_str;
use studylog_core::config::StudylogConfig;
use studylog_core::grade::GradeInput;
use studylog_core::model::{Semester, StudyLog};
use studylog_core::statistics::compute_overview;
use studylog_core::store::Store;

const CATALOG: &str = r#"[
    {"id": 1, "bezeichnung": "mgli", "name": "Mathematische Grundlagen", "hasMsp": true, "assessment": true, "ects": 6},
    {"id": 2, "bezeichnung": "oop", "name": "Objektorientierte Programmierung", "hasMsp": true, "assessment": true, "ects": 6},
    {"id": 3, "bezeichnung": "algd1", "name": "Algorithmen und Datenstrukturen", "hasMsp": true, "ects": 6, "dependingModulesIDs": [1, 2]},
    {"id": 4, "bezeichnung": "pro2E", "name": "Projekt 2", "ects": 6, "dependingModulesIDs": [2]},
    {"id": 5, "bezeichnung": "eng", "name": "English", "ects": 4}
]"#;

fn grades(k1: f64, k2: f64, msp: Option<f64>, calc_type: i64) -> GradeInput {
    GradeInput {
        k1: Some(k1),
        k2: Some(k2),
        msp,
        calc_type: Some(calc_type),
        ..GradeInput::default()
    }
}

#[test]
fn plan_grade_and_summarize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studylog.json");

    let mut store = Store::open(&path).unwrap();
    let summary = import_catalog_str(&mut store, CATALOG).unwrap();
    assert_eq!(summary.inserted, 5);

    store.set_semester("mgli", Semester::Term(1), &[]).unwrap();
    store.set_semester("oop", Semester::Term(1), &[]).unwrap();
    store.set_semester("algd1", Semester::Term(2), &[]).unwrap();
    store.set_semester("pro2E", Semester::Term(2), &[]).unwrap();
    store.set_semester("eng", Semester::Recognized, &[]).unwrap();

    // mgli: EN 4.5, MSP 5.0 -> 4.75
    store
        .record_grade("mgli", grades(4.0, 5.0, Some(5.0), 0))
        .unwrap();
    // oop: EN 2/3 + 2*5/3 = 4.0, MSP 3.0 -> 3.5 (failed)
    store
        .record_grade("oop", grades(2.0, 5.0, Some(3.0), 1))
        .unwrap();
    // algd1: EN 3.0 <= MSP 4.5 -> 4.5
    store
        .record_grade("algd1", grades(3.0, 3.0, Some(4.5), 2))
        .unwrap();
    store.save().unwrap();

    let store = Store::open(&path).unwrap();
    let overview = compute_overview(&store, &StudylogConfig::default());

    let first = &overview.semesters[0];
    assert_eq!(first.semester, Semester::Term(1));
    assert_eq!(first.planned_ects(), 12);
    assert_eq!(first.passed_ects, 6);
    assert!((first.average.unwrap() - (4.75 + 3.5) / 2.0).abs() < 1e-9);

    let second = &overview.semesters[1];
    assert_eq!(second.module_ects, 6);
    assert_eq!(second.project_ects, 6);
    assert!((second.average.unwrap() - 4.5).abs() < 1e-9);
    let project = second.rows.iter().find(|r| r.module == "pro2E").unwrap();
    assert!(project.grade.is_none());
    assert_eq!(project.result.final_average, None);

    let recognized = overview.semesters.last().unwrap();
    assert_eq!(recognized.semester, Semester::Recognized);
    assert_eq!(recognized.passed_ects, 4);
    assert_eq!(recognized.average, None);

    // (4.125 + 4.5) / 2
    assert!((overview.overall_average.unwrap() - 4.3125).abs() < 1e-9);
    assert_eq!(overview.planned_ects, 28);
    assert_eq!(overview.achieved_ects, 6 + 6 + 4);
    assert_eq!(overview.assessment_completed_in, None);
}

#[test]
fn dependencies_follow_the_plan() {
    let mut store = Store::from_log("log.json", StudyLog::default());
    import_catalog_str(&mut store, CATALOG).unwrap();

    // Neither prerequisite is planned yet.
    let err = store
        .set_semester("algd1", Semester::Term(2), &[])
        .unwrap_err();
    assert_eq!(err.blocking_dependency(), Some(1));

    store.set_semester("mgli", Semester::Term(1), &[]).unwrap();
    let err = store
        .set_semester("algd1", Semester::Term(2), &[])
        .unwrap_err();
    assert_eq!(err.blocking_dependency(), Some(2));

    store.set_semester("oop", Semester::Term(2), &[]).unwrap();
    store.set_semester("algd1", Semester::Term(2), &[]).unwrap();

    // Pulling a prerequisite later than its dependent is not checked in reverse,
    // but moving the dependent earlier than it is.
    store.set_semester("oop", Semester::Term(3), &[]).unwrap();
    assert!(store.set_semester("algd1", Semester::Term(2), &[]).is_err());
}

#[test]
fn deleting_a_module_drops_it_from_statistics() {
    let mut store = Store::from_log("log.json", StudyLog::default());
    import_catalog_str(&mut store, CATALOG).unwrap();
    store.set_semester("mgli", Semester::Term(1), &[]).unwrap();
    store
        .record_grade("mgli", grades(5.0, 5.0, Some(5.0), 0))
        .unwrap();

    let before = compute_overview(&store, &StudylogConfig::default());
    assert_eq!(before.achieved_ects, 6);

    store.delete_module("mgli").unwrap();
    assert!(store.log().grades.is_empty());

    let after = compute_overview(&store, &StudylogConfig::default());
    assert_eq!(after.achieved_ects, 0);
    assert_eq!(after.overall_average, None);
}
