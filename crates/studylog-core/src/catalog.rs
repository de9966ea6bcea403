//! Module catalog import.
//!
//! A catalog is a JSON array exported from the university's module
//! handbook. Entries are upserted into the store by module name; existing
//! modules keep their semester.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Module, Semester};
use crate::store::Store;

/// One catalog entry as it appears in the handbook export.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    id: Option<u32>,
    /// Short module name, the unique key.
    #[serde(default)]
    bezeichnung: Option<String>,
    /// Human-readable title.
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "hasMsp")]
    has_msp: Option<serde_json::Value>,
    #[serde(default)]
    assessment: Option<serde_json::Value>,
    #[serde(default)]
    ects: Option<u32>,
    #[serde(default, rename = "dependingModulesIDs")]
    depending_modules_ids: Option<Vec<u32>>,
}

/// Outcome of a catalog import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// JSON truthiness of the loosely typed handbook flags.
fn truthy(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(serde_json::Value::Array(a)) => !a.is_empty(),
        Some(serde_json::Value::Object(o)) => !o.is_empty(),
    }
}

/// Read a catalog file and upsert its modules into the store.
pub fn import_catalog(store: &mut Store, path: &Path) -> Result<ImportSummary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog: {}", path.display()))?;
    let summary = import_catalog_str(store, &content)
        .with_context(|| format!("failed to import catalog: {}", path.display()))?;
    tracing::info!(
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        "imported catalog {}",
        path.display()
    );
    Ok(summary)
}

/// Upsert catalog modules from a JSON string.
///
/// A document that is valid JSON but not an array imports nothing.
pub fn import_catalog_str(store: &mut Store, content: &str) -> Result<ImportSummary> {
    let document: serde_json::Value =
        serde_json::from_str(content).context("catalog is not valid JSON")?;
    let serde_json::Value::Array(items) = document else {
        tracing::warn!("catalog is not a JSON array, nothing imported");
        return Ok(ImportSummary::default());
    };

    let mut summary = ImportSummary::default();
    for (idx, item) in items.into_iter().enumerate() {
        let entry: CatalogEntry = match serde_json::from_value(item) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping catalog entry {idx}: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        let name = entry.bezeichnung.unwrap_or_default();
        if name.trim().is_empty() {
            tracing::warn!("skipping catalog entry {idx}: no module name");
            summary.skipped += 1;
            continue;
        }

        let module = Module {
            name,
            mod_id: entry.id.filter(|&id| id != 0),
            title: entry.name.unwrap_or_default(),
            description: entry.description.unwrap_or_default(),
            assessment: truthy(entry.assessment.as_ref()),
            has_final_exam: truthy(entry.has_msp.as_ref()),
            ects: entry.ects.unwrap_or(0),
            dependencies: entry.depending_modules_ids.unwrap_or_default(),
            semester: Semester::Unplanned,
        };

        if store.upsert_module(module) {
            summary.inserted += 1;
        } else {
            summary.updated += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::GradeInput;
    use crate::model::StudyLog;

    const CATALOG: &str = r#"[
        {
            "id": 101,
            "bezeichnung": "mgli",
            "name": "Mathematische Grundlagen",
            "description": "Logic and sets",
            "hasMsp": true,
            "assessment": 1,
            "ects": 6,
            "dependingModulesIDs": []
        },
        {
            "id": 205,
            "bezeichnung": "pro2E",
            "name": "Projekt 2",
            "hasMsp": false,
            "ects": 6,
            "dependingModulesIDs": [101]
        },
        {
            "id": 300,
            "name": "No short name"
        }
    ]"#;

    fn empty_store() -> Store {
        Store::from_log("unused.json", StudyLog::default())
    }

    #[test]
    fn import_inserts_modules() {
        let mut store = empty_store();
        let summary = import_catalog_str(&mut store, CATALOG).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                inserted: 2,
                updated: 0,
                skipped: 1
            }
        );

        let mgli = store.module("mgli").unwrap();
        assert_eq!(mgli.mod_id, Some(101));
        assert!(mgli.assessment);
        assert!(mgli.has_final_exam);
        assert_eq!(mgli.semester, Semester::Unplanned);

        let project = store.module("pro2e").unwrap();
        assert!(project.is_project());
        assert!(!project.has_final_exam);
        assert_eq!(project.dependencies, vec![101]);
    }

    #[test]
    fn reimport_updates_and_keeps_semester() {
        let mut store = empty_store();
        import_catalog_str(&mut store, CATALOG).unwrap();
        store.set_semester("mgli", Semester::Term(1), &[]).unwrap();

        let changed = r#"[
            {"id": 101, "bezeichnung": "mgli", "name": "Mathematische Grundlagen", "ects": 9},
            {"id": 205, "bezeichnung": "pro2E", "name": "Projekt 2", "ects": 6}
        ]"#;
        let summary = import_catalog_str(&mut store, changed).unwrap();
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.updated, 2);

        let mgli = store.module("mgli").unwrap();
        assert_eq!(mgli.ects, 9);
        assert_eq!(mgli.semester, Semester::Term(1));
    }

    #[test]
    fn reimport_with_other_casing_then_delete() {
        let mut store = empty_store();
        import_catalog_str(&mut store, CATALOG).unwrap();
        store.set_semester("mgli", Semester::Term(1), &[]).unwrap();
        store
            .record_grade(
                "mgli",
                GradeInput {
                    k1: Some(5.5),
                    ..GradeInput::default()
                },
            )
            .unwrap();

        let recased = r#"[{"id": 101, "bezeichnung": "MGLI", "name": "Mathe", "ects": 6}]"#;
        let summary = import_catalog_str(&mut store, recased).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(store.module("mgli").unwrap().name, "mgli");

        store.delete_module("MGLI").unwrap();
        assert!(store.log().grades.is_empty());

        store.add_module(Module::new("MGLI", "Mathe", 6)).unwrap();
        store.set_semester("MGLI", Semester::Term(1), &[]).unwrap();
        assert!(store.latest_grade("MGLI").is_none());
    }

    #[test]
    fn non_array_imports_nothing() {
        let mut store = empty_store();
        let summary = import_catalog_str(&mut store, r#"{"modules": []}"#).unwrap();
        assert_eq!(summary, ImportSummary::default());
        assert!(store.log().modules.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut store = empty_store();
        assert!(import_catalog_str(&mut store, "[{").is_err());
    }

    #[test]
    fn import_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let mut store = empty_store();
        let summary = import_catalog(&mut store, &path).unwrap();
        assert_eq!(summary.inserted, 2);
        assert!(import_catalog(&mut store, &dir.path().join("missing.json")).is_err());
    }
}
