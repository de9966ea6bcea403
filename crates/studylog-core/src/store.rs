//! JSON-backed study log store.
//!
//! The whole log is one pretty-printed JSON document, loaded on open and
//! rewritten on [`Store::save`]. Mutating operations only touch memory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::error::StoreError;
use crate::grade::GradeInput;
use crate::model::{GradeRecord, Module, Semester, StudyLog};

/// A study log bound to the file it was loaded from.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    log: StudyLog,
}

impl Store {
    /// Load the log at `path`, or start an empty one if the file is missing.
    pub fn open(path: &Path) -> Result<Self> {
        let log = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read study log from {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse study log: {}", path.display()))?
        } else {
            tracing::debug!("no study log at {}, starting empty", path.display());
            StudyLog::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            log,
        })
    }

    /// Wrap an existing log (useful for testing).
    pub fn from_log(path: impl Into<PathBuf>, log: StudyLog) -> Self {
        Self {
            path: path.into(),
            log,
        }
    }

    /// Write the log back to its file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.log).context("failed to serialize study log")?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write study log to {}", self.path.display()))?;
        tracing::debug!(
            modules = self.log.modules.len(),
            grades = self.log.grades.len(),
            "saved study log to {}",
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self) -> &StudyLog {
        &self.log
    }

    /// Look up a module by name, ignoring case.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.log
            .modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    fn module_index(&self, name: &str) -> Result<usize, StoreError> {
        self.log
            .modules
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::ModuleNotFound(name.to_string()))
    }

    /// Add a new module. Names are unique regardless of case.
    pub fn add_module(&mut self, module: Module) -> Result<(), StoreError> {
        if self.module(&module.name).is_some() {
            return Err(StoreError::DuplicateModule(module.name));
        }
        self.log.modules.push(module);
        Ok(())
    }

    /// Insert a module, or overwrite the catalog fields of an existing one
    /// while keeping its stored name and semester. Returns `true` if the
    /// module was new.
    pub fn upsert_module(&mut self, module: Module) -> bool {
        match self.module_index(&module.name) {
            Ok(idx) => {
                let existing = &mut self.log.modules[idx];
                let name = std::mem::take(&mut existing.name);
                let semester = existing.semester;
                *existing = Module {
                    name,
                    semester,
                    ..module
                };
                false
            }
            Err(_) => {
                self.log.modules.push(module);
                true
            }
        }
    }

    /// Remove a module together with all of its grade records.
    pub fn delete_module(&mut self, name: &str) -> Result<Module, StoreError> {
        let idx = self.module_index(name)?;
        let module = self.log.modules.remove(idx);
        self.log
            .grades
            .retain(|g| !g.module.eq_ignore_ascii_case(&module.name));
        Ok(module)
    }

    /// Move a module to `semester`, checking that its dependencies come first.
    ///
    /// Dependencies listed in `ignored` are not checked. Moving a module out
    /// of the plan never checks dependencies.
    pub fn set_semester(
        &mut self,
        name: &str,
        semester: Semester,
        ignored: &[u32],
    ) -> Result<(), StoreError> {
        let idx = self.module_index(name)?;

        if semester.is_planned() {
            let module = &self.log.modules[idx];
            for &dependency in module.dependencies.iter().filter(|d| !ignored.contains(d)) {
                let Some(required) = self
                    .log
                    .modules
                    .iter()
                    .find(|m| m.mod_id == Some(dependency))
                else {
                    return Err(StoreError::DependencyMissing {
                        module: module.name.clone(),
                        dependency,
                    });
                };

                let blocked = match (required.semester, semester) {
                    (Semester::Recognized, _) => false,
                    (Semester::Unplanned, _) => true,
                    (Semester::Term(dep), Semester::Term(target)) => dep > target,
                    (Semester::Term(_), _) => false,
                };
                if blocked {
                    return Err(StoreError::DependencyNotMet {
                        module: module.name.clone(),
                        target: semester,
                        dependency,
                        dependency_name: required.name.clone(),
                    });
                }
            }
        }

        self.log.modules[idx].semester = semester;
        Ok(())
    }

    /// Append a new grade record for a planned module.
    pub fn record_grade(&mut self, name: &str, input: GradeInput) -> Result<&GradeRecord, StoreError> {
        let idx = self.module_index(name)?;
        let module = &self.log.modules[idx];
        if !module.semester.is_planned() {
            return Err(StoreError::ModuleUnplanned(module.name.clone()));
        }

        let record = GradeRecord {
            id: self.log.next_grade_id,
            module: module.name.clone(),
            recorded_at: Utc::now(),
            input,
        };
        self.log.next_grade_id += 1;
        let slot = self.log.grades.len();
        self.log.grades.push(record);
        Ok(&self.log.grades[slot])
    }

    /// The most recently saved grade record for a module.
    pub fn latest_grade(&self, name: &str) -> Option<&GradeRecord> {
        self.log
            .grades
            .iter()
            .filter(|g| g.module.eq_ignore_ascii_case(name))
            .max_by_key(|g| g.id)
    }

    /// Modules whose name contains `filter` (case-insensitive), sorted by name.
    pub fn modules_matching(&self, filter: Option<&str>) -> Vec<&Module> {
        let needle = filter.map(str::to_lowercase).unwrap_or_default();
        let mut modules: Vec<&Module> = self
            .log
            .modules
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect();
        modules.sort_by_key(|m| m.name.to_lowercase());
        modules
    }

    /// Modules placed in a semester, ordered by semester then name.
    pub fn planned_modules(&self) -> Vec<&Module> {
        let mut modules: Vec<&Module> = self
            .log
            .modules
            .iter()
            .filter(|m| m.semester.is_planned())
            .collect();
        modules.sort_by(|a, b| a.semester.cmp(&b.semester).then_with(|| a.name.cmp(&b.name)));
        modules
    }
}
