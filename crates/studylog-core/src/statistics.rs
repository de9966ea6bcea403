//! Per-semester summaries and overall study statistics.
//!
//! Grades are recomputed from the latest record of every planned module.
//! A module counts as passed when its final average reaches the pass
//! threshold; recognized modules always count as passed.

use serde::{Deserialize, Serialize};

use crate::config::StudylogConfig;
use crate::grade::{GradeInput, GradeResult};
use crate::model::{Module, Semester};
use crate::store::Store;

/// Grades at or above this value are shown as good.
pub const GOOD_GRADE: f64 = 4.0;

/// Display band of a grade value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBand {
    Good,
    Poor,
}

impl GradeBand {
    pub fn of(value: f64) -> Self {
        if value >= GOOD_GRADE {
            GradeBand::Good
        } else {
            GradeBand::Poor
        }
    }
}

/// Final exam score needed so that `(EN + MSP) / 2` reaches `threshold`.
pub fn required_final_exam(entry_grade: f64, threshold: f64) -> f64 {
    threshold * 2.0 - entry_grade
}

/// Mean of the present values, `None` if there are none.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// One module line of a semester summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRow {
    pub module: String,
    pub title: String,
    pub ects: u32,
    pub assessment: bool,
    pub has_final_exam: bool,
    pub is_project: bool,
    /// Latest recorded grade, if any.
    pub grade: Option<GradeInput>,
    pub result: GradeResult,
    /// Final exam score still needed to pass, when the MSP is outstanding.
    pub required_msp: Option<f64>,
    pub passed: bool,
}

/// Statistics of one planned semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub semester: Semester,
    pub rows: Vec<ModuleRow>,
    /// ECTS of regular modules.
    pub module_ects: u32,
    /// ECTS of project modules.
    pub project_ects: u32,
    /// ECTS of passed modules.
    pub passed_ects: u32,
    /// Mean final average of the graded modules.
    pub average: Option<f64>,
}

impl SemesterSummary {
    pub fn planned_ects(&self) -> u32 {
        self.module_ects + self.project_ects
    }

    pub fn assessment_count(&self) -> usize {
        self.rows.iter().filter(|r| r.assessment).count()
    }
}

/// A semester planned below the minimum ECTS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EctsWarning {
    pub semester: Semester,
    pub planned_ects: u32,
}

/// Aggregate statistics over the whole study plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyOverview {
    /// All nine planned slots, in order, including empty ones.
    pub semesters: Vec<SemesterSummary>,
    /// Mean of the semester averages that exist.
    pub overall_average: Option<f64>,
    pub planned_ects: u32,
    pub achieved_ects: u32,
    pub degree_ects: u32,
    pub warnings: Vec<EctsWarning>,
    /// First semester by which the assessment stage is complete.
    pub assessment_completed_in: Option<Semester>,
}

impl StudyOverview {
    /// Achieved ECTS as a percentage of the degree total.
    pub fn achieved_percent(&self) -> f64 {
        if self.degree_ects == 0 {
            return 0.0;
        }
        self.achieved_ects as f64 / self.degree_ects as f64 * 100.0
    }

    /// Degree-of-recognition score: the overall average at one decimal.
    pub fn recognition_score(&self) -> Option<f64> {
        self.overall_average.map(|avg| (avg * 10.0).round() / 10.0)
    }

    /// Semesters with at least one module.
    pub fn non_empty(&self) -> impl Iterator<Item = &SemesterSummary> {
        self.semesters.iter().filter(|s| !s.rows.is_empty())
    }
}

fn module_row(module: &Module, grade: Option<GradeInput>, config: &StudylogConfig) -> ModuleRow {
    let result = grade.map(|g| g.compute()).unwrap_or_default();
    let msp_missing = grade.map_or(true, |g| g.msp.is_none());
    let required_msp = match result.entry_grade {
        Some(en) if module.has_final_exam && msp_missing => {
            Some(required_final_exam(en, config.pass_threshold))
        }
        _ => None,
    };
    let passed = module.semester == Semester::Recognized
        || result
            .final_average
            .is_some_and(|avg| avg >= config.pass_threshold);

    ModuleRow {
        module: module.name.clone(),
        title: module.title.clone(),
        ects: module.ects,
        assessment: module.assessment,
        has_final_exam: module.has_final_exam,
        is_project: module.is_project(),
        grade,
        result,
        required_msp,
        passed,
    }
}

/// Summarize one semester from its modules.
pub fn summarize_semester(
    store: &Store,
    semester: Semester,
    config: &StudylogConfig,
) -> SemesterSummary {
    let rows: Vec<ModuleRow> = store
        .planned_modules()
        .into_iter()
        .filter(|m| m.semester == semester)
        .map(|m| {
            let grade = store.latest_grade(&m.name).map(|r| r.input);
            module_row(m, grade, config)
        })
        .collect();

    let mut module_ects = 0;
    let mut project_ects = 0;
    let mut passed_ects = 0;
    for row in &rows {
        if row.is_project {
            project_ects += row.ects;
        } else {
            module_ects += row.ects;
        }
        if row.passed {
            passed_ects += row.ects;
        }
    }
    let average = mean(rows.iter().filter_map(|r| r.result.final_average));

    SemesterSummary {
        semester,
        rows,
        module_ects,
        project_ects,
        passed_ects,
        average,
    }
}

/// Compute statistics across every planned semester.
pub fn compute_overview(store: &Store, config: &StudylogConfig) -> StudyOverview {
    let semesters: Vec<SemesterSummary> = Semester::planned()
        .map(|s| summarize_semester(store, s, config))
        .collect();

    let overall_average = mean(semesters.iter().filter_map(|s| s.average));
    let planned_ects: u32 = semesters.iter().map(SemesterSummary::planned_ects).sum();
    let achieved_ects: u32 = semesters.iter().map(|s| s.passed_ects).sum();

    let warnings = semesters
        .iter()
        .filter(|s| matches!(s.semester, Semester::Term(_)))
        .filter(|s| s.planned_ects() < config.min_semester_ects)
        .map(|s| EctsWarning {
            semester: s.semester,
            planned_ects: s.planned_ects(),
        })
        .collect();

    let mut assessment_seen = 0;
    let mut assessment_completed_in = None;
    for summary in &semesters {
        assessment_seen += summary.assessment_count();
        if assessment_seen >= config.assessment_modules {
            assessment_completed_in = Some(summary.semester);
            break;
        }
    }

    StudyOverview {
        semesters,
        overall_average,
        planned_ects,
        achieved_ects,
        degree_ects: config.degree_ects,
        warnings,
        assessment_completed_in,
    }
}
