//! The `studylog overview` command.

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color, Table};

use studylog_core::model::Semester;
use studylog_core::statistics::{compute_overview, ModuleRow, StudyOverview};

use super::{flag, fmt_grade, grade_cell, Context};

pub fn execute(ctx: &Context, format: &str) -> Result<()> {
    let (config, store) = ctx.open()?;
    let overview = compute_overview(&store, &config);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&overview)?),
        "text" => print_text(&overview),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
    Ok(())
}

fn msp_cell(row: &ModuleRow) -> Cell {
    let msp = row.grade.and_then(|g| g.msp);
    match (msp, row.required_msp) {
        (None, Some(needed)) => Cell::new(format!("? {needed:.2}"))
            .set_alignment(CellAlignment::Right)
            .fg(Color::DarkGrey),
        _ => grade_cell(msp),
    }
}

fn print_text(overview: &StudyOverview) {
    if overview.non_empty().next().is_none() {
        println!("No modules planned yet. Use `studylog set-semester <module> <n>`.");
    }

    for summary in overview.non_empty() {
        match summary.semester {
            Semester::Recognized => println!("Recognized credits"),
            other => println!("Semester {other}"),
        }

        let mut table = Table::new();
        table.set_header(vec!["Module", "AS", "MSP", "K1", "K2", "MSP", "EN", "Final"]);
        for row in &summary.rows {
            let name = if row.passed {
                Cell::new(&row.module).fg(Color::Green)
            } else {
                Cell::new(&row.module)
            };
            table.add_row(vec![
                name,
                Cell::new(flag(row.assessment)),
                Cell::new(flag(row.has_final_exam)),
                grade_cell(row.grade.and_then(|g| g.k1)),
                grade_cell(row.grade.and_then(|g| g.k2)),
                msp_cell(row),
                grade_cell(row.result.entry_grade),
                grade_cell(row.result.final_average),
            ]);
        }
        println!("{table}");
        println!(
            "  ECTS: {} modules + {} projects, {} passed, average {}",
            summary.module_ects,
            summary.project_ects,
            summary.passed_ects,
            fmt_grade(summary.average)
        );
        println!();
    }

    println!("Grade average: {}", fmt_grade(overview.overall_average));
    println!(
        "ToR: {}",
        overview
            .recognition_score()
            .map(|s| format!("{s:.1}"))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "Planned ECTS: {}/{}",
        overview.planned_ects, overview.degree_ects
    );
    println!(
        "Achieved ECTS: {}/{} -> {:.1}%",
        overview.achieved_ects,
        overview.degree_ects,
        overview.achieved_percent()
    );

    if !overview.warnings.is_empty() || overview.assessment_completed_in.is_some() {
        println!("\nNotes:");
    }
    for warning in &overview.warnings {
        println!(
            "  Warning: semester {} has only {} ECTS",
            warning.semester, warning.planned_ects
        );
    }
    if let Some(semester) = overview.assessment_completed_in {
        println!("  Info: assessment stage complete from semester {semester}");
    }
}
