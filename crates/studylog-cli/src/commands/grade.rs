//! Grade commands: `grade`, `show`, `compute`.

use anyhow::Result;
use comfy_table::{Cell, Table};

use studylog_core::grade::{CalcType, GradeInput, GradeResult};

use super::{fmt_grade, grade_cell, Context};
use crate::GradeArgs;

impl From<GradeArgs> for GradeInput {
    fn from(args: GradeArgs) -> Self {
        GradeInput {
            k1: args.k1,
            k2: args.k2,
            k1_weight: args.k1_weight,
            k2_weight: args.k2_weight,
            msp: args.msp,
            msp_weight: args.msp_weight,
            calc_type: args.calc_type,
        }
    }
}

fn describe_calc_type(tag: Option<i64>) -> String {
    match CalcType::from_tag(tag) {
        Some(policy) => format!("{} ({})", policy.tag(), policy.describe()),
        None => format!("{} (unknown, no grade computed)", tag.unwrap_or_default()),
    }
}

fn print_grades(input: &GradeInput, result: &GradeResult) {
    let weighted = CalcType::from_tag(input.calc_type).is_some_and(CalcType::uses_weights);

    let mut table = Table::new();
    table.set_header(vec!["K1", "K2", "MSP", "EN", "Final"]);
    table.add_row(vec![
        grade_cell(input.k1),
        grade_cell(input.k2),
        grade_cell(input.msp),
        grade_cell(result.entry_grade),
        grade_cell(result.final_average),
    ]);
    if weighted {
        table.add_row(vec![
            Cell::new(fmt_grade(input.k1_weight)),
            Cell::new(fmt_grade(input.k2_weight)),
            Cell::new(fmt_grade(input.msp_weight)),
            Cell::new(""),
            Cell::new("weights"),
        ]);
    }

    println!("Calculation: {}", describe_calc_type(input.calc_type));
    println!("{table}");
}

pub fn record(ctx: &Context, module: &str, args: GradeArgs) -> Result<()> {
    let (_, mut store) = ctx.open()?;

    let input = GradeInput::from(args);
    let record = store.record_grade(module, input)?;
    let (id, name) = (record.id, record.module.clone());
    store.save()?;

    tracing::debug!(id, module = %name, "recorded grade");
    println!("Saved grades for {name}");
    print_grades(&input, &input.compute());
    Ok(())
}

pub fn show(ctx: &Context, module: &str) -> Result<()> {
    let (_, store) = ctx.open()?;

    let Some(found) = store.module(module) else {
        anyhow::bail!("module not found: {module}");
    };

    match store.latest_grade(&found.name) {
        Some(record) => {
            println!(
                "{} (semester {}), recorded {}",
                found.name,
                found.semester,
                record.recorded_at.format("%Y-%m-%d %H:%M")
            );
            print_grades(&record.input, &record.input.compute());
        }
        None => println!("No grades recorded for {}", found.name),
    }
    Ok(())
}

pub fn compute(args: GradeArgs) -> Result<()> {
    let input = GradeInput::from(args);
    let result = input.compute();

    println!("EN: {}", fmt_grade(result.entry_grade));
    println!("Final: {}", fmt_grade(result.final_average));
    Ok(())
}
