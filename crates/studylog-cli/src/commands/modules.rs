//! Module management: `add-module`, `delete-module`, `set-semester`, `modules`.

use anyhow::Result;
use comfy_table::{Cell, Table};

use studylog_core::model::{Module, Semester};

use super::Context;

/// Module fields as given to `add-module`.
pub struct NewModule {
    pub name: String,
    pub title: String,
    pub description: String,
    pub ects: u32,
    pub semester: Option<String>,
    pub mod_id: Option<u32>,
    pub depends_on: Vec<u32>,
    pub assessment: bool,
    pub final_exam: bool,
}

fn parse_semester(s: &str) -> Result<Semester> {
    s.parse().map_err(|e: String| anyhow::anyhow!("{}", e))
}

pub fn add(ctx: &Context, new: NewModule) -> Result<()> {
    anyhow::ensure!(!new.name.trim().is_empty(), "module name must not be empty");
    let semester = new
        .semester
        .as_deref()
        .map(parse_semester)
        .transpose()?
        .unwrap_or_default();

    let (_, mut store) = ctx.open()?;
    let module = Module {
        name: new.name.trim().to_string(),
        mod_id: new.mod_id,
        title: new.title,
        description: new.description,
        assessment: new.assessment,
        has_final_exam: new.final_exam,
        ects: new.ects,
        dependencies: new.depends_on,
        semester,
    };
    let name = module.name.clone();
    store.add_module(module)?;
    store.save()?;

    println!("Added module {name} (semester {semester})");
    Ok(())
}

pub fn delete(ctx: &Context, name: &str) -> Result<()> {
    let (_, mut store) = ctx.open()?;
    let module = store.delete_module(name)?;
    store.save()?;

    println!("Deleted module {} and its grades", module.name);
    Ok(())
}

pub fn set_semester(
    ctx: &Context,
    name: &str,
    semester: &str,
    mut ignored: Vec<u32>,
    force: bool,
) -> Result<()> {
    let semester = parse_semester(semester)?;
    let (_, mut store) = ctx.open()?;

    if force {
        if let Some(module) = store.module(name) {
            ignored.extend(module.dependencies.iter().copied());
        }
    }

    if let Err(e) = store.set_semester(name, semester, &ignored) {
        if let Some(dependency) = e.blocking_dependency() {
            anyhow::bail!("{e} (re-run with --ignore-dependency {dependency} to place it anyway)");
        }
        return Err(e.into());
    }
    store.save()?;

    println!("Moved {name} to semester {semester}");
    Ok(())
}

pub fn list(ctx: &Context, filter: Option<&str>) -> Result<()> {
    let (_, store) = ctx.open()?;
    let modules = store.modules_matching(filter);

    if modules.is_empty() {
        println!("No modules found. Run `studylog import <catalog>` or `studylog add-module`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Module", "Title", "ECTS", "Semester"]);
    for module in modules {
        table.add_row(vec![
            Cell::new(&module.name),
            Cell::new(&module.title),
            Cell::new(module.ects),
            Cell::new(module.semester),
        ]);
    }
    println!("{table}");
    Ok(())
}
