pub mod grade;
pub mod import;
pub mod init;
pub mod modules;
pub mod overview;

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color};

use studylog_core::config::{load_config_from, StudylogConfig};
use studylog_core::statistics::GradeBand;
use studylog_core::store::Store;

/// Options shared by every command that touches the study log.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

impl Context {
    pub fn config(&self) -> Result<StudylogConfig> {
        let mut config = load_config_from(self.config_path.as_deref())?;
        if let Some(data) = &self.data {
            config.data_file = data.clone();
        }
        Ok(config)
    }

    pub fn open(&self) -> Result<(StudylogConfig, Store)> {
        let config = self.config()?;
        let store = Store::open(&config.data_file)?;
        Ok((config, store))
    }
}

/// Two decimals, or a dash when absent.
pub fn fmt_grade(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// A right-aligned grade cell, coloured by band.
pub fn grade_cell(value: Option<f64>) -> Cell {
    let cell = Cell::new(fmt_grade(value)).set_alignment(comfy_table::CellAlignment::Right);
    match value.map(GradeBand::of) {
        Some(GradeBand::Good) => cell.fg(Color::Green),
        Some(GradeBand::Poor) => cell.fg(Color::Red),
        None => cell,
    }
}

pub fn flag(value: bool) -> &'static str {
    if value {
        "x"
    } else {
        "-"
    }
}
