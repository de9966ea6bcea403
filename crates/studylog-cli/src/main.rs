//! studylog CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studylog", version, about = "Study progress tracker: modules, ECTS, and grades")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Study log file (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Exam components as entered on the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct GradeArgs {
    /// First written exam
    #[arg(long)]
    k1: Option<f64>,

    /// Second written exam
    #[arg(long)]
    k2: Option<f64>,

    /// Weight of K1 (calc type 3 only)
    #[arg(long)]
    k1_weight: Option<f64>,

    /// Weight of K2 (calc type 3 only)
    #[arg(long)]
    k2_weight: Option<f64>,

    /// Final exam (MSP)
    #[arg(long)]
    msp: Option<f64>,

    /// Weight of the MSP between 0 and 1 (calc type 3 only)
    #[arg(long)]
    msp_weight: Option<f64>,

    /// Calculation type: 0 equal, 1 one-third/two-thirds, 2 MSP override, 3 weighted
    #[arg(long, allow_negative_numbers = true)]
    calc_type: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and an example module catalog
    Init,

    /// Import modules from a JSON catalog
    Import {
        /// Path to the catalog JSON file
        catalog: PathBuf,
    },

    /// Add a module
    AddModule {
        /// Unique module name
        name: String,

        /// Human-readable title
        #[arg(long, default_value = "")]
        title: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,

        /// ECTS credits
        #[arg(long, default_value = "0")]
        ects: u32,

        /// Semester 1-8, 9 or "recognized" for transferred credits
        #[arg(long)]
        semester: Option<String>,

        /// Catalog id referenced by other modules' dependencies
        #[arg(long)]
        mod_id: Option<u32>,

        /// Catalog ids of required modules (comma-separated)
        #[arg(long, value_delimiter = ',')]
        depends_on: Vec<u32>,

        /// Module belongs to the assessment stage
        #[arg(long)]
        assessment: bool,

        /// Module ends with a final exam (MSP)
        #[arg(long)]
        final_exam: bool,
    },

    /// Delete a module and all of its grades
    DeleteModule {
        /// Module name
        name: String,
    },

    /// Move a module to a semester
    SetSemester {
        /// Module name
        name: String,

        /// Semester 1-8, 9 or "recognized"; anything else unplans the module
        semester: String,

        /// Dependency ids to skip when checking (comma-separated)
        #[arg(long, value_delimiter = ',')]
        ignore_dependency: Vec<u32>,

        /// Skip all dependency checks
        #[arg(long)]
        force: bool,
    },

    /// List modules
    Modules {
        /// Only show modules whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Record grades for a module
    Grade {
        /// Module name
        module: String,

        #[command(flatten)]
        grades: GradeArgs,
    },

    /// Show the latest grades of a module
    Show {
        /// Module name
        module: String,
    },

    /// Compute a grade without storing anything
    Compute {
        #[command(flatten)]
        grades: GradeArgs,
    },

    /// Show grades and statistics per semester
    Overview {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studylog=info")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        data: cli.data,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Import { catalog } => commands::import::execute(&ctx, catalog),
        Commands::AddModule {
            name,
            title,
            description,
            ects,
            semester,
            mod_id,
            depends_on,
            assessment,
            final_exam,
        } => commands::modules::add(
            &ctx,
            commands::modules::NewModule {
                name,
                title,
                description,
                ects,
                semester,
                mod_id,
                depends_on,
                assessment,
                final_exam,
            },
        ),
        Commands::DeleteModule { name } => commands::modules::delete(&ctx, &name),
        Commands::SetSemester {
            name,
            semester,
            ignore_dependency,
            force,
        } => commands::modules::set_semester(&ctx, &name, &semester, ignore_dependency, force),
        Commands::Modules { filter } => commands::modules::list(&ctx, filter.as_deref()),
        Commands::Grade { module, grades } => commands::grade::record(&ctx, &module, grades),
        Commands::Show { module } => commands::grade::show(&ctx, &module),
        Commands::Compute { grades } => commands::grade::compute(grades),
        Commands::Overview { format } => commands::overview::execute(&ctx, &format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
