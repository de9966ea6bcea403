//! The `studylog init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create studylog.toml
    if std::path::Path::new("studylog.toml").exists() {
        println!("studylog.toml already exists, skipping.");
    } else {
        std::fs::write("studylog.toml", SAMPLE_CONFIG)?;
        println!("Created studylog.toml");
    }

    // Create example catalog
    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.json");
    if example_path.exists() {
        println!("catalogs/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: studylog import catalogs/example.json");
    println!("  2. Run: studylog set-semester mgli 1");
    println!("  3. Run: studylog grade mgli --k1 4.5 --k2 5.0 --msp 4.8");
    println!("  4. Run: studylog overview");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studylog configuration

data_file = "studylog.json"
pass_threshold = 3.75
degree_ects = 180
min_semester_ects = 15
assessment_modules = 9
"#;

const EXAMPLE_CATALOG: &str = r#"[
  {
    "id": 101,
    "bezeichnung": "mgli",
    "name": "Mathematische Grundlagen der Informatik",
    "description": "Logic, sets, relations, and proofs",
    "hasMsp": true,
    "assessment": true,
    "ects": 6,
    "dependingModulesIDs": []
  },
  {
    "id": 102,
    "bezeichnung": "oop",
    "name": "Objektorientierte Programmierung",
    "description": "Classes, interfaces, and testing",
    "hasMsp": true,
    "assessment": true,
    "ects": 6,
    "dependingModulesIDs": []
  },
  {
    "id": 201,
    "bezeichnung": "algd1",
    "name": "Algorithmen und Datenstrukturen 1",
    "description": "Sorting, searching, and complexity",
    "hasMsp": true,
    "assessment": false,
    "ects": 6,
    "dependingModulesIDs": [101, 102]
  },
  {
    "id": 301,
    "bezeichnung": "pro2E",
    "name": "Projekt 2",
    "description": "Team project",
    "hasMsp": false,
    "assessment": false,
    "ects": 6,
    "dependingModulesIDs": [102]
  }
]
"#;
