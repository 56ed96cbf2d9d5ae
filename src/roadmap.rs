//! Roadmap templates and the sequential importer
//!
//! A roadmap is a named, fixed, ordered list of technology descriptors used
//! to bulk-populate the store. Import is deliberately not atomic as a batch:
//! each insert is durable before the next begins, and partial completion is a
//! valid outcome.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::store::TechStore;
use crate::types::{Category, NewTechnology, TechnologyRecord};

/// How demanding a roadmap entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// One descriptor inside a roadmap template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
}

/// A named roadmap
#[derive(Debug, Clone)]
pub struct Roadmap {
    pub name: &'static str,
    pub entries: Vec<RoadmapEntry>,
}

static CATALOG: Lazy<Vec<Roadmap>> = Lazy::new(|| {
    vec![
        Roadmap {
            name: "frontend",
            entries: vec![
                RoadmapEntry {
                    title: "HTML & CSS",
                    description: "The foundations of web development",
                    category: Category::Frontend,
                    difficulty: Difficulty::Beginner,
                },
                RoadmapEntry {
                    title: "JavaScript",
                    description: "The programming language of the web",
                    category: Category::Frontend,
                    difficulty: Difficulty::Beginner,
                },
                RoadmapEntry {
                    title: "React",
                    description: "A library for building user interfaces",
                    category: Category::Frontend,
                    difficulty: Difficulty::Intermediate,
                },
                RoadmapEntry {
                    title: "TypeScript",
                    description: "A typed superset of JavaScript",
                    category: Category::Frontend,
                    difficulty: Difficulty::Intermediate,
                },
                RoadmapEntry {
                    title: "Next.js",
                    description: "A full-stack framework for React",
                    category: Category::Frontend,
                    difficulty: Difficulty::Advanced,
                },
            ],
        },
        Roadmap {
            name: "backend",
            entries: vec![
                RoadmapEntry {
                    title: "Node.js",
                    description: "A JavaScript runtime for servers",
                    category: Category::Backend,
                    difficulty: Difficulty::Intermediate,
                },
                RoadmapEntry {
                    title: "Express.js",
                    description: "A minimal web framework for Node.js",
                    category: Category::Backend,
                    difficulty: Difficulty::Intermediate,
                },
                RoadmapEntry {
                    title: "MongoDB",
                    description: "A NoSQL document database",
                    category: Category::Database,
                    difficulty: Difficulty::Intermediate,
                },
                RoadmapEntry {
                    title: "PostgreSQL",
                    description: "A relational database",
                    category: Category::Database,
                    difficulty: Difficulty::Intermediate,
                },
                RoadmapEntry {
                    title: "Docker",
                    description: "A platform for containerized applications",
                    category: Category::Devops,
                    difficulty: Difficulty::Advanced,
                },
            ],
        },
    ]
});

/// Names of the available templates
pub fn template_names() -> Vec<&'static str> {
    CATALOG.iter().map(|r| r.name).collect()
}

/// Look up a template; an unknown name falls back to "frontend"
pub fn template(name: &str) -> &'static Roadmap {
    CATALOG
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| {
            debug!("Unknown roadmap '{}', falling back to frontend", name);
            &CATALOG[0]
        })
}

/// What a roadmap import produced
#[derive(Debug)]
pub struct ImportOutcome {
    pub imported: Vec<TechnologyRecord>,
    pub failed: usize,
}

/// Import a roadmap template into the store
///
/// Inserts run one at a time, each durable before the next begins; a failed
/// insert is logged and skipped without rolling back earlier ones.
pub fn import_roadmap(store: &TechStore, name: &str) -> Result<ImportOutcome> {
    let roadmap = template(name);
    let mut imported = Vec::new();
    let mut failed = 0;

    for entry in &roadmap.entries {
        let input = NewTechnology {
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            notes: String::new(),
            category: entry.category.clone(),
            status: Default::default(),
        };
        match store.import(input) {
            Ok(record) => imported.push(record),
            Err(e) => {
                warn!("Failed to import '{}': {}", entry.title, e);
                failed += 1;
            }
        }
    }

    Ok(ImportOutcome { imported, failed })
}
