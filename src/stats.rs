//! Statistics aggregator
//!
//! Pure, read-only derivation over a record list: status counts, category
//! counts, and the overall completion percentage. Safe to call repeatedly;
//! nothing here touches storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Category, Status, TechnologyRecord};

/// Aggregate view of a record list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    /// round(completed / total * 100), half-up; 0 for an empty list
    pub progress_percent: u32,
    /// Keys are exactly the distinct category values present
    pub by_category: BTreeMap<String, usize>,
}

/// Derive the aggregate view. The three status counts partition `total`.
pub fn summarize(records: &[TechnologyRecord]) -> Summary {
    let total = records.len();
    let completed = records.iter().filter(|r| r.status == Status::Completed).count();
    let in_progress = records.iter().filter(|r| r.status == Status::InProgress).count();
    let not_started = records.iter().filter(|r| r.status == Status::NotStarted).count();

    let progress_percent = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *by_category.entry(record.category.as_str().to_string()).or_insert(0) += 1;
    }

    Summary {
        total,
        completed,
        in_progress,
        not_started,
        progress_percent,
        by_category,
    }
}

/// A rule-based suggestion derived from the current summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub detail: String,
}

/// Suggestions for where to focus next
pub fn recommendations(summary: &Summary) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if summary.total > 0 && summary.completed == 0 {
        out.push(Recommendation {
            title: "Finish your first technology".to_string(),
            detail: "Nothing is completed yet. Pick one entry and see it through.".to_string(),
        });
    }

    if summary.in_progress > 3 {
        out.push(Recommendation {
            title: "Too many technologies in progress".to_string(),
            detail: "Focus on finishing one or two at a time instead of spreading out.".to_string(),
        });
    }

    if summary.total > 0 && summary.completed == summary.total {
        out.push(Recommendation {
            title: "Everything completed".to_string(),
            detail: "Add new technologies or deepen the ones you already know.".to_string(),
        });
    }

    let frontend = summary
        .by_category
        .get(Category::Frontend.as_str())
        .copied()
        .unwrap_or(0);
    if frontend == 0 {
        out.push(Recommendation {
            title: "Try a frontend technology".to_string(),
            detail: "Add React, Vue or Angular to your list to round out your skills.".to_string(),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn record(id: i64, status: Status, category: Category) -> TechnologyRecord {
        TechnologyRecord {
            id,
            title: format!("Tech {}", id),
            description: String::new(),
            notes: String::new(),
            category,
            status,
            source: Source::Local,
            created_at: None,
            imported_at: None,
        }
    }

    #[test]
    fn test_empty_list_has_zero_percent() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.progress_percent, 0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_status_counts_partition_total() {
        let records = vec![
            record(1, Status::Completed, Category::Frontend),
            record(2, Status::InProgress, Category::Backend),
            record(3, Status::NotStarted, Category::Backend),
            record(4, Status::Completed, Category::Devops),
        ];
        let summary = summarize(&records);
        assert_eq!(
            summary.completed + summary.in_progress + summary.not_started,
            summary.total
        );
    }

    #[test]
    fn test_two_of_three_completed_rounds_to_67() {
        let records = vec![
            record(1, Status::Completed, Category::Frontend),
            record(2, Status::Completed, Category::Frontend),
            record(3, Status::InProgress, Category::Backend),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.in_progress, 1);
        assert_eq!(summary.not_started, 0);
        assert_eq!(summary.progress_percent, 67);
    }

    #[test]
    fn test_half_rounds_up() {
        let records = vec![
            record(1, Status::Completed, Category::Other),
            record(2, Status::NotStarted, Category::Other),
            record(3, Status::NotStarted, Category::Other),
            record(4, Status::NotStarted, Category::Other),
            record(5, Status::NotStarted, Category::Other),
            record(6, Status::NotStarted, Category::Other),
            record(7, Status::NotStarted, Category::Other),
            record(8, Status::NotStarted, Category::Other),
        ];
        // 1/8 = 12.5% → 13
        assert_eq!(summarize(&records).progress_percent, 13);
    }

    #[test]
    fn test_by_category_includes_custom_values() {
        let records = vec![
            record(1, Status::NotStarted, Category::Frontend),
            record(2, Status::NotStarted, Category::Frontend),
            record(3, Status::NotStarted, Category::Custom("ml".to_string())),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.by_category.get("frontend"), Some(&2));
        assert_eq!(summary.by_category.get("ml"), Some(&1));
        assert_eq!(summary.by_category.len(), 2);
    }

    #[test]
    fn test_recommendations_rules() {
        // nothing completed and no frontend
        let summary = summarize(&[record(1, Status::NotStarted, Category::Backend)]);
        let recs = recommendations(&summary);
        assert!(recs.iter().any(|r| r.title.contains("first technology")));
        assert!(recs.iter().any(|r| r.title.contains("frontend")));

        // everything completed
        let summary = summarize(&[record(1, Status::Completed, Category::Frontend)]);
        let recs = recommendations(&summary);
        assert!(recs.iter().any(|r| r.title.contains("Everything completed")));

        // more than three in progress
        let records: Vec<_> = (1..=4)
            .map(|i| record(i, Status::InProgress, Category::Frontend))
            .collect();
        let recs = recommendations(&summarize(&records));
        assert!(recs.iter().any(|r| r.title.contains("Too many")));
    }
}
