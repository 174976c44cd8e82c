//! Typed table records
//!
//! One record type per table, each with an explicit projection to a
//! column/value mapping. The adapter filters the projection against
//! the live schema before building an insert, so a record may carry
//! columns an older deployment does not have yet.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;

use stakenet_core::NetworkStatistics;

/// Projection from a typed record to column/value pairs
pub trait TableRecord {
    /// Columns in insert order
    fn columns(&self) -> Vec<(String, Value)>;
}

fn nullable(value: Option<f64>) -> Value {
    match value {
        Some(v) => Value::Real(v),
        None => Value::Null,
    }
}

/// One row of the `stakeholder_networks` table
///
/// Derived, immutable snapshot tied to (organization, package,
/// crowd_pct). Inserted once per build; deleted explicitly before
/// re-insertion — there is no upsert.
#[derive(Debug, Clone)]
pub struct NetworkStatisticsRecord {
    pub organization: String,
    pub package: String,
    pub crowd_pct: f64,
    pub statistics: NetworkStatistics,
    /// Serialized graph blob (bincode-encoded edge list)
    pub stakeholder_network: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl NetworkStatisticsRecord {
    pub fn new(
        organization: impl Into<String>,
        package: impl Into<String>,
        crowd_pct: f64,
        statistics: NetworkStatistics,
        stakeholder_network: Vec<u8>,
    ) -> Self {
        Self {
            organization: organization.into(),
            package: package.into(),
            crowd_pct,
            statistics,
            stakeholder_network,
            created_at: Utc::now(),
        }
    }
}

impl TableRecord for NetworkStatisticsRecord {
    fn columns(&self) -> Vec<(String, Value)> {
        vec![
            (
                "organization".to_owned(),
                Value::Text(self.organization.clone()),
            ),
            ("package".to_owned(), Value::Text(self.package.clone())),
            (
                "gini_coefficient".to_owned(),
                nullable(self.statistics.gini_coefficient),
            ),
            (
                "avg_clustering".to_owned(),
                nullable(self.statistics.avg_clustering),
            ),
            (
                "avg_min_path".to_owned(),
                nullable(self.statistics.avg_min_path),
            ),
            ("crowd_pct".to_owned(), Value::Real(self.crowd_pct)),
            (
                "nodes".to_owned(),
                Value::Integer(self.statistics.nodes as i64),
            ),
            (
                "stakeholder_network".to_owned(),
                Value::Blob(self.stakeholder_network.clone()),
            ),
            (
                "created_at".to_owned(),
                Value::Text(self.created_at.to_rfc3339()),
            ),
        ]
    }
}

/// One row of the `network_centrality` table
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityRecord {
    pub organization: String,
    pub package: String,
    pub user_id: String,
    pub betweenness_centrality: f64,
}

impl CentralityRecord {
    pub fn new(
        organization: impl Into<String>,
        package: impl Into<String>,
        user_id: impl Into<String>,
        betweenness_centrality: f64,
    ) -> Self {
        Self {
            organization: organization.into(),
            package: package.into(),
            user_id: user_id.into(),
            betweenness_centrality,
        }
    }
}

impl TableRecord for CentralityRecord {
    fn columns(&self) -> Vec<(String, Value)> {
        vec![
            (
                "organization".to_owned(),
                Value::Text(self.organization.clone()),
            ),
            ("package".to_owned(), Value::Text(self.package.clone())),
            ("user_id".to_owned(), Value::Text(self.user_id.clone())),
            (
                "betweenness_centrality".to_owned(),
                Value::Real(self.betweenness_centrality),
            ),
        ]
    }
}

/// One row of the `issue_comments` source table
///
/// The pipeline normally only reads this table; the record exists for
/// loaders and tests that seed interaction data.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueCommentRecord {
    pub organization: String,
    pub package: String,
    pub issue_number: i64,
    pub user_id: String,
}

impl IssueCommentRecord {
    pub fn new(
        organization: impl Into<String>,
        package: impl Into<String>,
        issue_number: i64,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            package: package.into(),
            issue_number,
            user_id: user_id.into(),
        }
    }
}

impl TableRecord for IssueCommentRecord {
    fn columns(&self) -> Vec<(String, Value)> {
        vec![
            (
                "organization".to_owned(),
                Value::Text(self.organization.clone()),
            ),
            ("package".to_owned(), Value::Text(self.package.clone())),
            ("issue_number".to_owned(), Value::Integer(self.issue_number)),
            ("user_id".to_owned(), Value::Text(self.user_id.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_record_projection() {
        let stats = NetworkStatistics {
            nodes: 4,
            gini_coefficient: Some(0.25),
            avg_clustering: Some(0.5),
            avg_min_path: None,
        };
        let record =
            NetworkStatisticsRecord::new("acme", "widgets", 0.4, stats, vec![1, 2, 3]);
        let columns = record.columns();

        let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "organization",
                "package",
                "gini_coefficient",
                "avg_clustering",
                "avg_min_path",
                "crowd_pct",
                "nodes",
                "stakeholder_network",
                "created_at",
            ]
        );

        // Undefined statistics project to SQL NULL
        assert_eq!(columns[4].1, Value::Null);
        assert_eq!(columns[6].1, Value::Integer(4));
        assert_eq!(columns[7].1, Value::Blob(vec![1, 2, 3]));
    }

    #[test]
    fn test_centrality_record_projection() {
        let record = CentralityRecord::new("acme", "widgets", "alice", 0.75);
        let columns = record.columns();

        assert_eq!(columns.len(), 4);
        assert_eq!(columns[2].1, Value::Text("alice".to_owned()));
        assert_eq!(columns[3].1, Value::Real(0.75));
    }

    #[test]
    fn test_issue_comment_record_projection() {
        let record = IssueCommentRecord::new("acme", "widgets", 12, "bob");
        let columns = record.columns();

        assert_eq!(columns[2].1, Value::Integer(12));
        assert_eq!(columns[3].1, Value::Text("bob".to_owned()));
    }
}
