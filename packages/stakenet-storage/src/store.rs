//! Network persistence
//!
//! `NetworkStore` ties the pieces together: build a stakeholder graph
//! from the data store (or load a cached artifact), eagerly compute
//! every statistic class, and persist the results back.

use std::collections::HashMap;

use tracing::info;

use stakenet_core::analytics::{betweenness_centrality, compute_statistics};
use stakenet_core::network::build_network;
use stakenet_core::{NetworkStatistics, StakeholderGraph};

use crate::adapter::DataStore;
use crate::artifact::{decode_graph, encode_graph, ArtifactCache};
use crate::error::{Result, StorageError};
use crate::records::{CentralityRecord, NetworkStatisticsRecord};

/// Rendering port
///
/// Drawing the network is delegated to an external collaborator; the
/// persistence layer only invokes it as a side effect of `save`.
pub trait NetworkRenderer {
    fn render(&self, graph: &StakeholderGraph, name: &str) -> Result<()>;
}

/// Renderer that does nothing (tests, headless runs)
#[derive(Debug, Default)]
pub struct NoopRenderer;

impl NetworkRenderer for NoopRenderer {
    fn render(&self, _graph: &StakeholderGraph, _name: &str) -> Result<()> {
        Ok(())
    }
}

/// A built stakeholder network with its derived statistics
///
/// All four statistic classes are computed eagerly at construction,
/// whichever construction mode is used — there is no deferred
/// evaluation.
pub struct NetworkStore {
    organization: String,
    package: String,
    graph: StakeholderGraph,
    statistics: NetworkStatistics,
    betweenness: HashMap<String, f64>,
}

impl NetworkStore {
    /// Rebuild from the data store's interaction records
    pub fn rebuild(store: &DataStore, organization: &str, package: &str) -> Result<Self> {
        let records = store.interactions(organization, package)?;
        info!(
            organization,
            package,
            records = records.len(),
            "rebuilding stakeholder network"
        );
        Ok(Self::from_graph(
            organization,
            package,
            build_network(&records),
        ))
    }

    /// Load a previously cached graph artifact
    ///
    /// Fails with a not-found error if no artifact exists for the
    /// pair — an absent cache is never an empty graph.
    pub fn load_cached(
        cache: &ArtifactCache,
        organization: &str,
        package: &str,
    ) -> Result<Self> {
        let data = cache.load(organization, package)?;
        Ok(Self::from_graph(
            organization,
            package,
            StakeholderGraph::from_data(&data),
        ))
    }

    /// Load the graph previously saved to the data store
    pub fn load_stored(store: &DataStore, organization: &str, package: &str) -> Result<Self> {
        let blob = store
            .network_blob(organization, package)?
            .ok_or_else(|| {
                StorageError::artifact_not_found(format!(
                    "stakeholder_networks row for {}/{}",
                    organization, package
                ))
            })?;
        let data = decode_graph(&blob)?;
        Ok(Self::from_graph(
            organization,
            package,
            StakeholderGraph::from_data(&data),
        ))
    }

    fn from_graph(organization: &str, package: &str, graph: StakeholderGraph) -> Self {
        let statistics = compute_statistics(&graph);
        let betweenness = betweenness_centrality(&graph);
        Self {
            organization: organization.to_owned(),
            package: package.to_owned(),
            graph,
            statistics,
            betweenness,
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn graph(&self) -> &StakeholderGraph {
        &self.graph
    }

    pub fn statistics(&self) -> &NetworkStatistics {
        &self.statistics
    }

    /// Normalized betweenness centrality per user (whole graph)
    pub fn betweenness(&self) -> &HashMap<String, f64> {
        &self.betweenness
    }

    /// Persist the statistics record, refresh the cached artifact, and
    /// invoke the renderer
    ///
    /// No upsert semantics exist: call [`NetworkStore::delete`] first
    /// when re-saving a pair that already has a row.
    pub fn save(
        &self,
        store: &mut DataStore,
        cache: &ArtifactCache,
        crowd_pct: f64,
        renderer: &dyn NetworkRenderer,
    ) -> Result<()> {
        let data = self.graph.to_data();
        let record = NetworkStatisticsRecord::new(
            &self.organization,
            &self.package,
            crowd_pct,
            self.statistics.clone(),
            encode_graph(&data)?,
        );
        store.insert(&record, "stakeholder_networks")?;
        cache.store(&self.organization, &self.package, &data)?;

        let name = format!("network-{}-{}", self.organization, self.package);
        renderer.render(&self.graph, &name)?;
        info!(
            organization = %self.organization,
            package = %self.package,
            nodes = self.statistics.nodes,
            "saved stakeholder network"
        );
        Ok(())
    }

    /// Delete this pair's statistics rows; precedes a re-save
    pub fn delete(&self, store: &DataStore) -> Result<()> {
        let sql = format!(
            "DELETE FROM {}.stakeholder_networks WHERE organization = ?1 AND package = ?2",
            store.schema()
        );
        store.execute_params(&sql, &[&self.organization, &self.package])?;
        Ok(())
    }

    /// Insert one centrality row per user
    ///
    /// Each insert commits individually; a failure partway leaves the
    /// earlier rows in place. Users are written in sorted order so
    /// partial failures are at least reproducible.
    pub fn save_user_centralities(&self, store: &mut DataStore) -> Result<()> {
        let mut users: Vec<&String> = self.betweenness.keys().collect();
        users.sort();
        for user_id in users {
            let record = CentralityRecord::new(
                &self.organization,
                &self.package,
                user_id,
                self.betweenness[user_id],
            );
            store.insert(&record, "network_centrality")?;
        }
        Ok(())
    }

    /// Delete one user's centrality rows
    pub fn delete_user_centrality(&self, store: &DataStore, user_id: &str) -> Result<()> {
        let sql = format!(
            "DELETE FROM {}.network_centrality
             WHERE organization = ?1 AND package = ?2 AND user_id = ?3",
            store.schema()
        );
        store.execute_params(&sql, &[&self.organization, &self.package, &user_id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::IssueCommentRecord;

    fn seeded_store() -> DataStore {
        let mut store = DataStore::open_in_memory().unwrap();
        store.create_tables().unwrap();
        // Issue 1 = {A, B, C}, issue 2 = {C, D}
        for (issue, user) in [(1, "A"), (1, "B"), (1, "C"), (2, "C"), (2, "D")] {
            store
                .insert(
                    &IssueCommentRecord::new("acme", "widgets", issue, user),
                    "issue_comments",
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_rebuild_from_store() {
        let store = seeded_store();
        let network = NetworkStore::rebuild(&store, "acme", "widgets").unwrap();

        assert_eq!(network.graph().node_count(), 4);
        assert_eq!(network.graph().edge_count(), 4);
        assert!(network.graph().contains_edge("A", "B"));
        assert!(network.graph().contains_edge("C", "D"));

        // Statistics are computed eagerly
        assert_eq!(network.statistics().nodes, 4);
        assert!(network.statistics().gini_coefficient.is_some());
        assert!(network.statistics().avg_min_path.is_some());
        assert_eq!(network.betweenness().len(), 4);
    }

    #[test]
    fn test_rebuild_with_no_records_is_empty() {
        let store = seeded_store();
        let network = NetworkStore::rebuild(&store, "acme", "nothing").unwrap();

        assert!(network.graph().is_empty());
        assert_eq!(network.statistics().nodes, 0);
        assert_eq!(network.statistics().gini_coefficient, None);
        assert_eq!(network.statistics().avg_clustering, None);
        assert_eq!(network.statistics().avg_min_path, None);
    }

    #[test]
    fn test_save_then_load_cached() {
        let mut store = seeded_store();
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let network = NetworkStore::rebuild(&store, "acme", "widgets").unwrap();
        network.save(&mut store, &cache, 0.4, &NoopRenderer).unwrap();

        let reloaded = NetworkStore::load_cached(&cache, "acme", "widgets").unwrap();
        assert_eq!(reloaded.graph().node_count(), 4);
        assert_eq!(reloaded.statistics(), network.statistics());
    }

    #[test]
    fn test_load_cached_missing_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let result = NetworkStore::load_cached(&cache, "acme", "widgets");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_then_load_stored() {
        let mut store = seeded_store();
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let network = NetworkStore::rebuild(&store, "acme", "widgets").unwrap();
        network.save(&mut store, &cache, 0.4, &NoopRenderer).unwrap();

        let reloaded = NetworkStore::load_stored(&store, "acme", "widgets").unwrap();
        assert_eq!(reloaded.graph().node_count(), 4);
        assert_eq!(reloaded.graph().edge_count(), 4);
    }

    #[test]
    fn test_delete_then_resave() {
        let mut store = seeded_store();
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let network = NetworkStore::rebuild(&store, "acme", "widgets").unwrap();
        network.save(&mut store, &cache, 0.4, &NoopRenderer).unwrap();
        network.delete(&store).unwrap();
        network.save(&mut store, &cache, 0.5, &NoopRenderer).unwrap();

        let count: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM main.stakeholder_networks",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_user_centralities_round_trip() {
        let mut store = seeded_store();
        let network = NetworkStore::rebuild(&store, "acme", "widgets").unwrap();
        network.save_user_centralities(&mut store).unwrap();

        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM main.network_centrality", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 4);

        network.delete_user_centrality(&store, "C").unwrap();
        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM main.network_centrality", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_renderer_invoked_on_save() {
        use std::cell::Cell;

        struct Spy<'a>(&'a Cell<u32>);
        impl NetworkRenderer for Spy<'_> {
            fn render(&self, _graph: &StakeholderGraph, name: &str) -> Result<()> {
                assert_eq!(name, "network-acme-widgets");
                self.0.set(self.0.get() + 1);
                Ok(())
            }
        }

        let mut store = seeded_store();
        let dir = tempfile::tempdir().unwrap();
        let cache = ArtifactCache::new(dir.path());
        let calls = Cell::new(0);

        let network = NetworkStore::rebuild(&store, "acme", "widgets").unwrap();
        network
            .save(&mut store, &cache, 0.4, &Spy(&calls))
            .unwrap();
        assert_eq!(calls.get(), 1);
    }
}
