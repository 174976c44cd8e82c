//! stakenet-core — stakeholder-network analytics
//!
//! Builds co-participation graphs from issue-comment interaction
//! records, computes structural network statistics, and estimates
//! marginal/total effects from fitted interaction-term regression
//! models.
//!
//! ## Components
//!
//! - [`network`]: co-participation graph construction (build-then-freeze)
//! - [`analytics`]: Gini, clustering, shortest paths, betweenness
//! - [`effects`]: marginal/total effect estimation over a fitted model
//!
//! Persistence (data store, binary artifacts) lives in
//! `stakenet-storage`.

pub mod analytics;
pub mod domain;
pub mod effects;
pub mod errors;
pub mod network;

pub use domain::{GraphData, InteractionRecord, NetworkStatistics, StakeholderGraph};
pub use errors::{CoreError, Result};
