//! Stakeholder-network construction

mod builder;

pub use builder::{build_network, GraphBuilder};
