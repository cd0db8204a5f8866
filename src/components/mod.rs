//! Diagram components.

pub mod network_graph;
