//! petgraph-based dependency graph between fields and the fields their
//! conditions read.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{BlockDefinition, Condition};
use crate::error::SchemaError;

/// Which condition of a field an edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// The field's visibility `condition`.
    Visibility,
    /// The condition of a conditional `required`.
    Requirement,
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dependency::Visibility => write!(f, "Condition"),
            Dependency::Requirement => write!(f, "Required condition"),
        }
    }
}

/// Edges run from a field to each field one of its conditions reads.
pub struct FieldGraph {
    pub graph: DiGraph<String, Dependency>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl FieldGraph {
    pub fn build(block: &BlockDefinition) -> Result<Self, Vec<SchemaError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for field in &block.fields {
            node_indices
                .entry(field.id.clone())
                .or_insert_with(|| graph.add_node(field.id.clone()));
        }

        for field in &block.fields {
            let conditions: [(Dependency, Option<&Condition>); 2] = [
                (Dependency::Visibility, field.condition.as_ref()),
                (Dependency::Requirement, field.required_condition()),
            ];
            for (kind, condition) in conditions {
                let Some(condition) = condition else {
                    continue;
                };
                for target in condition.referenced_fields() {
                    match node_indices.get(target) {
                        Some(&t) => {
                            graph.add_edge(node_indices[&field.id], t, kind);
                        }
                        None => errors.push(SchemaError::new(
                            "S002",
                            format!(
                                "{} on field '{}' references unknown field '{}'",
                                kind, field.id, target
                            ),
                            Some(field.id.clone()),
                        )),
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(FieldGraph { graph, node_indices })
    }

    /// Fields read by any condition of `field_id`, with the kind of condition.
    pub fn dependencies(&self, field_id: &str) -> Vec<(&str, Dependency)> {
        let Some(&idx) = self.node_indices.get(field_id) else {
            return vec![];
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (self.graph[e.target()].as_str(), *e.weight()))
            .collect()
    }

    /// Fields with a condition that reads `field_id`.
    pub fn dependents(&self, field_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(field_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    /// Whether the field's own visibility depends on another field.
    pub fn is_conditional(&self, field_id: &str) -> bool {
        self.dependencies(field_id)
            .iter()
            .any(|&(_, kind)| kind == Dependency::Visibility)
    }
}
