//! Table processing order validation
//!
//! Builds a dependency graph from the table specs and checks that the fixed
//! processing order seeds every table after the tables it depends on.

use crate::models::SeedSchema;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Problem found in the table order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum OrderValidationError {
    #[error("table '{table}' depends on unknown table '{dependency}'")]
    UnknownDependency { table: String, dependency: String },

    #[error("table '{table}' is processed before its dependency '{dependency}'")]
    DependencyAfterDependent { table: String, dependency: String },

    #[error("table dependencies contain a cycle")]
    Cycle,
}

/// Validator for the seed order
#[derive(Default)]
pub struct OrderValidator;

impl OrderValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check that the schema's table order honours every declared dependency.
    ///
    /// # Example
    ///
    /// ```rust
    /// use backup_seed_sdk::models::SeedSchema;
    /// use backup_seed_sdk::validation::ordering::OrderValidator;
    ///
    /// assert!(OrderValidator::new().validate(&SeedSchema::standard()).is_ok());
    /// ```
    pub fn validate(&self, schema: &SeedSchema) -> Result<(), OrderValidationError> {
        let mut graph = DiGraph::<&str, ()>::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        let mut position: HashMap<&str, usize> = HashMap::new();

        for (idx, table) in schema.tables.iter().enumerate() {
            nodes.insert(table.name, graph.add_node(table.name));
            position.insert(table.name, idx);
        }

        for table in &schema.tables {
            for dependency in &table.depends_on {
                let Some(&dep_node) = nodes.get(dependency) else {
                    return Err(OrderValidationError::UnknownDependency {
                        table: table.name.to_string(),
                        dependency: dependency.to_string(),
                    });
                };
                // Edge points from the dependency to the dependent table
                graph.add_edge(dep_node, nodes[table.name], ());
            }
        }

        if is_cyclic_directed(&graph) {
            return Err(OrderValidationError::Cycle);
        }

        for table in &schema.tables {
            for dependency in &table.depends_on {
                if position[dependency] > position[table.name] {
                    return Err(OrderValidationError::DependencyAfterDependent {
                        table: table.name.to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order_is_valid() {
        assert!(OrderValidator::new().validate(&SeedSchema::standard()).is_ok());
    }

    #[test]
    fn rejects_dependency_processed_later() {
        let mut schema = SeedSchema::standard();
        schema.tables.swap(1, 2); // lessons before songs
        let err = OrderValidator::new().validate(&schema).unwrap_err();
        assert_eq!(
            err,
            OrderValidationError::DependencyAfterDependent {
                table: "lessons".to_string(),
                dependency: "songs".to_string(),
            }
        );
    }

    #[test]
    fn rejects_cycles() {
        let mut schema = SeedSchema::standard();
        schema.tables[0].depends_on = vec!["task_management"];
        assert_eq!(
            OrderValidator::new().validate(&schema).unwrap_err(),
            OrderValidationError::Cycle
        );
    }

    #[test]
    fn rejects_unknown_dependency() {
        let mut schema = SeedSchema::standard();
        schema.tables[1].depends_on = vec!["albums"];
        assert!(matches!(
            OrderValidator::new().validate(&schema),
            Err(OrderValidationError::UnknownDependency { .. })
        ));
    }
}
