use crate::config::Config;
use crate::error::Result;
use crate::family::{check_acyclic, FamilyGraph, Registry, RelationshipBuilder, TopologicalPrinter};
use crate::input::{parse_records, Tokenizer};
use crate::reports::ReportGenerator;
use crate::types::{Command, FamilyReport, PersonId, RegistryOrder};
use std::io::BufRead;
use tracing::{info, instrument};

/// A validated family tree: built without conflicts and free of cycles.
///
/// Phases run strictly in sequence. Construction mutates the registry, and
/// everything after [`FamilyTree::build`] only reads it.
#[derive(Debug)]
pub struct FamilyTree {
    registry: Registry,
    order: RegistryOrder,
}

impl FamilyTree {
    /// Apply `commands` and reject the result if anyone is their own ancestor.
    #[instrument(skip_all)]
    pub fn build<I>(commands: I, config: &Config) -> Result<Self>
    where
        I: IntoIterator<Item = Command>,
    {
        let registry = RelationshipBuilder::new().build(commands)?;
        check_acyclic(&registry, config.output.order)?;

        info!("Validated family tree with {} people", registry.len());
        Ok(Self {
            registry,
            order: config.output.order,
        })
    }

    /// Tokenize, parse and build from a line-oriented reader.
    pub fn from_reader<R: BufRead>(reader: R, config: &Config) -> Result<Self> {
        let commands = parse_records(Tokenizer::new(reader), config.input.strict_keywords)?;
        Self::build(commands, config)
    }

    /// The validated registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of people in the tree.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check whether the input named no one.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// People ordered so that parents always come first.
    pub fn emission_order(&self) -> Vec<PersonId> {
        TopologicalPrinter::new(&self.registry).emission_order(self.order)
    }

    /// Snapshot the tree into a report in emission order.
    pub fn report(&self) -> FamilyReport {
        ReportGenerator::new().build(&self.registry, &self.emission_order())
    }

    /// Petgraph view for lineage queries.
    pub fn graph(&self) -> FamilyGraph {
        FamilyGraph::from_registry(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FamilyError;
    use std::io::Cursor;

    fn build(text: &str) -> Result<FamilyTree> {
        FamilyTree::from_reader(Cursor::new(text), &Config::default())
    }

    #[test]
    fn test_pipeline_builds_and_orders() {
        let tree = build("PERSON Kid\nFATHER Dad\nMOTHER Mom\n").unwrap();
        assert_eq!(tree.len(), 3);

        let names: Vec<&str> = tree
            .emission_order()
            .into_iter()
            .map(|id| tree.registry().name(id))
            .collect();
        assert_eq!(names, vec!["Dad", "Mom", "Kid"]);
    }

    #[test]
    fn test_pipeline_rejects_cycle() {
        let err = build("PERSON A\nFATHER_OF B\nPERSON B\nFATHER_OF A\n").unwrap_err();
        assert!(matches!(err, FamilyError::CycleDetected { .. }));
    }

    #[test]
    fn test_empty_input() {
        let tree = build("").unwrap();
        assert!(tree.is_empty());
        assert!(tree.report().people.is_empty());
    }
}
