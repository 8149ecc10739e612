use crate::error::{FamilyError, Result};
use crate::family::registry::Registry;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Read-only petgraph view of a validated registry for lineage queries.
///
/// Edges point from parent to child. Only build this from a registry that
/// has passed cycle detection; the depth queries assume a DAG.
pub struct FamilyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl FamilyGraph {
    /// Build the graph from every person and parent link in `registry`.
    pub fn from_registry(registry: &Registry) -> Self {
        let mut graph = DiGraph::with_capacity(registry.len(), registry.edge_count());
        let mut node_map = HashMap::with_capacity(registry.len());

        // Node indices line up with PersonId because both are dense in insertion order.
        for (_, person) in registry.all_persons() {
            let index = graph.add_node(person.name.clone());
            node_map.insert(person.name.clone(), index);
        }

        for (id, person) in registry.all_persons() {
            for child in &person.children {
                graph.add_edge(NodeIndex::new(id.index()), NodeIndex::new(child.index()), ());
            }
        }

        debug!(
            "Family graph built with {} people and {} parent links",
            graph.node_count(),
            graph.edge_count()
        );
        Self { graph, node_map }
    }

    /// Number of people in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of parent-to-child links.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All descendants of `name`, nearest generation first.
    pub fn descendants(&self, name: &str) -> Result<Vec<String>> {
        let start = self.index_of(name)?;
        Ok(self.reachable(start, Direction::Outgoing))
    }

    /// All ancestors of `name`, nearest generation first.
    pub fn ancestors(&self, name: &str) -> Result<Vec<String>> {
        let start = self.index_of(name)?;
        Ok(self.reachable(start, Direction::Incoming))
    }

    /// People with no recorded parents.
    pub fn root_people(&self) -> Vec<String> {
        self.people_without(Direction::Incoming)
    }

    /// People with no recorded children.
    pub fn leaf_people(&self) -> Vec<String> {
        self.people_without(Direction::Outgoing)
    }

    /// Length of the longest chain of descendants below `name` (0 for a leaf).
    pub fn generations(&self, name: &str) -> Result<usize> {
        let start = self.index_of(name)?;
        let mut memo = HashMap::new();
        Ok(self.depth_below(start, &mut memo))
    }

    /// Shortest parent→child path from `from` down to `to`, both inclusive.
    pub fn lineage_path(&self, from: &str, to: &str) -> Result<Option<Vec<String>>> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        queue.push_back(from_index);
        visited.insert(from_index);

        while let Some(current) = queue.pop_front() {
            if current == to_index {
                let mut path = vec![self.graph[current].clone()];
                let mut cursor = current;
                while let Some(&prev) = parent.get(&cursor) {
                    path.push(self.graph[prev].clone());
                    cursor = prev;
                }
                path.reverse();
                return Ok(Some(path));
            }

            for next in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if visited.insert(next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Ok(None)
    }

    /// Summary counts plus the deepest chain of generations.
    pub fn statistics(&self) -> FamilyStatistics {
        let mut memo = HashMap::new();
        let max_generations = self
            .graph
            .node_indices()
            .filter(|&n| self.graph.neighbors_directed(n, Direction::Incoming).next().is_none())
            .map(|root| self.depth_below(root, &mut memo) + 1)
            .max()
            .unwrap_or(0);

        FamilyStatistics {
            total_people: self.node_count(),
            parent_links: self.edge_count(),
            root_people: self.root_people().len(),
            leaf_people: self.leaf_people().len(),
            max_generations,
        }
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.node_map
            .get(name)
            .copied()
            .ok_or_else(|| FamilyError::UnknownPerson(name.to_string()))
    }

    fn reachable(&self, start: NodeIndex, direction: Direction) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut found = Vec::new();
        let mut queue = VecDeque::new();

        queue.push_back(start);
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            // petgraph yields neighbors newest-edge first; flip to insertion order
            let mut neighbors: Vec<NodeIndex> =
                self.graph.neighbors_directed(current, direction).collect();
            neighbors.reverse();

            for next in neighbors {
                if visited.insert(next) {
                    found.push(self.graph[next].clone());
                    queue.push_back(next);
                }
            }
        }

        found
    }

    fn people_without(&self, direction: Direction) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&n| self.graph.neighbors_directed(n, direction).next().is_none())
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Post-order depth with an explicit stack; memoised across calls.
    fn depth_below(&self, start: NodeIndex, memo: &mut HashMap<NodeIndex, usize>) -> usize {
        let mut stack = vec![(start, false)];

        while let Some((node, expanded)) = stack.pop() {
            if memo.contains_key(&node) {
                continue;
            }
            if expanded {
                let depth = self
                    .graph
                    .neighbors_directed(node, Direction::Outgoing)
                    .map(|child| memo.get(&child).copied().unwrap_or(0) + 1)
                    .max()
                    .unwrap_or(0);
                memo.insert(node, depth);
            } else {
                stack.push((node, true));
                for child in self.graph.neighbors_directed(node, Direction::Outgoing) {
                    if !memo.contains_key(&child) {
                        stack.push((child, false));
                    }
                }
            }
        }

        memo.get(&start).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyStatistics {
    pub total_people: usize,
    pub parent_links: usize,
    pub root_people: usize,
    pub leaf_people: usize,
    pub max_generations: usize,
}
