//! Cycle detection over the parent→child edges of a [`Registry`].
//!
//! A three-color depth-first search: a node is `InProgress` while any of its
//! descendants are still being explored, so reaching an `InProgress` node
//! again means a person is their own ancestor. The search keeps an explicit
//! stack of `(person, next child)` frames instead of recursing, so very deep
//! lineages cannot exhaust the call stack.
use crate::error::{FamilyError, Result};
use crate::family::registry::Registry;
use crate::types::{PersonId, RegistryOrder};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Read-only pass that rejects any registry containing a descent cycle.
#[derive(Debug)]
pub struct CycleDetector<'a> {
    registry: &'a Registry,
    state: Vec<VisitState>,
}

impl<'a> CycleDetector<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            state: vec![VisitState::Unvisited; registry.len()],
        }
    }

    /// Run the search from every unvisited person in `order`.
    ///
    /// # Errors
    /// Returns [`FamilyError::CycleDetected`] for the first back-edge found,
    /// naming the person it leads back to.
    pub fn check(mut self, order: RegistryOrder) -> Result<()> {
        for root in self.registry.ordered(order) {
            if let Some(repeated) = self.find_cycle_from(root) {
                let name = self.registry.name(repeated).to_string();
                debug!("Cycle detected through {}", name);
                return Err(FamilyError::CycleDetected { name });
            }
        }
        Ok(())
    }

    /// Visit state of `id` as left by the last walk.
    pub fn state(&self, id: PersonId) -> VisitState {
        self.state[id.index()]
    }

    fn find_cycle_from(&mut self, root: PersonId) -> Option<PersonId> {
        if self.state[root.index()] != VisitState::Unvisited {
            return None;
        }

        let registry = self.registry;
        let mut stack: Vec<(PersonId, usize)> = vec![(root, 0)];
        self.state[root.index()] = VisitState::InProgress;

        while let Some(frame) = stack.last_mut() {
            let (node, next_child) = *frame;
            let children = &registry.get(node).children;

            let Some(&child) = children.get(next_child) else {
                self.state[node.index()] = VisitState::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match self.state[child.index()] {
                VisitState::InProgress => return Some(child),
                VisitState::Done => {}
                VisitState::Unvisited => {
                    self.state[child.index()] = VisitState::InProgress;
                    stack.push((child, 0));
                }
            }
        }

        None
    }
}

/// Convenience wrapper: validate `registry` in `order`.
pub fn check_acyclic(registry: &Registry, order: RegistryOrder) -> Result<()> {
    CycleDetector::new(registry).check(order)
}
