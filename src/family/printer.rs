use crate::family::registry::Registry;
use crate::types::{PersonId, RegistryOrder};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Orders people so nobody is emitted before a parent that is in the registry.
///
/// Breadth-first worklist seeded with every person. A person whose parent is
/// still pending is dropped from the worklist rather than re-queued; they come
/// back when that parent is emitted and appends its children.
#[derive(Debug)]
pub struct TopologicalPrinter<'a> {
    registry: &'a Registry,
    emitted: Vec<bool>,
}

impl<'a> TopologicalPrinter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            emitted: vec![false; registry.len()],
        }
    }

    /// Compute the emission order, seeding the worklist in `order`.
    pub fn emission_order(mut self, order: RegistryOrder) -> Vec<PersonId> {
        let mut worklist: VecDeque<PersonId> = self.registry.ordered(order).into();
        let mut emitted_order = Vec::with_capacity(self.registry.len());

        while let Some(id) = worklist.pop_front() {
            if self.emitted[id.index()] {
                continue;
            }

            if !self.parents_emitted(id) {
                trace!("Deferring {} until its parents are emitted", self.registry.name(id));
                continue;
            }

            self.emitted[id.index()] = true;
            emitted_order.push(id);
            worklist.extend(self.registry.get(id).children.iter().copied());
        }

        if emitted_order.len() != self.registry.len() {
            debug!(
                "Emitted {} of {} people",
                emitted_order.len(),
                self.registry.len()
            );
        }

        emitted_order
    }

    /// A parent blocks emission only if it exists in the registry and is pending.
    fn parents_emitted(&self, id: PersonId) -> bool {
        let person = self.registry.get(id);
        [person.father.as_deref(), person.mother.as_deref()]
            .into_iter()
            .filter_map(|name| self.registry.lookup(name))
            .all(|parent| self.emitted[parent.index()])
    }
}
