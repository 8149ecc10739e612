use crate::family::person::Conflict;
use crate::types::{ParentRole, Person, PersonId, RegistryOrder, Sex};
use indexmap::IndexMap;

/// Arena of every person seen in a run, keyed by name.
///
/// The map index doubles as the [`PersonId`], so ids are dense and iteration
/// follows first-insertion order. Persons are never removed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    people: IndexMap<String, Person>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            people: IndexMap::new(),
        }
    }

    /// Number of people registered so far.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Check whether no one has been registered.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Return the id for `name`, creating a blank person if none exists yet.
    pub fn lookup_or_create(&mut self, name: &str) -> PersonId {
        if let Some(index) = self.people.get_index_of(name) {
            return PersonId(index);
        }
        let (index, _) = self
            .people
            .insert_full(name.to_string(), Person::new(name));
        PersonId(index)
    }

    /// Pure lookup. Absent for unset or empty names.
    pub fn lookup(&self, name: Option<&str>) -> Option<PersonId> {
        let name = name.filter(|n| !n.is_empty())?;
        self.id_of(name)
    }

    /// Id for an exact name, without creating anyone.
    pub fn id_of(&self, name: &str) -> Option<PersonId> {
        self.people.get_index_of(name).map(PersonId)
    }

    /// # Panics
    /// Panics if `id` did not come from this registry.
    pub fn get(&self, id: PersonId) -> &Person {
        &self.people[id.index()]
    }

    fn get_mut(&mut self, id: PersonId) -> &mut Person {
        &mut self.people[id.index()]
    }

    /// Name of the person behind `id`.
    pub fn name(&self, id: PersonId) -> &str {
        &self.get(id).name
    }

    /// Every person in insertion order. Restartable: each call starts over.
    pub fn all_persons(&self) -> impl Iterator<Item = (PersonId, &Person)> + '_ {
        self.people
            .values()
            .enumerate()
            .map(|(index, person)| (PersonId(index), person))
    }

    /// Person ids in the requested enumeration order.
    pub fn ordered(&self, order: RegistryOrder) -> Vec<PersonId> {
        let mut ids: Vec<PersonId> = (0..self.people.len()).map(PersonId).collect();
        if order == RegistryOrder::Name {
            ids.sort_by(|a, b| self.name(*a).as_bytes().cmp(self.name(*b).as_bytes()));
        }
        ids
    }

    /// Number of parent→child links recorded.
    pub fn edge_count(&self) -> usize {
        self.people.values().map(|p| p.children.len()).sum()
    }

    /// Assert the sex of `id`.
    pub fn set_sex(&mut self, id: PersonId, sex: Sex) -> Result<(), Conflict> {
        self.get_mut(id).set_sex(sex)
    }

    /// Record `parent` as the `role` parent of `child`.
    ///
    /// The parent's sex is only checked, never assigned here.
    pub fn set_parent(
        &mut self,
        child: PersonId,
        parent: PersonId,
        role: ParentRole,
    ) -> Result<(), Conflict> {
        let parent = self.get(parent);
        let (parent_name, parent_sex) = (parent.name.clone(), parent.sex);
        self.get_mut(child).set_parent(&parent_name, parent_sex, role)
    }

    /// Append `child` to the children of `parent`, ignoring repeats.
    pub fn add_child(&mut self, parent: PersonId, child: PersonId) {
        self.get_mut(parent).add_child(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_or_create_is_stable() {
        let mut registry = Registry::new();
        let alice = registry.lookup_or_create("Alice");
        let bob = registry.lookup_or_create("Bob");
        assert_ne!(alice, bob);
        assert_eq!(registry.lookup_or_create("Alice"), alice);
        assert_eq!(registry.len(), 2);

        let person = registry.get(alice);
        assert_eq!(person.name, "Alice");
        assert_eq!(person.sex, None);
        assert!(person.father.is_none() && person.mother.is_none());
        assert!(person.children.is_empty());
    }

    #[test]
    fn test_lookup_absent_and_empty_names() {
        let mut registry = Registry::new();
        registry.lookup_or_create("Alice");
        assert!(registry.lookup(Some("Alice")).is_some());
        assert!(registry.lookup(Some("Zed")).is_none());
        assert!(registry.lookup(Some("")).is_none());
        assert!(registry.lookup(None).is_none());
    }

    #[test]
    fn test_all_persons_follows_insertion_order() {
        let mut registry = Registry::new();
        for name in ["Carol", "alice", "Bob"] {
            registry.lookup_or_create(name);
        }
        let names: Vec<&str> = registry.all_persons().map(|(_, p)| p.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "alice", "Bob"]);
        // restartable
        assert_eq!(registry.all_persons().count(), 3);
    }

    #[test]
    fn test_ordered_by_name_is_bytewise() {
        let mut registry = Registry::new();
        for name in ["Carol", "alice", "Bob"] {
            registry.lookup_or_create(name);
        }
        let names: Vec<&str> = registry
            .ordered(RegistryOrder::Name)
            .into_iter()
            .map(|id| registry.name(id))
            .collect();
        assert_eq!(names, vec!["Bob", "Carol", "alice"]);
    }

    #[test]
    fn test_set_parent_checks_but_does_not_assign_parent_sex() {
        let mut registry = Registry::new();
        let child = registry.lookup_or_create("John");
        let parent = registry.lookup_or_create("Alex");

        assert_eq!(registry.set_parent(child, parent, ParentRole::Father), Ok(()));
        assert_eq!(registry.get(parent).sex, None);
        assert_eq!(registry.get(child).father.as_deref(), Some("Alex"));

        let mom = registry.lookup_or_create("Bill");
        registry.set_sex(mom, Sex::Male).unwrap();
        assert_eq!(
            registry.set_parent(child, mom, ParentRole::Mother),
            Err(Conflict::SexMismatch)
        );
        assert!(registry.get(child).mother.is_none());
    }
}
