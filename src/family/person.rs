use crate::types::{ParentRole, Person, PersonId, Sex};

/// Contradiction between a new assertion and what a person already records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    SexMismatch,
    NameMismatch,
}

impl Person {
    /// Assign `sex`, refusing to overwrite a different value.
    pub fn set_sex(&mut self, sex: Sex) -> Result<(), Conflict> {
        match self.sex {
            Some(current) if current != sex => Err(Conflict::SexMismatch),
            _ => {
                self.sex = Some(sex);
                Ok(())
            }
        }
    }

    /// Fill the `role` slot with `parent_name`.
    ///
    /// `parent_sex` must already be compatible with the role; re-asserting the
    /// same parent is a no-op, a different name is a [`Conflict::NameMismatch`].
    pub fn set_parent(
        &mut self,
        parent_name: &str,
        parent_sex: Option<Sex>,
        role: ParentRole,
    ) -> Result<(), Conflict> {
        if parent_sex.is_some_and(|sex| sex != role.required_sex()) {
            return Err(Conflict::SexMismatch);
        }

        let slot = match role {
            ParentRole::Father => &mut self.father,
            ParentRole::Mother => &mut self.mother,
        };

        if let Some(existing) = slot.as_deref() {
            return if existing == parent_name {
                Ok(())
            } else {
                Err(Conflict::NameMismatch)
            };
        }

        *slot = Some(parent_name.to_string());
        Ok(())
    }

    /// Append `child` unless already present; first-insertion order wins.
    pub fn add_child(&mut self, child: PersonId) {
        // ids are one-to-one with names, so this is the exact-name scan
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}
