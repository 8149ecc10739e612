use crate::error::{FamilyError, Result};
use crate::family::person::Conflict;
use crate::family::registry::Registry;
use crate::types::{Command, CommandKind, ParentRole, PersonId, Sex};
use tracing::{debug, trace};

/// Command interpreter that applies PERSON/FATHER/MOTHER/FATHER_OF/MOTHER_OF/SEX
/// records to a [`Registry`], stopping at the first contradiction.
#[derive(Debug, Default)]
pub struct RelationshipBuilder {
    registry: Registry,
    subject: Option<PersonId>,
}

impl RelationshipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every command in order and hand back the populated registry.
    ///
    /// On error the partially built registry is dropped with the builder.
    pub fn build<I>(mut self, commands: I) -> Result<Registry>
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply(&command)?;
        }

        debug!(
            "Relationship graph built with {} people and {} parent links",
            self.registry.len(),
            self.registry.edge_count()
        );
        Ok(self.registry)
    }

    /// Apply one command against the current subject.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        trace!(line = command.line, "Applying {:?}", command.kind);

        match &command.kind {
            CommandKind::Person(name) => {
                self.subject = Some(self.registry.lookup_or_create(name));
                Ok(())
            }
            CommandKind::ParentAssertion { role, child } => {
                let subject = self.subject(command.line)?;
                self.assert_parent_of(command.line, subject, *role, child)
            }
            CommandKind::ChildAssertion { role, parent } => {
                let subject = self.subject(command.line)?;
                self.assert_child_of(command.line, subject, *role, parent)
            }
            CommandKind::SexAssertion(sex) => {
                let subject = self.subject(command.line)?;
                self.set_sex(command.line, subject, *sex)
            }
        }
    }

    /// Current subject, if a PERSON record has been seen.
    pub fn current_subject(&self) -> Option<&str> {
        self.subject.map(|id| self.registry.name(id))
    }

    /// Registry built so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn subject(&self, line: usize) -> Result<PersonId> {
        self.subject.ok_or(FamilyError::MissingSubject { line })
    }

    /// FATHER_OF / MOTHER_OF: `subject` is the `role` parent of `child_name`.
    fn assert_parent_of(
        &mut self,
        line: usize,
        subject: PersonId,
        role: ParentRole,
        child_name: &str,
    ) -> Result<()> {
        self.set_sex(line, subject, role.required_sex())?;
        let child = self.registry.lookup_or_create(child_name);
        self.set_parent(line, child, subject, role)?;
        self.registry.add_child(subject, child);
        Ok(())
    }

    /// FATHER / MOTHER: `subject` is the child of `parent_name` in `role`.
    fn assert_child_of(
        &mut self,
        line: usize,
        subject: PersonId,
        role: ParentRole,
        parent_name: &str,
    ) -> Result<()> {
        let parent = self.registry.lookup_or_create(parent_name);
        self.set_sex(line, parent, role.required_sex())?;
        self.set_parent(line, subject, parent, role)?;
        self.registry.add_child(parent, subject);
        Ok(())
    }

    fn set_sex(&mut self, line: usize, person: PersonId, sex: Sex) -> Result<()> {
        self.registry
            .set_sex(person, sex)
            .map_err(|_| FamilyError::SexMismatch {
                line,
                name: self.registry.name(person).to_string(),
            })
    }

    fn set_parent(
        &mut self,
        line: usize,
        child: PersonId,
        parent: PersonId,
        role: ParentRole,
    ) -> Result<()> {
        self.registry
            .set_parent(child, parent, role)
            .map_err(|conflict| match conflict {
                Conflict::SexMismatch => FamilyError::SexMismatch {
                    line,
                    name: self.registry.name(parent).to_string(),
                },
                Conflict::NameMismatch => FamilyError::DuplicateParent {
                    line,
                    role,
                    child: self.registry.name(child).to_string(),
                },
            })
    }
}
