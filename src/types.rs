//! Core types shared by the registry, the builder and the reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index of a person inside the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub usize);

impl PersonId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Interpret the first character of a SEX value.
    pub fn from_code(value: &str) -> Option<Self> {
        match value.chars().next() {
            Some('M') => Some(Sex::Male),
            Some('F') => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentRole {
    Father,
    Mother,
}

impl ParentRole {
    /// Sex a parent must have (or acquire) to fill this role.
    pub fn required_sex(self) -> Sex {
        match self {
            ParentRole::Father => Sex::Male,
            ParentRole::Mother => Sex::Female,
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ParentRole::Father => "fathers",
            ParentRole::Mother => "mothers",
        }
    }
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRole::Father => write!(f, "father"),
            ParentRole::Mother => write!(f, "mother"),
        }
    }
}

/// A single person in the family graph.
///
/// Parents are kept by name so the registry never holds ownership cycles;
/// children are arena indices in first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub sex: Option<Sex>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub children: Vec<PersonId>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sex: None,
            father: None,
            mother: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self, role: ParentRole) -> Option<&str> {
        match role {
            ParentRole::Father => self.father.as_deref(),
            ParentRole::Mother => self.mother.as_deref(),
        }
    }
}

/// A tokenized input line: its 1-based line number and whitespace-split fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    pub fn keyword(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    /// Rebuild the record value from fields 2..N, separated by single spaces.
    pub fn value(&self) -> String {
        self.fields.get(1..).map(|rest| rest.join(" ")).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `PERSON <name>`: establishes the subject.
    Person(String),
    /// `FATHER_OF` / `MOTHER_OF`: the subject is the parent of the named child.
    ParentAssertion { role: ParentRole, child: String },
    /// `FATHER` / `MOTHER`: the subject is the child of the named parent.
    ChildAssertion { role: ParentRole, parent: String },
    /// `SEX <M|F>`
    SexAssertion(Sex),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub line: usize,
    pub kind: CommandKind,
}

impl Command {
    pub fn new(line: usize, kind: CommandKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryOrder {
    /// Order of first appearance in the input.
    #[default]
    Insertion,
    /// Byte-wise lexicographic order by name.
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for RegistryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insertion" => Ok(RegistryOrder::Insertion),
            "name" => Ok(RegistryOrder::Name),
            other => Err(format!("Unsupported registry order: {}", other)),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unsupported format: {}", other)),
        }
    }
}

/// Snapshot of one emitted person, detached from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub name: String,
    pub sex: Option<Sex>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyReport {
    pub generated_at: DateTime<Utc>,
    /// People in emission order: parents always precede their children.
    pub people: Vec<PersonEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_value_rejoins_multi_word_names() {
        let record = Record::new(
            3,
            vec!["PERSON".into(), "Mary".into(), "Ann".into(), "Smith".into()],
        );
        assert_eq!(record.keyword(), "PERSON");
        assert_eq!(record.value(), "Mary Ann Smith");
    }

    #[test]
    fn test_sex_from_code_uses_first_character() {
        assert_eq!(Sex::from_code("M"), Some(Sex::Male));
        assert_eq!(Sex::from_code("Female"), Some(Sex::Female));
        assert_eq!(Sex::from_code("x"), None);
        assert_eq!(Sex::from_code(""), None);
    }

    #[test]
    fn test_parent_role_required_sex() {
        assert_eq!(ParentRole::Father.required_sex(), Sex::Male);
        assert_eq!(ParentRole::Mother.required_sex(), Sex::Female);
    }

    #[test]
    fn test_order_and_format_parse() {
        assert_eq!("Name".parse::<RegistryOrder>(), Ok(RegistryOrder::Name));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
