use crate::family::Registry;
use crate::reports::formatters::{JsonFormatter, ReportFormatter, TextFormatter};
use crate::types::{FamilyReport, OutputFormat, PersonEntry, PersonId};
use anyhow::Result;
use chrono::Utc;

/// Report generator for creating various output formats
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Snapshot `order` out of the registry into a detached report.
    pub fn build(&self, registry: &Registry, order: &[PersonId]) -> FamilyReport {
        let people = order
            .iter()
            .map(|&id| {
                let person = registry.get(id);
                PersonEntry {
                    name: person.name.clone(),
                    sex: person.sex,
                    father: person.father.clone(),
                    mother: person.mother.clone(),
                    children: person
                        .children
                        .iter()
                        .map(|&child| registry.name(child).to_string())
                        .collect(),
                }
            })
            .collect();

        FamilyReport {
            generated_at: Utc::now(),
            people,
        }
    }

    /// Generate report in the specified format
    pub fn generate(&self, report: &FamilyReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => TextFormatter.format(report),
            OutputFormat::Json => JsonFormatter.format(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParentRole;

    #[test]
    fn test_build_snapshots_children_by_name() {
        let mut registry = Registry::new();
        let dad = registry.lookup_or_create("Dad");
        let kid = registry.lookup_or_create("Kid");
        registry.set_parent(kid, dad, ParentRole::Father).unwrap();
        registry.add_child(dad, kid);

        let report = ReportGenerator::new().build(&registry, &[dad, kid]);
        assert_eq!(report.people.len(), 2);
        assert_eq!(report.people[0].children, vec!["Kid"]);
        assert_eq!(report.people[1].father.as_deref(), Some("Dad"));

        let text = ReportGenerator::new().generate(&report, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Dad\n Sex: Unknown\n"));
    }
}
