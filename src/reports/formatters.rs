use crate::types::{FamilyReport, PersonEntry};
use anyhow::Result;
use std::fmt::Write;

/// Trait for report formatters
pub trait ReportFormatter {
    fn format(&self, report: &FamilyReport) -> Result<String>;
}

/// One block per person, each followed by a blank line.
pub struct TextFormatter;

impl TextFormatter {
    fn write_entry(out: &mut String, entry: &PersonEntry) -> std::fmt::Result {
        writeln!(out, "{}", entry.name)?;

        match entry.sex {
            Some(sex) => writeln!(out, " Sex: {}", sex)?,
            None => writeln!(out, " Sex: Unknown")?,
        }
        writeln!(out, " Father: {}", entry.father.as_deref().unwrap_or("Unknown"))?;
        writeln!(out, " Mother: {}", entry.mother.as_deref().unwrap_or("Unknown"))?;

        if entry.children.is_empty() {
            writeln!(out, " Children: None")?;
        } else {
            writeln!(out, " Children: ")?;
            for child in &entry.children {
                writeln!(out, "\t{}", child)?;
            }
        }

        writeln!(out)
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &FamilyReport) -> Result<String> {
        let mut out = String::new();
        for entry in &report.people {
            Self::write_entry(&mut out, entry)?;
        }
        Ok(out)
    }
}

/// JSON formatter
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &FamilyReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sex;
    use chrono::Utc;

    fn sample_report() -> FamilyReport {
        FamilyReport {
            generated_at: Utc::now(),
            people: vec![
                PersonEntry {
                    name: "Fred".into(),
                    sex: Some(Sex::Male),
                    father: None,
                    mother: None,
                    children: vec!["Billy Bob".into(), "Sue".into()],
                },
                PersonEntry {
                    name: "Billy Bob".into(),
                    sex: None,
                    father: Some("Fred".into()),
                    mother: None,
                    children: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_text_blocks() {
        let text = TextFormatter.format(&sample_report()).unwrap();
        let expected = "Fred\n Sex: Male\n Father: Unknown\n Mother: Unknown\n Children: \n\tBilly Bob\n\tSue\n\n\
                        Billy Bob\n Sex: Unknown\n Father: Fred\n Mother: Unknown\n Children: None\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_lists_people_in_order() {
        let json = JsonFormatter.format(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["people"][0]["name"], "Fred");
        assert_eq!(value["people"][0]["sex"], "Male");
        assert_eq!(value["people"][1]["father"], "Fred");
        assert!(value["people"][1]["sex"].is_null());
    }
}
