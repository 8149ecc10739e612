use crate::error::{FamilyError, Result};
use crate::types::{Command, CommandKind, ParentRole, Record, Sex};
use tracing::debug;

/// Map a tokenized record to a typed command.
///
/// Returns `Ok(None)` for unrecognized keywords unless `strict` is set, in
/// which case they are an [`FamilyError::UnknownKeyword`].
pub fn parse_record(record: &Record, strict: bool) -> Result<Option<Command>> {
    let line = record.line;
    let value = record.value();

    let kind = match record.keyword() {
        "PERSON" => CommandKind::Person(value),
        "FATHER" => CommandKind::ChildAssertion {
            role: ParentRole::Father,
            parent: value,
        },
        "MOTHER" => CommandKind::ChildAssertion {
            role: ParentRole::Mother,
            parent: value,
        },
        "FATHER_OF" => CommandKind::ParentAssertion {
            role: ParentRole::Father,
            child: value,
        },
        "MOTHER_OF" => CommandKind::ParentAssertion {
            role: ParentRole::Mother,
            child: value,
        },
        "SEX" => match Sex::from_code(&value) {
            Some(sex) => CommandKind::SexAssertion(sex),
            None => return Err(FamilyError::InvalidSex { line, value }),
        },
        keyword if strict => {
            return Err(FamilyError::UnknownKeyword {
                line,
                keyword: keyword.to_string(),
            })
        }
        keyword => {
            debug!("Ignoring unknown keyword '{}' on line {}", keyword, line);
            return Ok(None);
        }
    };

    Ok(Some(Command::new(line, kind)))
}

/// Parse every record, stopping at the first error.
pub fn parse_records<I>(records: I, strict: bool) -> Result<Vec<Command>>
where
    I: IntoIterator<Item = std::io::Result<Record>>,
{
    let mut commands = Vec::new();
    for record in records {
        if let Some(command) = parse_record(&record?, strict)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, text: &str) -> Record {
        Record::new(line, text.split_whitespace().map(str::to_string).collect())
    }

    #[test]
    fn test_keywords_map_to_commands() {
        let cases = [
            ("PERSON Fred Smith", CommandKind::Person("Fred Smith".into())),
            (
                "FATHER Bob",
                CommandKind::ChildAssertion { role: ParentRole::Father, parent: "Bob".into() },
            ),
            (
                "MOTHER Sue",
                CommandKind::ChildAssertion { role: ParentRole::Mother, parent: "Sue".into() },
            ),
            (
                "FATHER_OF Tim",
                CommandKind::ParentAssertion { role: ParentRole::Father, child: "Tim".into() },
            ),
            (
                "MOTHER_OF Ann Lee",
                CommandKind::ParentAssertion { role: ParentRole::Mother, child: "Ann Lee".into() },
            ),
            ("SEX M", CommandKind::SexAssertion(Sex::Male)),
        ];

        for (text, expected) in cases {
            let command = parse_record(&record(7, text), true).unwrap().unwrap();
            assert_eq!(command, Command::new(7, expected));
        }
    }

    #[test]
    fn test_invalid_sex() {
        let err = parse_record(&record(2, "SEX Q"), false).unwrap_err();
        assert!(matches!(err, FamilyError::InvalidSex { line: 2, ref value } if value == "Q"));
    }

    #[test]
    fn test_unknown_keyword_lenient_and_strict() {
        assert!(parse_record(&record(1, "SPOUSE Jo"), false).unwrap().is_none());
        assert!(matches!(
            parse_record(&record(1, "SPOUSE Jo"), true),
            Err(FamilyError::UnknownKeyword { line: 1, .. })
        ));
        // keywords are case-sensitive
        assert!(parse_record(&record(1, "person Jo"), false).unwrap().is_none());
    }

    #[test]
    fn test_parse_records_skips_unknown() {
        let records = vec![Ok(record(1, "PERSON A")), Ok(record(2, "NOTE hi")), Ok(record(3, "SEX F"))];
        let commands = parse_records(records, false).unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].line, 3);
    }
}
