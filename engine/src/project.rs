use crate::field::FieldPath;
use crate::filter::ParseError;
use crate::lex::{complete, Lex};
use crate::types::{Record, Value};
use serde::Serialize;

/// Selects which fields survive projection.
///
/// `fields` is an allow-list applied first: when non-empty, only the named
/// paths are copied into the output (in list order). `exclude_fields` is a
/// deny-list applied second to whatever the first stage produced. Paths
/// that resolve to nothing are skipped silently.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct FieldSelector {
    fields: Vec<FieldPath>,
    exclude_fields: Vec<FieldPath>,
}

fn parse_field_list(list: Option<&str>) -> Result<Vec<FieldPath>, ParseError> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| complete(FieldPath::lex(chunk)).map_err(|err| ParseError::new(chunk, err)))
        .collect()
}

impl FieldSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses comma-separated field lists as they appear on a command line,
    /// e.g. `Some("name,metadata.version")`.
    pub fn parse(fields: Option<&str>, exclude_fields: Option<&str>) -> Result<Self, ParseError> {
        Ok(FieldSelector {
            fields: parse_field_list(fields)?,
            exclude_fields: parse_field_list(exclude_fields)?,
        })
    }

    pub fn add_field(&mut self, path: FieldPath) {
        self.fields.push(path);
    }

    pub fn add_exclude_field(&mut self, path: FieldPath) {
        self.exclude_fields.push(path);
    }

    /// True when projection would return records unchanged.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.exclude_fields.is_empty()
    }

    /// Applies the selector to one record, returning the projected copy.
    pub fn project(&self, record: &Record) -> Record {
        let mut out = if self.fields.is_empty() {
            record.clone()
        } else {
            let mut out = Record::new();
            for path in &self.fields {
                if let Some(value) = lookup(record, path) {
                    set_path(&mut out, path, value.clone());
                }
            }
            out
        };
        for path in &self.exclude_fields {
            remove_path(&mut out, path);
        }
        out
    }
}

// Projection traverses records only; array elements are copied or dropped
// wholesale with the array that holds them.
fn lookup<'r>(record: &'r Record, path: &FieldPath) -> Option<&'r Value> {
    let (last, parents) = path.segments().split_last()?;
    let mut current = record;
    for segment in parents {
        match current.get(segment) {
            Some(Value::Record(nested)) => current = nested,
            _ => return None,
        }
    }
    current.get(last)
}

fn set_path(record: &mut Record, path: &FieldPath, value: Value) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let mut current = record;
    for segment in parents {
        current = current.nested_record_mut(segment);
    }
    current.insert(last.clone(), value);
}

fn remove_path(record: &mut Record, path: &FieldPath) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let mut current = record;
    for segment in parents {
        match current.get_mut(segment) {
            Some(Value::Record(nested)) => current = nested,
            _ => return,
        }
    }
    current.remove(last);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    fn sample() -> Record {
        record! {
            "name" => "gerrit-01",
            "type" => "gerrit",
            "metadata" => record! {
                "version" => "2.1",
                "internal" => true,
            },
        }
    }

    #[test]
    fn test_empty_selector_is_identity() {
        let selector = FieldSelector::parse(None, None).unwrap();
        assert!(selector.is_empty());
        assert_eq!(selector.project(&sample()), sample());
    }

    #[test]
    fn test_allow_list() {
        let selector = FieldSelector::parse(Some("name,type"), None).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! {
                "name" => "gerrit-01",
                "type" => "gerrit",
            }
        );
    }

    #[test]
    fn test_allow_list_preserves_list_order() {
        let selector = FieldSelector::parse(Some("type,name"), None).unwrap();
        assert_eq!(
            serde_json::to_string(&selector.project(&sample())).unwrap(),
            r#"{"type":"gerrit","name":"gerrit-01"}"#
        );
    }

    #[test]
    fn test_nested_allow_list_rebuilds_structure() {
        let selector = FieldSelector::parse(Some("name,metadata.version"), None).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! {
                "name" => "gerrit-01",
                "metadata" => record! { "version" => "2.1" },
            }
        );
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let selector = FieldSelector::parse(Some("name,owner,metadata.absent"), None).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! { "name" => "gerrit-01" }
        );
    }

    #[test]
    fn test_deny_list() {
        let selector = FieldSelector::parse(None, Some("metadata.internal")).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! {
                "name" => "gerrit-01",
                "type" => "gerrit",
                "metadata" => record! { "version" => "2.1" },
            }
        );
    }

    #[test]
    fn test_deny_list_removes_whole_subtree() {
        let selector = FieldSelector::parse(None, Some("metadata")).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! {
                "name" => "gerrit-01",
                "type" => "gerrit",
            }
        );
    }

    #[test]
    fn test_deny_after_allow() {
        let selector =
            FieldSelector::parse(Some("name,metadata"), Some("metadata.internal")).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! {
                "name" => "gerrit-01",
                "metadata" => record! { "version" => "2.1" },
            }
        );
    }

    #[test]
    fn test_deny_missing_is_noop() {
        let selector = FieldSelector::parse(None, Some("owner,name.not-a-record")).unwrap();
        assert_eq!(selector.project(&sample()), sample());
    }

    #[test]
    fn test_whitespace_and_empty_chunks() {
        let selector = FieldSelector::parse(Some(" name , type ,"), None).unwrap();
        assert_eq!(
            selector.project(&sample()),
            record! {
                "name" => "gerrit-01",
                "type" => "gerrit",
            }
        );
    }

    #[test]
    fn test_invalid_field_list() {
        let err = FieldSelector::parse(Some("name,bad segment"), None).unwrap_err();
        assert_eq!(err.expression(), "bad segment");
    }
}
