//! Collection schemas
//!
//! Each collection has a fixed field set, so validation is a plain walk over
//! the parsed YAML mapping. Every problem in an entry is collected before the
//! entry is rejected.

use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::entry::{BlogData, ResumeItem, ResumeKind};
use crate::helpers;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A collection entry whose data does not match the collection schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SchemaValidationError {
    pub collection: String,
    pub slug: String,
    pub path: PathBuf,
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} entry `{}` ({}): ",
            self.collection,
            self.slug,
            self.path.display()
        )?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Blog frontmatter after validation, plus the optional slug override
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedBlog {
    pub data: BlogData,
    pub slug: Option<String>,
}

/// Validate the frontmatter of a `blog` entry
pub(crate) fn validate_blog(data: &Mapping) -> Result<ValidatedBlog, Vec<FieldIssue>> {
    let mut v = Validator::new(data, "");

    let title = v.non_empty_string("title");
    let description = v.non_empty_string("description");
    let pub_date = v.required_date("pubDate");
    let updated_date = v.optional_date("updatedDate");
    let hero_image = v.optional_string("heroImage");
    let tags = v.optional_string_list("tags");
    let slug = v.optional_slug("slug");

    match (title, description, pub_date) {
        (Some(title), Some(description), Some(pub_date)) if v.issues.is_empty() => {
            Ok(ValidatedBlog {
                data: BlogData {
                    title,
                    description,
                    pub_date,
                    updated_date,
                    hero_image,
                    tags,
                },
                slug,
            })
        }
        _ => Err(v.issues),
    }
}

/// Validate the contents of a `resume` data file (an array of items)
pub(crate) fn validate_resume(data: &Value) -> Result<Vec<ResumeItem>, Vec<FieldIssue>> {
    let Some(seq) = data.as_sequence() else {
        return Err(vec![FieldIssue::new(
            "(root)",
            format!("expected a list of resume items, found {}", kind_of(data)),
        )]);
    };

    let mut items = Vec::with_capacity(seq.len());
    let mut issues = Vec::new();

    for (i, value) in seq.iter().enumerate() {
        let prefix = format!("[{}].", i);
        let Some(map) = value.as_mapping() else {
            issues.push(FieldIssue::new(
                format!("[{}]", i),
                format!("expected a mapping, found {}", kind_of(value)),
            ));
            continue;
        };

        let mut v = Validator::new(map, &prefix);
        let kind = v.resume_kind("type");
        let school = v.optional_string("school");
        let degree = v.optional_string("degree");
        let position = v.optional_string("position");
        let employer = v.optional_string("employer");
        let start = v.required_string("start");
        let end = v.required_string("end");
        let url = v.required_string("url");

        match (kind, start, end, url) {
            (Some(kind), Some(start), Some(end), Some(url)) if v.issues.is_empty() => {
                items.push(ResumeItem {
                    kind,
                    school,
                    degree,
                    position,
                    employer,
                    start,
                    end,
                    url,
                })
            }
            _ => issues.extend(v.issues),
        }
    }

    if issues.is_empty() {
        Ok(items)
    } else {
        Err(issues)
    }
}

/// Field-by-field checker over one mapping
struct Validator<'a> {
    data: &'a Mapping,
    prefix: &'a str,
    issues: Vec<FieldIssue>,
}

impl<'a> Validator<'a> {
    fn new(data: &'a Mapping, prefix: &'a str) -> Self {
        Self {
            data,
            prefix,
            issues: Vec::new(),
        }
    }

    /// Fetch a field; explicit `null` counts as absent
    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.data.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    fn issue(&mut self, key: &str, message: impl Into<String>) {
        self.issues
            .push(FieldIssue::new(format!("{}{}", self.prefix, key), message));
    }

    fn missing(&mut self, key: &str) {
        self.issue(key, "required field is missing");
    }

    fn string(&mut self, key: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.issue(key, format!("expected a string, found {}", kind_of(other)));
                None
            }
        }
    }

    fn required_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(value) => self.string(key, value),
            None => {
                self.missing(key);
                None
            }
        }
    }

    fn non_empty_string(&mut self, key: &str) -> Option<String> {
        let value = self.required_string(key)?;
        if value.trim().is_empty() {
            self.issue(key, "must not be empty");
            return None;
        }
        Some(value)
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        self.string(key, value)
    }

    /// A slug override with leading and trailing `/` removed
    fn optional_slug(&mut self, key: &str) -> Option<String> {
        let value = self.optional_string(key)?;
        let slug = value.trim().trim_matches('/');
        if slug.is_empty() {
            self.issue(key, "must not be empty");
            return None;
        }
        Some(slug.to_string())
    }

    fn date(&mut self, key: &str, value: &Value) -> Option<DateTime<Utc>> {
        let parsed = match value {
            Value::String(s) => helpers::parse_date_string(s),
            Value::Number(n) => n.as_i64().and_then(helpers::from_epoch_millis),
            other => {
                self.issue(key, format!("expected a date, found {}", kind_of(other)));
                return None;
            }
        };
        if parsed.is_none() {
            self.issue(key, format!("cannot coerce {} to a date", describe(value)));
        }
        parsed
    }

    fn required_date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        match self.get(key) {
            Some(value) => self.date(key, value),
            None => {
                self.missing(key);
                None
            }
        }
    }

    fn optional_date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        let value = self.get(key)?;
        self.date(key, value)
    }

    fn optional_string_list(&mut self, key: &str) -> Option<Vec<String>> {
        let value = self.get(key)?;
        let Some(seq) = value.as_sequence() else {
            self.issue(
                key,
                format!("expected a list of strings, found {}", kind_of(value)),
            );
            return None;
        };

        let mut out = Vec::with_capacity(seq.len());
        let mut valid = true;
        for (i, item) in seq.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => {
                    valid = false;
                    self.issue(
                        &format!("{}[{}]", key, i),
                        format!("expected a string, found {}", kind_of(other)),
                    );
                }
            }
        }
        valid.then_some(out)
    }

    fn resume_kind(&mut self, key: &str) -> Option<ResumeKind> {
        let value = self.required_string(key)?;
        let kind = ResumeKind::parse(&value);
        if kind.is_none() {
            self.issue(
                key,
                format!("expected \"work\" or \"academic\", found \"{}\"", value),
            );
        }
        kind
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        other => kind_of(other).to_string(),
    }
}
