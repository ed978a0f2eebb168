//! Field-level argument validation.
//!
//! `ArgReader` walks a raw argument object field by field, in schema order,
//! and records every violation it finds instead of stopping at the first.
//! `finish` turns the collected violations into a single
//! `RaindropError::Validation` whose text is `path: reason` joined by `, `.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::core::error::RaindropError;
use crate::core::tool::Arguments;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Name of a JSON value's type as it appears in violation messages.
fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(expected: &str, got: &Value) -> String {
    format!("Expected {expected}, received {}", kind_of(got))
}

pub struct ArgReader<'a> {
    args: &'a Arguments,
    violations: Vec<Violation>,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a Arguments) -> Self {
        Self {
            args,
            violations: Vec::new(),
        }
    }

    fn raw(&self, field: &str) -> Option<&'a Value> {
        self.args.get(field)
    }

    fn reject(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.violations.push(Violation {
            path: path.into(),
            reason: reason.into(),
        });
    }

    pub fn required_string(&mut self, field: &str) -> Option<String> {
        if self.raw(field).is_none() {
            self.reject(field, "Required");
            return None;
        }
        self.optional_string(field)
    }

    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.raw(field)? {
            Value::String(s) => Some(s.clone()),
            other => {
                let reason = type_mismatch("string", other);
                self.reject(field, reason);
                None
            }
        }
    }

    /// Required string that must parse as an absolute URL.
    pub fn required_url(&mut self, field: &str) -> Option<String> {
        let raw = self.required_string(field)?;
        match reqwest::Url::parse(&raw) {
            Ok(_) => Some(raw),
            Err(_) => {
                self.reject(field, "Invalid url");
                None
            }
        }
    }

    /// Array of strings; every bad element is reported under `field.index`.
    pub fn optional_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        let items = match self.raw(field)? {
            Value::Array(items) => items,
            other => {
                let reason = type_mismatch("array", other);
                self.reject(field, reason);
                return None;
            }
        };
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => {
                    let reason = type_mismatch("string", other);
                    self.reject(format!("{field}.{i}"), reason);
                    ok = false;
                }
            }
        }
        ok.then_some(out)
    }

    /// Integer with optional inclusive bounds.
    pub fn optional_integer(
        &mut self,
        field: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Option<i64> {
        let value = match self.raw(field)? {
            Value::Number(n) => n,
            other => {
                let reason = type_mismatch("number", other);
                self.reject(field, reason);
                return None;
            }
        };
        let n = match value.as_i64() {
            Some(n) => n,
            // 2.0 is as integral as 2
            None => match value.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                Some(f) if f.fract() == 0.0 => {
                    let reason = match (f > 0.0, min, max) {
                        (true, _, Some(max)) => format!("Number must be less than or equal to {max}"),
                        (false, Some(min), _) => {
                            format!("Number must be greater than or equal to {min}")
                        }
                        _ => "Integer out of range".to_string(),
                    };
                    self.reject(field, reason);
                    return None;
                }
                _ => {
                    self.reject(field, "Expected integer, received float");
                    return None;
                }
            },
        };
        if let Some(min) = min.filter(|m| n < *m) {
            self.reject(field, format!("Number must be greater than or equal to {min}"));
            return None;
        }
        if let Some(max) = max.filter(|m| n > *m) {
            self.reject(field, format!("Number must be less than or equal to {max}"));
            return None;
        }
        Some(n)
    }

    pub fn optional_bool(&mut self, field: &str) -> Option<bool> {
        match self.raw(field)? {
            Value::Bool(b) => Some(*b),
            other => {
                let reason = type_mismatch("boolean", other);
                self.reject(field, reason);
                None
            }
        }
    }

    /// String restricted to `allowed`; `T::from_str` must accept every allowed value.
    pub fn optional_enum<T: FromStr>(&mut self, field: &str, allowed: &[&str]) -> Option<T> {
        let expected = allowed
            .iter()
            .map(|v| format!("'{v}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        match self.raw(field)? {
            Value::String(s) => match s.parse::<T>() {
                Ok(v) if allowed.contains(&s.as_str()) => Some(v),
                _ => {
                    self.reject(
                        field,
                        format!("Invalid enum value. Expected {expected}, received '{s}'"),
                    );
                    None
                }
            },
            other => {
                let reason = format!("Expected {expected}, received {}", kind_of(other));
                self.reject(field, reason);
                None
            }
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// `Ok(())` when no violation was recorded.
    pub fn finish(self) -> Result<(), RaindropError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let joined = self
            .violations
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(RaindropError::Validation(joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(v: Value) -> Arguments {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn required_string_reports_missing_and_wrong_type() {
        let a = args(json!({"b": 3}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.required_string("a"), None);
        assert_eq!(r.required_string("b"), None);
        let err = r.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: a: Required, b: Expected string, received number"
        );
    }

    #[test]
    fn empty_string_is_a_valid_required_string() {
        let a = args(json!({"query": ""}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.required_string("query").as_deref(), Some(""));
        assert!(r.finish().is_ok());
    }

    #[test]
    fn url_must_be_absolute() {
        let a = args(json!({"url": "not-a-url"}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.required_url("url"), None);
        assert_eq!(r.violations()[0].to_string(), "url: Invalid url");

        let a = args(json!({"url": "https://example.com/a?b=c"}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.required_url("url").as_deref(), Some("https://example.com/a?b=c"));
        assert!(r.violations().is_empty());
    }

    #[test]
    fn string_list_reports_each_bad_element() {
        let a = args(json!({"tags": ["ok", 1, true]}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.optional_string_list("tags"), None);
        let msgs: Vec<String> = r.violations().iter().map(|v| v.to_string()).collect();
        assert_eq!(
            msgs,
            vec![
                "tags.1: Expected string, received number",
                "tags.2: Expected string, received boolean",
            ]
        );
    }

    #[test]
    fn integer_bounds_and_kind() {
        let a = args(json!({"low": -1, "high": 51, "frac": 1.5, "ok": 50, "whole": 2.0}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.optional_integer("low", Some(0), None), None);
        assert_eq!(r.optional_integer("high", Some(1), Some(50)), None);
        assert_eq!(r.optional_integer("frac", None, None), None);
        assert_eq!(r.optional_integer("ok", Some(1), Some(50)), Some(50));
        assert_eq!(r.optional_integer("whole", Some(0), None), Some(2));
        assert_eq!(r.optional_integer("absent", Some(1), Some(50)), None);
        let msgs: Vec<String> = r.violations().iter().map(|v| v.to_string()).collect();
        assert_eq!(
            msgs,
            vec![
                "low: Number must be greater than or equal to 0",
                "high: Number must be less than or equal to 50",
                "frac: Expected integer, received float",
            ]
        );
    }

    #[test]
    fn null_is_not_treated_as_absent() {
        let a = args(json!({"word": null}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.optional_bool("word"), None);
        assert_eq!(
            r.violations()[0].to_string(),
            "word: Expected boolean, received null"
        );
    }

    #[test]
    fn enum_lists_allowed_values() {
        #[derive(Debug, PartialEq)]
        struct Color(String);
        impl FromStr for Color {
            type Err = ();
            fn from_str(s: &str) -> Result<Self, ()> {
                Ok(Color(s.to_owned()))
            }
        }
        let a = args(json!({"c": "green", "d": 4}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.optional_enum::<Color>("c", &["red", "blue"]), None);
        assert_eq!(r.optional_enum::<Color>("d", &["red", "blue"]), None);
        let msgs: Vec<String> = r.violations().iter().map(|v| v.to_string()).collect();
        assert_eq!(
            msgs,
            vec![
                "c: Invalid enum value. Expected 'red' | 'blue', received 'green'",
                "d: Expected 'red' | 'blue', received number",
            ]
        );
    }

    #[test]
    fn integers_beyond_i64_report_the_stated_bound_or_range() {
        let a = args(json!({"free": 1e19, "neg": -1e19, "capped": 1e19, "floor": -1e19}));
        let mut r = ArgReader::new(&a);
        assert_eq!(r.optional_integer("free", None, None), None);
        assert_eq!(r.optional_integer("neg", None, None), None);
        assert_eq!(r.optional_integer("capped", Some(1), Some(50)), None);
        assert_eq!(r.optional_integer("floor", Some(0), None), None);
        let reasons: Vec<String> = r.violations().iter().map(|v| v.to_string()).collect();
        assert_eq!(
            reasons,
            vec![
                "free: Integer out of range",
                "neg: Integer out of range",
                "capped: Number must be less than or equal to 50",
                "floor: Number must be greater than or equal to 0",
            ]
        );
    }
}
