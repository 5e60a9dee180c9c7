//! Pass-through model arguments.
//!
//! Arguments not consumed by the front-end are handed to the model, which
//! only looks at plusargs (`+name=value` or a bare `+flag`). Anything else is
//! ignored.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown model `{name}` (available: {available})")]
    UnknownModel { name: String, available: String },
    #[error("invalid value `{value}` for +{key}")]
    InvalidArg { key: String, value: String },
}

#[derive(Clone, Debug, Default)]
pub struct ModelArgs {
    raw: Vec<String>,
    plusargs: HashMap<String, Option<String>>,
}

impl ModelArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut plusargs = HashMap::new();
        for arg in &raw {
            let Some(body) = arg.strip_prefix('+') else {
                continue;
            };
            if body.is_empty() {
                continue;
            }
            match body.split_once('=') {
                Some((key, value)) => plusargs.insert(key.to_string(), Some(value.to_string())),
                None => plusargs.insert(body.to_string(), None),
            };
        }
        Self { raw, plusargs }
    }

    /// Every argument as given, plusargs included.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Value of `+key=value`. A bare `+key` yields `Some("")`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.plusargs
            .get(key)
            .map(|v| v.as_deref().unwrap_or(""))
    }

    pub fn flag(&self, key: &str) -> bool {
        self.plusargs.contains_key(key)
    }

    /// Parse `+key=value` with `parse`, mapping failures to [`ModelError::InvalidArg`].
    pub fn parsed<T>(
        &self,
        key: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, ModelError> {
        let Some(value) = self.value(key) else {
            return Ok(None);
        };
        parse(value).map(Some).ok_or_else(|| ModelError::InvalidArg {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plusargs_and_flags() {
        let args = ModelArgs::parse(["+pattern=checker", "+trace", "positional", "-x", "+"]);
        assert_eq!(args.value("pattern"), Some("checker"));
        assert!(args.flag("trace"));
        assert_eq!(args.value("trace"), Some(""));
        assert!(!args.flag("positional"));
        assert_eq!(args.raw().len(), 5);
    }

    #[test]
    fn test_later_plusarg_wins() {
        let args = ModelArgs::parse(["+pattern=bars", "+pattern=gradient"]);
        assert_eq!(args.value("pattern"), Some("gradient"));
    }

    #[test]
    fn test_parsed_reports_bad_value() {
        let args = ModelArgs::parse(["+speed=fast"]);
        let err = args.parsed("speed", |v| v.parse::<u32>().ok()).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidArg {
                key: "speed".into(),
                value: "fast".into()
            }
        );
        assert_eq!(args.parsed("missing", |v| v.parse::<u32>().ok()), Ok(None));
    }
}
