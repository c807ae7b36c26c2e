use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use stencil_slo::{errors, Result};

pub const DEFAULT_CONTENT_TYPE: &str = "text/html;charset=utf-8";
pub const DEFAULT_ERROR_TEMPLATE: &str = "errors::common";

/// Settings of a [`TemplatedResponseFactory`](crate::TemplatedResponseFactory).
///
/// Keys missing from a deserialized mapping keep their defaults and unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Value of the `Content-Type` header of every response.
    #[serde(default = "default_content_type", alias = "content_type")]
    pub content_type: String,
    /// Template rendered for error responses, with `statusCode` as its only
    /// parameter.
    #[serde(default = "default_error_template", alias = "error_template")]
    pub error_template: String,
}

fn default_content_type() -> String {
    String::from(DEFAULT_CONTENT_TYPE)
}

fn default_error_template() -> String {
    String::from(DEFAULT_ERROR_TEMPLATE)
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content_type: default_content_type(),
            error_template: default_error_template(),
        }
    }
}

/// A partial set of [`Options`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    #[serde(default, alias = "content_type")]
    pub content_type: Option<String>,
    #[serde(default, alias = "error_template")]
    pub error_template: Option<String>,
}

impl Options {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(content_type) = overrides.content_type {
            self.content_type = content_type;
        }
        if let Some(error_template) = overrides.error_template {
            self.error_template = error_template;
        }
        self
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .context("could not parse options")
            .map_err(errors::anyhow)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| {
                format!(
                    "could not read options file {}",
                    path.as_ref().display()
                )
            })
            .map_err(errors::anyhow)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.content_type, "text/html;charset=utf-8");
        assert_eq!(opts.error_template, "errors::common");
    }

    #[test]
    fn override_error_template_only() {
        let opts = Options::default().apply(Overrides {
            error_template: Some("custom::error".to_owned()),
            ..Default::default()
        });
        assert_eq!(opts.error_template, "custom::error");
        assert_eq!(opts.content_type, DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn override_content_type_only() {
        let opts = Options::default().apply(Overrides {
            content_type: Some("text/plain".to_owned()),
            ..Default::default()
        });
        assert_eq!(opts.content_type, "text/plain");
        assert_eq!(opts.error_template, DEFAULT_ERROR_TEMPLATE);
    }

    #[test]
    fn partial_mapping_keeps_defaults() {
        let opts: Options = serde_json::from_value(serde_json::json!({
            "errorTemplate": "custom::error",
            "unknown": true,
        }))
        .unwrap();
        assert_eq!(opts.error_template, "custom::error");
        assert_eq!(opts.content_type, DEFAULT_CONTENT_TYPE);

        let overrides: Overrides = serde_json::from_value(serde_json::json!({
            "contentType": "application/xhtml+xml",
            "ignored": 1,
        }))
        .unwrap();
        assert_eq!(overrides.error_template, None);
    }

    #[test]
    fn from_toml() {
        let opts = Options::from_toml(r#"contentType = "text/plain""#).unwrap();
        assert_eq!(opts.content_type, "text/plain");
        assert_eq!(opts.error_template, DEFAULT_ERROR_TEMPLATE);

        let opts = Options::from_toml("error_template = \"a::b\"\n").unwrap();
        assert_eq!(opts.error_template, "a::b");

        assert!(Options::from_toml("contentType = 1").is_err());
    }

    #[test]
    fn load_missing_file() {
        let err = Options::load("/nonexistent/stencil.toml").unwrap_err();
        assert!(err.to_string().contains("could not read options file"));
    }
}
