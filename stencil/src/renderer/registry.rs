use std::{collections::HashMap, fmt};

use askama::Template;
use http::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};

use stencil_slo::{errors, Result};

use super::{Params, Renderer};
use crate::DEFAULT_ERROR_TEMPLATE;

type RenderFn = Box<dyn Fn(&Params) -> Result<String> + Send + Sync>;

/// Built-in page registered under `errors::common`.
#[derive(Template, Deserialize, Debug, Clone, Copy)]
#[template(path = "errors/common.html")]
pub struct ErrorPage {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorPage {
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Error")
    }
}

/// Renderer over a fixed table of named templates.
///
/// askama templates are compiled in, so the parameters are deserialized into
/// the template type before rendering.
#[derive(Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, RenderFn>,
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.templates.keys().collect();
        names.sort();
        f.debug_struct("TemplateRegistry")
            .field("templates", &names)
            .finish()
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<ErrorPage>(DEFAULT_ERROR_TEMPLATE);
        registry
    }

    pub fn register<T>(&mut self, name: &str) -> &mut Self
    where
        T: Template + DeserializeOwned + 'static,
    {
        self.register_fn(name, |params| {
            let value = serde_json::Value::Object(params.clone());
            let page: T = serde_json::from_value(value)
                .map_err(|err| errors::render(&err))?;
            page.render().map_err(|err| errors::render(&err))
        })
    }

    pub fn register_fn<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&Params) -> Result<String> + Send + Sync + 'static,
    {
        self.templates.insert(name.to_owned(), Box::new(f));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl Renderer for TemplateRegistry {
    fn render(&self, name: &str, params: &Params) -> Result<String> {
        let f = self
            .templates
            .get(name)
            .ok_or_else(|| errors::template_not_found(name))?;
        f(params)
    }
}
