use std::error::Error as StdError;

use tera::{Context, ErrorKind, Tera};

use stencil_slo::{errors, Result};

use super::{Params, Renderer};

const NAMESPACE_SEPARATOR: &str = "::";
const EXTENSION: &str = ".html";

/// Renderer backed by a tera template directory.
///
/// `errors::common` resolves to `errors/common.html`.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn new(glob: &str) -> Result<Self> {
        let tera = Tera::new(glob).map_err(|err| errors::render(&chain(&err)))?;
        tracing::debug!(
            "loaded {} templates from {}",
            tera.get_template_names().count(),
            glob
        );
        Ok(Self::from_tera(tera))
    }

    pub fn from_tera(tera: Tera) -> Self {
        Self { tera }
    }

    fn resolve(&self, name: &str) -> String {
        if self.tera.get_template_names().any(|known| known == name) {
            return name.to_owned();
        }
        let mut path = name.replace(NAMESPACE_SEPARATOR, "/");
        if !path.ends_with(EXTENSION) {
            path.push_str(EXTENSION);
        }
        path
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, name: &str, params: &Params) -> Result<String> {
        let context = Context::from_serialize(params)
            .map_err(|err| errors::render(&chain(&err)))?;
        let path = self.resolve(name);
        self.tera.render(&path, &context).map_err(|err| match err.kind {
            ErrorKind::TemplateNotFound(_) => errors::template_not_found(name),
            _ => errors::render(&chain(&err)),
        })
    }
}

// tera keeps the interesting part of a failure in the source chain.
fn chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
