mod registry;
mod tera_renderer;

use std::sync::Arc;

use mockall::automock;
use serde::Serialize;

use stencil_slo::{errors, Result};

pub use registry::{ErrorPage, TemplateRegistry};
pub use tera_renderer::TeraRenderer;

/// Parameters handed to a template.
pub type Params = serde_json::Map<String, serde_json::Value>;

#[automock]
pub trait Renderer {
    /// render turns the named template and its parameters into the finished
    /// body. A missing template is reported as
    /// [`Code::TemplateNotFound`](stencil_slo::errors::Code::TemplateNotFound),
    /// any other failure as [`Code::Render`](stencil_slo::errors::Code::Render).
    fn render(&self, name: &str, params: &Params) -> Result<String>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, name: &str, params: &Params) -> Result<String> {
        (**self).render(name, params)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, name: &str, params: &Params) -> Result<String> {
        (**self).render(name, params)
    }
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    fn render(&self, name: &str, params: &Params) -> Result<String> {
        (**self).render(name, params)
    }
}

/// Serialize a value into template parameters. The value has to serialize to
/// a map.
pub fn to_params<T: Serialize + ?Sized>(value: &T) -> Result<Params> {
    match serde_json::to_value(value).map_err(errors::any)? {
        serde_json::Value::Object(params) => Ok(params),
        other => Err(errors::render(&format!(
            "template parameters must be a map, got {}",
            other
        ))),
    }
}
