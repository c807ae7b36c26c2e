//! Build HTTP responses whose body is produced by a template renderer.
//!
//! [`TemplatedResponseFactory`] picks between a caller supplied "success"
//! template and the configured error template based on the status code, and
//! always stamps the configured `Content-Type` on the response.

mod factory;
mod options;
pub mod renderer;
mod response;

pub use factory::{is_success_code, ResponseFactory, TemplatedResponseFactory};
pub use options::{
    Options, Overrides, DEFAULT_CONTENT_TYPE, DEFAULT_ERROR_TEMPLATE,
};
pub use renderer::{to_params, MockRenderer, Params, Renderer};
pub use response::{ReasonPhrase, ReasonPhraseExt, Response};

pub use stencil_slo::{errors, Result};
