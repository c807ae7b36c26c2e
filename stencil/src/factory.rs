use std::fmt;

use http::{HeaderValue, StatusCode};
use serde_json::Value;
use tracing::debug;

use stencil_slo::{errors, Result};

use crate::{
    renderer::{Params, Renderer},
    response::{self, Response},
    Options, DEFAULT_CONTENT_TYPE,
};

/// Produces a response for a bare status code.
pub trait ResponseFactory {
    fn create_response(
        &self,
        code: StatusCode,
        reason_phrase: &str,
    ) -> Result<Response>;
}

/// Codes below 305 are answered without the error template, so 300..=304
/// count as success.
pub fn is_success_code(code: StatusCode) -> bool {
    code.as_u16() < 305
}

/// Builds responses whose body comes from a [`Renderer`].
pub struct TemplatedResponseFactory<R> {
    renderer: R,
    options: Options,
    content_type: HeaderValue,
}

impl<R> fmt::Debug for TemplatedResponseFactory<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplatedResponseFactory")
            .field("options", &self.options)
            .finish()
    }
}

impl<R: Renderer> TemplatedResponseFactory<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            options: Options::default(),
            content_type: HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
        }
    }

    /// Fails when the configured content type is not a valid header value.
    pub fn with_options(renderer: R, options: Options) -> Result<Self> {
        let content_type = HeaderValue::from_str(&options.content_type)
            .map_err(|err| {
                errors::invalid_header(&format!(
                    "content type {:?}: {}",
                    options.content_type, err
                ))
            })?;
        Ok(Self {
            renderer,
            options,
            content_type,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// A 200 response with the rendered `template_name` as body.
    pub fn success(
        &self,
        template_name: &str,
        template_params: &Params,
    ) -> Result<Response> {
        debug!(template = template_name, "rendering success response");
        self.with_body(StatusCode::OK, "", template_name, template_params)
    }

    /// A response with status `code` and the error template as body. The
    /// template receives the numeric code as `statusCode`.
    pub fn error(
        &self,
        code: StatusCode,
        reason_phrase: &str,
    ) -> Result<Response> {
        debug!(
            template = %self.options.error_template,
            status = code.as_u16(),
            "rendering error response"
        );
        let mut params = Params::new();
        params.insert("statusCode".to_owned(), Value::from(code.as_u16()));
        self.with_body(
            code,
            reason_phrase,
            &self.options.error_template,
            &params,
        )
    }

    fn with_body(
        &self,
        code: StatusCode,
        reason_phrase: &str,
        template_name: &str,
        template_params: &Params,
    ) -> Result<Response> {
        let body = self.renderer.render(template_name, template_params)?;
        Ok(response::build(code, reason_phrase, &self.content_type, body))
    }
}

impl<R: Renderer> ResponseFactory for TemplatedResponseFactory<R> {
    /// Error codes are rendered through [`error`](Self::error); anything else
    /// comes back with an empty body for the caller to fill.
    fn create_response(
        &self,
        code: StatusCode,
        reason_phrase: &str,
    ) -> Result<Response> {
        if !is_success_code(code) {
            return self.error(code, reason_phrase);
        }
        Ok(response::build(
            code,
            reason_phrase,
            &self.content_type,
            String::new(),
        ))
    }
}
