use http::StatusCode;

/// A fully rendered HTTP response.
pub type Response = http::Response<String>;

/// Custom reason phrase attached to a [`Response`] as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonPhrase(String);

impl ReasonPhrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub trait ReasonPhraseExt {
    /// The caller supplied reason phrase, or the canonical one for the status
    /// code when none was given.
    fn reason_phrase(&self) -> Option<&str>;
}

impl<B> ReasonPhraseExt for http::Response<B> {
    fn reason_phrase(&self) -> Option<&str> {
        match self.extensions().get::<ReasonPhrase>() {
            Some(reason) => Some(reason.as_str()),
            None => self.status().canonical_reason(),
        }
    }
}

pub(crate) fn build(
    code: StatusCode,
    reason_phrase: &str,
    content_type: &http::HeaderValue,
    body: String,
) -> Response {
    let mut resp = Response::new(body);
    *resp.status_mut() = code;
    if !reason_phrase.is_empty() {
        resp.extensions_mut()
            .insert(ReasonPhrase(reason_phrase.to_owned()));
    }
    resp.headers_mut()
        .insert(http::header::CONTENT_TYPE, content_type.clone());
    resp
}
