//! Read-only projection of the request fields the gate consults.

use axum::http::{HeaderName, Request, header};

/// Scheme hint set by TLS-terminating proxies in front of this service.
const HEADER_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The request fields a single gate decision is made from.
///
/// A context borrows from the request and never mutates it; the gate
/// decides an action, the surrounding middleware carries it out.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    scheme: &'a str,
    authorization: Option<&'a str>,
    client_id: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    /// Build a context from already-extracted parts.
    #[must_use]
    pub const fn new(
        scheme: &'a str,
        authorization: Option<&'a str>,
        client_id: Option<&'a str>,
    ) -> Self {
        Self {
            scheme,
            authorization,
            client_id,
        }
    }

    /// Project a request, classifying by the configured identifying header.
    ///
    /// Header values that are not valid UTF-8 are treated as absent.
    pub fn from_request<B>(req: &'a Request<B>, client_header: &HeaderName) -> Self {
        Self {
            scheme: resolved_scheme(req),
            authorization: header_str(req, &header::AUTHORIZATION),
            client_id: header_str(req, client_header),
        }
    }

    /// Transport scheme the request arrived over, lowercase by convention
    /// but compared case-insensitively by the gate.
    #[must_use]
    pub const fn scheme(&self) -> &'a str {
        self.scheme
    }

    /// Raw `Authorization` header value, if one was sent.
    #[must_use]
    pub const fn authorization(&self) -> Option<&'a str> {
        self.authorization
    }

    /// Raw identifying-header value, if one was sent.
    #[must_use]
    pub const fn client_id(&self) -> Option<&'a str> {
        self.client_id
    }
}

fn header_str<'a, B>(req: &'a Request<B>, name: &HeaderName) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

/// Resolve the transport scheme of a request.
///
/// Absolute-form request targets carry the scheme themselves; otherwise the
/// first `x-forwarded-proto` value stands in for it, and a request with
/// neither is taken as plain HTTP.
fn resolved_scheme<B>(req: &Request<B>) -> &str {
    if let Some(scheme) = req.uri().scheme_str() {
        return scheme;
    }
    req.headers()
        .get(HEADER_FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.split(',').next().unwrap_or("").trim())
        .filter(|value| !value.is_empty())
        .unwrap_or("http")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::USER_AGENT;

    fn request(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).expect("request")
    }

    #[test]
    fn absolute_uri_scheme_wins() {
        let req = request("https://geo.example.com/wms");
        let ctx = RequestContext::from_request(&req, &USER_AGENT);
        assert_eq!(ctx.scheme(), "https");
    }

    #[test]
    fn forwarded_proto_stands_in_for_origin_form() {
        let req = Request::builder()
            .uri("/wms")
            .header(HEADER_FORWARDED_PROTO, "https, http")
            .body(())
            .expect("request");
        let ctx = RequestContext::from_request(&req, &USER_AGENT);
        assert_eq!(ctx.scheme(), "https");
    }

    #[test]
    fn defaults_to_plain_http() {
        let req = request("/wms");
        let ctx = RequestContext::from_request(&req, &USER_AGENT);
        assert_eq!(ctx.scheme(), "http");
    }

    #[test]
    fn projects_headers_by_configured_name() {
        let req = Request::builder()
            .uri("https://geo.example.com/wms")
            .header(USER_AGENT, "QGIS 3.34")
            .header("authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .expect("request");
        let ctx = RequestContext::from_request(&req, &USER_AGENT);
        assert_eq!(ctx.client_id(), Some("QGIS 3.34"));
        assert_eq!(ctx.authorization(), Some("Basic dXNlcjpwYXNz"));

        let other = HeaderName::from_static("x-client-app");
        let ctx = RequestContext::from_request(&req, &other);
        assert_eq!(ctx.client_id(), None);
    }
}
