//! Catalog client abstraction and the TMDB implementation.
//!
//! [`CatalogClient`] is the seam the plugin runtime dispatches orchestrator
//! requests through. [`TmdbCatalog`] turns requests into TMDB HTTP calls and
//! hands them to a [`Transport`]; in the plugin binary that transport is the
//! Zellij `web_request` host command, in tests it records the calls.

use super::request::CatalogRequest;
use crate::domain::{CatalogError, MovieId};
use std::collections::BTreeMap;
use url::Url;

/// Default TMDB API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";

/// Default TMDB image base URL.
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// A fully prepared HTTP GET call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Opaque map returned verbatim with the reply.
    pub context: BTreeMap<String, String>,
}

/// Fire-and-forget HTTP transport.
///
/// Implementations must not block; the reply is delivered later through the
/// host's event loop and decoded with [`super::decode_reply`].
pub trait Transport {
    fn send(&mut self, call: HttpCall);
}

/// Catalog operations consumed by the orchestrator.
///
/// Both operations are idempotent reads and may be in flight concurrently.
/// An `Err` means the request was never sent; the caller turns it into a
/// failed reply with [`CatalogRequest::fail`].
pub trait CatalogClient {
    /// Starts a search for `query` under the request's ticket.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the call cannot be built.
    fn find_by_query(&mut self, request: &CatalogRequest, query: &str) -> Result<(), CatalogError>;

    /// Starts a detail lookup for `id` under the request's ticket.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the call cannot be built.
    fn get_detail(&mut self, request: &CatalogRequest, id: MovieId) -> Result<(), CatalogError>;

    /// Routes a request to the matching operation.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    fn dispatch(&mut self, request: &CatalogRequest) -> Result<(), CatalogError> {
        match request {
            CatalogRequest::Search { query, .. } => self.find_by_query(request, query),
            CatalogRequest::Detail { id, .. } => self.get_detail(request, *id),
        }
    }
}

/// TMDB authentication material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// v4 read access token, sent as `Authorization: Bearer`.
    BearerToken(String),
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    Missing,
}

/// Connection settings for [`TmdbCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbSettings {
    pub api_base: String,
    pub language: String,
    pub include_adult: bool,
    pub credentials: Credentials,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
            credentials: Credentials::Missing,
        }
    }
}

/// TMDB catalog client over an arbitrary [`Transport`].
#[derive(Debug)]
pub struct TmdbCatalog<T> {
    settings: TmdbSettings,
    transport: T,
}

impl<T: Transport> TmdbCatalog<T> {
    #[must_use]
    pub const fn new(settings: TmdbSettings, transport: T) -> Self {
        Self { settings, transport }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Parses `{api_base}/{path}` and appends the shared query parameters.
    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        let raw = format!("{}/{}", self.settings.api_base.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw)
            .map_err(|e| CatalogError::Network(format!("invalid api_base `{raw}`: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Credentials::ApiKey(key) = &self.settings.credentials {
                pairs.append_pair("api_key", key);
            }
            pairs.append_pair("language", &self.settings.language);
        }

        Ok(url)
    }

    fn headers(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        match &self.settings.credentials {
            Credentials::BearerToken(token) => {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
            Credentials::ApiKey(_) => {}
            Credentials::Missing => {
                return Err(CatalogError::Api {
                    status: 401,
                    message: "TMDB API token is not set. Add `api_token` or `api_key` to the plugin configuration."
                        .to_string(),
                });
            }
        }

        Ok(headers)
    }

    fn send(&mut self, url: Url, request: &CatalogRequest) -> Result<(), CatalogError> {
        let call = HttpCall {
            url: url.into(),
            headers: self.headers()?,
            context: request.to_context(),
        };

        tracing::debug!(
            lineage = %request.ticket().lineage,
            sequence = request.ticket().sequence,
            url = %redact(&call.url),
            "dispatching catalog request"
        );

        self.transport.send(call);
        Ok(())
    }
}

impl<T: Transport> CatalogClient for TmdbCatalog<T> {
    fn find_by_query(&mut self, request: &CatalogRequest, query: &str) -> Result<(), CatalogError> {
        let mut url = self.endpoint("search/movie")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("include_adult", if self.settings.include_adult { "true" } else { "false" })
            .append_pair("page", "1");
        self.send(url, request)
    }

    fn get_detail(&mut self, request: &CatalogRequest, id: MovieId) -> Result<(), CatalogError> {
        let url = self.endpoint(&format!("movie/{id}"))?;
        self.send(url, request)
    }
}

/// Masks the `api_key` query parameter before a URL is logged.
fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "api_key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingTransport {
        calls: Vec<HttpCall>,
    }

    impl Transport for RecordingTransport {
        fn send(&mut self, call: HttpCall) {
            self.calls.push(call);
        }
    }

    fn catalog(credentials: Credentials) -> TmdbCatalog<RecordingTransport> {
        TmdbCatalog::new(
            TmdbSettings { credentials, ..TmdbSettings::default() },
            RecordingTransport::default(),
        )
    }

    #[test]
    fn search_builds_encoded_url_with_bearer_token() {
        let mut catalog = catalog(Credentials::BearerToken("tok".to_string()));
        let request = CatalogRequest::search(1, "amélie & co");

        catalog.dispatch(&request).unwrap();

        let call = &catalog.transport().calls[0];
        let url = Url::parse(&call.url).unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["query"], "amélie & co");
        assert_eq!(pairs["include_adult"], "false");
        assert_eq!(pairs["language"], "en-US");
        assert_eq!(pairs["page"], "1");
        assert!(!pairs.contains_key("api_key"));
        assert_eq!(call.headers["Authorization"], "Bearer tok");
        assert_eq!(call.context, request.to_context());
    }

    #[test]
    fn detail_uses_api_key_parameter() {
        let mut catalog = catalog(Credentials::ApiKey("k3y".to_string()));
        let request = CatalogRequest::detail(2, MovieId(27205));

        catalog.dispatch(&request).unwrap();

        let call = &catalog.transport().calls[0];
        let url = Url::parse(&call.url).unwrap();
        assert_eq!(url.path(), "/3/movie/27205");
        assert!(url.query_pairs().any(|(k, v)| k == "api_key" && v == "k3y"));
        assert!(!call.headers.contains_key("Authorization"));
    }

    #[test]
    fn missing_credentials_fail_without_sending() {
        let mut catalog = catalog(Credentials::Missing);
        let result = catalog.dispatch(&CatalogRequest::search(1, "alien"));

        assert!(matches!(result, Err(CatalogError::Api { status: 401, .. })));
        assert!(catalog.transport().calls.is_empty());
    }

    #[test]
    fn invalid_api_base_is_reported_as_failure() {
        let mut catalog = TmdbCatalog::new(
            TmdbSettings {
                api_base: "not a url".to_string(),
                credentials: Credentials::BearerToken("tok".to_string()),
                ..TmdbSettings::default()
            },
            RecordingTransport::default(),
        );

        assert!(catalog.dispatch(&CatalogRequest::search(1, "alien")).is_err());
        assert!(catalog.transport().calls.is_empty());
    }

    #[test]
    fn redact_masks_api_key() {
        let redacted = redact("https://api.themoviedb.org/3/movie/1?api_key=secret&language=en-US");
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("language=en-US"));
    }
}
