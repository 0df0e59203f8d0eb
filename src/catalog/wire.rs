//! TMDB JSON payloads and reply decoding.
//!
//! Only the fields the plugin shows are modelled; everything else in the
//! payload is ignored by serde.

use super::request::{CatalogReply, CatalogRequest};
use crate::domain::{
    CatalogError, DetailRecord, MovieId, PosterRef, ReleaseYear, Result, ResultItem,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Status the Zellij host reports when the HTTP call itself failed.
const HOST_TRANSPORT_FAILURE_STATUS: u16 = 400;

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<MovieSummary>,
}

#[derive(Debug, Deserialize)]
struct MovieSummary {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MovieDetail {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status_message: String,
}

fn poster(path: Option<String>) -> Option<PosterRef> {
    path.filter(|p| !p.trim().is_empty()).map(PosterRef)
}

impl From<MovieSummary> for ResultItem {
    fn from(movie: MovieSummary) -> Self {
        Self {
            id: MovieId(movie.id),
            year: ReleaseYear::from_release_date(movie.release_date.as_deref()),
            title: movie.title,
            poster: poster(movie.poster_path),
        }
    }
}

impl From<MovieDetail> for DetailRecord {
    fn from(movie: MovieDetail) -> Self {
        Self {
            id: MovieId(movie.id),
            year: ReleaseYear::from_release_date(movie.release_date.as_deref()),
            title: movie.title,
            poster: poster(movie.poster_path),
            overview: movie.overview.unwrap_or_default(),
            rating: movie.vote_average,
            runtime: movie.runtime,
        }
    }
}

/// Classifies a non-success reply.
///
/// TMDB errors carry a JSON `status_message`. Bodies that are not TMDB JSON
/// on the host's transport-failure status are the host's own error text.
fn failure(status: u16, body: &[u8]) -> CatalogError {
    if let Ok(parsed) = serde_json::from_slice::<StatusBody>(body) {
        return CatalogError::Api { status, message: parsed.status_message };
    }

    if status == HOST_TRANSPORT_FAILURE_STATUS {
        return CatalogError::Network(String::from_utf8_lossy(body).trim().to_string());
    }

    CatalogError::Api { status, message: String::new() }
}

fn decode<T, U>(status: u16, body: &[u8]) -> std::result::Result<U, CatalogError>
where
    T: for<'de> Deserialize<'de>,
    U: From<T>,
{
    if !(200..300).contains(&status) {
        return Err(failure(status, body));
    }

    serde_json::from_slice::<T>(body)
        .map(U::from)
        .map_err(|e| CatalogError::Malformed(e.to_string()))
}

/// Decodes a host HTTP reply into a [`CatalogReply`].
///
/// The request identity is restored from `context`; the body is decoded
/// according to the request's lineage. Catalog failures become the reply's
/// `Err` outcome rather than an `Err` of this function.
///
/// # Errors
///
/// Returns [`crate::CinefindError::Encode`] when `context` does not belong
/// to a cinefind request.
pub fn decode_reply(
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Result<CatalogReply> {
    let request = CatalogRequest::from_context(context)?;

    let reply = match request {
        CatalogRequest::Search { ticket, query, trace_context } => CatalogReply::Search {
            ticket,
            query,
            outcome: decode::<SearchPage, SearchResults>(status, body).map(|r| r.0),
            trace_context,
        },
        CatalogRequest::Detail { ticket, id, trace_context } => CatalogReply::Detail {
            ticket,
            id,
            outcome: decode::<MovieDetail, DetailRecord>(status, body),
            trace_context,
        },
    };

    Ok(reply)
}

struct SearchResults(Vec<ResultItem>);

impl From<SearchPage> for SearchResults {
    fn from(page: SearchPage) -> Self {
        Self(page.results.into_iter().map(ResultItem::from).collect())
    }
}
