use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

/// Query parameters for search requests
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// City name from query string
    pub city: Option<String>,
}

/// Extracts the submitted city from either path parameter or query parameter
///
/// Checks path first, then falls back to query parameter.
/// Missing input extracts as an empty string so the presenter can reject it.
#[derive(Debug)]
pub struct CityParam(pub String);

impl CityParam {
    /// Get the city value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<S> FromRequestParts<S> for CityParam
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Try to extract city from path first
        if let Ok(Path(city)) = Path::<String>::from_request_parts(parts, state).await {
            if !city.is_empty() {
                return Ok(CityParam(city));
            }
        }

        // Fall back to query parameter
        if let Ok(Query(query)) = Query::<SearchQuery>::from_request_parts(parts, state).await {
            return Ok(CityParam(query.city.unwrap_or_default()));
        }

        Ok(CityParam(String::new()))
    }
}
