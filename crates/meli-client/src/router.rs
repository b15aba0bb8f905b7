//! Route templates and URL construction.
//!
//! Every URL the client sends is produced here from a [`Route`], an ordered
//! list of identifiers and a set of query parameters.

use serde::Serialize;

use crate::error::{Error, ErrorKind, Result};

const PLACEHOLDER: &str = "{}";

/// API endpoints addressed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/oauth/token`
    OAuthToken,
    /// `/items/{item_id}`
    Items,
    /// `/items/{item_id}/variations/{variation_id}`
    Variations,
    /// `/categories/{category_id}/attributes`
    CategoryAttributes,
    /// `/sites/{site_id}/categories/category_predictor/predict`
    CategoryPredictor,
    /// `/users/{user_id}`
    Users,
    /// `/users/{user_id}/items/search`
    UserItemsSearch,
}

impl Route {
    /// Path template with `{}` placeholders.
    pub const fn template(self) -> &'static str {
        match self {
            Route::OAuthToken => "/oauth/token",
            Route::Items => "/items/{}",
            Route::Variations => "/items/{}/variations/{}",
            Route::CategoryAttributes => "/categories/{}/attributes",
            Route::CategoryPredictor => "/sites/{}/categories/category_predictor/predict",
            Route::Users => "/users/{}",
            Route::UserItemsSearch => "/users/{}/items/search",
        }
    }

    /// Short name used in errors and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Route::OAuthToken => "oauth_token",
            Route::Items => "items",
            Route::Variations => "variations",
            Route::CategoryAttributes => "category_attributes",
            Route::CategoryPredictor => "category_predictor",
            Route::Users => "users",
            Route::UserItemsSearch => "user_items_search",
        }
    }

    /// Number of identifier slots in the template.
    pub fn placeholders(self) -> usize {
        self.template().matches(PLACEHOLDER).count()
    }
}

/// Resolves routes against a fixed origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    origin: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(crate::API_ORIGIN)
    }
}

impl Router {
    /// Create a router for the given origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    /// The origin URLs are resolved against.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The part of `url` following this router's origin.
    ///
    /// Returns `None` for URLs that were not built against this origin.
    pub fn strip_origin<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.origin.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with(['/', '?']))
    }

    /// Substitute `ids` into the route template.
    ///
    /// Ids are percent-encoded and consumed in order. With fewer ids than
    /// placeholders the template is cut at the first unused placeholder and
    /// the trailing `/` is dropped, so `Route::Items` with no ids is `/items`.
    pub fn path(&self, route: Route, ids: &[&str]) -> Result<String> {
        let slots = route.placeholders();
        if ids.len() > slots {
            return Err(Error::new(ErrorKind::RouteArity {
                route: route.name(),
                expected: slots,
                given: ids.len(),
            }));
        }

        let mut pieces = route.template().split(PLACEHOLDER);
        let mut path = pieces.next().unwrap_or_default().to_string();
        for (id, rest) in ids.iter().zip(pieces) {
            path.push_str(&urlencoding::encode(id));
            path.push_str(rest);
        }

        if ids.len() < slots {
            let trimmed = path.trim_end_matches('/').len();
            path.truncate(trimmed);
        }

        Ok(path)
    }

    /// Build the absolute URL for a route, ids and query parameters.
    ///
    /// The query string is omitted when `params` serializes to nothing.
    pub fn route_to<P: Serialize + ?Sized>(
        &self,
        route: Route,
        ids: &[&str],
        params: &P,
    ) -> Result<String> {
        let path = self.path(route, ids)?;
        let query = serde_urlencoded::to_string(params)?;

        if query.is_empty() {
            Ok(format!("{}{}", self.origin, path))
        } else {
            Ok(format!("{}{}?{}", self.origin, path, query))
        }
    }
}
