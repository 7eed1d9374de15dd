//! Segment-based route matching.
//!
//! - Split paths by '/' into segments
//! - Match literal segments exactly
//! - Extract `:param` segments into [`RouteParams`]
//! - Anything no route claims resolves to [`Page::NotFound`]

use crate::params::RouteParams;

/// The page a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Cart assembly view with search box and product grid
    Cart,
    /// Fallback for unmatched paths, including the error route
    NotFound,
}

/// A registered route pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Pattern such as `/` or `/cart/:id`
    pub path: String,
    /// Page rendered when the pattern matches
    pub page: Page,
}

impl Route {
    /// Create a route for the given pattern.
    pub fn new(path: impl Into<String>, page: Page) -> Self {
        Self {
            path: path.into(),
            page,
        }
    }
}

/// Result of resolving a path against the route table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// Resolved page
    pub page: Page,
    /// Pattern that matched, `None` for the fallback
    pub pattern: Option<String>,
    /// Extracted route parameters
    pub params: RouteParams,
}

impl RouteMatch {
    fn not_found() -> Self {
        Self {
            page: Page::NotFound,
            pattern: None,
            params: RouteParams::new(),
        }
    }
}

/// Match a path against a route pattern, extracting parameters.
///
/// Unlike prefix matching, every segment must be consumed: `/cart/1/extra`
/// does not match `/cart/:id`.
///
/// ```ignore
/// let params = match_path("/cart/5", "/cart/:id").unwrap();
/// assert_eq!(params.get("id"), Some(&"5".to_string()));
/// ```
pub fn match_path(path: &str, pattern: &str) -> Option<RouteParams> {
    let path_segments = split_path(path);
    let route_segments = split_path(pattern);

    if path_segments.len() != route_segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (route_seg, path_seg) in route_segments.iter().zip(path_segments.iter()) {
        if let Some(param_name) = route_seg.strip_prefix(':') {
            params.insert(param_name.to_string(), path_seg.clone());
        } else if route_seg != path_seg {
            return None;
        }
    }

    Some(params)
}

/// Split a path into segments, filtering empty segments
///
/// ```ignore
/// assert_eq!(split_path("/cart/123"), vec!["cart", "123"]);
/// assert_eq!(split_path("/"), Vec::<String>::new());
/// ```
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve a path against routes in registration order; the first match wins.
pub fn resolve(routes: &[Route], path: &str) -> RouteMatch {
    routes
        .iter()
        .find_map(|route| {
            match_path(path, &route.path).map(|params| RouteMatch {
                page: route.page,
                pattern: Some(route.path.clone()),
                params,
            })
        })
        .unwrap_or_else(RouteMatch::not_found)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_routes() -> Vec<Route> {
        vec![Route::new("/", Page::Cart), Route::new("/cart/:id", Page::Cart)]
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/cart/123"), vec!["cart", "123"]);
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
        assert_eq!(split_path("/cart/"), vec!["cart"]);
    }

    #[test]
    fn test_match_root() {
        assert!(match_path("/", "/").is_some());
        assert!(match_path("", "/").is_some());
        assert!(match_path("/cart", "/").is_none());
    }

    #[test]
    fn test_match_param() {
        let params = match_path("/cart/42", "/cart/:id").unwrap();
        assert_eq!(params.get("id"), Some(&"42".to_string()));
    }

    #[test]
    fn test_match_requires_full_path() {
        assert!(match_path("/cart/42/items", "/cart/:id").is_none());
        assert!(match_path("/cart", "/cart/:id").is_none());
    }

    #[test]
    fn test_resolve_cart_routes() {
        let routes = cart_routes();

        let home = resolve(&routes, "/");
        assert_eq!(home.page, Page::Cart);
        assert!(home.params.is_empty());

        let cart = resolve(&routes, "/cart/5");
        assert_eq!(cart.page, Page::Cart);
        assert_eq!(cart.pattern.as_deref(), Some("/cart/:id"));
        assert_eq!(cart.params.get_as::<i64>("id"), Some(5));
    }

    #[test]
    fn test_resolve_unmatched_falls_back() {
        let routes = cart_routes();
        let error = resolve(&routes, "/error");
        assert_eq!(error.page, Page::NotFound);
        assert!(error.pattern.is_none());

        assert_eq!(resolve(&routes, "/test").page, Page::NotFound);
    }
}
