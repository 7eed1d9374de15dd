//! Route parameter extraction.
//!
//! [`RouteParams`] holds the values captured from dynamic segments of a
//! route pattern, e.g. `:id` in `/cart/:id`.
//!
//! ```
//! use gpui_cart::RouteParams;
//!
//! let params = RouteParams::from_path("/cart/5", "/cart/:id");
//! assert_eq!(params.get("id"), Some(&"5".to_string()));
//! assert_eq!(params.get_as::<i64>("id"), Some(5));
//! ```

use std::collections::HashMap;

/// Route parameters extracted from path segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Extract route parameters from a path given a pattern
    ///
    /// `:name` segments capture the corresponding path segment, literal
    /// segments must match exactly. A path that does not fit the pattern
    /// yields empty params.
    ///
    /// ```
    /// use gpui_cart::RouteParams;
    ///
    /// let params = RouteParams::from_path("/products/xyz", "/cart/:id");
    /// assert!(params.is_empty());
    /// ```
    pub fn from_path(path: &str, pattern: &str) -> RouteParams {
        let mut params = RouteParams::new();

        let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();

        if path_segments.len() != pattern_segments.len() {
            return params;
        }

        for (path_seg, pattern_seg) in path_segments.iter().zip(pattern_segments.iter()) {
            if let Some(param_name) = pattern_seg.strip_prefix(':') {
                params.insert(param_name.to_string(), (*path_seg).to_string());
            } else if pattern_seg != path_seg {
                return RouteParams::new();
            }
        }

        params
    }
}

// ============================================================================
// Tests
// ============================================================================
