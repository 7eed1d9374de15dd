//! Router state management

use crate::matching::{resolve, Route, RouteMatch};

/// Direction of a completed navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// New entry pushed, or history moved forward
    Forward,
    /// History moved back
    Back,
}

/// Emitted by [`RouterState`] whenever the current path changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    pub from: Option<String>,
    pub to: String,
    pub direction: NavigationDirection,
}

/// Router state
#[derive(Debug, Clone)]
pub struct RouterState {
    /// Navigation history stack
    history: Vec<String>,
    /// Current position in history
    current: usize,
    /// Registered routes
    routes: Vec<Route>,
}

impl RouterState {
    /// Create a new router state positioned at `/`
    pub fn new() -> Self {
        Self {
            history: vec!["/".to_string()],
            current: 0,
            routes: Vec::new(),
        }
    }

    /// Register a route
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Get current path
    pub fn current_path(&self) -> &str {
        &self.history[self.current]
    }

    /// Resolve the current path against the registered routes
    pub fn current_match(&self) -> RouteMatch {
        resolve(&self.routes, self.current_path())
    }

    /// Navigate to a new path
    pub fn push(&mut self, path: String) -> RouteChangeEvent {
        let from = Some(self.current_path().to_string());

        // Remove forward history when pushing
        self.history.truncate(self.current + 1);
        self.history.push(path.clone());
        self.current += 1;

        RouteChangeEvent {
            from,
            to: path,
            direction: NavigationDirection::Forward,
        }
    }

    /// Go back in history
    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        if self.current > 0 {
            let from = Some(self.current_path().to_string());
            self.current -= 1;

            Some(RouteChangeEvent {
                from,
                to: self.current_path().to_string(),
                direction: NavigationDirection::Back,
            })
        } else {
            None
        }
    }

    /// Go forward in history
    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        if self.current + 1 < self.history.len() {
            let from = Some(self.current_path().to_string());
            self.current += 1;

            Some(RouteChangeEvent {
                from,
                to: self.current_path().to_string(),
                direction: NavigationDirection::Forward,
            })
        } else {
            None
        }
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.history.len()
    }

    /// Peek at the path we would navigate to on `back()`, without actually navigating.
    pub fn peek_back_path(&self) -> Option<&str> {
        self.current
            .checked_sub(1)
            .map(|index| self.history[index].as_str())
    }

    /// Peek at the path we would navigate to on `forward()`, without actually navigating.
    pub fn peek_forward_path(&self) -> Option<&str> {
        self.history.get(self.current + 1).map(String::as_str)
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Page;

    #[test]
    fn test_navigation() {
        let mut state = RouterState::new();
        assert_eq!(state.current_path(), "/");

        state.push("/cart/5".to_string());
        assert_eq!(state.current_path(), "/cart/5");

        state.push("/cart/6".to_string());
        assert_eq!(state.current_path(), "/cart/6");

        let event = state.back().unwrap();
        assert_eq!(event.direction, NavigationDirection::Back);
        assert_eq!(state.current_path(), "/cart/5");

        state.forward();
        assert_eq!(state.current_path(), "/cart/6");
    }

    #[test]
    fn test_push_truncates_forward_history() {
        let mut state = RouterState::new();
        state.push("/cart/1".to_string());
        state.push("/cart/2".to_string());
        state.back();
        state.push("/cart/3".to_string());

        assert!(!state.can_go_forward());
        assert_eq!(state.peek_back_path(), Some("/cart/1"));
    }

    #[test]
    fn test_history_boundaries() {
        let mut state = RouterState::new();
        assert!(state.back().is_none());
        assert!(state.forward().is_none());
        assert_eq!(state.peek_back_path(), None);
        assert_eq!(state.peek_forward_path(), None);
    }

    #[test]
    fn test_current_match() {
        let mut state = RouterState::new();
        state.add_route(Route::new("/cart/:id", Page::Cart));
        state.push("/cart/9".to_string());

        let matched = state.current_match();
        assert_eq!(matched.page, Page::Cart);
        assert_eq!(matched.params.get_as::<i64>("id"), Some(9));
    }
}
