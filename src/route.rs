//! Screen routes and navigation history.
//!
//! Paths keep their web-style shape so they can be passed on the command line
//! (`tb ui --route /task/new?column=doing`). Anything unrecognised resolves to
//! `Route::NotFound`.

use std::fmt;

use crate::fields::ColumnId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Board when signed in, landing page otherwise.
    Home,
    Settings,
    Chat,
    Boards,
    NewTask { column: Option<ColumnId> },
    EditTask { id: String },
    NotFound(String),
}

impl Route {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, query) = match raw.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (raw, None),
        };
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["settings"] => Route::Settings,
            ["chat"] => Route::Chat,
            ["boards"] => Route::Boards,
            ["task", "new"] => Route::NewTask {
                column: query.and_then(|q| query_param(q, "column")).and_then(|c| c.parse().ok()),
            },
            ["task", "edit", id] => Route::EditTask { id: id.to_string() },
            _ => Route::NotFound(raw.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Chat => "/chat".to_string(),
            Route::Boards => "/boards".to_string(),
            Route::NewTask { column: Some(c) } => format!("/task/new?column={c}"),
            Route::NewTask { column: None } => "/task/new".to_string(),
            Route::EditTask { id } => format!("/task/edit/{id}"),
            Route::NotFound(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// Browser-like history: navigate pushes, back pops.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Router { stack: vec![Route::Home] }
    }
}

impl Router {
    pub fn current(&self) -> &Route {
        // The stack is never empty: the root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.current(), to = %route, "navigate");
        self.stack.push(route);
    }

    /// Go back one entry. At the root this stays put and returns `false`.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            tracing::debug!(to = %self.current(), "navigate back");
            true
        } else {
            false
        }
    }

    /// Return to the root.
    pub fn reset(&mut self) {
        self.stack.truncate(1);
        self.stack[0] = Route::Home;
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/settings"), Route::Settings);
        assert_eq!(Route::parse("/chat/"), Route::Chat);
        assert_eq!(
            Route::parse("/task/new?column=doing"),
            Route::NewTask { column: Some(ColumnId::Doing) }
        );
        assert_eq!(Route::parse("/task/new?column=later"), Route::NewTask { column: None });
        assert_eq!(Route::parse("/task/edit/abc"), Route::EditTask { id: "abc".to_string() });
        assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".to_string()));
        assert_eq!(Route::parse("/task/edit"), Route::NotFound("/task/edit".to_string()));
    }

    #[test]
    fn test_path_round_trips_for_new_task() {
        let route = Route::NewTask { column: Some(ColumnId::Done) };
        assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn test_back_stops_at_root() {
        let mut router = Router::default();
        router.navigate(Route::Chat);
        router.navigate(Route::Settings);
        assert!(router.back());
        assert_eq!(router.current(), &Route::Chat);
        assert!(router.back());
        assert!(!router.back());
        assert_eq!(router.current(), &Route::Home);
    }
}
