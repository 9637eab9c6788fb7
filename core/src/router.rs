//! Path routing and push-state style navigation history.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    ShowVehicle(String),
}

pub struct Router;

impl Router {
    /// Matches `""` and `vehicle/:id`. Leading and trailing slashes, the
    /// query string and the fragment are ignored.
    pub fn recognize(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(Route::Index);
        }
        let mut segments = path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("vehicle"), Some(id), None) if !id.is_empty() => {
                Some(Route::ShowVehicle(id.to_string()))
            }
            _ => None,
        }
    }

    pub fn path_for(route: &Route) -> String {
        match route {
            Route::Index => "/".to_string(),
            Route::ShowVehicle(id) => format!("/vehicle/{id}"),
        }
    }
}

/// Navigation entries with a cursor, like the browser session history.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    position: usize,
}

impl History {
    pub fn start(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial)],
            position: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.position]
    }

    /// Pushes a new entry, discarding anything forward of the cursor.
    /// Returns `false` when `path` is already the current entry.
    pub fn push(&mut self, path: &str) -> bool {
        let path = normalize(path);
        if path == self.current() {
            return false;
        }
        self.entries.truncate(self.position + 1);
        self.entries.push(path);
        self.position += 1;
        true
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.position + 1 >= self.entries.len() {
            return None;
        }
        self.position += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_index_and_vehicle_routes() {
        assert_eq!(Router::recognize(""), Some(Route::Index));
        assert_eq!(Router::recognize("/"), Some(Route::Index));
        assert_eq!(
            Router::recognize("vehicle/2"),
            Some(Route::ShowVehicle("2".into()))
        );
        assert_eq!(
            Router::recognize("/vehicle/lrv-7/?tab=power#top"),
            Some(Route::ShowVehicle("lrv-7".into()))
        );
    }

    #[test]
    fn unmatched_paths_are_none() {
        assert_eq!(Router::recognize("vehicle"), None);
        assert_eq!(Router::recognize("vehicle//"), None);
        assert_eq!(Router::recognize("vehicle/2/extra"), None);
        assert_eq!(Router::recognize("rovers/2"), None);
    }

    #[test]
    fn path_for_round_trips_through_recognize() {
        let route = Route::ShowVehicle("9".into());
        assert_eq!(Router::recognize(&Router::path_for(&route)), Some(route));
    }

    #[test]
    fn history_push_back_forward() {
        let mut history = History::start("/");
        assert!(history.push("vehicle/1"));
        assert!(!history.push("/vehicle/1"));
        assert!(history.push("/vehicle/2"));
        assert_eq!(history.back(), Some("/vehicle/1"));
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("/vehicle/1"));

        history.push("/vehicle/3");
        assert_eq!(history.forward(), None);
        assert_eq!(history.len(), 3);
    }
}
