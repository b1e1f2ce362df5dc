use crate::error::NoclipError;

/// Read/replace access to the user-visible location.
pub trait LocationHistory {
    /// Current path, e.g. `/noclip/acme.map1@1.000,2.000,3.000`.
    fn path(&self) -> String;

    /// Current query string including its leading `?`, or empty.
    fn query(&self) -> String;

    /// Replace the current entry with `url` (path plus query) without
    /// navigating.
    ///
    /// # Errors
    ///
    /// Host-specific failure to rewrite the location.
    fn replace(&mut self, url: &str) -> Result<(), NoclipError>;
}

/// In-process history holding a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    path: String,
    query: String,
    writes: usize,
}

impl MemoryHistory {
    /// Start at `url`; anything from the first `?` on is the query.
    #[must_use]
    pub fn new(url: &str) -> Self {
        let (path, query) = split_url(url);
        Self {
            path: path.to_owned(),
            query: query.to_owned(),
            writes: 0,
        }
    }

    /// Full current URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.path, self.query)
    }

    /// Number of successful [`LocationHistory::replace`] calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

/// Split a URL into path and query (query keeps its `?`).
#[must_use]
pub fn split_url(url: &str) -> (&str, &str) {
    url.find('?').map_or((url, ""), |i| url.split_at(i))
}

impl LocationHistory for MemoryHistory {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace(&mut self, url: &str) -> Result<(), NoclipError> {
        let (path, query) = split_url(url);
        path.clone_into(&mut self.path);
        query.clone_into(&mut self.query);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_query_from_path() {
        assert_eq!(split_url("/a/b?x=1&y"), ("/a/b", "?x=1&y"));
        assert_eq!(split_url("/a/b"), ("/a/b", ""));
    }

    #[test]
    fn replace_updates_both_parts() {
        let mut history = MemoryHistory::new("/noclip/acme.map1?debug");
        history.replace("/noclip/acme.map2").unwrap();
        assert_eq!(history.path(), "/noclip/acme.map2");
        assert_eq!(history.query(), "");
        assert_eq!(history.writes(), 1);
    }
}
