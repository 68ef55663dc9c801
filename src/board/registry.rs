use crate::config::BoardEntry;
use crate::HarvestError;
use std::collections::BTreeMap;

/// Site root every board path is resolved against
pub const DEFAULT_DOMAIN: &str = "https://www.ptt.cc";

/// Boards known without any configuration: (display name, URL path)
pub const BUILTIN_BOARDS: &[(&str, &str)] = &[("八卦", "Gossiping"), ("表特", "Beauty")];

/// A resolved board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    name: String,
    path: String,
    domain: String,
}

impl Board {
    /// Display name, as the user typed it
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path segment under `/bbs/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Site root without a trailing slash
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// URL of the newest index page
    ///
    /// # Examples
    ///
    /// ```
    /// use ptt_harvest::board::BoardRegistry;
    ///
    /// let board = BoardRegistry::builtin().resolve("八卦").unwrap();
    /// assert_eq!(board.index_url(), "https://www.ptt.cc/bbs/Gossiping/index.html");
    /// ```
    pub fn index_url(&self) -> String {
        format!("{}/bbs/{}/index.html", self.domain, self.path)
    }
}

/// Immutable board name → path table
#[derive(Debug, Clone)]
pub struct BoardRegistry {
    domain: String,
    boards: BTreeMap<String, String>,
}

impl BoardRegistry {
    /// Registry holding only the built-in boards on the default domain
    pub fn builtin() -> Self {
        Self::new(DEFAULT_DOMAIN, &[])
    }

    /// Builds the registry from the built-in table plus configured extras
    ///
    /// Extra entries with a name already present replace the built-in path.
    pub fn new(domain: &str, extra: &[BoardEntry]) -> Self {
        let mut boards: BTreeMap<String, String> = BUILTIN_BOARDS
            .iter()
            .map(|(name, path)| (name.to_string(), path.to_string()))
            .collect();

        for entry in extra {
            boards.insert(entry.name.clone(), entry.path.clone());
        }

        Self {
            domain: domain.trim_end_matches('/').to_string(),
            boards,
        }
    }

    /// Looks up a board by display name
    ///
    /// # Returns
    ///
    /// * `Ok(Board)` - The board with its domain attached
    /// * `Err(HarvestError::UnknownBoard)` - The name is not in the table
    pub fn resolve(&self, name: &str) -> Result<Board, HarvestError> {
        let path = self
            .boards
            .get(name)
            .ok_or_else(|| HarvestError::UnknownBoard {
                name: name.to_string(),
            })?;

        Ok(Board {
            name: name.to_string(),
            path: path.clone(),
            domain: self.domain.clone(),
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// All (name, path) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.boards.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl Default for BoardRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
