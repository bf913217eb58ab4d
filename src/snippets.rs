use crate::settings::SnippetSettings;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

pub const SNIPPETS_FILE: &str = "snippets.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Snippet {
    pub name: String,
    pub code: String,
}

impl From<&SnippetSettings> for Snippet {
    fn from(s: &SnippetSettings) -> Self {
        Self {
            name: s.name.clone(),
            code: s.code.clone(),
        }
    }
}

/// Load all snippets from the JSON file at `path`.
pub fn load_snippets(path: &str) -> anyhow::Result<Vec<Snippet>> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let list: Vec<Snippet> = serde_json::from_str(&content)?;
    Ok(list)
}

/// Persist `snippets` to `path`.
pub fn save_snippets(path: &str, snippets: &[Snippet]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snippets)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub struct SnippetStore {
    snippets: Vec<Snippet>,
    matcher: SkimMatcherV2,
}

impl SnippetStore {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self {
            snippets,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn from_settings(settings: &[SnippetSettings]) -> Self {
        Self::new(settings.iter().map(Snippet::from).collect())
    }

    pub fn all(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn first(&self) -> Option<&Snippet> {
        self.snippets.first()
    }

    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.name == name)
    }

    /// Add a snippet unless one with the same name already exists.
    pub fn add(&mut self, snippet: Snippet) -> bool {
        if self.get(&snippet.name).is_some() {
            return false;
        }
        self.snippets.push(snippet);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.snippets.iter().position(|s| s.name == name) {
            Some(pos) => {
                self.snippets.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Fuzzy search over snippet names and bodies, best match first. An empty
    /// query returns every snippet in stored order.
    pub fn search(&self, query: &str) -> Vec<&Snippet> {
        let filter = query.trim();
        if filter.is_empty() {
            return self.snippets.iter().collect();
        }
        let mut scored: Vec<(i64, usize, &Snippet)> = self
            .snippets
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let name = self.matcher.fuzzy_match(&s.name, filter);
                let code = self.matcher.fuzzy_match(&s.code, filter);
                name.max(code).map(|score| (score, i, s))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, s)| s).collect()
    }
}

impl Default for SnippetStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
