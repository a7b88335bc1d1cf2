//! Regex-based symbol extraction from a source file — the item-source
//! collaborator behind the terminal host.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::model::{Catalog, EntryKind};
use crate::session::ItemSource;

/// A line in the opened document, 1-based. The navigation target carried
/// by every extracted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
}

/// Error type for reading the document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Extracts symbol-definition entries from a document, line by line.
///
/// The patterns cover the definition forms of a handful of common
/// languages plus Markdown headings; a line that matches none of them
/// simply contributes no entry. This is deliberately ctags-lite: the
/// panel ranks whatever it is given, it does not parse.
#[derive(Debug)]
pub struct SymbolSource {
    lines: Vec<String>,
    patterns: Vec<Regex>,
}

impl SymbolSource {
    pub fn from_file(path: &Path) -> Result<SymbolSource, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|e| SourceError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(SymbolSource::from_text(&text))
    }

    pub fn from_text(text: &str) -> SymbolSource {
        SymbolSource {
            lines: text.lines().map(str::to_string).collect(),
            patterns: definition_patterns(),
        }
    }

    /// The document's lines, for the host's preview pane.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ItemSource<Location> for SymbolSource {
    fn populate(&mut self, catalog: &mut Catalog<Location>) {
        for (at, line) in self.lines.iter().enumerate() {
            for pattern in &self.patterns {
                if let Some(caps) = pattern.captures(line) {
                    let label = caps.get(1).map_or("", |m| m.as_str());
                    // Empty captures are dropped by the catalog; the rest
                    // of the file still populates
                    catalog.push(label.trim(), EntryKind::TAG, Location { line: at + 1 });
                    break;
                }
            }
        }
    }
}

/// One pattern per definition form; group 1 is the symbol name. First
/// match wins per line.
fn definition_patterns() -> Vec<Regex> {
    [
        // Rust items
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+([A-Za-z_][A-Za-z0-9_]*)",
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait|union|mod)\s+([A-Za-z_][A-Za-z0-9_]*)",
        // Python
        r"^\s*(?:def|class)\s+([A-Za-z_][A-Za-z0-9_]*)",
        // JavaScript-style functions
        r"^\s*(?:export\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][A-Za-z0-9_$]*)",
        // Markdown headings
        r"^#{1,6}\s+(.+?)\s*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("definition pattern is valid"))
    .collect()
}
