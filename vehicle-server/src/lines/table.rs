//! Loadable line table.

use std::path::Path;

use serde::Deserialize;

use super::error::LineTableError;
use super::names::NameMapping;

/// The table shipped with the server.
const BUILTIN_TABLE: &str = include_str!("../../data/lines.json");

/// On-disk shape of the line table.
#[derive(Debug, Deserialize)]
struct LineTableFile {
    trolley_prefix: String,
    subway_lines: Vec<String>,
    rail_lines: Vec<RailLineEntry>,
}

/// One regional rail line.
#[derive(Debug, Deserialize)]
struct RailLineEntry {
    /// Name the application (and its callers) use.
    name: String,
    /// Name the rail feed uses; the same as `name` when omitted.
    upstream: Option<String>,
}

/// Static knowledge about route naming.
///
/// Holds the known rail line names (with their upstream translations), the
/// subway line codes and the trolley prefix. Tables are validated when they
/// are loaded, so a `LineTable` always has a consistent name mapping.
#[derive(Debug, Clone)]
pub struct LineTable {
    pub(super) trolley_prefix: char,
    pub(super) subway_lines: Vec<String>,
    pub(super) rail_names: NameMapping,
}

impl LineTable {
    /// Load the table compiled into the binary.
    pub fn builtin() -> Result<Self, LineTableError> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LineTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LineTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a table from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LineTableError> {
        let file: LineTableFile = serde_json::from_str(json)?;

        let mut prefix_chars = file.trolley_prefix.chars();
        let trolley_prefix = match (prefix_chars.next(), prefix_chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c,
            _ => return Err(LineTableError::InvalidPrefix(file.trolley_prefix)),
        };

        let rail_names = NameMapping::from_pairs(file.rail_lines.into_iter().map(|entry| {
            let upstream = entry.upstream.unwrap_or_else(|| entry.name.clone());
            (entry.name, upstream)
        }))?;

        let mut subway_lines: Vec<String> = Vec::with_capacity(file.subway_lines.len());
        for code in file.subway_lines {
            if subway_lines.iter().any(|c| c.eq_ignore_ascii_case(&code))
                || rail_names.pairs().any(|(name, _)| name.eq_ignore_ascii_case(&code))
            {
                return Err(LineTableError::DuplicateName(code));
            }
            subway_lines.push(code);
        }

        Ok(Self {
            trolley_prefix,
            subway_lines,
            rail_names,
        })
    }

    /// Rail line name translation.
    pub fn rail_names(&self) -> &NameMapping {
        &self.rail_names
    }

    /// The reserved trolley prefix.
    pub fn trolley_prefix(&self) -> char {
        self.trolley_prefix
    }

    /// Known subway line codes.
    pub fn subway_lines(&self) -> &[String] {
        &self.subway_lines
    }
}
