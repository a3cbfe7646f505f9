//! Rail line name translation.

use std::collections::HashMap;

use super::error::LineTableError;

/// Bidirectional mapping between application rail line names and the names
/// the rail feed uses.
///
/// Every known line has exactly one entry in each direction, so the two
/// tables are inverses of each other. Lookups are case-insensitive and fall
/// back to the identity for names the table does not know.
#[derive(Debug, Clone, Default)]
pub struct NameMapping {
    /// `(app name, upstream name)` in table order.
    lines: Vec<(String, String)>,
    /// Lowercased app name → upstream name.
    to_upstream: HashMap<String, String>,
    /// Lowercased upstream name → app name.
    to_app: HashMap<String, String>,
}

impl NameMapping {
    /// Build the mapping from `(app name, upstream name)` pairs.
    ///
    /// Fails if either side repeats (ignoring case), since that would leave
    /// one direction with no inverse.
    pub fn from_pairs<I, A, U>(pairs: I) -> Result<Self, LineTableError>
    where
        I: IntoIterator<Item = (A, U)>,
        A: Into<String>,
        U: Into<String>,
    {
        let mut mapping = Self::default();

        for (app, upstream) in pairs {
            let app = app.into();
            let upstream = upstream.into();

            let app_key = app.to_lowercase();
            if mapping.to_upstream.contains_key(&app_key) {
                return Err(LineTableError::DuplicateName(app));
            }

            let upstream_key = upstream.to_lowercase();
            if let Some(first) = mapping.to_app.get(&upstream_key) {
                return Err(LineTableError::DuplicateUpstream {
                    upstream,
                    first: first.clone(),
                    second: app,
                });
            }

            mapping.to_upstream.insert(app_key, upstream.clone());
            mapping.to_app.insert(upstream_key, app.clone());
            mapping.lines.push((app, upstream));
        }

        Ok(mapping)
    }

    /// Translate an application line name to the rail feed's name.
    pub fn to_upstream_name<'a>(&'a self, app_name: &'a str) -> &'a str {
        self.to_upstream
            .get(&app_name.to_lowercase())
            .map(String::as_str)
            .unwrap_or(app_name)
    }

    /// Translate a rail feed line name to the application's name.
    pub fn to_app_name<'a>(&'a self, upstream_name: &'a str) -> &'a str {
        self.to_app
            .get(&upstream_name.to_lowercase())
            .map(String::as_str)
            .unwrap_or(upstream_name)
    }

    /// Iterate over `(app name, upstream name)` pairs in table order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines
            .iter()
            .map(|(app, upstream)| (app.as_str(), upstream.as_str()))
    }

    /// Number of lines in the mapping.
    pub fn len(&self) -> usize {
        self.to_upstream.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_upstream.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> NameMapping {
        NameMapping::from_pairs([
            ("Airport Line", "Airport"),
            ("Norristown", "Manayunk/Norristown"),
            ("Cynwyd", "Cynwyd"),
        ])
        .unwrap()
    }

    #[test]
    fn translates_both_directions() {
        let m = mapping();
        assert_eq!(m.to_upstream_name("Airport Line"), "Airport");
        assert_eq!(m.to_app_name("Airport"), "Airport Line");
        assert_eq!(m.to_upstream_name("Norristown"), "Manayunk/Norristown");
        assert_eq!(m.to_app_name("Manayunk/Norristown"), "Norristown");
    }

    #[test]
    fn lookups_ignore_case() {
        let m = mapping();
        assert_eq!(m.to_upstream_name("airport line"), "Airport");
        assert_eq!(m.to_app_name("MANAYUNK/NORRISTOWN"), "Norristown");
    }

    #[test]
    fn unknown_names_pass_through() {
        let m = mapping();
        assert_eq!(m.to_upstream_name("Glenside"), "Glenside");
        assert_eq!(m.to_app_name("Glenside"), "Glenside");
    }

    #[test]
    fn identity_entries_round_trip() {
        let m = mapping();
        assert_eq!(m.to_app_name(m.to_upstream_name("Cynwyd")), "Cynwyd");
    }

    #[test]
    fn pairs_lists_every_line_once() {
        let m = mapping();
        let pairs: Vec<_> = m.pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("Airport Line", "Airport"),
                ("Norristown", "Manayunk/Norristown"),
                ("Cynwyd", "Cynwyd"),
            ]
        );
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn rejects_duplicate_app_name() {
        let err = NameMapping::from_pairs([("Cynwyd", "Cynwyd"), ("cynwyd", "Other")]).unwrap_err();
        assert!(matches!(err, LineTableError::DuplicateName(name) if name == "cynwyd"));
    }

    #[test]
    fn rejects_upstream_claimed_twice() {
        // "Airport" as its own line would shadow the Airport Line translation
        let err =
            NameMapping::from_pairs([("Airport Line", "Airport"), ("Airport", "Airport")])
                .unwrap_err();
        assert!(matches!(
            err,
            LineTableError::DuplicateUpstream { ref first, .. } if first == "Airport Line"
        ));
    }
}
