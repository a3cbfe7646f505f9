//! Route token classification.

use crate::domain::{RouteMode, RouteToken};

use super::table::LineTable;

impl LineTable {
    /// Decide which mode a route token belongs to.
    ///
    /// Known rail line names win, then known subway codes (both compared
    /// case-insensitively), then tokens carrying the trolley prefix.
    /// Everything else is a bus route; tokens are not checked against a
    /// route registry here, so an unknown token simply finds no vehicles.
    pub fn classify(&self, token: &RouteToken) -> RouteMode {
        let token = token.as_str().trim();

        if self.rail_line(token).is_some() {
            RouteMode::RegionalRail
        } else if self.subway_line(token).is_some() {
            RouteMode::Subway
        } else if self.strip_trolley_prefix(token).is_some() {
            RouteMode::Trolley
        } else {
            RouteMode::Bus
        }
    }

    /// The canonical application name of a rail line token.
    pub fn rail_line(&self, token: &str) -> Option<&str> {
        self.rail_names
            .pairs()
            .map(|(name, _)| name)
            .find(|name| name.eq_ignore_ascii_case(token.trim()))
    }

    /// The canonical code of a subway line token.
    pub fn subway_line(&self, token: &str) -> Option<&str> {
        self.subway_lines
            .iter()
            .map(String::as_str)
            .find(|code| code.eq_ignore_ascii_case(token.trim()))
    }

    /// The route key behind a trolley token, or `None` if the token does
    /// not carry the trolley prefix.
    ///
    /// The prefix alone is not a trolley token.
    pub fn strip_trolley_prefix<'a>(&self, token: &'a str) -> Option<&'a str> {
        let token = token.trim();
        let mut chars = token.chars();
        let first = chars.next()?;
        let rest = chars.as_str();

        let matches = first == self.trolley_prefix
            || first.to_lowercase().eq(self.trolley_prefix.to_lowercase());
        (matches && !rest.is_empty()).then_some(rest)
    }

    /// The key a token is filed under in the bulk transit feed.
    pub fn bulk_route_key<'a>(&self, token: &'a RouteToken) -> &'a str {
        let raw = token.as_str().trim();
        self.strip_trolley_prefix(raw).unwrap_or(raw)
    }
}
