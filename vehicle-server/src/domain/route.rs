//! Route tokens and transit modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A caller-supplied route identifier.
///
/// Tokens are opaque: a numeric bus route (`"17"`), a trolley token
/// (`"T10"`), a rail line name (`"Airport Line"`) or a subway line code
/// (`"MFL"`). The only structure ever inspected is what
/// [`LineTable::classify`](crate::lines::LineTable::classify) looks at.
///
/// # Examples
///
/// ```
/// use vehicle_server::domain::RouteToken;
///
/// let tokens = RouteToken::parse_list(" 17, ,Airport Line,17 ");
/// let names: Vec<_> = tokens.iter().map(|t| t.as_str()).collect();
/// assert_eq!(names, ["17", "Airport Line", "17"]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteToken(String);

impl RouteToken {
    /// Wrap a token verbatim.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Split a comma-separated list, trimming each entry and dropping blanks.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::new)
            .collect()
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the token has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for RouteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteToken({:?})", self.0)
    }
}

impl fmt::Display for RouteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The transit mode a route token belongs to.
///
/// Each mode is served by exactly one upstream feed: bus and trolley share
/// the bulk feed, regional rail and subway have their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteMode {
    Bus,
    Trolley,
    RegionalRail,
    Subway,
}

impl RouteMode {
    /// The feed group this mode is fetched with.
    pub fn group(self) -> FeedGroup {
        match self {
            RouteMode::Bus | RouteMode::Trolley => FeedGroup::BulkTransit,
            RouteMode::RegionalRail => FeedGroup::Rail,
            RouteMode::Subway => FeedGroup::Subway,
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteMode::Bus => "bus",
            RouteMode::Trolley => "trolley",
            RouteMode::RegionalRail => "regional rail",
            RouteMode::Subway => "subway",
        };
        f.write_str(name)
    }
}

/// One upstream feed and the modes it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedGroup {
    /// Bus and trolley positions, grouped by route key.
    BulkTransit,
    /// Regional rail trains, one flat list.
    Rail,
    /// Subway text dump.
    Subway,
}

impl fmt::Display for FeedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedGroup::BulkTransit => "bulk-transit",
            FeedGroup::Rail => "rail",
            FeedGroup::Subway => "subway",
        };
        f.write_str(name)
    }
}
