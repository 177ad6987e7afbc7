//! Route filter state and the options offered by the filter selector.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::ticket::LookupEntry;
use crate::types::DbId;

/// Selector value meaning "no route filter".
pub const ALL_ROUTES: &str = "TODAS";

/// Label of the "no route filter" option.
pub const ALL_ROUTES_LABEL: &str = "Ver Todas las Rutas";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteFilter {
    #[default]
    All,
    Route(DbId),
}

impl RouteFilter {
    pub fn route_id(self) -> Option<DbId> {
        match self {
            Self::All => None,
            Self::Route(id) => Some(id),
        }
    }
}

impl fmt::Display for RouteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_ROUTES),
            Self::Route(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for RouteFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_ROUTES) {
            return Ok(Self::All);
        }
        s.parse::<DbId>()
            .map(Self::Route)
            .map_err(|_| CoreError::Validation(format!("Invalid route filter '{s}'")))
    }
}

/// One entry of the filter selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Build the selector options from the routes lookup: "all" first, then
/// one option per route in lookup order.
pub fn filter_options(routes: &[LookupEntry]) -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: ALL_ROUTES.to_string(),
        label: ALL_ROUTES_LABEL.to_string(),
    })
    .chain(routes.iter().map(|r| FilterOption {
        value: r.id.to_string(),
        label: r.label.clone(),
    }))
    .collect()
}
