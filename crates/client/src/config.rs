use std::fmt;
use std::str::FromStr;

use pasajes_core::pagination::DEFAULT_PAGE_SIZE;

/// Which list is loaded after a successful save or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Always show every record, dropping the route filter.
    #[default]
    AllRecords,
    /// Re-run the active route filter.
    KeepFilter,
}

impl fmt::Display for ReloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllRecords => f.write_str("all"),
            Self::KeepFilter => f.write_str("keep-filter"),
        }
    }
}

impl FromStr for ReloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "todas" => Ok(Self::AllRecords),
            "keep-filter" | "filtro" => Ok(Self::KeepFilter),
            other => Err(format!(
                "unknown reload policy '{other}', expected 'all' or 'keep-filter'"
            )),
        }
    }
}

/// Desk configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Base URL of the API, including `/api`.
    pub api_url: String,
    /// Rows per page (default: `5`).
    pub page_size: usize,
    pub reload_policy: ReloadPolicy,
    /// Pre-select route/unit/fare type by label when entering edit mode.
    pub prefill_selections: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            reload_policy: ReloadPolicy::default(),
            prefill_selections: false,
        }
    }
}

impl DeskConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                     |
    /// |------------------------------|-----------------------------|
    /// | `PASAJES_API_URL`            | `http://localhost:3000/api` |
    /// | `PASAJES_PAGE_SIZE`          | `5`                         |
    /// | `PASAJES_RELOAD_POLICY`      | `all`                       |
    /// | `PASAJES_PREFILL_SELECTIONS` | `false`                     |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("PASAJES_API_URL").unwrap_or(defaults.api_url);

        let page_size: usize = std::env::var("PASAJES_PAGE_SIZE")
            .map(|v| v.parse().expect("PASAJES_PAGE_SIZE must be a valid usize"))
            .unwrap_or(defaults.page_size);

        let reload_policy: ReloadPolicy = std::env::var("PASAJES_RELOAD_POLICY")
            .map(|v| {
                v.parse()
                    .unwrap_or_else(|e| panic!("PASAJES_RELOAD_POLICY: {e}"))
            })
            .unwrap_or(defaults.reload_policy);

        let prefill_selections: bool = std::env::var("PASAJES_PREFILL_SELECTIONS")
            .map(|v| {
                v.parse()
                    .expect("PASAJES_PREFILL_SELECTIONS must be 'true' or 'false'")
            })
            .unwrap_or(defaults.prefill_selections);

        Self {
            api_url,
            page_size: page_size.max(1),
            reload_policy,
            prefill_selections,
        }
    }
}
