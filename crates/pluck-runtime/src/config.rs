#![forbid(unsafe_code)]

//! Adapter configuration.
//!
//! # Environment
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `PLUCK_LABEL` | label attached to every tracing event |
//! | `PLUCK_MEMOIZE` | `0`, `false`, `off`, `no` disable pluck memoization |

const DEFAULT_LABEL: &str = "async-pluck";

/// Configuration for an [`AsyncPluck`](crate::AsyncPluck) adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Name used in log events to tell adapters apart.
    pub label: String,
    /// Reuse the previous traversal result while no new value has arrived
    /// and the path is unchanged. Keeps map-over results identity-stable.
    pub memoize: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_owned(),
            memoize: true,
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by a custom environment lookup.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(label) = get_env("PLUCK_LABEL")
            && !label.trim().is_empty()
        {
            config.label = label.trim().to_owned();
        }
        if let Some(value) = get_env("PLUCK_MEMOIZE") {
            config.memoize = env_flag(&value);
        }
        config
    }
}

/// Anything but an explicit "off" spelling counts as enabled.
pub fn env_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
