//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--light`, `--no-virtualize`, etc.)
//! 2. `$FTREE_CONFIG` environment variable (path to config file)
//! 3. Project-local `.ftree.toml` in the current working directory
//! 4. Global `~/.config/ftree/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tree::filter::{SearchOptions, DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_LENGTH};
use crate::tree::state::TreeOptions;
use crate::tree::window::DEFAULT_OVERSCAN;

// ── Section configs ──────────────────────────────────────────────────────────

/// Tree geometry and rendering settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeSection {
    /// Render only the windowed row slice (false = render everything).
    pub virtualize: Option<bool>,
    /// Extra rows rendered past the viewport edge.
    pub overscan: Option<usize>,
    /// Draw box-drawing indent guides.
    pub indent_guides: Option<bool>,
}

/// Search and filtering settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchSection {
    /// Subsequence matching with ranked results.
    pub fuzzy: Option<bool>,
    pub case_sensitive: Option<bool>,
    /// Minimum term length before filtering kicks in.
    pub min_length: Option<usize>,
    /// Delay between keystrokes and re-filtering, in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Feature toggles for the widget.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FeaturesSection {
    pub multi_select: Option<bool>,
    pub drag_drop: Option<bool>,
    pub rename: Option<bool>,
    pub delete: Option<bool>,
    pub copy_paste: Option<bool>,
}

/// Color overrides for a single palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub dir_fg: Option<String>,
    pub file_fg: Option<String>,
    pub focused_bg: Option<String>,
    pub focused_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub highlight_bg: Option<String>,
    pub favorite_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeSection {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub tree: TreeSection,
    pub search: SearchSection,
    pub features: FeaturesSection,
    pub theme: ThemeSection,
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $FTREE_CONFIG environment variable
    if let Ok(env_path) = std::env::var("FTREE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.ftree.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".ftree.toml"));
    }

    // 3. Global `~/.config/ftree/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("ftree").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            tree: TreeSection {
                virtualize: other.tree.virtualize.or(self.tree.virtualize),
                overscan: other.tree.overscan.or(self.tree.overscan),
                indent_guides: other.tree.indent_guides.or(self.tree.indent_guides),
            },
            search: SearchSection {
                fuzzy: other.search.fuzzy.or(self.search.fuzzy),
                case_sensitive: other.search.case_sensitive.or(self.search.case_sensitive),
                min_length: other.search.min_length.or(self.search.min_length),
                debounce_ms: other.search.debounce_ms.or(self.search.debounce_ms),
            },
            features: FeaturesSection {
                multi_select: other.features.multi_select.or(self.features.multi_select),
                drag_drop: other.features.drag_drop.or(self.features.drag_drop),
                rename: other.features.rename.or(self.features.rename),
                delete: other.features.delete.or(self.features.delete),
                copy_paste: other.features.copy_paste.or(self.features.copy_paste),
            },
            theme: ThemeSection {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn virtualize(&self) -> bool {
        self.tree.virtualize.unwrap_or(true)
    }

    pub fn overscan(&self) -> usize {
        self.tree.overscan.unwrap_or(DEFAULT_OVERSCAN)
    }

    pub fn indent_guides(&self) -> bool {
        self.tree.indent_guides.unwrap_or(true)
    }

    pub fn fuzzy(&self) -> bool {
        self.search.fuzzy.unwrap_or(false)
    }

    pub fn case_sensitive(&self) -> bool {
        self.search.case_sensitive.unwrap_or(false)
    }

    pub fn min_length(&self) -> usize {
        self.search.min_length.unwrap_or(DEFAULT_MIN_LENGTH)
    }

    pub fn debounce_ms(&self) -> u64 {
        self.search.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    // The demo turns every interaction on by default; embedders start from
    // the engine's own conservative `TreeOptions::default()` instead.

    pub fn multi_select(&self) -> bool {
        self.features.multi_select.unwrap_or(true)
    }

    pub fn drag_drop(&self) -> bool {
        self.features.drag_drop.unwrap_or(true)
    }

    pub fn rename(&self) -> bool {
        self.features.rename.unwrap_or(true)
    }

    pub fn delete(&self) -> bool {
        self.features.delete.unwrap_or(true)
    }

    pub fn copy_paste(&self) -> bool {
        self.features.copy_paste.unwrap_or(true)
    }

    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    /// Bridge to the engine's option struct. The demo renders one terminal
    /// cell per row, so the viewport works in cell units.
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            multi_select: self.multi_select(),
            drag_drop: self.drag_drop(),
            rename: self.rename(),
            delete: self.delete(),
            copy_paste: self.copy_paste(),
            virtualize: self.virtualize(),
            row_height: 1,
            overscan: self.overscan(),
            search: SearchOptions {
                fuzzy: self.fuzzy(),
                case_sensitive: self.case_sensitive(),
                min_length: self.min_length(),
                debounce_ms: self.debounce_ms(),
            },
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
