use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::defaults::ThemeVariant;

pub const THEME_SUFFIX: &str = ".theme";

const APP_NAME: &str = "hexchat";
const THEMES_SUBDIR: &str = "themes";
const DEFAULT_XDG_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Where themes live and how loading starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Per-user theme directory.
    pub theme_dir: PathBuf,
    /// System-wide directories consulted by the first-run bootstrap.
    pub system_dirs: Vec<PathBuf>,
    /// File-name suffix that marks a theme file.
    pub suffix: String,
    /// Built-in theme every loaded file is layered over.
    pub base_variant: ThemeVariant,
}

impl ThemeConfig {
    pub fn new(theme_dir: impl Into<PathBuf>) -> Self {
        Self {
            theme_dir: theme_dir.into(),
            system_dirs: Vec::new(),
            suffix: THEME_SUFFIX.to_string(),
            base_variant: ThemeVariant::default(),
        }
    }

    /// Per-user config directory plus the `XDG_DATA_DIRS` search path.
    /// `None` when no home directory can be determined.
    pub fn discover() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", APP_NAME)?;
        let theme_dir = dirs.config_dir().join(THEMES_SUBDIR);
        let data_dirs = env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_XDG_DATA_DIRS.to_string());
        Some(Self::new(theme_dir).with_system_dirs(system_theme_dirs(&data_dirs)))
    }

    pub fn with_system_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.system_dirs = dirs.into_iter().collect();
        self
    }

    pub fn with_base_variant(mut self, variant: ThemeVariant) -> Self {
        self.base_variant = variant;
        self
    }

    pub fn is_theme_file(&self, name: &str) -> bool {
        name.ends_with(&self.suffix)
    }
}

/// Expands a colon-separated data-dir list into `<dir>/hexchat/themes`.
pub fn system_theme_dirs(data_dirs: &str) -> Vec<PathBuf> {
    env::split_paths(data_dirs)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| theme_subdir(&dir))
        .collect()
}

fn theme_subdir(data_dir: &Path) -> PathBuf {
    data_dir.join(APP_NAME).join(THEMES_SUBDIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_theme_suffix_and_dark_base() {
        let config = ThemeConfig::new("/tmp/themes");
        assert_eq!(config.suffix, ".theme");
        assert_eq!(config.base_variant, ThemeVariant::Dark);
        assert!(config.system_dirs.is_empty());
        assert!(config.is_theme_file("monokai.theme"));
        assert!(!config.is_theme_file("monokai.theme.bak"));
    }

    #[cfg(unix)]
    #[test]
    fn expands_data_dirs() {
        let dirs = system_theme_dirs("/usr/local/share::/usr/share");
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/usr/local/share/hexchat/themes"),
                PathBuf::from("/usr/share/hexchat/themes"),
            ]
        );
    }
}
