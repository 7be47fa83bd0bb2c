use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::apply::{ApplyOutcome, RenderTarget};
use crate::config::ThemeConfig;
use crate::context::ThemeContext;
use crate::defaults::MIRC_TEXT_COLORS;
use crate::error::ThemeError;
use crate::parser::{parse_lines, ParseReport};
use crate::sync::SyncReport;

const TEXT_COLOR_MARKER: &str = "text_color_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: PathBuf,
    pub parse: ParseReport,
    pub sync: SyncReport,
    /// `Deferred` when no render target was supplied or it was not ready;
    /// [`ThemeContext::apply_pending`] finishes the job.
    pub apply: ApplyOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub installed: Vec<String>,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub updated: Vec<String>,
    pub untouched: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct ThemeStore {
    config: ThemeConfig,
}

impl ThemeStore {
    pub fn new(config: ThemeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn theme_dir(&self) -> &Path {
        &self.config.theme_dir
    }

    /// Creates the theme directory, bootstraps it on first run and returns a
    /// context holding the built-in base theme.
    pub fn init(&self) -> (ThemeContext, BootstrapReport) {
        tracing::info!(dir = %self.theme_dir().display(), "initializing theme system");
        let report = self.bootstrap_first_run();
        (ThemeContext::with_variant(self.config.base_variant), report)
    }

    pub fn ensure_theme_dir(&self) -> Result<(), ThemeError> {
        let dir = self.theme_dir();
        fs::create_dir_all(dir).map_err(|source| ThemeError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Absolute paths and paths already under the theme directory are used
    /// as given; anything else is taken relative to the theme directory.
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        let candidate = Path::new(filename);
        if candidate.is_absolute() || candidate.starts_with(self.theme_dir()) {
            candidate.to_path_buf()
        } else {
            self.theme_dir().join(candidate)
        }
    }

    /// Loads `filename` over a fresh base theme, makes it current and applies
    /// it. On error the current theme is left untouched.
    pub fn load(
        &self,
        context: &mut ThemeContext,
        target: Option<&mut dyn RenderTarget>,
        filename: &str,
    ) -> Result<LoadReport, ThemeError> {
        if filename.trim().is_empty() {
            tracing::warn!("refusing to load a theme without a file name");
            return Err(ThemeError::EmptyFilename);
        }
        let path = self.resolve_path(filename);
        tracing::info!(path = %path.display(), "loading theme");

        let bytes = fs::read(&path).map_err(|source| {
            tracing::warn!(path = %path.display(), "failed to open theme: {source}");
            ThemeError::Open {
                path: path.clone(),
                source,
            }
        })?;
        let contents = String::from_utf8_lossy(&bytes);

        let mut theme = self.config.base_variant.build();
        let parse = parse_lines(&mut theme, contents.lines());
        for failure in &parse.failures {
            tracing::warn!(
                path = %path.display(),
                line = failure.line_number,
                "failed to parse theme line '{}': {}",
                failure.text,
                failure.error
            );
        }

        let (sync, apply) = match target {
            Some(target) => {
                let (_, sync) = context.install(theme, target.surface());
                (sync, context.apply(target))
            }
            None => {
                let (_, sync) = context.install(theme, None);
                context.mark_pending();
                (sync, ApplyOutcome::Deferred)
            }
        };
        tracing::info!(
            name = %context.current_theme().name,
            failed_lines = parse.failures.len(),
            "theme loaded"
        );

        Ok(LoadReport {
            path,
            parse,
            sync,
            apply,
        })
    }

    /// Writing themes back to disk is not supported.
    pub fn save(&self, _context: &ThemeContext, path: impl AsRef<Path>) -> Result<(), ThemeError> {
        let path = path.as_ref().to_path_buf();
        tracing::warn!(path = %path.display(), "theme saving is not implemented");
        Err(ThemeError::SaveNotImplemented { path })
    }

    /// Theme file names in the theme directory, in directory order. Empty when
    /// the directory cannot be read.
    pub fn list_available(&self) -> Vec<String> {
        list_theme_files(self.theme_dir(), &self.config)
    }

    /// Copies system themes into an empty user theme directory. Existing user
    /// files are never overwritten; unreadable or unwritable files are logged
    /// and skipped.
    pub fn bootstrap_first_run(&self) -> BootstrapReport {
        if let Err(err) = self.ensure_theme_dir() {
            tracing::warn!("{err}");
        }

        let mut report = BootstrapReport::default();
        if !self.list_available().is_empty() {
            return report;
        }

        for system_dir in &self.config.system_dirs {
            let Ok(entries) = fs::read_dir(system_dir) else {
                continue;
            };
            tracing::info!(
                dir = %system_dir.display(),
                "no user themes found, copying system themes"
            );
            for entry in entries.flatten() {
                let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if !self.config.is_theme_file(&name) {
                    continue;
                }
                let source = entry.path();
                let dest = self.theme_dir().join(&name);
                if dest.exists() {
                    report.skipped += 1;
                    continue;
                }
                match copy_theme(&source, &dest) {
                    Ok(()) => {
                        tracing::info!(path = %dest.display(), "installed user theme");
                        report.installed.push(name);
                    }
                    Err(err) => {
                        tracing::warn!(
                            source = %source.display(),
                            dest = %dest.display(),
                            "failed to install theme: {err}"
                        );
                        report.failed += 1;
                    }
                }
            }
        }
        report
    }

    /// Appends the standard mIRC text colors to every theme file that does
    /// not define any `text_color_` entry.
    pub fn backfill_text_colors(&self) -> BackfillReport {
        let mut report = BackfillReport::default();
        for name in self.list_available() {
            let path = self.theme_dir().join(&name);
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "failed to read theme: {err}");
                    report.failed += 1;
                    continue;
                }
            };
            if contents.lines().any(|line| line.contains(TEXT_COLOR_MARKER)) {
                report.untouched += 1;
                continue;
            }
            match write_atomic(&path, with_text_colors(&contents).as_bytes()) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "added text colors");
                    report.updated.push(name);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "failed to update theme: {err}");
                    report.failed += 1;
                }
            }
        }
        report
    }
}

fn list_theme_files(dir: &Path, config: &ThemeConfig) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| config.is_theme_file(name))
        .collect()
}

fn with_text_colors(contents: &str) -> String {
    let mut payload = contents.trim_end().to_string();
    if !payload.is_empty() {
        payload.push('\n');
    }
    for (index, rgb) in MIRC_TEXT_COLORS.iter().enumerate() {
        payload.push_str(&format!("{TEXT_COLOR_MARKER}{index}=#{rgb:06X}\n"));
    }
    payload
}

fn copy_theme(source: &Path, dest: &Path) -> io::Result<()> {
    let data = fs::read(source)?;
    write_atomic(dest, &data)
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
