//! IRC client color themes: the `key=value` theme format, built-in defaults,
//! the 42-slot indexed palette and the contract for pushing themes onto a GUI.

pub mod apply;
pub mod color;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod parser;
pub mod record;
pub mod store;
pub mod sync;
pub mod table;

pub use apply::{ApplyOutcome, ApplyState, RenderTarget, SessionView, WidgetRole, WidgetStyle};
pub use color::{Color, ColorParseError};
pub use config::{system_theme_dirs, ThemeConfig, THEME_SUFFIX};
pub use context::ThemeContext;
pub use defaults::{ThemeVariant, MIRC_TEXT_COLORS};
pub use error::ThemeError;
pub use parser::{
    parse_line, parse_lines, Directive, LineError, LineFailure, ParseReport, SkipReason,
};
pub use record::{MetadataField, SemanticSlot, Theme, ThemeFonts};
pub use store::{BackfillReport, BootstrapReport, LoadReport, ThemeStore};
pub use sync::{sync_palette, SyncReport};
pub use table::{
    ColorTable, Colormap, Pixel, ResolvedColor, Surface, TableEntry, COLOR_TABLE_LEN,
    TEXT_COLOR_COUNT,
};
