use thiserror::Error;

use crate::color::{Color, ColorParseError};
use crate::record::{MetadataField, SemanticSlot, Theme};
use crate::table::TEXT_COLOR_COUNT;

const TEXT_COLOR_PREFIX: &str = "text_color_";

/// A line that could not be understood at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("missing '=' separator")]
    MissingSeparator,
}

/// Why a well-formed line changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    Comment,
    UnknownKey(String),
    TextColorOutOfRange(i64),
    InvalidColor {
        key: String,
        value: String,
        error: ColorParseError,
    },
}

/// Field-level patch produced from one line. A partial file keeps every
/// default it does not mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Metadata { field: MetadataField, value: String },
    SlotColor { slot: SemanticSlot, color: Color },
    TextColor { index: usize, color: Color },
    Skip(SkipReason),
}

impl Directive {
    /// Applies the patch. Returns `false` for [`Directive::Skip`] and for a
    /// text color index outside the palette.
    pub fn apply(&self, theme: &mut Theme) -> bool {
        match self {
            Directive::Metadata { field, value } => theme.set_metadata(*field, value.as_str()),
            Directive::SlotColor { slot, color } => theme.set_slot(*slot, *color),
            Directive::TextColor { index, color } => match theme.text_colors.get_mut(*index) {
                Some(slot) => *slot = *color,
                None => return false,
            },
            Directive::Skip(_) => return false,
        }
        true
    }
}

pub fn parse_line(line: &str) -> Result<Directive, LineError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Ok(Directive::Skip(SkipReason::Blank));
    }
    if line.starts_with('#') {
        return Ok(Directive::Skip(SkipReason::Comment));
    }

    let (key, value) = line.split_once('=').ok_or(LineError::MissingSeparator)?;
    let key = key.trim();
    let value = value.trim();

    if let Some(field) = MetadataField::from_key(key) {
        return Ok(Directive::Metadata {
            field,
            value: value.to_string(),
        });
    }

    if let Some(slot) = SemanticSlot::from_key(key) {
        return Ok(match Color::parse(value) {
            Ok(color) => Directive::SlotColor { slot, color },
            Err(error) => invalid_color(key, value, error),
        });
    }

    if let Some(index) = key
        .strip_prefix(TEXT_COLOR_PREFIX)
        .and_then(|suffix| suffix.parse::<i64>().ok())
    {
        let in_range = usize::try_from(index)
            .ok()
            .filter(|index| *index < TEXT_COLOR_COUNT);
        let Some(index) = in_range else {
            return Ok(Directive::Skip(SkipReason::TextColorOutOfRange(index)));
        };
        return Ok(match Color::parse(value) {
            Ok(color) => Directive::TextColor { index, color },
            Err(error) => invalid_color(key, value, error),
        });
    }

    Ok(Directive::Skip(SkipReason::UnknownKey(key.to_string())))
}

fn invalid_color(key: &str, value: &str, error: ColorParseError) -> Directive {
    Directive::Skip(SkipReason::InvalidColor {
        key: key.to_string(),
        value: value.to_string(),
        error,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based.
    pub line_number: usize,
    pub text: String,
    pub error: LineError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub applied: usize,
    pub skipped: usize,
    pub invalid_colors: usize,
    pub failures: Vec<LineFailure>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies every line to `theme` in order. Failed lines are collected, never
/// fatal.
pub fn parse_lines<'a, I>(theme: &mut Theme, lines: I) -> ParseReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = ParseReport::default();
    for (offset, line) in lines.into_iter().enumerate() {
        match parse_line(line) {
            Ok(directive) => {
                if let Directive::Skip(SkipReason::InvalidColor { key, value, error }) = &directive
                {
                    tracing::debug!(key = %key, value = %value, "ignoring color: {error}");
                    report.invalid_colors += 1;
                }
                if directive.apply(theme) {
                    report.applied += 1;
                } else {
                    report.skipped += 1;
                }
            }
            Err(error) => {
                report.failures.push(LineFailure {
                    line_number: offset + 1,
                    text: line.trim_end_matches(['\r', '\n']).to_string(),
                    error,
                });
            }
        }
    }
    report
}
