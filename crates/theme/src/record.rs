use serde::Serialize;

use crate::color::Color;
use crate::table::TEXT_COLOR_COUNT;

/// Named single-purpose color fields of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticSlot {
    Background,
    Foreground,
    SelectedBackground,
    SelectedForeground,
    InputBackground,
    InputForeground,
    NicklistBackground,
    NicklistForeground,
    ChanlistBackground,
    ChanlistForeground,
    TreeBackground,
    TreeForeground,
    AwayUser,
    Separator,
}

impl SemanticSlot {
    pub const ALL: [SemanticSlot; 14] = [
        SemanticSlot::Background,
        SemanticSlot::Foreground,
        SemanticSlot::SelectedBackground,
        SemanticSlot::SelectedForeground,
        SemanticSlot::InputBackground,
        SemanticSlot::InputForeground,
        SemanticSlot::NicklistBackground,
        SemanticSlot::NicklistForeground,
        SemanticSlot::ChanlistBackground,
        SemanticSlot::ChanlistForeground,
        SemanticSlot::TreeBackground,
        SemanticSlot::TreeForeground,
        SemanticSlot::AwayUser,
        SemanticSlot::Separator,
    ];

    /// Slots without a color-table counterpart; they are resolved directly
    /// against the surface.
    pub const WIDGET_ONLY: [SemanticSlot; 8] = [
        SemanticSlot::InputBackground,
        SemanticSlot::InputForeground,
        SemanticSlot::NicklistBackground,
        SemanticSlot::NicklistForeground,
        SemanticSlot::ChanlistBackground,
        SemanticSlot::ChanlistForeground,
        SemanticSlot::TreeBackground,
        SemanticSlot::TreeForeground,
    ];

    /// Key used for this slot in theme files.
    pub fn key(self) -> &'static str {
        match self {
            SemanticSlot::Background => "bg_color",
            SemanticSlot::Foreground => "fg_color",
            SemanticSlot::SelectedBackground => "selected_bg",
            SemanticSlot::SelectedForeground => "selected_fg",
            SemanticSlot::InputBackground => "input_bg",
            SemanticSlot::InputForeground => "input_fg",
            SemanticSlot::NicklistBackground => "nicklist_bg",
            SemanticSlot::NicklistForeground => "nicklist_fg",
            SemanticSlot::ChanlistBackground => "chanlist_bg",
            SemanticSlot::ChanlistForeground => "chanlist_fg",
            SemanticSlot::TreeBackground => "tree_bg",
            SemanticSlot::TreeForeground => "tree_fg",
            SemanticSlot::AwayUser => "away_user",
            SemanticSlot::Separator => "separator",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// Metadata fields addressable from a theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Name,
    Author,
    Description,
    Version,
}

impl MetadataField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(MetadataField::Name),
            "author" => Some(MetadataField::Author),
            "description" => Some(MetadataField::Description),
            "version" => Some(MetadataField::Version),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub normal: String,
    pub bold: String,
    pub italic: String,
}

/// One theme: metadata, semantic colors, the 32 text colors, fonts and
/// spacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub author: String,
    pub description: String,
    pub version: String,

    pub bg_color: Color,
    pub fg_color: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub input_bg: Color,
    pub input_fg: Color,
    pub nicklist_bg: Color,
    pub nicklist_fg: Color,
    pub chanlist_bg: Color,
    pub chanlist_fg: Color,
    pub tree_bg: Color,
    pub tree_fg: Color,
    pub away_user: Color,
    pub separator: Color,

    pub text_colors: [Color; TEXT_COLOR_COUNT],

    pub fonts: ThemeFonts,

    pub border_width: i32,
    pub padding: i32,
}

impl Theme {
    /// A record holding the light defaults.
    pub fn new() -> Self {
        Self::light_default()
    }

    pub fn slot(&self, slot: SemanticSlot) -> Color {
        match slot {
            SemanticSlot::Background => self.bg_color,
            SemanticSlot::Foreground => self.fg_color,
            SemanticSlot::SelectedBackground => self.selected_bg,
            SemanticSlot::SelectedForeground => self.selected_fg,
            SemanticSlot::InputBackground => self.input_bg,
            SemanticSlot::InputForeground => self.input_fg,
            SemanticSlot::NicklistBackground => self.nicklist_bg,
            SemanticSlot::NicklistForeground => self.nicklist_fg,
            SemanticSlot::ChanlistBackground => self.chanlist_bg,
            SemanticSlot::ChanlistForeground => self.chanlist_fg,
            SemanticSlot::TreeBackground => self.tree_bg,
            SemanticSlot::TreeForeground => self.tree_fg,
            SemanticSlot::AwayUser => self.away_user,
            SemanticSlot::Separator => self.separator,
        }
    }

    pub fn slot_mut(&mut self, slot: SemanticSlot) -> &mut Color {
        match slot {
            SemanticSlot::Background => &mut self.bg_color,
            SemanticSlot::Foreground => &mut self.fg_color,
            SemanticSlot::SelectedBackground => &mut self.selected_bg,
            SemanticSlot::SelectedForeground => &mut self.selected_fg,
            SemanticSlot::InputBackground => &mut self.input_bg,
            SemanticSlot::InputForeground => &mut self.input_fg,
            SemanticSlot::NicklistBackground => &mut self.nicklist_bg,
            SemanticSlot::NicklistForeground => &mut self.nicklist_fg,
            SemanticSlot::ChanlistBackground => &mut self.chanlist_bg,
            SemanticSlot::ChanlistForeground => &mut self.chanlist_fg,
            SemanticSlot::TreeBackground => &mut self.tree_bg,
            SemanticSlot::TreeForeground => &mut self.tree_fg,
            SemanticSlot::AwayUser => &mut self.away_user,
            SemanticSlot::Separator => &mut self.separator,
        }
    }

    pub fn set_slot(&mut self, slot: SemanticSlot, color: Color) {
        *self.slot_mut(slot) = color;
    }

    pub fn metadata(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::Name => &self.name,
            MetadataField::Author => &self.author,
            MetadataField::Description => &self.description,
            MetadataField::Version => &self.version,
        }
    }

    pub fn set_metadata(&mut self, field: MetadataField, value: impl Into<String>) {
        let value = value.into();
        match field {
            MetadataField::Name => self.name = value,
            MetadataField::Author => self.author = value,
            MetadataField::Description => self.description = value,
            MetadataField::Version => self.version = value,
        }
    }

    pub fn text_color(&self, index: usize) -> Option<Color> {
        self.text_colors.get(index).copied()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_keys_round_trip() {
        for slot in SemanticSlot::ALL {
            assert_eq!(SemanticSlot::from_key(slot.key()), Some(slot));
        }
        assert_eq!(SemanticSlot::from_key("bg"), None);
    }

    #[test]
    fn set_slot_touches_only_that_field() {
        let mut theme = Theme::new();
        let before = theme.clone();
        theme.set_slot(SemanticSlot::TreeForeground, Color::rgb8(1, 2, 3));
        assert_eq!(theme.tree_fg, Color::rgb8(1, 2, 3));
        theme.tree_fg = before.tree_fg;
        assert_eq!(theme, before);
    }
}
