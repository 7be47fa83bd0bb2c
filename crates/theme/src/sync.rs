use crate::color::Color;
use crate::record::{SemanticSlot, Theme};
use crate::table::{
    ColorTable, Pixel, Surface, COL_AWAY, COL_BG, COL_FG, COL_MARKER, COL_MARK_BG, COL_MARK_FG,
    TEXT_COLOR_COUNT,
};

/// Table slots mirrored from semantic theme slots.
const SEMANTIC_TABLE_SLOTS: [(SemanticSlot, usize); 6] = [
    (SemanticSlot::SelectedForeground, COL_MARK_FG),
    (SemanticSlot::SelectedBackground, COL_MARK_BG),
    (SemanticSlot::Foreground, COL_FG),
    (SemanticSlot::Background, COL_BG),
    (SemanticSlot::Separator, COL_MARKER),
    (SemanticSlot::AwayUser, COL_AWAY),
];

// The extended-range black that legacy palettes most often leave behind.
const LEGACY_BLACK_SLOT: usize = 17;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Text-color slots rewritten by the dark-background correction.
    pub corrected_slots: Vec<usize>,
    /// Whether device resolution ran against a surface.
    pub resolved: bool,
    /// Pixels of the theme colors that have no table slot.
    pub widget_pixels: Vec<(SemanticSlot, Pixel)>,
}

/// Pushes `theme` into `table`, fixes black text on dark backgrounds and,
/// when `surface` can allocate, writes device-resolved colors back into
/// `theme`.
pub fn sync_palette(
    theme: &mut Theme,
    table: &mut ColorTable,
    surface: Option<&dyn Surface>,
) -> SyncReport {
    tracing::debug!(
        bg = %theme.bg_color,
        fg = %theme.fg_color,
        "syncing palette for theme '{}'",
        theme.name
    );

    for (index, color) in theme.text_colors.iter().enumerate() {
        table.set(index, *color);
    }
    for (slot, index) in SEMANTIC_TABLE_SLOTS {
        table.set(index, theme.slot(slot));
    }

    let mut report = SyncReport {
        corrected_slots: correct_dark_background(theme, table),
        ..SyncReport::default()
    };

    if let Some(surface) = surface {
        if let Some(colormap) = surface.colormap() {
            table.reallocate(Some(surface));

            for index in 0..TEXT_COLOR_COUNT {
                theme.text_colors[index] = table.color(index);
            }
            for (slot, index) in SEMANTIC_TABLE_SLOTS {
                theme.set_slot(slot, table.color(index));
            }
            for slot in SemanticSlot::WIDGET_ONLY {
                let resolved = colormap.alloc_color(theme.slot(slot));
                theme.set_slot(slot, resolved.color);
                report.widget_pixels.push((slot, resolved.pixel));
            }
            report.resolved = true;
        } else {
            tracing::debug!("surface yielded no colormap, palette left unresolved");
        }
    }

    tracing::debug!(
        corrected = report.corrected_slots.len(),
        resolved = report.resolved,
        "palette synced"
    );
    report
}

/// Replaces pure-black text colors with the foreground when the background
/// is dark. Returns the rewritten slots.
fn correct_dark_background(theme: &mut Theme, table: &mut ColorTable) -> Vec<usize> {
    if !theme.bg_color.is_dark() {
        return Vec::new();
    }
    let fg = theme.fg_color;
    let mut corrected = Vec::new();
    for index in 0..TEXT_COLOR_COUNT {
        if table.color(index).is_black() {
            table.set(index, fg);
            theme.text_colors[index] = fg;
            corrected.push(index);
        }
    }
    // re-checked on its own; the scan above already covers it
    if table.color(LEGACY_BLACK_SLOT) == Color::BLACK {
        table.set(LEGACY_BLACK_SLOT, fg);
    }
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::FakeSurface;
    use crate::table::{COL_NEW_DATA, COL_SPELL, COLOR_TABLE_LEN};

    #[test]
    fn copies_text_and_semantic_colors_into_table() {
        let mut theme = Theme::light_default();
        let mut table = ColorTable::new();
        let report = sync_palette(&mut theme, &mut table, None);

        for index in 0..TEXT_COLOR_COUNT {
            assert_eq!(table.color(index), theme.text_colors[index]);
        }
        assert_eq!(table.color(COL_MARK_FG), theme.selected_fg);
        assert_eq!(table.color(COL_MARK_BG), theme.selected_bg);
        assert_eq!(table.color(COL_FG), theme.fg_color);
        assert_eq!(table.color(COL_BG), theme.bg_color);
        assert_eq!(table.color(COL_MARKER), theme.separator);
        assert_eq!(table.color(COL_AWAY), theme.away_user);
        assert!(!report.resolved);
    }

    #[test]
    fn gui_accents_other_than_away_keep_defaults() {
        let defaults = ColorTable::new();
        let mut table = ColorTable::new();
        sync_palette(&mut Theme::dark_default(), &mut table, None);
        for index in [COL_NEW_DATA, COL_NEW_DATA + 1, COL_NEW_DATA + 2, COL_SPELL] {
            assert_eq!(table.color(index), defaults.color(index));
        }
    }

    #[test]
    fn black_text_on_dark_background_becomes_foreground() {
        let mut theme = Theme::dark_default();
        theme.bg_color = Color::BLACK;
        theme.text_colors[3] = Color::BLACK;
        theme.text_colors[17] = Color::BLACK;
        let mut table = ColorTable::new();

        let report = sync_palette(&mut theme, &mut table, None);
        assert_eq!(table.color(3), theme.fg_color);
        assert_eq!(table.color(17), theme.fg_color);
        assert_eq!(theme.text_colors[3], theme.fg_color);
        assert_eq!(report.corrected_slots, vec![3, 17]);
    }

    #[test]
    fn bright_background_keeps_black_text() {
        let mut theme = Theme::light_default();
        theme.bg_color = Color::rgb8(0x80, 0x80, 0x80);
        theme.text_colors[3] = Color::BLACK;
        let mut table = ColorTable::new();

        let report = sync_palette(&mut theme, &mut table, None);
        assert_eq!(table.color(3), Color::BLACK);
        assert_eq!(theme.text_colors[3], Color::BLACK);
        assert!(report.corrected_slots.is_empty());
    }

    #[test]
    fn surface_resolution_writes_back_into_theme() {
        let mut theme = Theme::dark_default();
        theme.input_bg = Color::new(0x12ff, 0x34ff, 0x56ff);
        theme.text_colors[5] = Color::new(0xab01, 0, 0);
        let mut table = ColorTable::new();
        let surface = FakeSurface::new(3);

        let report = sync_palette(&mut theme, &mut table, Some(&surface));
        assert!(report.resolved);
        assert_eq!(theme.text_colors[5], Color::new(0xab00, 0, 0));
        assert_eq!(theme.input_bg, Color::new(0x1200, 0x3400, 0x5600));
        assert_eq!(report.widget_pixels.len(), SemanticSlot::WIDGET_ONLY.len());
        assert_eq!(surface.alloc_calls(), COLOR_TABLE_LEN + SemanticSlot::WIDGET_ONLY.len());
        assert!(table.iter().all(|(_, entry)| entry.pixel.is_some()));
        assert_eq!(table.allocated_generation(), Some(3));
    }

    #[test]
    fn surface_without_colormap_only_skips_resolution() {
        let mut theme = Theme::dark_default();
        theme.bg_color = Color::BLACK;
        theme.text_colors[0] = Color::BLACK;
        let mut table = ColorTable::new();
        let surface = FakeSurface::without_colormap();

        let report = sync_palette(&mut theme, &mut table, Some(&surface));
        assert!(!report.resolved);
        assert_eq!(report.corrected_slots, vec![0]);
        assert_eq!(table.pixel(0), None);
    }
}
