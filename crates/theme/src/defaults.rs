use crate::color::Color;
use crate::record::{Theme, ThemeFonts};
use crate::table::TEXT_COLOR_COUNT;

/// Which built-in theme to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    Light,
    #[default]
    Dark,
}

impl ThemeVariant {
    pub fn build(self) -> Theme {
        match self {
            ThemeVariant::Light => Theme::light_default(),
            ThemeVariant::Dark => Theme::dark_default(),
        }
    }
}

/// The standard mIRC palette, slots 16..=31 being the extended range.
pub const MIRC_TEXT_COLORS: [u32; TEXT_COLOR_COUNT] = [
    0xFFFFFF, 0x000000, 0x000080, 0x008000, 0xFF0000, 0x800000, 0x800080, 0xFFA500,
    0xFFFF00, 0x00FF00, 0x008080, 0x00FFFF, 0x0000FF, 0xFF00FF, 0x808080, 0xC0C0C0,
    0x470000, 0x472100, 0x474700, 0x324700, 0x004700, 0x00472C, 0x004747, 0x002747,
    0x000047, 0x2E0047, 0x470047, 0x470024, 0xCCCCCC, 0xFFFFFF, 0xFFFFFF, 0xFFFFFF,
];

const DARK_TEXT_COLORS: [u32; TEXT_COLOR_COUNT] = [
    0xffffff, 0xff6b6b, 0x51cf66, 0xffd43b, 0x74c0fc, 0xda77f2, 0x4dabf7, 0xf8f9fa,
    0xff922b, 0x868e96, 0x20c997, 0x00d2d3, 0x339af0, 0xe64980, 0xadb5bd, 0xced4da,
    0xc92a2a, 0xa61e4d, 0x862e9c, 0x5f3dc4, 0x1864ab, 0x0b7285, 0x087f5b, 0x2b8a3e,
    0x5c940d, 0xe67700, 0xd9480f, 0x495057, 0x868e96, 0xadb5bd, 0xced4da, 0xf8f9fa,
];

fn palette(values: [u32; TEXT_COLOR_COUNT]) -> [Color; TEXT_COLOR_COUNT] {
    values.map(Color::from_rgb24)
}

impl Theme {
    pub fn light_default() -> Self {
        let mut text_colors = palette(MIRC_TEXT_COLORS);
        // slot 1 is light gray rather than mIRC black
        text_colors[1] = Color::from_rgb24(0xCCCCCC);

        Self {
            name: "Default".into(),
            author: "HexChat".into(),
            description: "Default theme".into(),
            version: "1.0".into(),

            bg_color: Color::from_rgb24(0xFFFFFF),
            fg_color: Color::from_rgb24(0x000000),
            selected_bg: Color::from_rgb24(0x4A90E2),
            selected_fg: Color::from_rgb24(0xFFFFFF),
            input_bg: Color::from_rgb24(0xF8F8F8),
            input_fg: Color::from_rgb24(0x000000),
            nicklist_bg: Color::from_rgb24(0xF5F5F5),
            nicklist_fg: Color::from_rgb24(0x000000),
            chanlist_bg: Color::from_rgb24(0xFFFFFF),
            chanlist_fg: Color::from_rgb24(0x000000),
            tree_bg: Color::from_rgb24(0xFFFFFF),
            tree_fg: Color::from_rgb24(0x000000),
            away_user: Color::from_rgb24(0x888888),
            separator: Color::from_rgb24(0xCCCCCC),

            text_colors,

            fonts: ThemeFonts {
                normal: "Monospace 9".into(),
                bold: "Monospace Bold 9".into(),
                italic: "Monospace Italic 9".into(),
            },

            border_width: 1,
            padding: 2,
        }
    }

    /// Dark variant layered over [`Theme::light_default`]; author, version,
    /// border width and padding are inherited.
    pub fn dark_default() -> Self {
        Self {
            name: "Default Dark".into(),
            description: "Modern dark theme for HexChat".into(),

            bg_color: Color::from_rgb24(0x1e1e1e),
            fg_color: Color::from_rgb24(0xf0f0f0),
            selected_bg: Color::from_rgb24(0x2d5aa0),
            selected_fg: Color::from_rgb24(0xffffff),
            input_bg: Color::from_rgb24(0x2a2a2a),
            input_fg: Color::from_rgb24(0xf0f0f0),
            nicklist_bg: Color::from_rgb24(0x252525),
            nicklist_fg: Color::from_rgb24(0xcccccc),
            chanlist_bg: Color::from_rgb24(0x1e1e1e),
            chanlist_fg: Color::from_rgb24(0xf0f0f0),
            tree_bg: Color::from_rgb24(0x1e1e1e),
            tree_fg: Color::from_rgb24(0xf0f0f0),
            away_user: Color::from_rgb24(0x666666),
            separator: Color::from_rgb24(0x404040),

            text_colors: palette(DARK_TEXT_COLORS),

            fonts: ThemeFonts {
                normal: "Monospace 10".into(),
                bold: "Monospace Bold 10".into(),
                italic: "Monospace Italic 10".into(),
            },

            ..Self::light_default()
        }
    }
}
