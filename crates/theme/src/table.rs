use crate::color::Color;

pub const TEXT_COLOR_COUNT: usize = 32;
pub const COL_MARK_FG: usize = 32;
pub const COL_MARK_BG: usize = 33;
pub const COL_FG: usize = 34;
pub const COL_BG: usize = 35;
pub const COL_MARKER: usize = 36;
pub const COL_NEW_DATA: usize = 37;
pub const COL_HILIGHT: usize = 38;
pub const COL_NEW_MSG: usize = 39;
pub const COL_AWAY: usize = 40;
pub const COL_SPELL: usize = 41;
pub const COLOR_TABLE_LEN: usize = 42;

/// Device-specific pixel value handed out by a colormap.
pub type Pixel = u32;

/// A color after device allocation. Best-match allocation may snap the RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub color: Color,
    pub pixel: Pixel,
}

/// Allocation context of a drawing surface.
pub trait Colormap {
    fn alloc_color(&self, color: Color) -> ResolvedColor;
}

/// A live drawing surface. Its generation changes whenever previously
/// allocated pixels stop being valid (new display, new visual).
pub trait Surface {
    fn generation(&self) -> u64;

    /// `None` when the surface cannot hand out an allocation context yet.
    fn colormap(&self) -> Option<&dyn Colormap>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub color: Color,
    pub pixel: Option<Pixel>,
}

impl TableEntry {
    const fn unresolved(color: Color) -> Self {
        Self { color, pixel: None }
    }
}

/// Indexed color table read by the chat text renderer.
///
/// Slots 0..=31 hold the mIRC text palette, 32..=36 the renderer specials and
/// 37..=41 GUI accents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: [TableEntry; COLOR_TABLE_LEN],
    allocated_generation: Option<u64>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self {
            entries: DEFAULT_PALETTE
                .map(|(red, green, blue)| TableEntry::unresolved(Color::new(red, green, blue))),
            allocated_generation: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TableEntry> {
        self.entries.get(index)
    }

    /// Logical color of a slot.
    ///
    /// # Panics
    /// Panics when `index >= COLOR_TABLE_LEN`, like slice indexing.
    pub fn color(&self, index: usize) -> Color {
        self.entries[index].color
    }

    pub fn pixel(&self, index: usize) -> Option<Pixel> {
        self.entries.get(index).and_then(|entry| entry.pixel)
    }

    /// Overwrites a slot's color. The slot's pixel becomes stale and is
    /// dropped until the next allocation.
    pub fn set(&mut self, index: usize, color: Color) {
        self.entries[index] = TableEntry::unresolved(color);
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &TableEntry)> {
        self.entries.iter().enumerate()
    }

    pub fn allocated_generation(&self) -> Option<u64> {
        self.allocated_generation
    }

    /// Resolves every slot against `surface` once per surface generation.
    /// Returns `true` when a resolution pass actually ran.
    pub fn allocate(&mut self, surface: &dyn Surface) -> bool {
        if self.allocated_generation == Some(surface.generation()) {
            return false;
        }
        self.reallocate(Some(surface))
    }

    /// Unconditionally resolves every slot. A missing surface, or one that
    /// yields no colormap, leaves the table untouched.
    pub fn reallocate(&mut self, surface: Option<&dyn Surface>) -> bool {
        let Some(surface) = surface else {
            return false;
        };
        let Some(colormap) = surface.colormap() else {
            tracing::debug!("surface has no colormap, skipping palette allocation");
            return false;
        };
        for entry in self.entries.iter_mut().rev() {
            let resolved = colormap.alloc_color(entry.color);
            *entry = TableEntry {
                color: resolved.color,
                pixel: Some(resolved.pixel),
            };
        }
        self.allocated_generation = Some(surface.generation());
        true
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

const fn base16(index: usize) -> (u16, u16, u16) {
    BASE_TEXT_PALETTE[index % 16]
}

const BASE_TEXT_PALETTE: [(u16, u16, u16); 16] = [
    (0xd3d3, 0xd7d7, 0xcfcf), // white
    (0x2e2e, 0x3434, 0x3636), // black
    (0x3434, 0x6565, 0xa4a4), // blue
    (0x4e4e, 0x9a9a, 0x0606), // green
    (0xcccc, 0x0000, 0x0000), // red
    (0x8f8f, 0x3939, 0x0202), // light red
    (0x5c5c, 0x3535, 0x6666), // purple
    (0xcece, 0x5c5c, 0x0000), // orange
    (0xc4c4, 0xa0a0, 0x0000), // yellow
    (0x7373, 0xd2d2, 0x1616), // light green
    (0x1111, 0xa8a8, 0x7979), // aqua
    (0x5858, 0xa1a1, 0x9d9d), // light aqua
    (0x5757, 0x7979, 0x9e9e), // light blue
    (0xa0d0, 0x42d4, 0x6562), // light purple
    (0x5555, 0x5757, 0x5353), // grey
    (0x8888, 0x8a8a, 0x8585), // light grey
];

const DEFAULT_PALETTE: [(u16, u16, u16); COLOR_TABLE_LEN] = [
    base16(0),
    base16(1),
    base16(2),
    base16(3),
    base16(4),
    base16(5),
    base16(6),
    base16(7),
    base16(8),
    base16(9),
    base16(10),
    base16(11),
    base16(12),
    base16(13),
    base16(14),
    base16(15),
    base16(16),
    base16(17),
    base16(18),
    base16(19),
    base16(20),
    base16(21),
    base16(22),
    base16(23),
    base16(24),
    base16(25),
    base16(26),
    base16(27),
    base16(28),
    base16(29),
    base16(30),
    base16(31),
    (0xd3d3, 0xd7d7, 0xcfcf), // mark foreground
    (0x2020, 0x4a4a, 0x8787), // mark background
    (0x2512, 0x29e8, 0x2b85), // foreground
    (0xfae0, 0xfae0, 0xf8c4), // background
    (0x8f8f, 0x3939, 0x0202), // marker line
    (0x3434, 0x6565, 0xa4a4), // tab: new data
    (0x4e4e, 0x9a9a, 0x0606), // tab: nick mentioned
    (0xcece, 0x5c5c, 0x0000), // tab: new message
    (0x8888, 0x8a8a, 0x8585), // away user
    (0xa4a4, 0x0000, 0x0000), // spell checker
];
