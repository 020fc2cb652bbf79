// File: crates/progress-core/src/palette.rs
// Summary: Categorical palettes and the stable user -> colour assignment.

use indexmap::IndexMap;
use serde::Deserialize;
use skia_safe as skia;

const CLASSIC: [u32; 15] = [
    0xFFF8766D, 0xFFA3A500, 0xFF00BF7D, 0xFF00B0F6, 0xFFE76BF3,
    0xFFFA8867, 0xFFAB8B00, 0xFF39B185, 0xFF00ACC1, 0xFFC77CFF,
    0xFF8E9A80, 0xFFBC3C29, 0xFFFFA931, 0xFFB3DE69, 0xFF66C2A5,
];

const TABLEAU10: [u32; 10] = [
    0xFF4E79A7, 0xFFF28E2C, 0xFFE15759, 0xFF76B7B2, 0xFF59A14F,
    0xFFEDC949, 0xFFAF7AA1, 0xFFFF9DA7, 0xFF9C755F, 0xFFBAB0AB,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// 15-colour palette of the goal-tracking chart.
    #[default]
    Classic,
    Tableau10,
}

impl PaletteKind {
    pub fn colors(&self) -> Vec<skia::Color> {
        let argb: &[u32] = match self {
            PaletteKind::Classic => &CLASSIC,
            PaletteKind::Tableau10 => &TABLEAU10,
        };
        argb.iter().map(|&c| skia::Color::new(c)).collect()
    }
}

/// User -> colour, assigned in user order and cycling through the palette.
/// Shared by line, point and legend marks of the same user.
#[derive(Clone, Debug)]
pub struct ColorAssignment {
    colors: IndexMap<String, skia::Color>,
}

impl ColorAssignment {
    pub fn new<'a>(users: impl IntoIterator<Item = &'a str>, kind: PaletteKind) -> Self {
        let palette = kind.colors();
        let mut colors = IndexMap::new();
        for user in users {
            let next = palette[colors.len() % palette.len()];
            colors.entry(user.to_string()).or_insert(next);
        }
        Self { colors }
    }

    pub fn get(&self, user: &str) -> Option<skia::Color> {
        self.colors.get(user).copied()
    }

    pub fn len(&self) -> usize { self.colors.len() }
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}

/// `#rrggbb` for SVG/CSS output.
pub fn to_hex(c: skia::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}
