use crate::model::Positions;
use std::fmt;

pub(crate) const DEFAULT_WIDTH: usize = 150;
pub(crate) const DEFAULT_GLYPH: &str = "[====JUPITER====]";
pub(crate) const DEFAULT_SCALE: f64 = 0.2;
pub(crate) const DEFAULT_MAGNIFICATION: f64 = 10.0;

/// Fixed parameters mapping Jupiter radii onto terminal columns.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Layout {
    pub(crate) width: usize,
    pub(crate) planet_glyph: String,
    pub(crate) scale: f64,
    pub(crate) magnification: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            planet_glyph: DEFAULT_GLYPH.to_string(),
            scale: DEFAULT_SCALE,
            magnification: DEFAULT_MAGNIFICATION,
        }
    }
}

impl Layout {
    fn glyph_len(&self) -> usize {
        self.planet_glyph.chars().count()
    }

    /// First column of the planet glyph. Negative only if the glyph is wider than the line.
    pub(crate) fn planet_start(&self) -> i64 {
        (self.width / 2) as i64 - (self.glyph_len() / 2) as i64
    }

    /// Column that a moon at offset zero lands on.
    pub(crate) fn centre(&self) -> i64 {
        self.planet_start() + (self.glyph_len() / 2) as i64
    }

    /// Column offset from the centre, or `None` for a position that cannot be placed.
    fn scaled_offset(&self, position: f64) -> Option<i64> {
        let v = (position * self.scale * self.magnification).floor();
        // `as` saturates, so huge values stay huge and fail the bounds check.
        v.is_finite().then_some(v as i64)
    }
}

/// One tick's picture: moon names above, planet and moon symbols below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Scene {
    label: String,
    symbols: String,
}

impl Scene {
    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn symbols(&self) -> &str {
        &self.symbols
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.label, self.symbols)
    }
}

fn in_line(col: i64, width: usize) -> bool {
    col >= 0 && col < width as i64
}

/// Writes `s` starting at `x`, dropping any character that falls outside the line.
fn put_str(line: &mut [char], x: i64, s: &[char]) {
    for (i, &ch) in s.iter().enumerate() {
        let col = x.saturating_add(i as i64);
        if in_line(col, line.len()) {
            line[col as usize] = ch;
        }
    }
}

/// Lays the moons out around a centred planet glyph.
///
/// Moons are drawn in [`crate::model::Moon::ALL`] order and overwrite whatever
/// is already in their column, planet included. A symbol outside the line is
/// dropped. A name is drawn only when it fits whole, so a moon can show its
/// symbol without its label.
pub(crate) fn render(positions: &Positions, layout: &Layout) -> Scene {
    let width = layout.width;
    let mut label = vec![' '; width];
    let mut symbols = vec![' '; width];

    let glyph: Vec<char> = layout.planet_glyph.chars().collect();
    put_str(&mut symbols, layout.planet_start(), &glyph);

    let centre = layout.centre();
    for (moon, position) in positions.iter() {
        let Some(offset) = layout.scaled_offset(position) else {
            continue;
        };
        let col = centre.saturating_add(offset);
        if in_line(col, width) {
            symbols[col as usize] = moon.symbol();
        }

        let name: Vec<char> = moon.name().chars().collect();
        let name_col = col.saturating_sub((name.len() / 2) as i64);
        if name_col >= 0 && name_col < width as i64 - name.len() as i64 {
            put_str(&mut label, name_col, &name);
        }
    }

    Scene {
        label: label.into_iter().collect(),
        symbols: symbols.into_iter().collect(),
    }
}
