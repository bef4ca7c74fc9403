use std::fmt;
use std::ops::Index;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Moon {
    Io,
    Europa,
    Ganymede,
    Callisto,
}

impl Moon {
    /// Fixed iteration order. Later entries win when two moons share a column.
    pub(crate) const ALL: [Moon; 4] = [Moon::Io, Moon::Europa, Moon::Ganymede, Moon::Callisto];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Moon::Io => "Io",
            Moon::Europa => "Europa",
            Moon::Ganymede => "Ganymede",
            Moon::Callisto => "Callisto",
        }
    }

    pub(crate) fn symbol(self) -> char {
        '*'
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Moon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Projected x-offsets from Jupiter's centre, in Jupiter radii (positive = east).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Positions([f64; 4]);

impl Positions {
    pub(crate) fn new(xs: [f64; 4]) -> Self {
        Self(xs)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Moon, f64)> + '_ {
        Moon::ALL.iter().map(move |&m| (m, self.0[m.index()]))
    }
}

impl Index<Moon> for Positions {
    type Output = f64;

    fn index(&self, moon: Moon) -> &f64 {
        &self.0[moon.index()]
    }
}

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}
