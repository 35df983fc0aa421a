// THEORY:
// Colors are the only per-point attribute that survives aggregation. A cluster
// does not remember which member had which color at the summary level; it keeps
// a histogram (`ColorCounts`) that downstream renderers turn into donut segments.
//
// The palette is closed and small, so the histogram is a fixed array indexed by
// the enum discriminant. Iteration order is the enum order, which keeps share and
// offset calculations reproducible from one pass to the next.

use crate::error::ClusterError;
use std::fmt;
use std::str::FromStr;

pub const COLOR_COUNT: usize = 3;

/// The supported color tags, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    Red,
    Yellow,
    Green,
}

impl Color {
    pub const ALL: [Color; COLOR_COUNT] = [Color::Red, Color::Yellow, Color::Green];

    fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Yellow => 1,
            Color::Green => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClusterError::UnknownColor(s.to_string()))
    }
}

/// Member count per color tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorCounts {
    counts: [usize; COLOR_COUNT],
}

/// One donut segment: the slice of a cluster taken up by a single color.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorShare {
    pub color: Color,
    pub count: usize,
    /// Share of the cluster total, in percent (0.0-100.0).
    pub percentage: f64,
    /// Sum of the percentages of every color before this one.
    pub offset: f64,
}

impl ColorCounts {
    /// Counts for a single member of the given color.
    pub fn single(color: Color) -> Self {
        let mut counts = Self::default();
        counts.add(color, 1);
        counts
    }

    pub fn get(&self, color: Color) -> usize {
        self.counts[color.index()]
    }

    pub fn add(&mut self, color: Color, n: usize) {
        self.counts[color.index()] += n;
    }

    /// Element-wise sum with another histogram.
    pub fn merge(&mut self, other: &ColorCounts) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero entries in canonical color order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, usize)> + '_ {
        Color::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|&(_, n)| n > 0)
    }

    /// Donut segments for every non-zero color. An empty histogram has no segments.
    pub fn shares(&self) -> Vec<ColorShare> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut offset = 0.0;
        self.iter()
            .map(|(color, count)| {
                let percentage = count as f64 / total as f64 * 100.0;
                let share = ColorShare {
                    color,
                    count,
                    percentage,
                    offset,
                };
                offset += percentage;
                share
            })
            .collect()
    }
}

impl FromIterator<Color> for ColorCounts {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut counts = Self::default();
        for color in iter {
            counts.add(color, 1);
        }
        counts
    }
}
