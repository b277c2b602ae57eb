use crate::tool::Category;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString, IntoEnumIterator};
use thiserror::Error;

/// How the outermost ring treats its outer edge. `Bounded` closes the radar
/// with a final arc; `Open` lets the last category bleed to the edge of the
/// available area, which also moves its label anchor (see `geom`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    #[default]
    Bounded,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBounds {
    pub inner: f64,
    pub outer: f64,
}

impl RingBounds {
    pub fn span(&self) -> f64 {
        self.outer - self.inner
    }

    pub fn midpoint(&self) -> f64 {
        (self.inner + self.outer) / 2.0
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RingError {
    #[error("ring radii must be non-negative and increase outward, got {0:?}")]
    NotAscending([f64; 4]),
    #[error("outermost ring radius must be positive")]
    Empty,
}

/// Nested ring bounds, one ring per category. Ring k's inner radius is ring
/// k-1's outer radius; the innermost ring starts at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RingTable {
    radii: [f64; 4],
}

impl RingTable {
    pub fn from_radii(radii: [f64; 4]) -> Result<Self, RingError> {
        if radii[3] <= 0.0 {
            return Err(RingError::Empty);
        }
        if radii[0] < 0.0 || radii.windows(2).any(|w| w[1] < w[0]) {
            return Err(RingError::NotAscending(radii));
        }
        Ok(Self { radii })
    }

    pub fn bounds(&self, category: Category) -> RingBounds {
        let i = category.as_index();
        RingBounds {
            inner: if i == 0 { 0.0 } else { self.radii[i - 1] },
            outer: self.radii[i],
        }
    }

    pub fn outer_radius(&self) -> f64 {
        self.radii[3]
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            radii: self.radii.map(|r| r * factor),
        }
    }

    /// Rings in category order, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, RingBounds)> + '_ {
        Category::iter().map(|c| (c, self.bounds(c)))
    }
}

impl Default for RingTable {
    /// Unit-radius ring fractions; scale by the available radius before use.
    fn default() -> Self {
        Self {
            radii: [0.26, 0.47, 0.74, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_nest_in_category_order() {
        let table = RingTable::from_radii([25.0, 45.0, 70.0, 95.0]).unwrap();

        let mut prev_outer = 0.0;
        for (_, bounds) in table.iter() {
            assert_eq!(bounds.inner, prev_outer);
            assert!(bounds.outer >= bounds.inner);
            prev_outer = bounds.outer;
        }
        assert_eq!(table.outer_radius(), 95.0);
        assert_eq!(table.bounds(Category::Trial).midpoint(), 35.0);
    }

    #[test]
    fn test_malformed_radii_rejected() {
        assert_eq!(
            RingTable::from_radii([25.0, 20.0, 70.0, 95.0]),
            Err(RingError::NotAscending([25.0, 20.0, 70.0, 95.0]))
        );
        assert_eq!(RingTable::from_radii([0.0, 0.0, 0.0, 0.0]), Err(RingError::Empty));
        assert_eq!(
            RingTable::from_radii([-1.0, 20.0, 70.0, 95.0]),
            Err(RingError::NotAscending([-1.0, 20.0, 70.0, 95.0]))
        );
    }

    #[test]
    fn test_scaled_preserves_fractions() {
        let table = RingTable::default().scaled(200.0);
        assert_eq!(table.outer_radius(), 200.0);
        assert_eq!(table.bounds(Category::Adopt).outer, 52.0);
    }

    #[test]
    fn test_extent_parses_case_insensitively() {
        assert_eq!("open".parse::<Extent>().unwrap(), Extent::Open);
        assert_eq!("Bounded".parse::<Extent>().unwrap(), Extent::Bounded);
        let from_json: Extent = serde_json::from_str("\"OPEN\"").unwrap();
        assert_eq!(from_json, Extent::Open);
    }
}
