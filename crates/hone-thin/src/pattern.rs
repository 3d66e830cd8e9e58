//! Removal pattern table: the 3×3 structuring templates that decide
//! whether a boundary pixel may be deleted.
//!
//! A pixel survives thinning unless its sampled neighborhood matches at
//! least one template (hit-or-miss). The table holds four edge templates
//! (a background band on one side, an object band on the other) and the
//! four 90° rotations of an L-shaped corner template. Templates are
//! expressed in terms of object/background *roles*, so the same grids
//! serve both polarities; the polarity decides which numeric level plays
//! the object role when the neighborhood is sampled.

use crate::neighborhood::{CENTER, Neighborhood};
use crate::types::Level;

/// One position of a removal template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// The sampled level must be the object level.
    Object,
    /// The sampled level must be the background level.
    Background,
    /// No constraint on the sampled level.
    Any,
}

impl Symbol {
    /// Whether a sampled level satisfies this template position.
    #[must_use]
    pub const fn admits(self, level: Level) -> bool {
        match self {
            Self::Object => matches!(level, Level::Object),
            Self::Background => matches!(level, Level::Background),
            Self::Any => true,
        }
    }
}

/// A 3×3 removal template in row-major order, center at index 4.
///
/// The center of every template is [`Symbol::Object`]: only object
/// pixels are ever tested for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    symbols: [Symbol; 9],
}

impl Template {
    const fn new(symbols: [Symbol; 9]) -> Self {
        Self { symbols }
    }

    /// The template positions in row-major order.
    #[must_use]
    pub const fn symbols(&self) -> &[Symbol; 9] {
        &self.symbols
    }

    /// Whether a sampled neighborhood matches this template.
    ///
    /// Every non-[`Any`](Symbol::Any) position must equal the sampled
    /// level exactly.
    #[must_use]
    pub fn matches(&self, neighborhood: &Neighborhood) -> bool {
        self.symbols
            .iter()
            .zip(neighborhood.levels())
            .all(|(symbol, level)| symbol.admits(*level))
    }
}

/// An ordered, immutable set of the eight removal templates for one
/// polarity.
///
/// The templates are OR-combined: any single match makes the
/// neighborhood removable, so the order has no effect on the result.
#[derive(Debug, Clone, Copy)]
pub struct PatternSet {
    templates: [Template; 8],
}

impl PatternSet {
    /// The templates in table order.
    #[must_use]
    pub const fn templates(&self) -> &[Template; 8] {
        &self.templates
    }

    /// Whether any template in the set matches the sampled neighborhood.
    ///
    /// Short-circuits on the first match.
    #[must_use]
    pub fn matches(&self, neighborhood: &Neighborhood) -> bool {
        self.templates.iter().any(|t| t.matches(neighborhood))
    }
}

const O: Symbol = Symbol::Object;
const B: Symbol = Symbol::Background;
const A: Symbol = Symbol::Any;

#[rustfmt::skip]
const REMOVAL_TEMPLATES: [Template; 8] = [
    // Edge templates: a background band on one side, an object band
    // opposite it.
    Template::new([B, B, B,
                   A, O, A,
                   O, O, O]), // background to the north
    Template::new([B, A, O,
                   B, O, O,
                   B, A, O]), // background to the west
    Template::new([O, A, B,
                   O, O, B,
                   O, A, B]), // background to the east
    Template::new([O, O, O,
                   A, O, A,
                   B, B, B]), // background to the south
    // Corner templates: the four rotations of the L-shaped corner.
    Template::new([A, B, B,
                   O, O, B,
                   A, O, A]), // background to the north-east
    Template::new([A, O, A,
                   O, O, B,
                   A, B, B]), // background to the south-east
    Template::new([A, O, A,
                   B, O, O,
                   B, B, A]), // background to the south-west
    Template::new([B, B, A,
                   B, O, O,
                   A, O, A]), // background to the north-west
];

// Every template's center must be an object position.
const _: () = {
    let mut i = 0;
    while i < REMOVAL_TEMPLATES.len() {
        assert!(matches!(REMOVAL_TEMPLATES[i].symbols[CENTER], Symbol::Object));
        i += 1;
    }
};

/// Removal patterns for [`Polarity::DarkObject`](crate::Polarity::DarkObject).
pub static DARK_OBJECT_PATTERNS: PatternSet = PatternSet {
    templates: REMOVAL_TEMPLATES,
};

/// Removal patterns for [`Polarity::LightObject`](crate::Polarity::LightObject).
pub static LIGHT_OBJECT_PATTERNS: PatternSet = PatternSet {
    templates: REMOVAL_TEMPLATES,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Polarity;

    fn neighborhood(levels: [Level; 9]) -> Neighborhood {
        Neighborhood::from_levels(levels)
    }

    const OBJ: Level = Level::Object;
    const BCK: Level = Level::Background;

    #[test]
    fn every_template_has_an_object_center() {
        for polarity in [Polarity::DarkObject, Polarity::LightObject] {
            for template in polarity.patterns().templates() {
                assert_eq!(template.symbols()[CENTER], Symbol::Object);
            }
        }
    }

    #[test]
    fn north_edge_template_matches_literal_neighborhood() {
        // Background band on top, object band on the bottom; the two
        // side positions are unconstrained.
        let removable = neighborhood([
            BCK, BCK, BCK, //
            OBJ, OBJ, BCK, //
            OBJ, OBJ, OBJ,
        ]);
        assert!(DARK_OBJECT_PATTERNS.templates()[0].matches(&removable));
        assert!(DARK_OBJECT_PATTERNS.matches(&removable));
    }

    #[test]
    fn any_positions_impose_no_constraint() {
        // Both settings of the north template's two side positions match.
        for west in [OBJ, BCK] {
            for east in [OBJ, BCK] {
                let n = neighborhood([
                    BCK, BCK, BCK, //
                    west, OBJ, east, //
                    OBJ, OBJ, OBJ,
                ]);
                assert!(
                    DARK_OBJECT_PATTERNS.templates()[0].matches(&n),
                    "template should match regardless of the ANY positions",
                );
            }
        }
    }

    #[test]
    fn solid_object_neighborhood_matches_nothing() {
        let solid = neighborhood([OBJ; 9]);
        assert!(!DARK_OBJECT_PATTERNS.matches(&solid));
        assert!(!LIGHT_OBJECT_PATTERNS.matches(&solid));
    }

    #[test]
    fn isolated_pixel_matches_nothing() {
        // A lone object pixel with background all around: every
        // template demands at least two object neighbors.
        let mut levels = [BCK; 9];
        levels[CENTER] = OBJ;
        assert!(!DARK_OBJECT_PATTERNS.matches(&neighborhood(levels)));
    }

    #[test]
    fn one_pixel_line_interior_matches_nothing() {
        // Interior of a single-pixel-wide horizontal line: background
        // above and below, object left and right. Removing it would
        // break the line.
        let line = neighborhood([
            BCK, BCK, BCK, //
            OBJ, OBJ, OBJ, //
            BCK, BCK, BCK,
        ]);
        assert!(!DARK_OBJECT_PATTERNS.matches(&line));
    }

    #[test]
    fn corner_template_matches_block_corner() {
        // Top-left pixel of a 2×2 block: background to the north and
        // west, object to the east, south, and south-east.
        let corner = neighborhood([
            BCK, BCK, BCK, //
            BCK, OBJ, OBJ, //
            BCK, OBJ, OBJ,
        ]);
        assert!(DARK_OBJECT_PATTERNS.matches(&corner));
    }

    #[test]
    fn both_polarities_share_the_same_grids() {
        for (dark, light) in DARK_OBJECT_PATTERNS
            .templates()
            .iter()
            .zip(LIGHT_OBJECT_PATTERNS.templates())
        {
            assert_eq!(dark, light);
        }
    }
}
