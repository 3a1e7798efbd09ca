//! The public query type (spec.md §4.7, §9 redesign note: "a tagged variant
//! `Query = Single(Location) | Paired(Location, Location)` at the engine
//! boundary is cleaner than embedding the paired case inside `Location`
//! itself").

use crate::location::Location;

/// Either an ordinary query location, or an "ambivalent" pair representing
/// two independent coordinates to be interpolated and then recombined with
/// the `(1,0)`/`(0,1)` pair-masks — the glyph-style two-axis interpolation
/// use case spec.md §4.7 and GLOSSARY describe.
#[derive(Debug, Clone)]
pub enum Query {
    Single(Location),
    Paired(Location, Location),
}

impl From<Location> for Query {
    fn from(location: Location) -> Self {
        Query::Single(location)
    }
}
