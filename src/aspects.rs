//! Angular aspects between pairs of bodies

use crate::coordinates::{angular_separation, EclipticCoordinates};
use crate::planetlib::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five major aspects, in matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Matching priority: a pair takes the first kind within orb
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact separation in degrees
    pub fn angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maximum deviation from exact, in degrees, per aspect kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTable {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            conjunction: 8.0,
            sextile: 6.0,
            square: 8.0,
            trine: 8.0,
            opposition: 8.0,
        }
    }
}

impl OrbTable {
    pub fn orb(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }

    /// Each orb with its kind, in priority order
    pub fn entries(&self) -> impl Iterator<Item = (AspectKind, f64)> + '_ {
        AspectKind::ALL.iter().map(move |&kind| (kind, self.orb(kind)))
    }

    /// First aspect kind (in priority order) whose orb admits `separation`,
    /// along with the deviation from exact
    pub fn classify(&self, separation: f64) -> Option<(AspectKind, f64)> {
        self.entries().find_map(|(kind, tolerance)| {
            let orb = (separation - kind.angle()).abs();
            (orb <= tolerance).then_some((kind, orb))
        })
    }
}

/// One aspect between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    /// Deviation from the exact angle in degrees, never negative
    pub orb: f64,
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (orb {:.2}°)",
            self.body_a, self.kind, self.body_b, self.orb
        )
    }
}

/// Pairwise aspect search over a set of positions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AspectAnalyzer {
    orbs: OrbTable,
}

impl AspectAnalyzer {
    pub fn new(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Aspect between two longitudes, if any
    pub fn between(&self, longitude_a: f64, longitude_b: f64) -> Option<(AspectKind, f64)> {
        self.orbs.classify(angular_separation(longitude_a, longitude_b))
    }

    /// Every unordered pair with an aspect, at most one per pair.
    ///
    /// Pairs follow the caller's ordering: for positions `[a, b, c]` the
    /// candidates are `(a, b)`, `(a, c)`, `(b, c)`.
    pub fn aspects<I>(&self, positions: I) -> Vec<Aspect>
    where
        I: IntoIterator<Item = (Body, EclipticCoordinates)>,
    {
        let positions: Vec<_> = positions.into_iter().collect();
        let mut found = Vec::new();

        for (i, (body_a, pos_a)) in positions.iter().enumerate() {
            for (body_b, pos_b) in &positions[i + 1..] {
                if let Some((kind, orb)) = self.between(pos_a.longitude, pos_b.longitude) {
                    found.push(Aspect {
                        body_a: *body_a,
                        body_b: *body_b,
                        kind,
                        orb,
                    });
                }
            }
        }
        found
    }
}
