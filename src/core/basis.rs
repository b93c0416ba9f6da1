//! Standard spline bases and recognition of basis matrices.
//!
//! `Basis` requests name one of five standard bases when they can, which is
//! both shorter and exact. The canonical matrices live in statics so callers
//! passing them straight back are recognized by address; anything else is
//! compared by value.

use crate::util::{BasisMatrix, Error, Result};

/// Bezier basis.
pub static BEZIER_BASIS: BasisMatrix = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Uniform B-spline basis.
pub static B_SPLINE_BASIS: BasisMatrix = [
    [-1.0 / 6.0, 0.5, -0.5, 1.0 / 6.0],
    [0.5, -1.0, 0.5, 0.0],
    [-0.5, 0.0, 0.5, 0.0],
    [1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0, 0.0],
];

/// Catmull-Rom basis.
pub static CATMULL_ROM_BASIS: BasisMatrix = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];

/// Hermite basis.
pub static HERMITE_BASIS: BasisMatrix = [
    [2.0, 1.0, -2.0, 1.0],
    [-3.0, -2.0, 3.0, -1.0],
    [0.0, 1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Power basis.
pub static POWER_BASIS: BasisMatrix = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// The five bases with a standard RIB name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandardBasis {
    Bezier,
    BSpline,
    CatmullRom,
    Hermite,
    Power,
}

impl StandardBasis {
    /// All standard bases, in recognition order.
    pub const ALL: [StandardBasis; 5] = [
        StandardBasis::Bezier,
        StandardBasis::BSpline,
        StandardBasis::CatmullRom,
        StandardBasis::Hermite,
        StandardBasis::Power,
    ];

    /// RIB name of this basis.
    pub const fn name(self) -> &'static str {
        match self {
            StandardBasis::Bezier => "bezier",
            StandardBasis::BSpline => "b-spline",
            StandardBasis::CatmullRom => "catmull-rom",
            StandardBasis::Hermite => "hermite",
            StandardBasis::Power => "power",
        }
    }

    /// The canonical matrix instance.
    pub fn matrix(self) -> &'static BasisMatrix {
        match self {
            StandardBasis::Bezier => &BEZIER_BASIS,
            StandardBasis::BSpline => &B_SPLINE_BASIS,
            StandardBasis::CatmullRom => &CATMULL_ROM_BASIS,
            StandardBasis::Hermite => &HERMITE_BASIS,
            StandardBasis::Power => &POWER_BASIS,
        }
    }

    /// Look up a basis by RIB name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| Error::BadToken(name.to_string()))
    }

    /// Identify a basis matrix, if it is one of the standard ones.
    ///
    /// Checks the canonical instances by address first, then by value.
    pub fn recognize(basis: &BasisMatrix) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| std::ptr::eq(b.matrix(), basis))
            .or_else(|| Self::ALL.into_iter().find(|b| b.matrix() == basis))
    }
}
