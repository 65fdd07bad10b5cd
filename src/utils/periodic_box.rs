use crate::math::{Point, Real, Vector, DIM};

/// The simulation box, with optional periodic boundaries along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PeriodicBox {
    /// The edge lengths of the box.
    pub lengths: Vector<Real>,
    /// Whether the boundary is periodic along each axis.
    pub periodic: [bool; DIM],
}

impl PeriodicBox {
    /// A box periodic along all three axes.
    pub fn new(lengths: Vector<Real>) -> Self {
        Self {
            lengths,
            periodic: [true; DIM],
        }
    }

    /// A box with the given periodicity per axis.
    pub fn with_periodicity(lengths: Vector<Real>, periodic: [bool; DIM]) -> Self {
        Self { lengths, periodic }
    }

    /// An unbounded, non-periodic space.
    pub fn open() -> Self {
        Self {
            lengths: Vector::repeat(Real::INFINITY),
            periodic: [false; DIM],
        }
    }

    /// The minimum-image vector pointing from `b` to `a`, i.e., `a - b` folded
    /// back into the box along every periodic axis.
    #[inline]
    pub fn minimum_image(&self, a: &Point<Real>, b: &Point<Real>) -> Vector<Real> {
        let mut d = a - b;

        for i in 0..DIM {
            if self.periodic[i] {
                let l = self.lengths[i];
                d[i] -= l * (d[i] / l).round();
            }
        }

        d
    }

    /// Folds `point` back into the primary cell along every periodic axis.
    pub fn fold(&self, point: &Point<Real>) -> Point<Real> {
        let mut folded = *point;

        for i in 0..DIM {
            if self.periodic[i] {
                let l = self.lengths[i];
                folded[i] -= l * (folded[i] / l).floor();
            }
        }

        folded
    }
}

impl Default for PeriodicBox {
    fn default() -> Self {
        Self::open()
    }
}
