//! The abstract algebra contract the interpolated object must satisfy
//! (spec.md §6). The engine never inspects an object's structure; it only
//! ever adds, subtracts and scales them.

use std::ops::{Add, Mul, Sub};

/// A two-component scalar mask used to combine the independent horizontal
/// and vertical halves of an ambivalent (paired) query (spec.md §4.7).
///
/// `PairMask::X` keeps the x-half of a blended object and zeroes the y-half;
/// `PairMask::Y` does the reverse. What "keeping a half" means is left to the
/// object's own `Mul<PairMask>` implementation, same as the rest of this
/// trait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairMask(pub f64, pub f64);

impl PairMask {
    /// Selects the horizontal half of a paired query.
    pub const X: PairMask = PairMask(1.0, 0.0);
    /// Selects the vertical half of a paired query.
    pub const Y: PairMask = PairMask(0.0, 1.0);
}

/// The object type the engine interpolates. Implementors are plain data:
/// side-effect-free addition, subtraction, scalar and pair-mask
/// multiplication, and a well-defined zero such that `a.zero_like() * 1.0 +
/// a == a`.
pub trait Algebra:
    Sized + Clone + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> + Mul<PairMask, Output = Self>
{
    /// The additive identity "shaped like" `self`. For most implementors
    /// this is simply `self.clone() - self.clone()`.
    fn zero_like(&self) -> Self;
}
