//! Machine integers that can back a fixed-point format.

use std::fmt;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
}

/// An 8/16/32/64-bit integer used as the raw representation of a
/// [`Fixed`](super::Fixed) value. Its signedness is the signedness of the
/// format.
///
/// Every conversion goes through `i128`, which holds any representation and
/// any intermediate product whose result format fits in 64 bits. Overflowing
/// results are either truncated ([`wrap_i128`]) or clamped
/// ([`saturate_i128`]), never implicitly one or the other.
///
/// [`wrap_i128`]: Repr::wrap_i128
/// [`saturate_i128`]: Repr::saturate_i128
pub trait Repr: Copy + Eq + Ord + Default + Hash + fmt::Debug + sealed::Sealed {
    const BITS: u32;
    const SIGNED: bool;
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;

    fn to_i128(self) -> i128;

    /// Keeps the low `BITS` bits of `x` (two's complement truncation).
    fn wrap_i128(x: i128) -> Self;

    /// Clamps `x` to `[MIN, MAX]`.
    fn saturate_i128(x: i128) -> Self;

    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_repr {
    ($($t:ty => $signed:expr),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Repr for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = $signed;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;

            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn wrap_i128(x: i128) -> Self {
                x as $t
            }

            #[inline]
            fn saturate_i128(x: i128) -> Self {
                x.clamp(<$t>::MIN as i128, <$t>::MAX as i128) as $t
            }

            #[inline]
            fn saturating_add(self, rhs: Self) -> Self {
                <$t>::saturating_add(self, rhs)
            }

            #[inline]
            fn saturating_sub(self, rhs: Self) -> Self {
                <$t>::saturating_sub(self, rhs)
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }
        }
    )*};
}

impl_repr! {
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
}
