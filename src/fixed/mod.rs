//! Q-format fixed-point numbers.
//!
//! A [`Fixed<R, INT, FRAC>`](Fixed) is an integer of type `R` read as
//! `repr / 2^FRAC`. `INT` counts the integer bits, sign bit included, so
//! `INT + FRAC` must equal the width of `R`; this and every format rule below
//! is checked when the code is monomorphized, so a misuse fails the build.
//!
//! Conversions between formats are always spelled out:
//!
//! - [`promote`](Fixed::promote): lossless, same sign, at least as many
//!   integer and fractional bits;
//! - [`narrow`](Fixed::narrow): drops fractional bits with an arithmetic
//!   right shift (floor);
//! - [`wrap`](Fixed::wrap): modular truncation, for phases and other values
//!   that are meant to wrap;
//! - [`saturate`](Fixed::saturate): clamps into the target's range.
//!
//! Same-format `+` and `-` saturate. Wrapping arithmetic only exists under its
//! own name ([`wrapping_add`](Fixed::wrapping_add)).

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use fixed::types::I64F64;

mod repr;

pub use repr::Repr;

/// A fixed-point number with `INT` integer and `FRAC` fractional bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Fixed<R: Repr, const INT: u32, const FRAC: u32>(R);

pub type U0_8 = Fixed<u8, 0, 8>;
pub type S1_7 = Fixed<i8, 1, 7>;
pub type U0_16 = Fixed<u16, 0, 16>;
pub type U1_15 = Fixed<u16, 1, 15>;
pub type U8_8 = Fixed<u16, 8, 8>;
pub type S1_15 = Fixed<i16, 1, 15>;
pub type U0_32 = Fixed<u32, 0, 32>;
pub type U8_24 = Fixed<u32, 8, 24>;
pub type U16_16 = Fixed<u32, 16, 16>;
pub type S1_31 = Fixed<i32, 1, 31>;
pub type S2_30 = Fixed<i32, 2, 30>;
pub type S16_16 = Fixed<i32, 16, 16>;
pub type S17_15 = Fixed<i32, 17, 15>;
pub type U0_64 = Fixed<u64, 0, 64>;

const fn max_u32(a: u32, b: u32) -> u32 {
    if a > b { a } else { b }
}

impl<R: Repr, const INT: u32, const FRAC: u32> Fixed<R, INT, FRAC> {
    pub const MIN: Self = Self(R::MIN);
    pub const MAX: Self = Self(R::MAX);
    pub const ZERO: Self = Self(R::ZERO);

    /// Builds a value from its raw representation.
    pub const fn of_repr(repr: R) -> Self {
        const {
            assert!(
                INT + FRAC == R::BITS,
                "fixed-point format width must match its representation"
            )
        };
        Self(repr)
    }

    pub const fn repr(self) -> R {
        self.0
    }

    /// Converts from floating point, rounding toward negative infinity and
    /// saturating out-of-range inputs. NaN maps to zero, and magnitudes
    /// below 2^-64 count as zero.
    pub fn from_f32(x: f32) -> Self {
        let scaled = match I64F64::checked_from_num(x) {
            Some(exact) => exact.to_bits() >> (64 - FRAC),
            None if x.is_nan() => 0,
            None if x > 0.0 => i128::MAX,
            None => i128::MIN,
        };
        Self::of_repr(R::saturate_i128(scaled))
    }

    /// 1.0, or [`Self::MAX`] for formats without room for it.
    pub fn one() -> Self {
        Self::of_repr(R::saturate_i128(1i128 << FRAC))
    }

    /// The nearest `f32`.
    pub fn to_f32(self) -> f32 {
        const { assert!(INT < 64, "formats with 64 integer bits have no float conversion") };
        I64F64::from_bits(self.0.to_i128() << (64 - FRAC)).to_num::<f32>()
    }

    /// Lossless conversion to a format with at least as many integer and
    /// fractional bits and the same signedness.
    pub fn promote<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        const {
            assert!(R::SIGNED == R2::SIGNED, "promotion cannot change signedness");
            assert!(I2 >= INT, "promotion would lose integer bits: use saturate or wrap");
            assert!(F2 >= FRAC, "promotion would lose fractional bits: use narrow");
        };
        Fixed::of_repr(R2::wrap_i128(self.0.to_i128() << (F2 - FRAC)))
    }

    /// Drops fractional bits, rounding toward negative infinity.
    pub fn narrow<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        const {
            assert!(R::SIGNED == R2::SIGNED, "narrowing cannot change signedness");
            assert!(I2 >= INT, "narrowing would lose integer bits: use saturate or wrap");
            assert!(F2 <= FRAC, "this conversion adds fractional bits: use promote");
        };
        Fixed::of_repr(R2::wrap_i128(self.0.to_i128() >> (FRAC - F2)))
    }

    /// Modular conversion to any format: the value is rescaled to `F2`
    /// fractional bits (flooring if bits are dropped) and truncated to the
    /// target width.
    pub fn wrap<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        Fixed::of_repr(R2::wrap_i128(Self::rescale(self.0.to_i128(), F2)))
    }

    /// Clamping conversion to any format: the value is rescaled to `F2`
    /// fractional bits (flooring if bits are dropped) and clamped to the
    /// target's `[MIN, MAX]`.
    pub fn saturate<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        Fixed::of_repr(R2::saturate_i128(Self::rescale(self.0.to_i128(), F2)))
    }

    fn rescale(x: i128, frac: u32) -> i128 {
        if frac >= FRAC {
            x << (frac - FRAC)
        } else {
            x >> (FRAC - frac)
        }
    }

    /// Moves the binary point without touching the representation: the value
    /// is multiplied by `2^(FRAC - F2)`.
    pub fn shift_point<const I2: u32, const F2: u32>(self) -> Fixed<R, I2, F2> {
        Fixed::of_repr(self.0)
    }

    pub fn add_sat(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn sub_sat(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub fn wrapping_add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    pub fn wrapping_sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }

    /// Adds operands of different formats in the widest overlapping format.
    /// The output format must be `(max(INT), max(FRAC))`; overflow saturates.
    pub fn add_wide<R2: Repr, const I2: u32, const F2: u32, RO: Repr, const IO: u32, const FO: u32>(
        self,
        rhs: Fixed<R2, I2, F2>,
    ) -> Fixed<RO, IO, FO> {
        const {
            assert!(R::SIGNED == R2::SIGNED && R::SIGNED == RO::SIGNED, "mixed signedness");
            assert!(IO == max_u32(INT, I2), "sum must have max(INT) integer bits");
            assert!(FO == max_u32(FRAC, F2), "sum must have max(FRAC) fractional bits");
        };
        let a = self.0.to_i128() << (FO - FRAC);
        let b = rhs.0.to_i128() << (FO - F2);
        Fixed::of_repr(RO::saturate_i128(a + b))
    }

    /// Subtracts operands of different formats, see [`add_wide`](Self::add_wide).
    pub fn sub_wide<R2: Repr, const I2: u32, const F2: u32, RO: Repr, const IO: u32, const FO: u32>(
        self,
        rhs: Fixed<R2, I2, F2>,
    ) -> Fixed<RO, IO, FO> {
        const {
            assert!(R::SIGNED == R2::SIGNED && R::SIGNED == RO::SIGNED, "mixed signedness");
            assert!(IO == max_u32(INT, I2), "difference must have max(INT) integer bits");
            assert!(FO == max_u32(FRAC, F2), "difference must have max(FRAC) fractional bits");
        };
        let a = self.0.to_i128() << (FO - FRAC);
        let b = rhs.0.to_i128() << (FO - F2);
        Fixed::of_repr(RO::saturate_i128(a - b))
    }

    /// Exact product. The output has `INT + I2` integer and `FRAC + F2`
    /// fractional bits: the exact sum for unsigned operands, and one bit of
    /// sign-extension headroom above the `INT + I2 - 1` bits strictly needed
    /// for signed ones (so `-1 * -1` does not overflow).
    pub fn mul<R2: Repr, const I2: u32, const F2: u32, RO: Repr, const IO: u32, const FO: u32>(
        self,
        rhs: Fixed<R2, I2, F2>,
    ) -> Fixed<RO, IO, FO> {
        const {
            assert!(R::SIGNED == R2::SIGNED && R::SIGNED == RO::SIGNED, "mixed signedness");
            assert!(IO == INT + I2, "product must have INT + I2 integer bits");
            assert!(FO == FRAC + F2, "product must have FRAC + F2 fractional bits");
        };
        Fixed::of_repr(RO::wrap_i128(self.0.to_i128() * rhs.0.to_i128()))
    }

    /// Multiplies by a gain of any format and narrows the product back to
    /// this format, flooring and saturating.
    pub fn scale<R2: Repr, const I2: u32, const F2: u32>(self, by: Fixed<R2, I2, F2>) -> Self {
        Self(R::saturate_i128((self.0.to_i128() * by.0.to_i128()) >> F2))
    }

    /// Quotient. The dividend is widened and pre-shifted by the divisor's
    /// fractional width, so the output keeps `FRAC` fractional bits and gains
    /// `F2` integer bits. Division by zero saturates toward the dividend's
    /// sign.
    pub fn div<R2: Repr, const I2: u32, const F2: u32, RO: Repr, const IO: u32, const FO: u32>(
        self,
        rhs: Fixed<R2, I2, F2>,
    ) -> Fixed<RO, IO, FO> {
        const {
            assert!(R::SIGNED == R2::SIGNED && R::SIGNED == RO::SIGNED, "mixed signedness");
            assert!(FO == FRAC, "quotient keeps the dividend's fractional bits");
            assert!(IO == INT + F2, "quotient needs INT + F2 integer bits");
        };
        let n = self.0.to_i128();
        let d = rhs.0.to_i128();
        if d == 0 {
            return if n < 0 { Fixed::MIN } else { Fixed::MAX };
        }
        Fixed::of_repr(RO::saturate_i128((n << F2) / d))
    }

    /// Divides by an integer, truncating toward zero.
    pub fn div_int(self, n: i32) -> Self {
        if n == 0 {
            return if self.0 < R::ZERO { Self::MIN } else { Self::MAX };
        }
        Self(R::saturate_i128(self.0.to_i128() / i128::from(n)))
    }

    /// Bias remap from unsigned `[0, 2^INT)` to signed `[-2^INT, 2^INT)` of
    /// the same width: `0` maps to `MIN`, the midpoint to zero.
    pub fn to_signed_scale<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        const {
            assert!(!R::SIGNED && R2::SIGNED, "bias remap goes from unsigned to signed");
            assert!(I2 == INT + 1, "the signed format carries one more integer bit");
        };
        let bias = 1i128 << (R::BITS - 1);
        Fixed::of_repr(R2::wrap_i128(self.0.to_i128() - bias))
    }

    /// Inverse of [`to_signed_scale`](Self::to_signed_scale).
    pub fn to_unsigned_scale<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        const {
            assert!(R::SIGNED && !R2::SIGNED, "bias remap goes from signed to unsigned");
            assert!(I2 + 1 == INT, "the unsigned format carries one less integer bit");
        };
        let bias = 1i128 << (R::BITS - 1);
        Fixed::of_repr(R2::wrap_i128(self.0.to_i128() + bias))
    }

    /// Value-preserving move from unsigned to signed; the lowest fractional
    /// bit is dropped to make room for the sign.
    pub fn to_signed<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        const {
            assert!(!R::SIGNED && R2::SIGNED, "conversion goes from unsigned to signed");
            assert!(I2 == INT + 1 && F2 + 1 == FRAC, "sign bit is taken from the fraction");
        };
        Fixed::of_repr(R2::wrap_i128(self.0.to_i128() >> 1))
    }

    /// Value-preserving move from signed to unsigned for non-negative values;
    /// negative values saturate to zero.
    pub fn to_unsigned<R2: Repr, const I2: u32, const F2: u32>(self) -> Fixed<R2, I2, F2> {
        const {
            assert!(R::SIGNED && !R2::SIGNED, "conversion goes from signed to unsigned");
            assert!(I2 + 1 == INT && F2 == FRAC + 1, "sign bit is given to the fraction");
        };
        Fixed::of_repr(R2::saturate_i128(self.0.to_i128() << 1))
    }

    /// Largest integer not greater than the value.
    pub fn floor(self) -> Self {
        Self(R::wrap_i128((self.0.to_i128() >> FRAC) << FRAC))
    }

    /// `self - self.floor()`, always non-negative.
    pub fn frac(self) -> Self {
        let mask = (1i128 << FRAC) - 1;
        Self(R::wrap_i128(self.0.to_i128() & mask))
    }

    /// Integer part, rounded toward negative infinity.
    pub fn integral(self) -> i64 {
        (self.0.to_i128() >> FRAC) as i64
    }

    pub fn abs(self) -> Self {
        Self(R::saturate_i128(self.0.to_i128().abs()))
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> Add for Fixed<R, INT, FRAC> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_sat(rhs)
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> Sub for Fixed<R, INT, FRAC> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.sub_sat(rhs)
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> AddAssign for Fixed<R, INT, FRAC> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_sat(rhs);
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> SubAssign for Fixed<R, INT, FRAC> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.sub_sat(rhs);
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> Neg for Fixed<R, INT, FRAC> {
    type Output = Self;

    fn neg(self) -> Self {
        const { assert!(R::SIGNED, "negation is only defined on signed formats") };
        Self(R::saturate_i128(-self.0.to_i128()))
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> fmt::Debug for Fixed<R, INT, FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if R::SIGNED { 's' } else { 'u' };
        write!(f, "{sign}{INT}_{FRAC}({})", self.to_f32())
    }
}

impl<R: Repr, const INT: u32, const FRAC: u32> fmt::Display for Fixed<R, INT, FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_saturates_where_unrepresentable() {
        assert_eq!(S17_15::one().to_f32(), 1.0);
        assert_eq!(U8_24::one().repr(), 1 << 24);
        assert_eq!(S1_15::one(), S1_15::MAX);
        assert_eq!(U0_32::one(), U0_32::MAX);
    }

    #[test]
    fn promote_then_narrow_round_trips_every_s1_15() {
        for raw in i16::MIN..=i16::MAX {
            let x = S1_15::of_repr(raw);
            let wide: S17_15 = x.promote();
            let wider: Fixed<i64, 17, 47> = wide.promote();
            let back: S17_15 = wider.narrow();
            assert_eq!(back, wide);
            assert_eq!(back.saturate::<i16, 1, 15>(), x, "round trip changed {raw}");
        }
    }

    #[test]
    fn promote_then_narrow_round_trips_every_u0_16() {
        for raw in u16::MIN..=u16::MAX {
            let x = U0_16::of_repr(raw);
            let wide: U0_32 = x.promote();
            let back: U0_16 = wide.narrow();
            assert_eq!(back.repr(), raw);
        }
    }

    #[test]
    fn add_sat_is_bounded_and_exact_without_overflow() {
        for a in i8::MIN..=i8::MAX {
            for b in i8::MIN..=i8::MAX {
                let x = S1_7::of_repr(a);
                let y = S1_7::of_repr(b);
                let sum = x.add_sat(y);
                assert!(sum >= S1_7::MIN && sum <= S1_7::MAX);
                let exact = i16::from(a) + i16::from(b);
                if (i16::from(i8::MIN)..=i16::from(i8::MAX)).contains(&exact) {
                    assert_eq!(i16::from(sum.repr()), exact);
                } else if exact > 0 {
                    assert_eq!(sum, S1_7::MAX);
                } else {
                    assert_eq!(sum, S1_7::MIN);
                }
            }
        }
    }

    #[test]
    fn unsigned_sub_sat_clamps_at_zero() {
        for a in u8::MIN..=u8::MAX {
            for b in u8::MIN..=u8::MAX {
                let diff = U0_8::of_repr(a).sub_sat(U0_8::of_repr(b));
                assert_eq!(diff.repr(), a.saturating_sub(b));
            }
        }
    }

    #[test]
    fn operators_saturate() {
        let near_one = S1_15::from_f32(0.75);
        assert_eq!(near_one + near_one, S1_15::MAX);
        assert_eq!(-near_one - near_one, S1_15::MIN);
        assert_eq!(-S1_15::MIN, S1_15::MAX);
    }

    #[test]
    fn wrapping_add_wraps_phase() {
        let phase = U0_32::MAX;
        assert_eq!(phase.wrapping_add(U0_32::of_repr(1)), U0_32::ZERO);
        let half = U0_32::from_f32(0.5);
        assert_eq!(half.wrapping_add(half).wrapping_add(half), half);
    }

    #[test]
    fn add_wide_promotes_to_common_format() {
        let a = S1_15::from_f32(0.5);
        let b = S17_15::from_f32(100.25);
        let sum: S17_15 = a.add_wide(b);
        assert_eq!(sum.to_f32(), 100.75);

        let p = U0_16::from_f32(0.25);
        let q = U8_8::from_f32(3.5);
        let r: Fixed<u32, 8, 24> = q.promote();
        let total: U8_24 = p.add_wide(r);
        assert_eq!(total.to_f32(), 3.75);
    }

    #[test]
    fn signed_product_keeps_headroom() {
        let minus_one = S1_15::MIN;
        let square: S2_30 = minus_one.mul(minus_one);
        assert_eq!(square.to_f32(), 1.0);

        let half = S1_15::from_f32(0.5);
        let neg_half = S1_15::from_f32(-0.5);
        let product: S2_30 = half.mul(neg_half);
        assert_eq!(product.to_f32(), -0.25);
    }

    #[test]
    fn unsigned_product_is_exact() {
        let a = U0_16::of_repr(0xffff);
        let b = U0_16::of_repr(0x1234);
        let product: U0_32 = a.mul(b);
        assert_eq!(product.repr(), 0xffff * 0x1234);
    }

    #[test]
    fn scale_narrows_back_with_saturation() {
        let x = S1_15::from_f32(0.5);
        assert_eq!(x.scale(U0_16::from_f32(0.5)).to_f32(), 0.25);
        assert_eq!(x.scale(S17_15::from_f32(4.0)), S1_15::MAX);
        assert_eq!((-x).scale(S17_15::from_f32(4.0)), S1_15::MIN);
    }

    #[test]
    fn division_pre_shifts_dividend() {
        let a = U0_16::from_f32(0.25);
        let b = U0_16::from_f32(0.5);
        let q: U16_16 = a.div(b);
        assert_eq!(q.to_f32(), 0.5);

        let small = U0_16::of_repr(1);
        let big: U16_16 = U0_16::from_f32(0.5).div(small);
        assert_eq!(big.to_f32(), 32768.0);

        let zero: U16_16 = a.div(U0_16::ZERO);
        assert_eq!(zero, U16_16::MAX);
    }

    #[test]
    fn narrow_floors_toward_negative_infinity() {
        let tiny = S17_15::of_repr(-1);
        let coarse: Fixed<i32, 24, 8> = tiny.narrow();
        assert_eq!(coarse.repr(), -1);
        let positive = S17_15::of_repr(127);
        let coarse: Fixed<i32, 24, 8> = positive.narrow();
        assert_eq!(coarse.repr(), 0);
    }

    #[test]
    fn wrap_is_modular() {
        let x = S1_31::from_f32(-0.25);
        let phase: U0_32 = x.wrap();
        assert_eq!(phase.to_f32(), 0.75);

        let big = S17_15::from_f32(2.5);
        let phase: U0_32 = big.wrap();
        assert_eq!(phase.to_f32(), 0.5);
    }

    #[test]
    fn saturate_clamps_into_narrower_format() {
        assert_eq!(S17_15::from_f32(3.0).saturate::<i16, 1, 15>(), S1_15::MAX);
        assert_eq!(S17_15::from_f32(-3.0).saturate::<i16, 1, 15>(), S1_15::MIN);
        assert_eq!(S17_15::from_f32(0.5).saturate::<i16, 1, 15>().to_f32(), 0.5);
    }

    #[test]
    fn bias_remap_round_trips() {
        assert_eq!(U0_16::ZERO.to_signed_scale::<i16, 1, 15>(), S1_15::MIN);
        assert_eq!(U0_16::of_repr(0x8000).to_signed_scale::<i16, 1, 15>(), S1_15::ZERO);
        assert_eq!(U0_16::MAX.to_signed_scale::<i16, 1, 15>(), S1_15::MAX);
        for raw in i16::MIN..=i16::MAX {
            let x = S1_15::of_repr(raw);
            let u: U0_16 = x.to_unsigned_scale();
            assert_eq!(u.to_signed_scale::<i16, 1, 15>(), x);
        }
    }

    #[test]
    fn sign_moves_preserve_value() {
        let x = U0_16::from_f32(0.75);
        let s: S1_15 = x.to_signed();
        assert_eq!(s.to_f32(), 0.75);
        let back: U0_16 = s.to_unsigned();
        assert_eq!(back.to_f32(), 0.75);
        let negative: U0_16 = S1_15::from_f32(-0.5).to_unsigned();
        assert_eq!(negative, U0_16::ZERO);
    }

    #[test]
    fn floor_and_frac_split_value() {
        let x = S16_16::from_f32(-2.25);
        assert_eq!(x.floor().to_f32(), -3.0);
        assert_eq!(x.frac().to_f32(), 0.75);
        assert_eq!(x.integral(), -3);

        let p = U8_24::from_f32(5.5);
        assert_eq!(p.integral(), 5);
        assert_eq!(p.frac().to_f32(), 0.5);
    }

    #[test]
    fn shift_point_rescales_value() {
        let phase = U0_32::from_f32(0.5);
        let indexed: U8_24 = phase.shift_point();
        assert_eq!(indexed.to_f32(), 128.0);
    }

    #[test]
    fn float_conversion_saturates() {
        assert_eq!(S1_15::from_f32(1.0), S1_15::MAX);
        assert_eq!(S1_15::from_f32(-7.0), S1_15::MIN);
        assert_eq!(U0_16::from_f32(-0.1), U0_16::ZERO);
        assert_eq!(S1_15::from_f32(f32::NAN), S1_15::ZERO);
        assert_eq!(S17_15::from_f32(f32::INFINITY), S17_15::MAX);
        assert_eq!(S17_15::from_f32(f32::NEG_INFINITY), S17_15::MIN);
        assert_eq!(U0_64::from_f32(2.0), U0_64::MAX);
    }

    #[test]
    fn float_conversion_floors() {
        assert_eq!(S1_15::from_f32(-1.0 / 65536.0).repr(), -1);
        assert_eq!(S1_15::from_f32(1.0 / 65536.0).repr(), 0);
        assert_eq!(U0_32::from_f32(1.0 - f32::EPSILON).repr(), 0xFFFF_FE00);
        assert_eq!(S16_16::from_f32(-2.25).repr(), -2 * 65536 - 16384);
        assert_eq!(U0_64::from_f32(0.25).to_f32(), 0.25);
        assert_eq!(S1_31::from_f32(-0.5).to_f32(), -0.5);
    }

    #[test]
    fn debug_shows_format() {
        assert_eq!(format!("{:?}", S1_15::from_f32(0.5)), "s1_15(0.5)");
    }
}
