//! Error diffusion kernel definitions.
//!
//! Kernels are integer-only. Each tap carries its own [`Weight`] rule so a
//! kernel can mix shift-based and ratio-based arithmetic; the rounding of
//! each rule is part of the algorithm's output.

/// How a tap scales the quantization error of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// `(d >> shift) * mul`, with an arithmetic (sign-preserving) shift.
    Shift {
        /// Right shift applied first
        shift: u32,
        /// Multiplier applied to the shifted error
        mul: i32,
    },
    /// `d * num / den`, truncating toward zero.
    Ratio {
        /// Numerator
        num: i32,
        /// Denominator
        den: i32,
    },
}

impl Weight {
    /// Scale a single channel error.
    #[inline(always)]
    pub const fn apply(self, d: i32) -> i32 {
        match self {
            Weight::Shift { shift, mul } => (d >> shift) * mul,
            Weight::Ratio { num, den } => d * num / den,
        }
    }

    /// Nominal fraction of the error this tap carries, as `(num, den)`.
    pub const fn fraction(self) -> (i32, i32) {
        match self {
            Weight::Shift { shift, mul } => (mul, 1 << shift),
            Weight::Ratio { num, den } => (num, den),
        }
    }
}

/// An error diffusion kernel.
///
/// Entries are `(dx, dy, weight)` with `dx` given for a left-to-right row;
/// right-to-left rows mirror it. `dy` is never negative and `dy == 0`
/// entries always point forward.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub entries: &'static [(i32, usize, Weight)],

    /// Maximum dy value in entries.
    ///
    /// Error rows needed: `max_dy + 1`.
    pub max_dy: usize,
}

impl Kernel {
    /// Number of error rows this kernel needs.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.max_dy + 1
    }

    /// Sum of the nominal tap fractions, reduced to lowest terms.
    ///
    /// `(1, 1)` means the kernel propagates all of the error (before
    /// per-tap truncation).
    pub fn total_weight(&self) -> (i32, i32) {
        self.entries
            .iter()
            .fold((0, 1), |(acc_num, acc_den), &(_, _, weight)| {
                let (num, den) = weight.fraction();
                let sum_num = acc_num * den + num * acc_den;
                let sum_den = acc_den * den;
                let g = gcd(sum_num, sum_den);
                (sum_num / g, sum_den / g)
            })
    }
}

fn gcd(mut a: i32, mut b: i32) -> i32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs().max(1)
}

/// Floyd-Steinberg kernel.
///
/// ```text
///        X   7
///    3   5   1      (/16)
/// ```
///
/// Every tap shifts first, so errors below 16 in magnitude are absorbed.
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, Weight::Shift { shift: 4, mul: 7 }),
        (-1, 1, Weight::Shift { shift: 4, mul: 3 }),
        (0, 1, Weight::Shift { shift: 4, mul: 5 }),
        (1, 1, Weight::Shift { shift: 4, mul: 1 }),
    ],
    max_dy: 1,
};

/// Filter-Lite (Sierra 2-4A) kernel.
///
/// ```text
///        X   2
///    1   1          (/4)
/// ```
pub const FILTER_LITE: Kernel = Kernel {
    entries: &[
        (1, 0, Weight::Shift { shift: 1, mul: 1 }),
        (-1, 1, Weight::Shift { shift: 2, mul: 1 }),
        (0, 1, Weight::Shift { shift: 2, mul: 1 }),
    ],
    max_dy: 1,
};

/// Stevenson-Arce kernel, spread over two rows ahead.
///
/// ```text
///                X   32  12
///    12  26  30  16  12
///     5  12  26  12   5     (/200)
/// ```
///
/// The commonly published table has no `(+2, 0)` tap and sums to 188/200,
/// leaking 6% of the error per pixel. The extra 12/200 tap two pixels ahead
/// makes it conserve error like the other kernels.
pub const STEVENSON_ARCE: Kernel = Kernel {
    entries: &[
        (1, 0, Weight::Ratio { num: 32, den: 200 }),
        (2, 0, Weight::Ratio { num: 12, den: 200 }),
        (-2, 1, Weight::Ratio { num: 12, den: 200 }),
        (-1, 1, Weight::Ratio { num: 26, den: 200 }),
        (0, 1, Weight::Ratio { num: 30, den: 200 }),
        (1, 1, Weight::Ratio { num: 16, den: 200 }),
        (2, 1, Weight::Ratio { num: 12, den: 200 }),
        (-2, 2, Weight::Ratio { num: 5, den: 200 }),
        (-1, 2, Weight::Ratio { num: 12, den: 200 }),
        (0, 2, Weight::Ratio { num: 26, den: 200 }),
        (1, 2, Weight::Ratio { num: 12, den: 200 }),
        (2, 2, Weight::Ratio { num: 5, den: 200 }),
    ],
    max_dy: 2,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernels_propagate_everything() {
        assert_eq!(FLOYD_STEINBERG.total_weight(), (1, 1));
        assert_eq!(FILTER_LITE.total_weight(), (1, 1));
        assert_eq!(STEVENSON_ARCE.total_weight(), (1, 1));
    }

    #[test]
    fn test_stevenson_arce_published_taps_sum_to_188() {
        let published: u32 = STEVENSON_ARCE
            .entries
            .iter()
            .filter(|&&(dx, dy, _)| (dx, dy) != (2, 0))
            .map(|&(_, _, w)| match w {
                Weight::Ratio { num, den: 200 } => num as u32,
                other => panic!("unexpected weight {:?}", other),
            })
            .sum();
        assert_eq!(published, 188);
        assert_eq!(STEVENSON_ARCE.entries.len(), 12);
    }

    #[test]
    fn test_max_dy_matches_entries() {
        for kernel in [FLOYD_STEINBERG, FILTER_LITE, STEVENSON_ARCE] {
            let max = kernel.entries.iter().map(|&(_, dy, _)| dy).max().unwrap();
            assert_eq!(max, kernel.max_dy);
            // same-row taps must point forward
            assert!(kernel
                .entries
                .iter()
                .all(|&(dx, dy, _)| dy > 0 || dx > 0));
        }
    }

    #[test]
    fn test_shift_is_arithmetic() {
        let w = Weight::Shift { shift: 4, mul: 7 };
        assert_eq!(w.apply(32), 14);
        assert_eq!(w.apply(15), 0);
        // -1 >> 4 == -1
        assert_eq!(w.apply(-1), -7);
        assert_eq!(w.apply(-32), -14);
    }

    #[test]
    fn test_ratio_truncates_toward_zero() {
        let w = Weight::Ratio { num: 32, den: 200 };
        assert_eq!(w.apply(100), 16);
        assert_eq!(w.apply(7), 1);
        assert_eq!(w.apply(-7), -1);
        assert_eq!(w.apply(-6), 0);
    }
}
