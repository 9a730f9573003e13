use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when building a custom [`BracketTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The first tier would cover no income at all.
    #[error("first tier upper bound must be positive, got {0}")]
    EmptyFirstTier(i64),

    /// Upper bounds must be strictly ascending.
    #[error("tier {index} upper bound {upper} does not exceed previous bound {previous}")]
    NonAscendingBoundary { index: usize, upper: i64, previous: i64 },
}

/// One bounded tier of a [`BracketTable`].
///
/// The tier covers `[previous upper, upper)`, where the first tier starts
/// at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier<T> {
    pub upper: i64,
    pub value: T,
}

/// An ordered set of half-open income ranges covering `[0, ∞)`.
///
/// Lower bounds are implied by the previous tier's upper bound and the last
/// range is always the unbounded `top` value, so every lookup lands in
/// exactly one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTable<'a, T> {
    tiers: &'a [Tier<T>],
    top: T,
}

impl<'a, T> BracketTable<'a, T> {
    /// Builds a table without checking that bounds ascend.
    ///
    /// Intended for `static` tables whose bounds are covered by tests.
    pub const fn new_unchecked(
        tiers: &'a [Tier<T>],
        top: T,
    ) -> Self {
        Self { tiers, top }
    }

    /// Builds a table, rejecting bounds that do not strictly ascend from zero.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the first bound is not positive or a
    /// later bound does not exceed its predecessor.
    pub fn new(
        tiers: &'a [Tier<T>],
        top: T,
    ) -> Result<Self, BracketTableError> {
        let mut previous = 0;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.upper <= previous {
                return Err(if index == 0 {
                    BracketTableError::EmptyFirstTier(tier.upper)
                } else {
                    BracketTableError::NonAscendingBoundary {
                        index,
                        upper: tier.upper,
                        previous,
                    }
                });
            }
            previous = tier.upper;
        }
        Ok(Self { tiers, top })
    }

    /// Returns the value of the range containing `amount`.
    ///
    /// For non-negative amounts this is the unique range with
    /// `min <= amount < max`. Negative amounts fall into the first range.
    pub fn lookup(
        &self,
        amount: Decimal,
    ) -> &T {
        self.tiers
            .iter()
            .find(|tier| amount < Decimal::from(tier.upper))
            .map_or(&self.top, |tier| &tier.value)
    }

    /// Iterates over `(min, max, value)` for every range; `max` is `None`
    /// for the unbounded top range.
    pub fn ranges(&self) -> impl Iterator<Item = (i64, Option<i64>, &T)> {
        let mut lower = 0;
        let top_min = self.tiers.last().map_or(0, |tier| tier.upper);
        self.tiers
            .iter()
            .map(move |tier| {
                let min = lower;
                lower = tier.upper;
                (min, Some(tier.upper), &tier.value)
            })
            .chain(std::iter::once((top_min, None, &self.top)))
    }

    /// Number of ranges, including the unbounded top range.
    pub fn len(&self) -> usize {
        self.tiers.len() + 1
    }

    /// Always `false`; a table has at least its top range.
    pub fn is_empty(&self) -> bool {
        false
    }
}
