use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Points earned on a single exam against its maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Points {
    maximum: i64,
    achieved: Decimal,
}

impl Points {
    #[must_use]
    pub const fn new(maximum: i64, achieved: Decimal) -> Self {
        Self { maximum, achieved }
    }

    #[must_use]
    pub const fn maximum(&self) -> i64 {
        self.maximum
    }

    #[must_use]
    pub const fn achieved(&self) -> Decimal {
        self.achieved
    }

    /// Achieved points as a percentage of the maximum, clamped to `0..=100`.
    ///
    /// `None` when the maximum is not positive.
    #[must_use]
    pub fn percent(&self) -> Option<Decimal> {
        if self.maximum <= 0 {
            return None;
        }

        // Clamp the ratio first; scaling an unbounded score can overflow.
        let ratio = self
            .achieved
            .checked_div(Decimal::from(self.maximum))?
            .clamp(Decimal::ZERO, Decimal::ONE);

        Some(ratio * dec!(100))
    }
}
