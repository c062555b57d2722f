//! Price formatting helpers over exact decimal amounts.
//!
//! Book prices and order totals are `rust_decimal::Decimal` end to end:
//! they come out of `NUMERIC` columns, line subtotals and totals are computed
//! with decimal multiplication, and only the display layer turns them into
//! dollar strings. No floats anywhere in the money path.

use rust_decimal::Decimal;

/// Format a decimal amount as a US dollar string with two decimal places.
///
/// ```
/// use rust_decimal::Decimal;
/// use dogear_core::format_usd;
///
/// assert_eq!(format_usd(&Decimal::new(1998, 2)), "$19.98");
/// assert_eq!(format_usd(&Decimal::new(5, 0)), "$5.00");
/// ```
#[must_use]
pub fn format_usd(amount: &Decimal) -> String {
    format!("${}", amount.round_dp(2).normalize_scale(2))
}

/// Extension methods used when rendering decimals in templates.
trait ScaleExt {
    fn normalize_scale(self, dp: u32) -> Self;
}

impl ScaleExt for Decimal {
    /// Rescale so "$5" renders as "$5.00" and "$19.980" as "$19.98".
    fn normalize_scale(mut self, dp: u32) -> Self {
        self.rescale(dp);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_two_places() {
        assert_eq!(format_usd(&Decimal::new(999, 2)), "$9.99");
        assert_eq!(format_usd(&Decimal::new(1998, 2)), "$19.98");
    }

    #[test]
    fn test_format_usd_pads_whole_dollars() {
        assert_eq!(format_usd(&Decimal::new(12, 0)), "$12.00");
    }

    #[test]
    fn test_format_usd_rounds_extra_precision() {
        let d: Decimal = "7.995".parse().unwrap();
        assert_eq!(format_usd(&d), "$8.00");
    }

    #[test]
    fn test_exact_arithmetic_example() {
        // 9.99 * 2 = 19.98 exactly, the classic float failure case
        let price: Decimal = "9.99".parse().unwrap();
        let total = price * Decimal::from(2);
        assert_eq!(format_usd(&total), "$19.98");
    }
}
