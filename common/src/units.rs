use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;

use crate::chain::WalletError;

/// Base units per display unit (wei per ether).
pub const BASE_UNITS_PER_COIN: u64 = 1_000_000_000_000_000_000;

/// Parse a user-supplied decimal amount string into base units.
///
/// No validation happens while the user types; this is where a malformed
/// amount finally surfaces, at submission time.
pub fn parse_amount(input: &str) -> Result<U256, WalletError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WalletError::InvalidAmount(input.to_string()));
    }
    parse_ether(trimmed).map_err(|_| WalletError::InvalidAmount(input.to_string()))
}

/// Format a base-unit amount as an exact decimal string.
///
/// Whole multiples of 10^18 render without a fractional part ("1", not
/// "1.000000000000000000"); fractional amounts keep only significant
/// digits ("0.5").
pub fn format_amount(base_units: U256) -> String {
    let divisor = U256::from(BASE_UNITS_PER_COIN);
    let whole = base_units / divisor;
    let frac = base_units % divisor;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>18}", frac.to_string());
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(units: u64) -> U256 {
        U256::from(units)
    }

    #[test]
    fn parse_whole_amount() {
        assert_eq!(parse_amount("1").unwrap(), base(BASE_UNITS_PER_COIN));
        assert_eq!(parse_amount("2").unwrap(), base(2 * BASE_UNITS_PER_COIN));
    }

    #[test]
    fn parse_fractional_amount() {
        assert_eq!(parse_amount("0.5").unwrap(), base(500_000_000_000_000_000));
        assert_eq!(parse_amount("0.000000000000000001").unwrap(), base(1));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_amount(" 1 ").unwrap(), base(BASE_UNITS_PER_COIN));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "  ", "abc", "1.2.3", "1,5"] {
            assert!(
                matches!(parse_amount(bad), Err(WalletError::InvalidAmount(_))),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn format_exact_for_whole_multiples() {
        // 0xde0b6b3a7640000 wei is exactly one display unit.
        let one = U256::from_str_radix("de0b6b3a7640000", 16).unwrap();
        assert_eq!(format_amount(one), "1");
        assert_eq!(format_amount(base(3 * BASE_UNITS_PER_COIN)), "3");
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_amount(base(1_500_000_000_000_000_000)), "1.5");
        assert_eq!(format_amount(base(500_000_000_000_000_000)), "0.5");
    }

    #[test]
    fn format_smallest_unit() {
        assert_eq!(format_amount(base(1)), "0.000000000000000001");
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_amount(U256::ZERO), "0");
    }

    #[test]
    fn parse_format_round_trip() {
        for text in ["1", "2.5", "0.001"] {
            assert_eq!(format_amount(parse_amount(text).unwrap()), text);
        }
    }
}
