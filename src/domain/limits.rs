//! Column widths of the persisted schema, checked before anything reaches storage.

use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// `VARCHAR(255)` columns: customer name/email, product name, store name and id.
pub const NAME_MAX_CHARS: usize = 255;
/// `storefront_links.store_type`.
pub const STORE_TYPE_MAX_CHARS: usize = 100;
/// `NUMERIC(12, 2)`: two fractional digits, ten integer digits.
pub const MONEY_SCALE: i64 = 2;
pub const MONEY_INTEGER_DIGITS: u32 = 10;

/// Rejects `value` when it has more than `max` characters (Postgres counts characters, not bytes).
pub fn check_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Rejects amounts the money columns would round or overflow.
pub fn check_money(field: &str, amount: &BigDecimal) -> Result<(), DomainError> {
    let (_, scale) = amount.normalized().as_bigint_and_exponent();
    if scale > MONEY_SCALE {
        return Err(DomainError::InvalidInput(format!(
            "{} must have at most {} decimal places",
            field, MONEY_SCALE
        )));
    }
    if amount.abs() >= BigDecimal::from(10u64.pow(MONEY_INTEGER_DIGITS)) {
        return Err(DomainError::InvalidInput(format!(
            "{} must be below 10^{}",
            field, MONEY_INTEGER_DIGITS
        )));
    }
    Ok(())
}
