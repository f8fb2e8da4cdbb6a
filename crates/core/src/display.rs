//! Derived display strings for dishes.
//!
//! The board shows a dish's weight and price as text. For half-portion
//! dishes both become `full/half` pairs, which requires reading a leading
//! number out of the free-text weight. All of that derivation is pure and
//! lives here; the templates only ever print the resulting strings.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Dish;

/// The two strings a menu row renders for one dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDisplay {
    /// Weight column, e.g. `350г` or `350/175г` or `1 шт/½`.
    pub weight_text: String,
    /// Price column without a currency sign, e.g. `300` or `300/150`.
    pub price_text: String,
}

/// Derive the weight and price texts for a dish.
///
/// Plain dishes pass through unchanged. Half-portion dishes render
/// `full/half`: the weight halves numerically when it starts with a number
/// (`350г` becomes `350/175г`, rounding halves up), otherwise the marker
/// form `<weight>/½` is used. The price half rounds to a whole number with
/// ties away from zero.
#[must_use]
pub fn format_dish(dish: &Dish) -> DishDisplay {
    if !dish.half_portion {
        return DishDisplay {
            weight_text: dish.weight.clone(),
            price_text: format_price(dish.price),
        };
    }

    let weight_text = match split_leading_number(&dish.weight) {
        Some((number, suffix)) => format!("{number}/{}{suffix}", number.div_ceil(2)),
        None => format!("{}/½", dish.weight),
    };

    let half_price = (dish.price / Decimal::TWO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    DishDisplay {
        weight_text,
        price_text: format!("{}/{}", format_price(dish.price), format_price(half_price)),
    }
}

/// Split a weight like `350г` into `(350, "г")`.
///
/// Succeeds only when the string starts with ASCII digits and the remaining
/// suffix contains no whitespace, so `1 шт` stays whole rather than being
/// misread as one gram.
fn split_leading_number(weight: &str) -> Option<(u64, &str)> {
    let digits_end = weight
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(weight.len());
    if digits_end == 0 {
        return None;
    }
    let (digits, suffix) = weight.split_at(digits_end);
    if suffix.chars().any(char::is_whitespace) {
        return None;
    }
    let number = digits.parse::<u64>().ok()?;
    Some((number, suffix))
}

/// Decimal as display text, without trailing fractional zeros.
fn format_price(price: Decimal) -> String {
    price.normalize().to_string()
}
