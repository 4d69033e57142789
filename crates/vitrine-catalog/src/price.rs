#![forbid(unsafe_code)]

//! Rupee formatting and discount arithmetic.
//!
//! Prices are whole rupees. Amounts are rounded before display and grouped
//! the Indian way: the last three digits, then pairs (`₹12,34,567`).

/// Rupee sign.
pub const RUPEE: char = '₹';

/// Format an amount as rupees with Indian digit grouping and no decimals.
///
/// Non-finite amounts format as `₹0`.
///
/// ```
/// use vitrine_catalog::price::format_inr;
///
/// assert_eq!(format_inr(123456.0), "₹1,23,456");
/// assert_eq!(format_inr(999.0), "₹999");
/// ```
#[must_use]
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{RUPEE}0");
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}{RUPEE}{}", group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Rounded percentage off MRP. `0` when the MRP does not exceed the current
/// price or either value is not a finite number.
#[must_use]
pub fn discount_percent(current: f64, mrp: f64) -> u32 {
    if !current.is_finite() || !mrp.is_finite() || mrp <= current || mrp <= 0.0 {
        return 0;
    }
    let pct = ((mrp - current) / mrp * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Whether an MRP is present and above the current price.
#[must_use]
pub fn is_on_sale(current: f64, mrp: Option<f64>) -> bool {
    mrp.is_some_and(|mrp| mrp > current)
}

/// Discount badge text, e.g. `-18%`.
#[must_use]
pub fn format_discount(current: f64, mrp: f64) -> String {
    format!("-{}%", discount_percent(current, mrp))
}
