//! Numeric formatting shared by the result tables and descriptions.
//!
//! The three formats here reproduce the display conventions downstream
//! consumers expect byte-for-byte:
//! - [`significant_5`]: 5 significant digits with trailing zeros stripped,
//!   switching to scientific notation outside `1e-4 ..= 1e5` (the `%.5g`
//!   convention).
//! - [`fixed_5_trimmed`]: fixed 5 decimal places with trailing zeros and a
//!   trailing point stripped (used for mean and ordinal ranks).
//! - [`stat_or_scientific`]: fixed 5 decimals, switching to scientific
//!   notation below 0.001 (used for test statistics and p-values in
//!   descriptions).

/// Format with 5 significant digits, `%.5g` style.
///
/// Trailing zeros are trimmed and scientific notation is used when the
/// decimal exponent is below -4 or at least 5, with a sign and two-digit
/// exponent (`1.2345e-05`).
pub fn significant_5(value: f64) -> String {
    format_g(value, 5)
}

/// Fixed 5 decimal places with trailing zeros and a dangling point removed.
///
/// `2.50000` becomes `2.5`, `3.00000` becomes `3`.
pub fn fixed_5_trimmed(value: f64) -> String {
    let s = format!("{value:.5}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}

/// Fixed 5 decimals, or 5-decimal scientific notation below 0.001.
///
/// Matches the description-block convention for statistics and p-values.
pub fn stat_or_scientific(value: f64) -> String {
    if value < 0.001 {
        scientific_5(value)
    } else {
        format!("{value:.5}")
    }
}

/// Same switch as [`stat_or_scientific`] but on the magnitude, for signed
/// z-values in the control comparison table.
pub fn signed_or_scientific(value: f64) -> String {
    if value.abs() >= 0.001 {
        format!("{value:.5}")
    } else {
        scientific_5(value)
    }
}

/// 5-decimal scientific notation with a signed two-digit exponent.
fn scientific_5(value: f64) -> String {
    let s = format!("{value:.5e}");
    normalize_exponent(&s)
}

fn format_g(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= digits as i32 {
        // Scientific form with digits-1 decimals, trailing zeros trimmed
        // from the mantissa.
        let s = format!("{value:.*e}", digits - 1);
        let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        normalize_exponent(&format!("{mantissa}e{exp}"))
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        let s = format!("{value:.*}", decimals);
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        }
    }
}

/// Rewrite Rust's `e-5` exponent form into the signed two-digit `e-05` form.
fn normalize_exponent(s: &str) -> String {
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s.to_string();
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(rest) => ('-', rest),
        None => ('+', exp.trim_start_matches('+')),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
