use crate::config::{Config, LAKH_PER_CRORE};

const RANGE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq)]
pub struct PriceFormat {
    pub divisor: f64,
    pub currency_symbol: String,
    pub label: String,
}

impl Default for PriceFormat {
    fn default() -> PriceFormat {
        PriceFormat {
            divisor: LAKH_PER_CRORE,
            currency_symbol: "₹".to_string(),
            label: "Cr".to_string(),
        }
    }
}

/// Unit labels for sizes. A single size and a size range are labelled
/// differently by the listings, so both are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeUnits {
    pub single: String,
    pub range: String,
}

impl Default for SizeUnits {
    fn default() -> SizeUnits {
        SizeUnits {
            single: "sq ft".to_string(),
            range: "sq yard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formatter {
    pub price: PriceFormat,
    pub size: SizeUnits,
}

impl Formatter {
    pub fn from_config(config: &Config) -> Formatter {
        Formatter {
            price: PriceFormat {
                divisor: config.price_divisor,
                currency_symbol: config.currency_symbol.clone(),
                label: config.price_label.clone(),
            },
            size: SizeUnits {
                single: config.size_single_unit.clone(),
                range: config.size_range_unit.clone(),
            },
        }
    }

    /// Formats a raw price range (in lakh) as crore with two decimals.
    /// Unparseable sides are rendered as `NaN` instead of failing.
    pub fn format_price(&self, min: &str, max: &str) -> String {
        let min_price = parse_decimal_prefix(min) / self.price.divisor;
        let max_price = parse_decimal_prefix(max) / self.price.divisor;
        let symbol = &self.price.currency_symbol;

        if min_price == max_price {
            return format!("{}{} {}", symbol, fixed_2(min_price), self.price.label);
        }
        format!(
            "{}{}{}{}{} {}",
            symbol,
            fixed_2(min_price),
            RANGE_SEPARATOR,
            symbol,
            fixed_2(max_price),
            self.price.label
        )
    }

    pub fn format_size(&self, min: &str, max: &str) -> String {
        let min_size = parse_integer_prefix(min);
        let max_size = parse_integer_prefix(max);

        if min_size == max_size {
            return format!("{} {}", integer(min_size), self.size.single);
        }
        format!(
            "{}{}{} {}",
            integer(min_size),
            RANGE_SEPARATOR,
            integer(max_size),
            self.size.range
        )
    }
}

pub fn format_price(min: &str, max: &str) -> String {
    Formatter::default().format_price(min, max)
}

pub fn format_size(min: &str, max: &str) -> String {
    Formatter::default().format_size(min, max)
}

fn sign_len(s: &str) -> usize {
    match s.as_bytes().first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    }
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Reads the longest decimal number at the start of `input`, ignoring
/// anything after it. `NaN` if there is none.
pub fn parse_decimal_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let mut end = sign_len(s);

    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().unwrap_or(f64::NAN);
    }

    let int_digits = digits_len(&s[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if s[end..].starts_with('.') {
        frac_digits = digits_len(&s[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if s[end..].starts_with(['e', 'E']) {
        let exp_start = end + 1;
        let exp_sign = sign_len(&s[exp_start..]);
        let exp_digits = digits_len(&s[exp_start + exp_sign..]);
        if exp_digits > 0 {
            end = exp_start + exp_sign + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Reads the leading integer of `input`, `NaN` if there is none.
pub fn parse_integer_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let sign = sign_len(s);
    let digits = digits_len(&s[sign..]);

    if digits == 0 {
        return f64::NAN;
    }
    s[..sign + digits].parse().unwrap_or(f64::NAN)
}

fn infinity(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}Infinity", sign)
}

// 1e21 and up print as "1e+21", like a browser does.
const EXPONENT_FROM: f64 = 1e21;

fn exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

fn fixed_2(value: f64) -> String {
    if value.is_infinite() {
        return infinity(value);
    }
    if value.abs() >= EXPONENT_FROM {
        return exponent(value);
    }
    // -0.0 prints as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

fn integer(value: f64) -> String {
    if value.is_infinite() {
        return infinity(value);
    }
    if value.abs() >= EXPONENT_FROM {
        return exponent(value);
    }
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}
