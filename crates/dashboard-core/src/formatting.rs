/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let fixed = format!("{:.prec$}", value.abs(), prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 && fixed.bytes().any(|b| b != b'0' && b != b'.') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an amount in the reference currency with two decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56),  "$1,234.56");
/// assert_eq!(format_currency(0.0),      "$0.00");
/// assert_eq!(format_currency(-9.99),    "$-9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_number(amount, 2))
}

/// Format the headline total: rounded to whole units with separators.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_metric;
///
/// assert_eq!(format_metric(12345.6), "$12,346");
/// assert_eq!(format_metric(0.0), "$0");
/// ```
pub fn format_metric(amount: f64) -> String {
    format!("${}", format_number(amount.round(), 0))
}

/// Two-significant-digit label with an SI suffix, used on chart bars.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_compact;
///
/// assert_eq!(format_compact(1234.0), "1.2k");
/// assert_eq!(format_compact(45_000.0), "45k");
/// assert_eq!(format_compact(1_500_000.0), "1.5M");
/// assert_eq!(format_compact(200.0), "200");
/// ```
pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];

    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round first so a value like 999_999 carries into the next unit.
    let rounded = round_significant(value, 2);
    let (scaled, suffix) = UNITS
        .iter()
        .find(|(factor, _)| rounded.abs() >= *factor)
        .map(|(factor, suffix)| (rounded / factor, *suffix))
        .unwrap_or((rounded, ""));

    let decimals = (2 - integer_digits(scaled)).max(0) as usize;
    format!("{:.*}{}", decimals, scaled, suffix)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Number of digits left of the decimal point (`<= 0` below one).
fn integer_digits(value: f64) -> i32 {
    value.abs().log10().floor() as i32 + 1
}

fn round_significant(value: f64, digits: i32) -> f64 {
    let magnitude = 10_f64.powi(integer_digits(value) - digits);
    (value / magnitude).round() * magnitude
}

/// Insert commas every three digits from the right of a digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
