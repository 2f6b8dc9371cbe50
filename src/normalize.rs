use chrono::NaiveDate;

/// Extracts a calendar date from a raw spreadsheet cell.
///
/// Cells often carry trailing detail after the date (e.g. `"2022/01/03 -13"`
/// where `-13` is an embedded sequence number); only the first
/// whitespace-separated token is considered. The token must be strictly
/// `YYYY/MM/DD` with zero-padded month and day. Anything else - blanks,
/// malformed shapes, impossible calendar dates - yields `None` so the caller
/// can drop the row.
pub fn extract_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let token = trimmed.split_whitespace().next()?;
    let bytes = token.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'/' || bytes[7] != b'/' {
        return None;
    }

    let year: i32 = parse_digits(&token[0..4])?;
    let month: u32 = parse_digits(&token[5..7])?;
    let day: u32 = parse_digits(&token[8..10])?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_digits<N: std::str::FromStr>(s: &str) -> Option<N> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Normalizes a raw amount cell to a number.
///
/// Accepts values with comma thousands separators (`"1,000,000"`) as well as
/// plain numerics. Blank or unparsable cells become `0.0` - spreadsheet
/// exports are expected to contain noisy formatting, so this substitutes
/// rather than errors.
pub fn clean_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.replace(',', "").parse().unwrap_or(0.0)
}

/// Formats an amount for display: integer-truncated with comma grouping.
///
/// Zero (and non-finite values) render as `"0"`. Truncation happens only at
/// the display layer; the stored float is what matching and aggregation use.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() || amount == 0.0 {
        return "0".to_string();
    }
    group_thousands(amount.trunc() as i64)
}

/// Formats a signed variance: negatives as the grouped absolute value in
/// parentheses, e.g. `-1234.0` -> `"(1,234)"`.
pub fn format_difference(amount: f64) -> String {
    if amount < 0.0 {
        format!("({})", format_currency(-amount))
    } else {
        format_currency(amount)
    }
}

fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
