/// Currency suffix appended to every amount.
pub const WON_SUFFIX: &str = "원";

/// Format whole won with thousands separators, e.g. `14,000원` or `-3,000원`.
///
/// Takes any integer that widens to `i128` so full `u64` prices print as-is.
pub fn format_won(amount: impl Into<i128>) -> String {
    let amount: i128 = amount.into();
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, grouped, WON_SUFFIX)
}

/// `budget - spent` as a signed amount, clamped to the `i64` range.
pub fn balance(budget: u64, spent: u64) -> i64 {
    let diff = i128::from(budget) - i128::from(spent);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

/// File name for a mission's downloadable report.
pub fn report_file_name(mission_title: &str) -> String {
    let safe: String = mission_title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = if safe.is_empty() { "mission".to_string() } else { safe };
    format!("{}_결과.png", stem)
}

pub fn format_elapsed(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
