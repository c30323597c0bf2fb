use chrono::NaiveDate;

use crate::models::{Subscription, DATE_FORMAT};

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals with thousands grouping: `1234.5` becomes `"1,234.50"`.
/// Non-finite input renders as an empty string.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }

    // `{:.2}` rounds the exact binary value, so 2.675 stays "2.67".
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole = whole.parse::<u64>().map(format_with_commas).unwrap_or_default();
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, whole, fraction)
}

pub fn format_money(amount: f64) -> String {
    format!("${}", format_currency(amount))
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn payment_status_label(subscription: &Subscription) -> String {
    subscription
        .payment_status
        .as_deref()
        .map(capitalize)
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Payment opens on the last day of the period; it stays locked while the
/// period end is still in the future.
pub fn pay_locked(subscription: &Subscription, today: NaiveDate) -> bool {
    subscription
        .period
        .end
        .map(|end| end > today)
        .unwrap_or(false)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
