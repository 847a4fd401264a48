use chrono::{DateTime, Datelike, FixedOffset, Utc};

// es-MX short month names, as the dashboard has always printed them.
const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const WEEKDAYS_SHORT: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];

/// `month` is 1-based. Out-of-range months fall back to the numeric form.
pub fn month_label(year: i32, month: u32) -> String {
    let yy = year.rem_euclid(100);
    match month.checked_sub(1).and_then(|m| MONTHS_SHORT.get(m as usize)) {
        Some(name) => format!("{name} {yy:02}"),
        None => format!("{month:02}/{yy:02}"),
    }
}

/// MXN amount, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let frac = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(units))
}

pub fn format_date(date: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = date.with_timezone(&offset);
    let weekday = WEEKDAYS_SHORT[local.weekday().num_days_from_monday() as usize];
    let month = MONTHS_SHORT[local.month0() as usize];
    format!("{weekday}, {} {month} {}", local.day(), local.year())
}

pub fn format_datetime(date: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = date.with_timezone(&offset);
    format!("{}, {}", format_date(date, offset), local.format("%H:%M"))
}

pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
