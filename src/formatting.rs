//! Presentation transforms applied to records before rendering

use crate::types::Formasi;

/// Group a digit string with `.` thousands separators and an `Rp ` prefix
///
/// Values that are not plain digits are returned unchanged so nothing the
/// upstream sends is lost. An empty value renders as `-`.
///
/// # Examples
///
/// ```
/// use formasi_export::formatting::format_currency;
///
/// assert_eq!(format_currency("3500000"), "Rp 3.500.000");
/// assert_eq!(format_currency("950"), "Rp 950");
/// assert_eq!(format_currency(""), "-");
/// ```
pub fn format_currency(raw: &str) -> String {
    let digits = raw.trim();
    if digits.is_empty() {
        return "-".to_string();
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }

    let digits = digits.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    grouped.push_str("Rp ");
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Combined position label: education category followed by position family
pub fn position_label(record: &Formasi) -> String {
    format!("{} {}", record.jp_nama, record.formasi_nm)
        .trim()
        .to_string()
}

/// Detail page link for a record
pub fn detail_link(base_url: &str, record: &Formasi) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), record.formasi_id)
}
