//! HTML pages: the education-code form and the paginated results table

use crate::formatting::{detail_link, format_currency, position_label};
use crate::types::PageView;
use std::fmt::Write;

const STYLE: &str = "table, th, td { border: 1px solid black; border-collapse: collapse; padding: 5px; }
form { display: inline; }
#downloadLink { position: absolute; top: 10px; right: 10px; }";

/// Landing page with the education-code form
pub fn render_form() -> String {
    r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Education Code</title></head><body>
<h1>Enter Education Code</h1>
<form method="POST" action="/scrape">
    <label>Education code: <input type="text" name="educationCode" required></label>
    <button type="submit">Search</button>
</form>
</body></html>
"#
    .to_string()
}

/// One page of results with a CSV download link and previous/next navigation
pub fn render_results(education_code: &str, view: &PageView, detail_base_url: &str) -> String {
    let code = escape_html(education_code);
    let download_href = escape_html(&format!(
        "/scrape?educationCode={}&download=csv",
        url::form_urlencoded::byte_serialize(education_code.as_bytes()).collect::<String>()
    ));

    let mut html = String::with_capacity(4096);
    // Writing to a String cannot fail
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Results</title>
<style>
{STYLE}
</style>
</head><body>
<h1>Results for education code: {code}</h1>
<a id="downloadLink" href="{download_href}" target="_blank">Download CSV</a>
<p>{total} vacancies found</p>
<table>
    <tr>
        <th>Organization</th>
        <th>Position</th>
        <th>Job Title</th>
        <th>Work Unit</th>
        <th>Required</th>
        <th>Passing</th>
        <th>Min Salary</th>
        <th>Max Salary</th>
        <th>Link</th>
    </tr>
"#,
        total = view.total,
    );

    for record in &view.items {
        let _ = write!(
            html,
            r#"    <tr>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td>{}</td>
        <td><a href="{}" target="_blank">Detail</a></td>
    </tr>
"#,
            escape_html(&record.ins_nm),
            escape_html(&position_label(record)),
            escape_html(&record.jabatan_nm),
            escape_html(&record.lokasi_nm),
            record.jumlah_formasi,
            record.jumlah_ms,
            escape_html(&format_currency(&record.gaji_min)),
            escape_html(&format_currency(&record.gaji_max)),
            escape_html(&detail_link(detail_base_url, record)),
        );
    }

    html.push_str("</table>\n<br>\n<div>\n");

    if view.page > 1 {
        html.push_str(&nav_form(&code, view.page - 1, "Previous"));
    }
    let _ = writeln!(html, "    Page {} of {}", view.page, view.total_pages);
    if view.page < view.total_pages {
        html.push_str(&nav_form(&code, view.page + 1, "Next"));
    }

    html.push_str("</div>\n</body></html>\n");
    html
}

// `code` must already be escaped
fn nav_form(code: &str, page: usize, label: &str) -> String {
    format!(
        r#"    <form method="POST" action="/scrape">
        <input type="hidden" name="educationCode" value="{code}">
        <input type="hidden" name="page" value="{page}">
        <button type="submit">{label}</button>
    </form>
"#
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
