//! 结果渲染
//!
//! 把 `ResolutionResult` 渲染为终端文本。记录缺失时输出错误说明，
//! 不返回错误。

use colored::Colorize;

use crate::services::{GeoRecord, ResolutionResult};

const BOX_WIDTH: usize = 68;
const NOT_AVAILABLE: &str = "N/A";

fn section_header(out: &mut String, title: &str, error: bool) {
    let pad = BOX_WIDTH.saturating_sub(title.chars().count());
    let left = pad / 2;
    let right = pad - left;
    let lines = [
        format!("╔{}╗", "═".repeat(BOX_WIDTH)),
        format!("║{}{}{}║", " ".repeat(left), title, " ".repeat(right)),
        format!("╚{}╝", "═".repeat(BOX_WIDTH)),
    ];
    for line in lines {
        let styled = if error {
            line.red().bold()
        } else {
            line.blue().bold()
        };
        out.push_str(&format!("{}\n", styled));
    }
    out.push('\n');
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {} {}\n", label.dimmed(), value.bold()));
}

fn text_or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn coordinate_or_na(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn render_record(out: &mut String, result: &ResolutionResult, record: &GeoRecord) {
    section_header(out, "IP ADDRESSES", false);
    if let Some(ipv4) = &result.ipv4 {
        field(out, "IPv4:", ipv4.value());
    }
    if let Some(ipv6) = &result.ipv6 {
        field(out, "IPv6:", ipv6.value());
    }
    out.push_str("\n\n");

    section_header(out, "LOCATION DETAILS", false);
    field(out, "City:        ", text_or_na(&record.city));
    field(out, "Region:      ", text_or_na(&record.region));
    field(
        out,
        "Country:     ",
        &format!(
            "{} ({})",
            text_or_na(&record.country_name),
            text_or_na(&record.country)
        ),
    );
    field(out, "Postal Code: ", text_or_na(&record.postal));
    field(out, "Timezone:    ", text_or_na(&record.timezone));
    out.push_str("\n\n");

    section_header(out, "COORDINATES", false);
    field(out, "Latitude:    ", &coordinate_or_na(record.latitude));
    field(out, "Longitude:   ", &coordinate_or_na(record.longitude));
    out.push_str("\n\n");

    section_header(out, "NETWORK INFORMATION", false);
    field(out, "ISP/Organization:", text_or_na(&record.org));
    field(out, "ASN:             ", text_or_na(&record.asn));

    if let Some(url) = record.map_url() {
        out.push('\n');
        field(out, "Map:", &url);
    }
}

fn render_failure(out: &mut String, result: &ResolutionResult) {
    section_header(out, "ERROR", true);

    let reasons: &[&str] = if result.lookup_failed {
        let requested = result
            .requested_address()
            .map(|a| a.value())
            .unwrap_or(NOT_AVAILABLE);
        out.push_str(&format!(
            "  {} {}\n\n",
            "Could not find information for IP:".bold(),
            requested.red().bold()
        ));
        &[
            "Invalid IP address format",
            "API rate limiting (try again in a few minutes)",
            "IP address not found in database",
        ]
    } else {
        out.push_str(&format!(
            "  {}\n\n",
            "Unable to retrieve IP location information.".bold()
        ));
        &[
            "API rate limiting (try again in a few minutes)",
            "Network connectivity issues",
            "Temporary API unavailability",
        ]
    };

    out.push_str(&format!("  {}\n", "Possible reasons:".bold()));
    for reason in reasons {
        out.push_str(&format!("    • {}\n", reason.dimmed()));
    }
}

/// 渲染完整的文本输出（不含状态行）
pub fn render_text(result: &ResolutionResult) -> String {
    let mut out = String::new();

    match &result.record {
        Some(record) => render_record(&mut out, result, record),
        None => render_failure(&mut out, result),
    }

    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        format!(
            "Last fetched: {}",
            result.resolved_at.format("%Y-%m-%d %H:%M:%S")
        )
        .dimmed()
    ));
    out
}

/// 状态行
pub fn status_line(result: &ResolutionResult, explicit: bool) -> String {
    let (ok, failed) = if explicit {
        ("Lookup completed successfully!", "Lookup failed. See details above.")
    } else {
        (
            "IP detection completed successfully!",
            "IP detection failed. See details above.",
        )
    };

    if result.is_success() {
        format!("{} {}", "●".green(), ok.green())
    } else {
        format!("{} {}", "●".red(), failed.red())
    }
}
