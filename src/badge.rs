//! SVG badge rendering.
//!
//! Every renderer here is a pure function of its input: no I/O, and the same
//! input always yields byte-identical markup.

use crate::models::NormalizedRepository;
use std::fmt::Write as _;

const HEIGHT: u32 = 20;
const LABEL_COLOR: &str = "#555";
const VALUE_COLOR: &str = "#4c1";
const FONT: &str = "font-family=\"Verdana,DejaVu Sans,sans-serif\" font-size=\"11\"";

// Approximate advance of an 11px Verdana glyph.
const CHAR_WIDTH: u32 = 7;
const PADDING: u32 = 10;

/// Renders the fixed 120x20 "repos" badge for an aggregate count.
///
/// The count is anchored at the right edge of its segment, so any number of
/// digits grows leftward instead of spilling out of the badge.
pub fn render_count_badge(count: u64) -> String {
    let mut svg = String::with_capacity(512);

    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"120\" height=\"{HEIGHT}\" role=\"img\" aria-label=\"repos: {count}\">"
    );
    let _ = writeln!(svg, "  <rect width=\"120\" height=\"{HEIGHT}\" fill=\"{LABEL_COLOR}\"/>");
    let _ = writeln!(svg, "  <rect x=\"60\" width=\"60\" height=\"{HEIGHT}\" fill=\"{VALUE_COLOR}\"/>");
    let _ = writeln!(svg, "  <text x=\"30\" y=\"14\" fill=\"#fff\" text-anchor=\"middle\" {FONT}>repos</text>");
    let _ = writeln!(svg, "  <text x=\"114\" y=\"14\" fill=\"#fff\" text-anchor=\"end\" {FONT}>{count}</text>");
    svg.push_str("</svg>\n");

    svg
}

/// Renders a two-segment badge: `nameWithOwner` on the left, star count on the right.
///
/// Segment widths follow the text length.
pub fn render_repository_badge(repository: &NormalizedRepository) -> String {
    let label = escape_xml(&repository.name_with_owner);
    let value = format!("\u{2605} {}", repository.star_count);

    let label_width = text_width(&repository.name_with_owner);
    let value_width = text_width(&value);
    let total_width = label_width + value_width;
    let label_center = label_width / 2;
    let value_end = total_width - PADDING / 2;

    let mut svg = String::with_capacity(640);

    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{total_width}\" height=\"{HEIGHT}\" role=\"img\" aria-label=\"{label}: {value}\">"
    );
    let _ = writeln!(svg, "  <rect width=\"{label_width}\" height=\"{HEIGHT}\" fill=\"{LABEL_COLOR}\"/>");
    let _ = writeln!(
        svg,
        "  <rect x=\"{label_width}\" width=\"{value_width}\" height=\"{HEIGHT}\" fill=\"{VALUE_COLOR}\"/>"
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{label_center}\" y=\"14\" fill=\"#fff\" text-anchor=\"middle\" {FONT}>{label}</text>"
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{value_end}\" y=\"14\" fill=\"#fff\" text-anchor=\"end\" {FONT}>{value}</text>"
    );
    svg.push_str("</svg>\n");

    svg
}

fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * CHAR_WIDTH + PADDING
}

pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
