//! HTML writer for the report document
//!
//! Produces one self-contained printable page: fixed-size page divs matching
//! the layout's A4 proportions, status badges colored per condition.

use crate::layout::{Block, Report, PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use pdc_common::model::ConditionStatus;

const STYLE: &str = "
body { font-family: Arial, sans-serif; background: #f3f4f6; margin: 0; }
.page { background: white; margin: 16px auto; padding: 40px; box-sizing: border-box; }
.title { text-align: center; border-bottom: 2px solid #e5e7eb; padding-bottom: 20px; margin-bottom: 20px; }
.title h1 { font-size: 28px; color: #1f2937; margin: 0 0 8px 0; }
.title p { color: #6b7280; font-size: 14px; margin: 0; }
h2 { font-size: 20px; color: #1f2937; border-bottom: 1px solid #e5e7eb; padding-bottom: 8px; }
.row { display: flex; justify-content: space-between; margin-bottom: 6px; }
.row .label { font-weight: 500; color: #374151; }
.badge { padding: 2px 8px; border-radius: 12px; font-size: 12px; font-weight: 500; }
.badge.ok { background: #dcfce7; color: #166534; }
.badge.issue { background: #fecaca; color: #dc2626; }
.badge.na { background: #f3f4f6; color: #6b7280; }
.description { font-size: 12px; color: #6b7280; font-style: italic; text-align: right; margin-bottom: 6px; }
.photo a { color: #2563eb; font-size: 13px; }
@media print { .page { margin: 0; page-break-after: always; } }
";

fn badge_class(status: ConditionStatus) -> &'static str {
    match status {
        ConditionStatus::Ok => "ok",
        ConditionStatus::Issue => "issue",
        ConditionStatus::NotApplicable => "na",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the report document as a standalone HTML page
pub fn to_html(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&report.title)));
    out.push_str(&format!("<style>{}</style>\n", STYLE));
    out.push_str("</head>\n<body>\n");

    for page in &report.pages {
        out.push_str(&format!(
            "<div class=\"page\" style=\"width: {}pt; min-height: {}pt;\">\n",
            PAGE_WIDTH_PT, PAGE_HEIGHT_PT
        ));
        for block in &page.blocks {
            write_block(&mut out, block);
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::TitleHeader {
            title,
            generated_on,
        } => {
            out.push_str(&format!(
                "<div class=\"title\"><h1>{}</h1><p>Generated on {}</p></div>\n",
                escape(title),
                escape(generated_on)
            ));
        }
        Block::SectionHeading(title) => {
            out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
        }
        Block::DetailRow { label, value } => {
            out.push_str(&format!(
                "<div class=\"row\"><span class=\"label\">{}:</span><span>{}</span></div>\n",
                escape(label),
                escape(value)
            ));
        }
        Block::ConditionRow {
            label,
            status,
            description,
        } => {
            out.push_str(&format!(
                "<div class=\"row\"><span class=\"label\">{}:</span>\
                 <span class=\"badge {}\">{}</span></div>\n",
                escape(label),
                badge_class(*status),
                status
            ));
            if let Some(description) = description {
                out.push_str(&format!(
                    "<div class=\"description\">{}</div>\n",
                    escape(description)
                ));
            }
        }
        Block::PhotoRef { label, url } => {
            out.push_str(&format!(
                "<div class=\"photo\"><span class=\"label\">{}:</span> \
                 <a href=\"{}\">{}</a></div>\n",
                escape(label),
                escape(url),
                escape(url)
            ));
        }
    }
}
