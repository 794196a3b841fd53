use crate::model::config::ExportColors;
use crate::model::document::Document;
use crate::model::todo::StatusMark;
use crate::parse::grammar::TagKind;
use crate::parse::line::{LineKind, extract_tags};

/// Render the document to a self-contained HTML string: one row per
/// non-comment line, `<font>` colour spans, `<br>` terminators, and
/// `&nbsp;` pairs standing in for double-space indentation. This literal
/// structure is the compatibility surface for downstream consumers.
pub fn export_html(doc: &Document, colors: &ExportColors) -> String {
    let mut content = String::from("<html><head></head><body>\n");

    for raw in doc.lines() {
        match crate::parse::line::classify(raw) {
            // Comments produce no output row at all
            LineKind::Comment => continue,
            LineKind::Project { .. } => {
                content.push_str(&format!(
                    "<font color=\"{}\">{}</font>",
                    colors.project, raw
                ));
            }
            LineKind::Blank => content.push_str(raw),
            LineKind::Todo { status, .. } => {
                content.push_str(&render_todo_line(raw, status, colors));
            }
        }
        content.push_str("<br>\n");
    }

    content.push_str("</body></html>\n");
    content.replace("  ", "&nbsp;&nbsp;")
}

/// Render one todo line. The status colour span (cancelled takes
/// precedence over done) wraps the whole line; each tag gets its own
/// background span. The status span is explicitly closed before a tag
/// span opens and reopened after it closes, so spans concatenate instead
/// of cross-nesting; whatever is open is closed at line end.
fn render_todo_line(raw: &str, status: StatusMark, colors: &ExportColors) -> String {
    let status_color = match status {
        StatusMark::Cancelled => Some(colors.cancelled.as_str()),
        StatusMark::Done => Some(colors.done.as_str()),
        StatusMark::Open => None,
    };

    let mut out = String::new();
    if let Some(color) = status_color {
        out.push_str(&format!("<font color=\"{}\">", color));
    }

    let mut pos = 0;
    for span in extract_tags(raw) {
        let Some(background) = tag_background(&span, colors) else {
            continue;
        };
        out.push_str(&raw[pos..span.range.start]);
        if status_color.is_some() {
            out.push_str("</font>");
        }
        out.push_str(&format!(
            "<font style=\"background-color:{}\">{}</font>",
            background,
            &raw[span.range.clone()]
        ));
        if let Some(color) = status_color {
            out.push_str(&format!("<font color=\"{}\">", color));
        }
        pos = span.range.end;
    }

    out.push_str(&raw[pos..]);
    if status_color.is_some() {
        out.push_str("</font>");
    }
    out
}

/// Background colour for a tag span. Priority tags index the ranked
/// palette; a priority span only exists for exact keyword matches, so an
/// unknown `@`-word never gets mis-coloured.
fn tag_background<'a>(
    span: &crate::parse::line::TagSpan,
    colors: &'a ExportColors,
) -> Option<&'a str> {
    match span.kind {
        TagKind::Priority => {
            let rank = span.priority()?.rank();
            colors.priority.get(rank).map(|c| c.as_str())
        }
        _ => Some(colors.tag.as_str()),
    }
}
