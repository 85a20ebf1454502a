//! HTML diff table: one row per lexicon entry, reference vs hypothesis.
//!
//! Styling classes:
//! - `diff_ins`: phone only in the hypothesis (blank in the reference column)
//! - `diff_del`: phone only in the reference (blank in the hypothesis column)
//! - `diff_sub`: substituted phone, shown in both columns
//!
//! Matching phones are written unstyled.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{DiffCell, DiffLabel};
use crate::error::AppError;

const DOCUMENT_HEAD: &str = r#"<head>
  <meta http-equiv="Content-Type" content="text/html; charset=utf-8" />
  <title></title>
  <style type="text/css">
    table.diff {font-family:Courier; border: solid 1px #000000; border-collapse: collapse}
    .diff_header {background-color:#e0e0e0; text-align:left; border: solid 1px #000000}
    td {border-left: solid 1px #000000; border-right: solid 1px #000000}
    .diff_ins {background-color:#aaffaa}
    .diff_del {background-color:#ffaaaa}
    .diff_sub {background-color:#ffff77}
  </style>
</head>

<table class=diff>
  <thead class=diff_header>
    <tr>
      <th class=diff_header>Orthography</th>
      <th class=diff_header>Reference pron.</th>
      <th class=diff_header>Hypothesis pron.</th>
    </tr>
  </thead>
  <tbody>"#;

const DOCUMENT_TAIL: &str = "</tbody>\n</table>";

/// One table row: a word and its classified alignment.
#[derive(Debug, Clone)]
pub struct DiffRow {
    pub orthography: String,
    pub cells: Vec<DiffCell>,
}

/// Render the full HTML document.
pub fn render_diff_table(rows: &[DiffRow]) -> String {
    let mut out = String::from(DOCUMENT_HEAD);
    for row in rows {
        let (ref_span, hyp_span) = render_spans(&row.cells);
        out.push_str(&format!(
            "\n    <tr>\n      <td>{}</td>\n      <td>{ref_span}</td>\n      <td>{hyp_span}</td>\n    </tr>",
            escape(&row.orthography)
        ));
    }
    out.push_str(DOCUMENT_TAIL);
    out
}

/// Write the rendered table to `path`.
pub fn write_diff_table(path: &Path, rows: &[DiffRow]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create diff table '{}': {e}", path.display())))?;
    file.write_all(render_diff_table(rows).as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write diff table: {e}")))?;
    Ok(())
}

fn render_spans(cells: &[DiffCell]) -> (String, String) {
    let mut ref_span = String::new();
    let mut hyp_span = String::new();

    for cell in cells {
        let r = cell.reference.as_deref().unwrap_or("");
        let h = cell.hypothesis.as_deref().unwrap_or("");
        match cell.label {
            DiffLabel::Match => {
                ref_span.push_str(&format!("{}&nbsp;", escape(r)));
                hyp_span.push_str(&format!("{}&nbsp;", escape(h)));
            }
            DiffLabel::Insert => {
                ref_span.push_str(&blank_span("ins"));
                hyp_span.push_str(&char_span("ins", h));
            }
            DiffLabel::Delete => {
                ref_span.push_str(&char_span("del", r));
                hyp_span.push_str(&blank_span("del"));
            }
            DiffLabel::Substitute => {
                ref_span.push_str(&char_span("sub", r));
                hyp_span.push_str(&char_span("sub", h));
            }
        }
    }

    (ref_span, hyp_span)
}

fn char_span(class: &str, symbol: &str) -> String {
    format!("<span class=diff_{class}>{}&nbsp;</span>", escape(symbol))
}

fn blank_span(class: &str) -> String {
    format!("<span class=diff_{class}>&nbsp;&nbsp;</span>")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
