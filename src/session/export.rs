//! Static HTML snapshot of the document, for downloading.

use std::fs;
use std::path::{Path, PathBuf};

use super::SessionError;

/// Render a standalone, non-editable HTML document.
pub fn render_snapshot(title: &str, content: &str, style: Option<&str>) -> String {
    let style_attr = style.map_or_else(String::new, |s| format!(" style=\"{}\"", escape(s)));
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <style>article {{ white-space: pre-wrap; }}</style>\n\
         </head>\n\
         <body>\n\
         <article spellcheck=\"false\"{style_attr}>{}</article>\n\
         </body>\n\
         </html>\n",
        escape(title),
        escape(content),
    )
}

/// File name for a snapshot titled `title`.
pub fn file_name_for(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                '_'
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "Textarea.html".to_string()
    } else {
        format!("{cleaned}.html")
    }
}

/// Write the snapshot into `dir` and return the file's path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_snapshot(dir: &Path, title: &str, html: &str) -> Result<PathBuf, SessionError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name_for(title));
    fs::write(&path, html)?;
    Ok(path)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
