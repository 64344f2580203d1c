//! Minimal server-rendered status page.
//!
//! One plain HTML page: upload form, status message, page-selection form
//! once a document is loaded, and download links once a result exists.
//! Filenames have been through filename sanitizing and carry no HTML
//! metacharacters; the status message can echo raw form input (selection
//! error messages quote the offending token), so it is escaped here.

use crate::session::SessionRecord;

/// Escape HTML metacharacters in untrusted text.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(record: Option<&SessionRecord>) -> String {
    let mut body = String::new();

    body.push_str(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>pagecrop</title>\n</head>\n<body>\n\
         <h1>pagecrop</h1>\n\
         <p>Upload a PDF, pick pages, download them with margins cropped.</p>\n\
         <form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\".pdf\">\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n",
    );

    let Some(record) = record else {
        body.push_str("</body>\n</html>\n");
        return body;
    };

    if !record.message.is_empty() {
        body.push_str(&format!("<p><em>{}</em></p>\n", escape(&record.message)));
    }

    if record.num_pages > 0 {
        body.push_str("<form action=\"/process\" method=\"post\">\n<fieldset>\n");
        body.push_str(&format!(
            "<legend>Pages of {} ({} total)</legend>\n",
            escape(&record.filename),
            record.num_pages
        ));
        for page in 1..=record.num_pages {
            body.push_str(&format!(
                "<label><input type=\"checkbox\" name=\"selected_pages\" \
                 value=\"Page {page}\"> {page}</label>\n"
            ));
        }
        body.push_str(
            "</fieldset>\n\
             <p>Optional output names, one line per page (blank keeps the default):</p>\n\
             <textarea name=\"filenames\" rows=\"4\" cols=\"40\"></textarea><br>\n\
             <button type=\"submit\">Extract and crop</button>\n\
             </form>\n",
        );
    }

    if let Some(result) = &record.result {
        body.push_str("<h2>Result</h2>\n<ul>\n");
        for file in &result.files {
            body.push_str(&format!(
                "<li><a href=\"/download/{file}\">{file}</a></li>\n"
            ));
        }
        body.push_str("</ul>\n");
        if let Some(archive) = &result.archive {
            body.push_str(&format!(
                "<p><a href=\"/download/{archive}\">Download all as {archive}</a></p>\n"
            ));
        }
    }

    body.push_str("</body>\n</html>\n");
    body
}
