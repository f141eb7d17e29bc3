use crate::parser::{format_content, Backend, Category, FileReview, ReviewCollection};

/// Render a collection as a standalone HTML fragment.
///
/// Reviewer text is escaped before it goes through [`format_content`]; every bucket carries a `data-key` so a
/// page script can keep its own expand/collapse state.
pub fn render_html(collection: &ReviewCollection) -> String {
    let mut html = String::from("<div class=\"duorev\">\n");

    if collection.is_empty() {
        html.push_str("  <p class=\"empty\">No reviews</p>\n");
    }

    for file in collection {
        render_file(&mut html, file);
    }

    html.push_str("</div>\n");
    html
}

fn render_file(html: &mut String, file: &FileReview) {
    html.push_str(&format!(
        "  <section class=\"file\" data-file=\"{}\">\n    <h2>{}</h2>\n",
        escape(&file.filename),
        escape(&file.filename)
    ));

    for backend in Backend::ALL {
        let review = file.backend(backend);
        html.push_str(&format!(
            "    <article class=\"backend {}\">\n      <h3>{} Review</h3>\n",
            backend,
            backend.source_name()
        ));

        for category in Category::FINDINGS {
            let findings = review.findings(category);
            if findings.is_empty() {
                continue;
            }
            html.push_str(&format!(
                "      <div class=\"bucket\" data-key=\"{}\">\n        <h4>{}</h4>\n        <ul>\n",
                escape(&file.bucket_key(category, backend)),
                category.title()
            ));
            for finding in findings {
                html.push_str(&format!(
                    "          <li data-id=\"{}\">{}</li>\n",
                    finding.fingerprint(&file.filename, category, backend),
                    format_content(&escape(finding.as_str()))
                ));
            }
            html.push_str("        </ul>\n      </div>\n");
        }

        for block in &review.code_blocks {
            html.push_str(&format!(
                "      <pre><code>{}</code></pre>\n",
                escape(block)
            ));
        }

        if !review.explanation.is_empty() {
            html.push_str(&format!(
                "      <p class=\"explanation\">{}</p>\n",
                format_content(&escape(&review.explanation))
            ));
        }

        html.push_str("    </article>\n");
    }

    html.push_str("  </section>\n");
}

/// Escape reviewer text; leaves `*` and backticks for [`format_content`]
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Normalizer;

    #[test]
    fn test_render_html() {
        let text = "==== GROQ REVIEW ====\n**Security Concerns:**\n* **Hardcoded** `API_KEY`\n==== GEMINI REVIEW ====\n```python\nif a < b:\n    pass\n```\nDone.";
        let file = Normalizer::default().normalize_raw("src/app.py", text);
        let html = render_html(&ReviewCollection::new(vec![file]));

        assert!(html.contains("<h2>src/app.py</h2>"));
        assert!(html.contains("data-key=\"src/app.py::security::fast\""));
        assert!(html.contains("<strong>Hardcoded</strong> <code>API_KEY</code>"));
        assert!(html.contains("<pre><code>if a &lt; b:\n    pass</code></pre>"));
        assert!(html.contains("<p class=\"explanation\">Done.</p>"));
    }

    #[test]
    fn test_reviewer_markup_is_escaped() {
        let text = "==== GROQ REVIEW ====\n**Bugs or Errors:**\n* returns `Vec<String>` but callers expect <script>alert(1)</script>\n==== GEMINI REVIEW ====\nUse `a < b` & **stop**";
        let file = Normalizer::default().normalize_raw("lib.rs", text);
        let html = render_html(&ReviewCollection::new(vec![file]));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<code>Vec&lt;String&gt;</code>"));
        assert!(html.contains("Use <code>a &lt; b</code> &amp; <strong>stop</strong>"));
    }

    #[test]
    fn test_render_empty() {
        let html = render_html(&ReviewCollection::empty());
        assert!(html.contains("No reviews"));
    }
}
