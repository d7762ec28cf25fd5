use scraper::{ElementRef, Html};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Re-indents an HTML document, one element or text run per line and one
/// space of indentation per nesting level.
///
/// Returns `None` when `body` is not UTF-8 or contains no markup at all, so
/// callers can fall back to printing the raw text.
pub fn format_html(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?;
    if !text.contains('<') {
        return None;
    }

    let document = Html::parse_document(text);
    let mut out = String::new();
    for node in document.tree.root().children() {
        if let Some(doctype) = node.value().as_doctype() {
            out.push_str(&format!("<!DOCTYPE {}>\n", doctype.name()));
        }
    }
    write_element(document.root_element(), 0, &mut out);
    Some(out)
}

fn write_element(element: ElementRef<'_>, depth: usize, out: &mut String) {
    let indent = " ".repeat(depth);
    let value = element.value();
    let name = value.name();

    out.push_str(&indent);
    out.push('<');
    out.push_str(name);
    for (attribute, attribute_value) in value.attrs() {
        out.push_str(&format!(" {attribute}=\"{attribute_value}\""));
    }
    out.push_str(">\n");

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    let child_indent = " ".repeat(depth + 1);
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            write_element(child_element, depth + 1, out);
        } else if let Some(text) = child.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                out.push_str(&child_indent);
                out.push_str(text);
                out.push('\n');
            }
        } else if let Some(comment) = child.value().as_comment() {
            out.push_str(&format!("{child_indent}<!--{}-->\n", &**comment));
        }
    }

    out.push_str(&indent);
    out.push_str(&format!("</{name}>\n"));
}
