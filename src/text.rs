use scraper::{ElementRef, Html, Node};

/// Upper bound on the plain text handed to the completion backend.
pub const MAX_AI_INPUT_CHARS: usize = 5000;

/// Renders a document to plain text for the AI fallback.
///
/// Chrome (script, style, navigation, footers, sidebars, iframes) and hidden
/// elements are dropped so the prompt is spent on the article body.
/// Block elements produce line breaks, inline text is joined with spaces.
pub fn html_to_text(document: &Html) -> String {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    walk(&document.root_element(), &mut lines, &mut current);
    flush_line(&mut lines, &mut current);
    lines.join("\n")
}

/// Truncates on a char boundary, not a byte offset.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn walk(element: &ElementRef, lines: &mut Vec<String>, current: &mut Vec<String>) {
    if should_skip(element) || is_hidden(element) {
        return;
    }

    let tag = element.value().name().to_lowercase();
    if tag == "br" {
        flush_line(lines, current);
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !normalized.is_empty() {
                    current.push(normalized);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    walk(&child_ref, lines, current);
                }
            }
            _ => {}
        }
    }

    if is_block_element(&tag) {
        flush_line(lines, current);
    }
}

fn flush_line(lines: &mut Vec<String>, current: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let merged = current.join(" ").trim().to_string();
    if !merged.is_empty() {
        lines.push(merged);
    }
    current.clear();
}

fn should_skip(element: &ElementRef) -> bool {
    matches!(
        element.value().name().to_lowercase().as_str(),
        "script"
            | "style"
            | "noscript"
            | "iframe"
            | "canvas"
            | "svg"
            | "nav"
            | "footer"
            | "header"
            | "aside"
            | "form"
    )
}

fn is_hidden(element: &ElementRef) -> bool {
    element.value().attr("hidden").is_some()
        || element
            .value()
            .attr("style")
            .map(|s| s.contains("display: none") || s.contains("visibility: hidden"))
            .unwrap_or(false)
}

fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "article"
            | "blockquote"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "hr"
            | "li"
            | "main"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "tr"
            | "ul"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_become_lines() {
        let html = r#"
            <html><body>
                <h1>Tarte aux pommes</h1>
                <p>Une recette <b>simple</b> et rapide.</p>
                <li>200 g de farine</li>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let text = html_to_text(&document);
        assert_eq!(
            text,
            "Tarte aux pommes\nUne recette simple et rapide.\n200 g de farine"
        );
    }

    #[test]
    fn test_chrome_is_stripped() {
        let html = r#"
            <html><body>
                <nav>Accueil | Recettes</nav>
                <header>Bandeau du site</header>
                <p>Contenu utile</p>
                <script>console.log('bruit');</script>
                <aside>Publicité</aside>
                <footer>Mentions légales</footer>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(html_to_text(&document), "Contenu utile");
    }

    #[test]
    fn test_hidden_elements_are_dropped() {
        let html = r#"
            <div>Visible</div>
            <div hidden>Caché</div>
            <div style="display: none">Aussi caché</div>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(html_to_text(&document), "Visible");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "éléphant";
        assert_eq!(truncate_chars(text, 3), "élé");
        assert_eq!(truncate_chars(text, 100), "éléphant");
    }
}
