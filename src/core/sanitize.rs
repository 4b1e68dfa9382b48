// src/core/sanitize.rs

use scraper::ElementRef;
use scraper::node::Node;

/// Tags a description may keep. Everything else is unwrapped to its content.
pub const DESCRIPTION_TAGS: &[&str] = &[
    "p", "ul", "li", "ol", "br", "b", "table", "tbody", "tr", "td", "th", "h1", "h2", "h3",
    "h4", "h5", "h6", "span",
];

// Dropped together with their content, even if allow-listed by mistake.
const OPAQUE_TAGS: &[&str] = &["script", "style", "noscript", "template", "iframe", "object"];

const VOID_TAGS: &[&str] = &["br", "hr", "img", "wbr"];

/// Concatenate every ASCII digit; `"0"` when there are none.
///
/// `"1 299,00 ₴"` → `"129900"`. Other Unicode numerics (`²`, `½`, Arabic-Indic
/// digits) are dropped so a unit like `₴/м²` cannot leak into the amount.
pub fn normalize_price(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() { s!("0") } else { digits }
}

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Serialize the *children* of `root` keeping only `allowed` tags, with all
/// attributes stripped and text re-escaped. Elements for which `keep` returns
/// false are dropped whole; the walk is top-down, so the outermost rejected
/// element goes and its subtree is never visited.
pub fn sanitize_children(
    root: ElementRef<'_>,
    allowed: &[&str],
    keep: &dyn Fn(ElementRef<'_>) -> bool,
) -> String {
    let mut out = String::new();
    walk(root, allowed, keep, &mut out);
    out
}

fn walk(
    parent: ElementRef<'_>,
    allowed: &[&str],
    keep: &dyn Fn(ElementRef<'_>) -> bool,
    out: &mut String,
) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => escape_into(text, out),
            Node::Element(el) => {
                let Some(elem) = ElementRef::wrap(child) else { continue };
                let name = el.name();
                if OPAQUE_TAGS.contains(&name) || !keep(elem) {
                    continue;
                }
                if !allowed.contains(&name) {
                    walk(elem, allowed, keep, out);
                } else if VOID_TAGS.contains(&name) {
                    out.push_str(&join!("<", name, "/>"));
                } else {
                    out.push_str(&join!("<", name, ">"));
                    walk(elem, allowed, keep, out);
                    out.push_str(&join!("</", name, ">"));
                }
            }
            _ => {}
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn sanitize_div(html: &str, keep: &dyn Fn(ElementRef<'_>) -> bool) -> String {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("div").unwrap();
        let root = doc.select(&sel).next().unwrap();
        sanitize_children(root, DESCRIPTION_TAGS, keep)
    }

    #[test]
    fn price_keeps_digits_only() {
        assert_eq!(normalize_price("1 299,00 ₴"), "129900");
        assert_eq!(normalize_price("  $ 45 "), "45");
        assert_eq!(normalize_price("call us"), "0");
        assert_eq!(normalize_price("450 ₴/м²"), "450");
        assert_eq!(normalize_price("١٢٣"), "0");
        assert_eq!(normalize_price(""), "0");
    }

    #[test]
    fn ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  Color \n\t name  "), "Color name");
    }

    #[test]
    fn disallowed_tags_unwrap_and_attributes_drop() {
        let out = sanitize_div(
            r#"<div><p class="x">Hi <a href="/y">link</a> <i>it</i><br></p><script>bad()</script></div>"#,
            &|_| true,
        );
        assert_eq!(out, "<p>Hi link it<br/></p>");
    }

    #[test]
    fn text_is_escaped() {
        let out = sanitize_div("<div><b>5 &lt; 6 &amp; \"q\"</b></div>", &|_| true);
        assert_eq!(out, "<b>5 &lt; 6 &amp; &#34;q&#34;</b>");
    }

    #[test]
    fn rejected_elements_drop_with_subtree() {
        let out = sanitize_div(
            "<div><p>keep</p><p>drop <b>me</b></p></div>",
            &|el| !el.text().collect::<String>().contains("drop"),
        );
        assert_eq!(out, "<p>keep</p>");
    }
}
