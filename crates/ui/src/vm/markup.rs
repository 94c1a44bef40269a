use std::collections::{HashMap, HashSet};

/// Clean question markup before it is injected into the page.
///
/// Keeps inline formatting, lists and tables; drops scripts, styles,
/// event handlers and anything else not on the allow list.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "u", "sub", "sup", "small", "code",
        "pre", "ul", "ol", "li", "table", "caption", "thead", "tbody", "tfoot", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("th", ["colspan", "rowspan"].into_iter().collect());
    attributes.insert("td", ["colspan", "rowspan"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .generic_attributes(["class"].into_iter().collect())
        .clean(html)
        .to_string()
}

/// Button label for an option, numbered from 1.
#[must_use]
pub fn option_label(index: usize, text: &str) -> String {
    format!("{}. {text}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_tables_and_inline_markup() {
        let html = r#"<table class="data"><tr><th colspan="2">Age</th></tr><tr><td>45</td><td><strong>yes</strong></td></tr></table>"#;
        let clean = sanitize_html(html);
        assert!(clean.contains("<table"));
        assert!(clean.contains(r#"colspan="2""#));
        assert!(clean.contains(r#"class="data""#));
        assert!(clean.contains("<strong>yes</strong>"));
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let clean = sanitize_html(r#"<p onclick="x()">Hi<script>alert(1)</script></p>"#);
        assert_eq!(clean, "<p>Hi</p>");
    }

    #[test]
    fn option_labels_are_one_based() {
        assert_eq!(option_label(0, "Yes"), "1. Yes");
        assert_eq!(option_label(3, "No"), "4. No");
    }
}
