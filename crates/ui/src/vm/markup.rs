use std::collections::{HashMap, HashSet};

/// Clean matching-item markup down to presentational inline tags.
///
/// Only `i`, `span`, `em`, `strong` and `b` survive, each with at most a `class`
/// attribute. Anything else is stripped and text is escaped.
#[must_use]
pub fn sanitize_item_markup(html: &str) -> String {
    let tags: HashSet<&str> = ["i", "span", "em", "strong", "b"].into_iter().collect();

    let class_only: HashSet<&str> = ["class"].into_iter().collect();
    let attributes: HashMap<&str, HashSet<&str>> = tags
        .iter()
        .map(|tag| (*tag, class_only.clone()))
        .collect();

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .link_rel(None)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_icon_markup() {
        let html = sanitize_item_markup(r#"<i class="fa-brands fa-rust"></i>"#);
        assert_eq!(html, r#"<i class="fa-brands fa-rust"></i>"#);
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let html = sanitize_item_markup(
            r#"<b onclick="alert(1)">bold</b><script>alert(2)</script><a href="x">link</a>"#,
        );
        assert_eq!(html, "<b>bold</b>link");
    }

    #[test]
    fn escapes_plain_text() {
        assert_eq!(sanitize_item_markup("a < b"), "a &lt; b");
    }
}
