use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("hardcoded selector is valid"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("hardcoded selector is valid"));

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

/// Raw text of the first `<title>` element, if there is one
pub fn title_text(doc: &Html) -> Option<String> {
    doc.select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect())
}

/// Every text node of the document in order, skipping script and style content.
///
/// Nodes are concatenated as-is; no separator is inserted between elements.
/// `<noscript>` content arrives from the parser as one raw markup string, so
/// it is parsed again and only its text nodes are kept.
pub fn visible_text(doc: &Html) -> String {
    let mut text = String::new();
    collect_visible_text(doc, &mut text);
    text
}

fn collect_visible_text(doc: &Html, text: &mut String) {
    for node in doc.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });

        if hidden {
            continue;
        }

        let in_noscript = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name() == "noscript"))
            .unwrap_or(false);

        if in_noscript {
            collect_visible_text(&Html::parse_fragment(fragment), text);
        } else {
            text.push_str(fragment);
        }
    }
}

/// Anchor text and targets of every `<a>` element in document order.
///
/// Each non-empty label and each non-empty `href` is followed by one space.
pub fn link_text(doc: &Html) -> String {
    let mut text = String::new();
    let mut count = 0;

    for link in doc.select(&LINK_SELECTOR) {
        count += 1;

        let label: String = link.text().collect();
        if !label.is_empty() {
            text.push_str(&label);
            text.push(' ');
        }

        if let Some(href) = link.value().attr("href").filter(|href| !href.is_empty()) {
            text.push_str(href);
            text.push(' ');
        }
    }

    ::log::debug!("HTML parser found {} links", count);
    text
}
