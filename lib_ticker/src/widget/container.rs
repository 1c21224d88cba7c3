//! # Widget Container
//!
//! A minimal DOM-equivalent node: a tag, a class list, associated widget
//! metadata and an ordered list of children. Widgets are mounted into a
//! container; the container renders to an HTML fragment.

use std::fmt;

use super::factory::{StockWidget, WidgetMetadata, STOCK_CLASS};
use super::indicator::IndicatorHandle;

/// A child of a [`Container`].
#[derive(Debug, Clone)]
pub enum Node {
    /// A text fragment.
    Text(String),
    /// An indicator sub-node.
    Indicator(IndicatorHandle),
}

/// A mutable node that widgets are mounted into.
///
/// Not `Clone`: a container owns the attachment of the indicators it holds,
/// and a copy would detach them from under the original on its next mount.
#[derive(Debug)]
pub struct Container {
    tag: String,
    classes: Vec<String>,
    metadata: Option<WidgetMetadata>,
    children: Vec<Node>,
}

impl Default for Container {
    fn default() -> Self {
        Self::span()
    }
}

impl Container {
    /// An empty container with the given tag name.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            metadata: None,
            children: Vec::new(),
        }
    }

    /// An empty `span`.
    pub fn span() -> Self {
        Self::new("span")
    }

    /// Builder-style [`Container::add_class`].
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Adds a class unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Metadata of the mounted widget.
    pub fn metadata(&self) -> Option<&WidgetMetadata> {
        self.metadata.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Removes every child. Indicators that were mounted here are detached,
    /// so lookups still in flight for them are discarded.
    pub fn clear(&mut self) {
        for node in self.children.drain(..) {
            if let Node::Indicator(handle) = node {
                handle.detach();
            }
        }
    }

    pub fn append_text(&mut self, text: &str) {
        self.children.push(Node::Text(text.to_string()));
    }

    pub fn append_indicator(&mut self, handle: IndicatorHandle) {
        handle.attach();
        self.children.push(Node::Indicator(handle));
    }

    /// Replaces the container's content with `widget`: display text, a
    /// single space, then the indicator. Existing classes are kept and the
    /// `stock` class added; metadata is replaced.
    pub fn mount(&mut self, widget: &StockWidget) {
        self.clear();
        self.add_class(STOCK_CLASS);
        self.metadata = Some(widget.metadata().clone());
        self.append_text(widget.text());
        self.append_text(" ");
        self.append_indicator(widget.indicator().clone());
    }

    /// Number of indicator children.
    pub fn indicator_count(&self) -> usize {
        self.children
            .iter()
            .filter(|n| matches!(n, Node::Indicator(_)))
            .count()
    }

    /// The first indicator child.
    pub fn indicator(&self) -> Option<&IndicatorHandle> {
        self.children.iter().find_map(|n| match n {
            Node::Indicator(h) => Some(h),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all children, indicator labels included.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Indicator(h) => out.push_str(h.get().text()),
            }
        }
        out
    }

    /// Renders the container and its children as an HTML fragment.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        push_class_attr(&mut out, &self.classes);
        if let Some(meta) = &self.metadata {
            push_attr(&mut out, "data-symbol", &meta.symbol);
            if let Some(name) = &meta.name {
                push_attr(&mut out, "data-name", name);
            }
        }
        out.push('>');

        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(&escape_html(t)),
                Node::Indicator(h) => {
                    let ind = h.get();
                    out.push_str("<span");
                    push_class_attr(&mut out, &ind.classes());
                    out.push('>');
                    out.push_str(&escape_html(ind.text()));
                    out.push_str("</span>");
                }
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_html())
    }
}

fn push_class_attr(out: &mut String, classes: &[String]) {
    if !classes.is_empty() {
        push_attr(out, "class", &classes.join(" "));
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::enrichment::Sentiment;
    use crate::widget::factory::build_widget;

    #[test]
    fn test_mount_renders_text_separator_and_indicator() {
        let widget = build_widget("AAPL", Some("Apple Inc."));
        let mut container = Container::span();
        container.mount(&widget);

        assert_eq!(
            container.render_html(),
            r#"<span class="stock" data-symbol="AAPL" data-name="Apple Inc.">Apple Inc. (AAPL) <span></span></span>"#
        );
        assert_eq!(container.text_content(), "Apple Inc. (AAPL) ");
    }

    #[test]
    fn test_mount_keeps_existing_classes_and_resets_children() {
        let mut container = Container::new("div").with_class("ticker");
        container.append_text("stale");
        container.mount(&build_widget("MSFT", None));
        container.mount(&build_widget("MSFT", None));

        assert_eq!(container.classes(), ["ticker", "stock"]);
        assert_eq!(container.children().len(), 3);
        assert_eq!(container.indicator_count(), 1);
        assert_eq!(container.text_content(), "MSFT ");
    }

    #[test]
    fn test_remount_detaches_previous_indicator() {
        let first = build_widget("IBM", None);
        let mut container = Container::span();
        container.mount(&first);
        container.mount(&build_widget("IBM", None));

        assert!(first.indicator().get().is_detached());
        assert!(!container.indicator().unwrap().get().is_detached());
    }

    #[test]
    fn test_remount_leaves_other_containers_attached() {
        let mut left = Container::span();
        let mut right = Container::span();
        left.mount(&build_widget("IBM", None));
        right.mount(&build_widget("IBM", None));

        left.mount(&build_widget("MSFT", None));

        assert!(!right.indicator().unwrap().get().is_detached());
        assert!(!left.indicator().unwrap().get().is_detached());
        assert_eq!(right.metadata().unwrap().symbol, "IBM");
    }

    #[test]
    fn test_remounting_same_widget_keeps_it_attached() {
        let widget = build_widget("IBM", None);
        let mut container = Container::span();
        container.mount(&widget);
        container.mount(&widget);

        assert!(!widget.indicator().get().is_detached());
        assert_eq!(container.indicator_count(), 1);
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let widget = build_widget("A&B", Some("<Quote \"Co\">"));
        let mut container = Container::span();
        container.mount(&widget);

        let html = container.render_html();
        assert!(html.contains(r#"data-symbol="A&amp;B""#));
        assert!(html.contains(r#"data-name="&lt;Quote &quot;Co&quot;&gt;""#));
        assert!(html.contains("&lt;Quote &quot;Co&quot;&gt; (A&amp;B) "));
    }

    #[test]
    fn test_render_reflects_indicator_state() {
        let widget = build_widget("TSLA", None);
        let mut container = Container::span();
        container.mount(&widget);

        widget.indicator().begin_loading();
        assert!(container.render_html().ends_with(r#"<span class="ajax-loading"></span></span>"#));

        widget.indicator().succeed(&Sentiment {
            label: "Bearish".to_string(),
            category: Some("negative".to_string()),
        });
        assert!(container
            .render_html()
            .ends_with(r#"<span class="ajax-success negative">Bearish</span></span>"#));
        assert_eq!(container.text_content(), "TSLA Bearish");
    }

    #[test]
    fn test_empty_container_renders_bare_tag() {
        assert_eq!(Container::span().to_string(), "<span></span>");
    }
}
