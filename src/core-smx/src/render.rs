//! Renders a nested element model into a pretty-printed XML document.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::{Result, SitemapError};

/// A node in the element model: a name, its attributes, and either text or children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    content: Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Children(Vec<Element>),
}

impl Element {
    /// Creates a container element with no children yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Children(Vec::new()),
        }
    }

    /// Creates a leaf element holding text.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Text(text.into()),
        }
    }

    /// Adds an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Appends a child. Has no effect on text elements.
    pub fn child(mut self, child: Element) -> Self {
        if let Content::Children(children) = &mut self.content {
            children.push(child);
        }
        self
    }

    /// Appends a child when one is present.
    pub fn maybe_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Appends every child in order.
    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        if let Content::Children(children) = &mut self.content {
            children.extend(new_children);
        }
        self
    }

    /// Text elements with empty text are suppressed from the output.
    fn is_empty_text(&self) -> bool {
        matches!(&self.content, Content::Text(text) if text.is_empty())
    }
}

/// Renders `root` as a UTF-8 XML document with an XML declaration and
/// two-space indentation.
///
/// Empty text elements are left out entirely. Containers are always written as
/// an open/close pair, never self-closed.
pub fn render_document(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(render_error)?;
    write_element(&mut writer, root)?;

    String::from_utf8(writer.into_inner()).map_err(render_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    writer.write_event(Event::Start(start)).map_err(render_error)?;

    match &element.content {
        Content::Text(text) => {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(render_error)?;
        }
        Content::Children(children) => {
            for child in children.iter().filter(|child| !child.is_empty_text()) {
                write_element(writer, child)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(render_error)
}

fn render_error<E: std::fmt::Display>(err: E) -> SitemapError {
    SitemapError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_render_nested_document() {
        let root = Element::new("urlset")
            .attr("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9")
            .child(Element::new("url").child(Element::text("loc", "https://example.com/1")));

        let xml = render_document(&root).unwrap();
        assert_eq!(
            xml,
            indoc! {r#"
                <?xml version="1.0" encoding="utf-8"?>
                <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                  <url>
                    <loc>https://example.com/1</loc>
                  </url>
                </urlset>"#}
        );
    }

    #[test]
    fn test_render_suppresses_empty_text_elements() {
        let root = Element::new("url")
            .child(Element::text("loc", "https://example.com/"))
            .child(Element::text("changefreq", ""));

        let xml = render_document(&root).unwrap();
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(!xml.contains("changefreq"));
    }

    #[test]
    fn test_render_never_self_closes() {
        let xml = render_document(&Element::new("urlset")).unwrap();
        assert!(xml.contains("<urlset>"));
        assert!(xml.ends_with("</urlset>"));
        assert!(!xml.contains("/>"));
    }

    #[test]
    fn test_render_escapes_text() {
        let root = Element::new("url").child(Element::text("loc", "https://example.com/?a=1&b=<2>"));
        let xml = render_document(&root).unwrap();
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=&lt;2&gt;</loc>"));
    }
}
