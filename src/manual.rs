//! The parsed reference manual: decoding, anchor lookup and sibling access.

use crate::config::{Encoding, ManualConfig};
use crate::error::{Error, Result};
use crate::model::{HeadingLevel, SectionNode};
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static NAMED_ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[name]").unwrap());

/// Decode raw manual bytes.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| Error::Decode {
            encoding: "utf-8",
            reason: e.to_string(),
        }),
        // Every byte maps to the code point of the same value.
        Encoding::Latin1 => Ok(bytes.iter().copied().map(char::from).collect()),
    }
}

/// A parsed manual. Read-only once built.
pub struct Manual {
    html: Html,
    separator_label: String,
    prototype_label: String,
}

impl Manual {
    pub fn parse(text: &str, config: &ManualConfig) -> Self {
        Manual {
            html: Html::parse_document(text),
            separator_label: config.separator_label.clone(),
            prototype_label: config.prototype_label.clone(),
        }
    }

    pub fn from_bytes(bytes: &[u8], config: &ManualConfig) -> Result<Self> {
        let text = decode(bytes, config.encoding)?;
        Ok(Self::parse(&text, config))
    }

    pub fn separator_label(&self) -> &str {
        &self.separator_label
    }

    pub fn prototype_label(&self) -> &str {
        &self.prototype_label
    }

    /// Resolve the heading that owns the anchor named `name`.
    pub fn anchor_heading(&self, name: &str) -> Result<Heading<'_>> {
        let anchors: Vec<ElementRef<'_>> = self
            .html
            .select(&NAMED_ANCHOR)
            .filter(|a| a.value().attr("name") == Some(name))
            .collect();

        let anchor = match anchors.as_slice() {
            [] => return Err(Error::AnchorNotFound(name.to_string())),
            [anchor] => *anchor,
            _ => {
                return Err(Error::AmbiguousAnchor {
                    name: name.to_string(),
                    count: anchors.len(),
                })
            }
        };

        let malformed = |parent: &str| Error::MalformedHeading {
            name: name.to_string(),
            parent: parent.to_string(),
        };

        let element = anchor
            .parent()
            .and_then(ElementRef::wrap)
            .ok_or_else(|| malformed("#document"))?;
        let label = element.value().name();
        let level = HeadingLevel::from_label(label).ok_or_else(|| malformed(label))?;

        Ok(Heading { element, level })
    }
}

/// A heading element enclosing a symbol anchor.
#[derive(Clone, Copy)]
pub struct Heading<'a> {
    element: ElementRef<'a>,
    pub level: HeadingLevel,
}

impl<'a> Heading<'a> {
    /// The heading's following siblings in document order, materialized lazily.
    pub fn following_siblings(&self) -> impl Iterator<Item = SectionNode> + 'a {
        self.element
            .next_siblings()
            .filter_map(|node| match node.value() {
                Node::Element(element) => {
                    let element_ref = ElementRef::wrap(node)?;
                    Some(SectionNode::element(
                        element.name(),
                        element_ref.html(),
                        element_ref.text().collect::<String>(),
                    ))
                }
                Node::Text(text) => Some(SectionNode::text(&**text)),
                Node::Comment(comment) => Some(SectionNode {
                    label: None,
                    markup: format!("<!--{}-->", &**comment),
                    text: String::new(),
                }),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(html: &str) -> Manual {
        Manual::parse(html, &ManualConfig::default())
    }

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        let text = decode(b"caf\xe9 \xa9", Encoding::Latin1).unwrap();
        assert_eq!(text, "café ©");
    }

    #[test]
    fn utf8_rejects_invalid_bytes() {
        let err = decode(b"caf\xe9", Encoding::Utf8).unwrap_err();
        assert!(matches!(err, Error::Decode { encoding: "utf-8", .. }));
        assert_eq!(decode("café".as_bytes(), Encoding::Utf8).unwrap(), "café");
    }

    #[test]
    fn heading_level_from_anchor_parent() {
        let m = manual(r#"<h2>Intro</h2><h3><a name="f"><code>f</code></a></h3><pre>void f();</pre>"#);
        let heading = m.anchor_heading("f").unwrap();
        assert_eq!(heading.level.get(), 3);
    }

    #[test]
    fn anchor_lookup_is_exact() {
        let m = manual(r#"<h3><a name="lua_call">lua_call</a></h3>"#);
        assert!(matches!(m.anchor_heading("lua_Call"), Err(Error::AnchorNotFound(_))));
        assert!(matches!(m.anchor_heading("lua_cal"), Err(Error::AnchorNotFound(_))));
    }

    #[test]
    fn siblings_include_text_and_elements_in_order() {
        let m = manual(r#"<h3><a name="f">f</a></h3>lead<pre>void f();</pre><p>Does &amp; things.</p>"#);
        let heading = m.anchor_heading("f").unwrap();
        let nodes: Vec<SectionNode> = heading.following_siblings().collect();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], SectionNode::text("lead"));
        assert!(nodes[1].has_label("pre"));
        assert_eq!(nodes[1].text, "void f();");
        assert_eq!(nodes[2].markup, "<p>Does &amp; things.</p>");
        assert_eq!(nodes[2].text, "Does & things.");
    }
}
