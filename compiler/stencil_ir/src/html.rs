//! HTML interception records.
//!
//! Only populated when an [`HtmlConfig`] is supplied to the parser. The
//! parser keeps one [`HtmlTag`] per open intercepted tag and hands snapshots
//! of it to the visitor.

/// HTML5 elements that are never closed.
pub const VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Whether `name` is a void element.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Tag and attribute names to intercept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlConfig {
    pub tags: Vec<String>,
    pub attributes: Vec<String>,
}

impl HtmlConfig {
    pub fn new<T, A>(tags: T, attributes: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        HtmlConfig {
            tags: tags.into_iter().map(Into::into).collect(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn intercepts_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// An attribute seen inside an intercepted tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlAttribute {
    pub name: String,
    /// Set once the closing quote is seen.
    pub value: Option<String>,
    /// 0 before the value, 1 inside it, 2 after it.
    pub quote_count: u8,
    /// Byte offset of the first value character.
    pub value_start: usize,
}

impl HtmlAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        HtmlAttribute {
            name: name.into(),
            value: None,
            quote_count: 0,
            value_start: 0,
        }
    }
}

/// An intercepted tag that is currently open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTag {
    pub name: String,
    pub void: bool,
    pub attributes: Vec<HtmlAttribute>,
    /// Set once the tag's `>` has been seen.
    pub attributes_processed: bool,
}

impl HtmlTag {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        HtmlTag {
            void: is_void_element(&name),
            name,
            attributes: Vec::new(),
            attributes_processed: false,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&HtmlAttribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }
}
