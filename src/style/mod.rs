use crate::dom::{Document, NodeId, Result};

mod parsing;
pub use parsing::parse_value;

/// `rpx` resolves against a 750-unit-wide reference screen.
const RPX_BASE: f64 = 750.0;
const BASE_FONT_SIZE: f64 = 16.0;

/// Normalize a script-style property name to its css form:
/// `backgroundColor` -> `background-color`.
fn css_name(prop: &str) -> String {
    let mut out = String::new();
    for ch in prop.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// A plain property -> value mapping, the input to [`set_style`].
/// Entries keep declaration order; keys are unique (re-declaring replaces).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap(Vec<(String, String)>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        if let Some(pos) = self.0.iter().position(|(existing, _)| existing == &name) {
            self.0[pos].1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[macro_export]
macro_rules! style_map {
    ($($name:ident: $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::style::StyleMap::new();
        $(map.declare(stringify!($name), $value);)*
        map
    }};
}

/// A node's mutable style surface. Declarations keep first-insertion
/// order; property names are stored in css form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Assign one property. Re-setting overwrites in place; an empty
    /// value removes the declaration.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = css_name(name).to_ascii_lowercase();
        if name.is_empty() {
            return;
        }
        if let Some(pos) = self.declarations.iter().position(|(n, _)| n == &name) {
            if value.is_empty() {
                self.declarations.remove(pos);
            } else {
                self.declarations[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            self.declarations.push((name, value.to_string()));
        }
    }

    /// Look a property up by either its css or its script name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = css_name(name).to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|(n, _)| n == &name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialized `name: value;` declaration text, in declaration order.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for (idx, (name, value)) in self.declarations.iter().enumerate() {
            if idx > 0 {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push(';');
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }
}

/// Copies every entry of `styles` onto the node's style surface, in map
/// order. The map is a plain container, so there are no inherited
/// entries to skip. Errors if the node is not an element.
pub fn set_style(doc: &mut Document, node: NodeId, styles: &StyleMap) -> Result<()> {
    let surface = doc.style_mut(node)?;
    for (name, value) in styles.iter() {
        surface.set_property(name, value);
    }
    Ok(())
}

/// A parsed style value. Only what the box report needs; everything else
/// stays a [`Value::Keyword`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Keyword(String),
    Number(f64),
    Length(f64, Unit),
    Color(ColorValue),
    Multiple(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Rpx,
    Em,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Value {
    /// Attempts to convert this value to a concrete pixel size.
    /// `rpx` is relative to a 750-unit-wide reference screen.
    pub fn try_to_px(&self, viewport_width: f64) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Length(n, Unit::Px) => Some(*n),
            Value::Length(n, Unit::Rpx) => Some(*n * viewport_width / RPX_BASE),
            Value::Length(n, Unit::Em) | Value::Length(n, Unit::Rem) => {
                Some(*n * BASE_FONT_SIZE)
            }
            _ => None,
        }
    }

    /// Checks if this is a valid `border-width` component
    pub fn is_width(&self) -> bool {
        if let Value::Keyword(kw) = self {
            ["thin", "medium", "thick"].contains(&kw.as_str())
        } else {
            matches!(self, Value::Number(..)) || matches!(self, Value::Length(..))
        }
    }

    /// Checks if this is a valid border-style keyword
    pub fn is_border_style(&self) -> bool {
        if let Value::Keyword(kw) = self {
            [
                "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge",
                "inset", "outset",
            ]
            .contains(&kw.as_str())
        } else {
            false
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Value::Color(_))
    }
}

#[cfg(test)]
#[test]
fn test_css_name() {
    assert_eq!(css_name("backgroundColor"), "background-color");
    assert_eq!(css_name("padding"), "padding");
    assert_eq!(css_name("borderTopWidth"), "border-top-width");
}

#[cfg(test)]
#[test]
fn test_surface_overwrites_in_place() {
    let mut style = InlineStyle::default();
    style.set_property("color", "blue");
    style.set_property("borderColor", "black");
    style.set_property("color", "red");
    assert_eq!(style.css_text(), "color: red; border-color: black;");
    assert_eq!(style.get("color"), Some("red"));
    assert_eq!(style.len(), 2);
}

#[cfg(test)]
#[test]
fn test_surface_empty_value_removes() {
    let mut style = InlineStyle::default();
    style.set_property("color", "blue");
    style.set_property("color", "");
    assert!(style.is_empty());
    assert_eq!(style.css_text(), "");
}

#[cfg(test)]
#[test]
fn test_set_style_applies_own_entries_only() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let styles = style_map! {
        padding: "20rpx",
        backgroundColor: "#999",
    };
    set_style(&mut doc, div, &styles).unwrap();
    let surface = doc.style(div).unwrap();
    // Exactly the map's entries, nothing else, in map order
    assert_eq!(surface.len(), styles.len());
    assert_eq!(
        surface.iter().collect::<Vec<_>>(),
        vec![("padding", "20rpx"), ("background-color", "#999")]
    );
    assert_eq!(surface.get("padding"), Some("20rpx"));
    assert_eq!(surface.get("backgroundColor"), Some("#999"));
    assert_eq!(surface.get("background-color"), Some("#999"));
    assert_eq!(surface.get("margin"), None);
}

#[cfg(test)]
#[test]
fn test_set_style_idempotent() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    let styles = style_map! { margin: "40rpx", border: "5px solid #000" };
    set_style(&mut doc, div, &styles).unwrap();
    let once = doc.style(div).unwrap().clone();
    set_style(&mut doc, div, &styles).unwrap();
    assert_eq!(doc.style(div).unwrap(), &once);
}

#[cfg(test)]
#[test]
fn test_set_style_later_map_wins() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    set_style(&mut doc, div, &style_map! { padding: "1px", margin: "2px" }).unwrap();
    set_style(&mut doc, div, &style_map! { margin: "3px" }).unwrap();
    let surface = doc.style(div).unwrap();
    assert_eq!(surface.get("padding"), Some("1px"));
    assert_eq!(surface.get("margin"), Some("3px"));
}

#[cfg(test)]
#[test]
fn test_set_style_empty_map_noop() {
    let mut doc = Document::new();
    let div = doc.create_element("div");
    set_style(&mut doc, div, &style_map! { padding: "1px" }).unwrap();
    let before = doc.style(div).unwrap().clone();
    let empty = StyleMap::new();
    assert!(empty.is_empty());
    set_style(&mut doc, div, &empty).unwrap();
    assert_eq!(doc.style(div).unwrap(), &before);
}

#[cfg(test)]
#[test]
fn test_value_classification() {
    let black = ColorValue {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    assert!(Value::Length(5.0, Unit::Px).is_width());
    assert!(Value::Number(0.0).is_width());
    assert!(Value::Keyword("thin".to_string()).is_width());
    assert!(!Value::Keyword("solid".to_string()).is_width());
    assert!(Value::Keyword("solid".to_string()).is_border_style());
    assert!(!Value::Keyword("solid".to_string()).is_color());
    assert!(Value::Color(black).is_color());
    assert!(!Value::Color(black).is_width());
}

#[cfg(test)]
#[test]
fn test_set_style_rejects_non_elements() {
    use crate::dom::Error;
    let mut doc = Document::new();
    let text = doc.create_text_node("hi");
    let err = set_style(&mut doc, text, &style_map! { padding: "1px" }).unwrap_err();
    assert_eq!(err, Error::NotAnElement("style"));
}
