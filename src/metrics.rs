use crate::style::{parse_value, InlineStyle, Value};

/// Device viewport the snapshot is resolved against. The `rpx`
/// reference screen is 750 units wide, so `rpx` values map 1:1 to px
/// at the default width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 750.0,
            height: 1334.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Resolved box-model numbers for one element, in px.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
    pub margin: EdgeSizes,
    pub height: Option<f64>,
}

/// Resolves an element's inline style into box-model edge sizes.
/// Absent or unparseable values resolve to zero; the report degrades
/// rather than erroring.
pub fn resolve(style: &InlineStyle, viewport: Viewport) -> BoxMetrics {
    BoxMetrics {
        padding: get_edges(style, "padding", viewport),
        border: get_border_widths(style, viewport),
        margin: get_edges(style, "margin", viewport),
        height: style
            .get("height")
            .and_then(parse_value)
            .and_then(|v| v.try_to_px(viewport.width)),
    }
}

/// Takes a `padding`/`margin` shorthand and converts it to
/// (top, right, bottom, left)
fn to_sides(value: &Value) -> Option<(Value, Value, Value, Value)> {
    match value {
        Value::Number(_) | Value::Length(..) => Some((
            value.clone(),
            value.clone(),
            value.clone(),
            value.clone(),
        )),
        Value::Multiple(values) => match values.as_slice() {
            [] => None,
            [v] => Some((v.clone(), v.clone(), v.clone(), v.clone())),
            [top, left] => Some((top.clone(), left.clone(), top.clone(), left.clone())),
            [top, left, bottom] => {
                Some((top.clone(), left.clone(), bottom.clone(), left.clone()))
            }
            [top, right, bottom, left] => {
                Some((top.clone(), right.clone(), bottom.clone(), left.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

fn px(value: &Value, viewport: Viewport) -> f64 {
    value.try_to_px(viewport.width).unwrap_or(0.0)
}

/// Border widths also come as keywords
fn border_px(value: &Value, viewport: Viewport) -> f64 {
    if let Value::Keyword(kw) = value {
        return match kw.as_str() {
            "thin" => 1.0,
            "medium" => 3.0,
            "thick" => 5.0,
            _ => 0.0,
        };
    }
    px(value, viewport)
}

/// Shorthand first, then per-side overrides (`<prop>-top`, ...).
fn get_edges(style: &InlineStyle, prop: &str, viewport: Viewport) -> EdgeSizes {
    let sides = style
        .get(prop)
        .and_then(parse_value)
        .as_ref()
        .and_then(to_sides);
    let mut edges = match sides {
        Some((top, right, bottom, left)) => EdgeSizes {
            top: px(&top, viewport),
            right: px(&right, viewport),
            bottom: px(&bottom, viewport),
            left: px(&left, viewport),
        },
        None => EdgeSizes::default(),
    };
    if let Some(v) = style.get(&format!("{prop}-top")).and_then(parse_value) {
        edges.top = px(&v, viewport);
    }
    if let Some(v) = style.get(&format!("{prop}-right")).and_then(parse_value) {
        edges.right = px(&v, viewport);
    }
    if let Some(v) = style.get(&format!("{prop}-bottom")).and_then(parse_value) {
        edges.bottom = px(&v, viewport);
    }
    if let Some(v) = style.get(&format!("{prop}-left")).and_then(parse_value) {
        edges.left = px(&v, viewport);
    }
    edges
}

/// Extracts the width component of a `border` / `border-<side>`
/// shorthand: the first value that can be a border-width. A shorthand
/// that names a border-style but no width gets the `medium` default.
fn border_width_of(value: &Value) -> Option<Value> {
    let components = match value {
        Value::Multiple(values) => values.as_slice(),
        v => std::slice::from_ref(v),
    };
    if let Some(width) = components.iter().find(|v| v.is_width()) {
        return Some(width.clone());
    }
    if components.iter().any(|v| v.is_border_style()) {
        return Some(Value::Keyword("medium".to_string()));
    }
    None
}

/// Constructs border edge widths from the properties:
/// `border`, `border-width`, `border-<side>`
fn get_border_widths(style: &InlineStyle, viewport: Viewport) -> EdgeSizes {
    let mut edges = match style
        .get("border")
        .and_then(parse_value)
        .as_ref()
        .and_then(border_width_of)
    {
        Some(width) => {
            let w = border_px(&width, viewport);
            EdgeSizes {
                top: w,
                right: w,
                bottom: w,
                left: w,
            }
        }
        None => EdgeSizes::default(),
    };
    if let Some((top, right, bottom, left)) = style
        .get("border-width")
        .and_then(parse_value)
        .as_ref()
        .and_then(to_sides)
    {
        edges = EdgeSizes {
            top: border_px(&top, viewport),
            right: border_px(&right, viewport),
            bottom: border_px(&bottom, viewport),
            left: border_px(&left, viewport),
        };
    }
    if let Some(w) = style
        .get("border-top")
        .and_then(parse_value)
        .as_ref()
        .and_then(border_width_of)
    {
        edges.top = border_px(&w, viewport);
    }
    if let Some(w) = style
        .get("border-right")
        .and_then(parse_value)
        .as_ref()
        .and_then(border_width_of)
    {
        edges.right = border_px(&w, viewport);
    }
    if let Some(w) = style
        .get("border-bottom")
        .and_then(parse_value)
        .as_ref()
        .and_then(border_width_of)
    {
        edges.bottom = border_px(&w, viewport);
    }
    if let Some(w) = style
        .get("border-left")
        .and_then(parse_value)
        .as_ref()
        .and_then(border_width_of)
    {
        edges.left = border_px(&w, viewport);
    }
    edges
}

#[cfg(test)]
fn style_of(entries: &[(&str, &str)]) -> InlineStyle {
    let mut style = InlineStyle::default();
    for (name, value) in entries {
        style.set_property(name, value);
    }
    style
}

#[cfg(test)]
#[test]
fn test_rpx_resolution() {
    let style = style_of(&[("padding", "20rpx"), ("height", "100rpx")]);
    let reference = resolve(&style, Viewport::default());
    assert_eq!(reference.padding.top, 20.0);
    assert_eq!(reference.height, Some(100.0));

    let half = resolve(
        &style,
        Viewport {
            width: 375.0,
            height: 667.0,
        },
    );
    assert_eq!(half.padding.top, 10.0);
    assert_eq!(half.height, Some(50.0));
}

#[cfg(test)]
#[test]
fn test_shorthand_expansion() {
    let style = style_of(&[("margin", "1px 2px")]);
    let m = resolve(&style, Viewport::default()).margin;
    assert_eq!(
        m,
        EdgeSizes {
            top: 1.0,
            right: 2.0,
            bottom: 1.0,
            left: 2.0,
        }
    );

    let style = style_of(&[("margin", "1px 2px 3px")]);
    let m = resolve(&style, Viewport::default()).margin;
    assert_eq!(
        m,
        EdgeSizes {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 2.0,
        }
    );

    let style = style_of(&[("padding", "1px 2px 3px 4px")]);
    let p = resolve(&style, Viewport::default()).padding;
    assert_eq!(
        p,
        EdgeSizes {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        }
    );
}

#[cfg(test)]
#[test]
fn test_side_overrides_shorthand() {
    let style = style_of(&[("padding", "10px"), ("paddingTop", "3px")]);
    let p = resolve(&style, Viewport::default()).padding;
    assert_eq!(p.top, 3.0);
    assert_eq!(p.right, 10.0);
    assert_eq!(p.bottom, 10.0);
    assert_eq!(p.left, 10.0);
}

#[cfg(test)]
#[test]
fn test_border_width_extraction() {
    let style = style_of(&[("border", "5px solid #000")]);
    let b = resolve(&style, Viewport::default()).border;
    assert_eq!(
        b,
        EdgeSizes {
            top: 5.0,
            right: 5.0,
            bottom: 5.0,
            left: 5.0,
        }
    );

    let style = style_of(&[("border", "5px solid #000"), ("border-left", "1px dotted #f40")]);
    let b = resolve(&style, Viewport::default()).border;
    assert_eq!(b.left, 1.0);
    assert_eq!(b.top, 5.0);

    let style = style_of(&[("border", "5px solid #000"), ("border-width", "1px 2px")]);
    let b = resolve(&style, Viewport::default()).border;
    assert_eq!(
        b,
        EdgeSizes {
            top: 1.0,
            right: 2.0,
            bottom: 1.0,
            left: 2.0,
        }
    );
}

#[cfg(test)]
#[test]
fn test_unparseable_resolves_to_zero() {
    let style = style_of(&[("margin", "auto auto"), ("height", "tall")]);
    let metrics = resolve(&style, Viewport::default());
    assert_eq!(metrics.margin, EdgeSizes::default());
    assert_eq!(metrics.height, None);
    assert_eq!(metrics.padding, EdgeSizes::default());
}

#[cfg(test)]
#[test]
fn test_border_keyword_widths() {
    let style = style_of(&[("border", "thick solid #000")]);
    let b = resolve(&style, Viewport::default()).border;
    assert_eq!(b.top, 5.0);

    // No width component at all: border-style implies `medium`
    let style = style_of(&[("border", "solid #000")]);
    let b = resolve(&style, Viewport::default()).border;
    assert_eq!(
        b,
        EdgeSizes {
            top: 3.0,
            right: 3.0,
            bottom: 3.0,
            left: 3.0,
        }
    );

    // A bare color declares no border box at all
    let style = style_of(&[("border", "#f40")]);
    let b = resolve(&style, Viewport::default()).border;
    assert_eq!(b, EdgeSizes::default());
}
