use crate::dom::{Document, NodeId, Result};
use crate::style::{set_style, StyleMap};
use crate::style_map;
use once_cell::sync::Lazy;
use tracing::{span, Level};

/// Style tables for the three nested containers, outermost first.
/// Only the innermost carries a `height`; it is the regression target.
static CONTAINER_STYLES: Lazy<[StyleMap; 3]> = Lazy::new(|| {
    [
        style_map! {
            padding: "20rpx",
            backgroundColor: "#999",
            margin: "40rpx",
            border: "5px solid #000",
        },
        style_map! {
            padding: "20rpx",
            backgroundColor: "#666",
            margin: "40rpx",
            border: "5px solid #000",
        },
        style_map! {
            padding: "20rpx",
            height: "100rpx",
            backgroundColor: "#f40",
            margin: "40rpx",
            border: "5px solid #000",
        },
    ]
});

/// One-shot construction of the box-model fixture: three nested styled
/// containers holding a "Hello World" text node, attached to the body.
/// A failing step aborts the rest; there is no rollback. Returns the
/// outermost container.
pub fn build(doc: &mut Document) -> Result<NodeId> {
    let span = span!(Level::DEBUG, "Building box-model fixture");
    let _enter = span.enter();

    let container1 = doc.create_element("div");
    set_style(doc, container1, &CONTAINER_STYLES[0])?;

    let container2 = doc.create_element("div");
    set_style(doc, container2, &CONTAINER_STYLES[1])?;

    let container3 = doc.create_element("div");
    set_style(doc, container3, &CONTAINER_STYLES[2])?;

    let text = doc.create_text_node("Hello World");

    let body = doc.body();
    doc.append_child(body, container1)?;
    doc.append_child(container1, container2)?;
    doc.append_child(container2, container3)?;
    doc.append_child(container3, text)?;
    Ok(container1)
}

#[cfg(test)]
#[test]
fn test_tree_shape() {
    let mut doc = Document::new();
    let container1 = build(&mut doc).unwrap();

    let body_children = doc.children(doc.body());
    assert_eq!(body_children, vec![container1]);
    assert_eq!(doc.tag_name(container1), Some("div"));

    let container2 = doc.children(container1)[0];
    let container3 = doc.children(container2)[0];
    assert_eq!(doc.children(container1).len(), 1);
    assert_eq!(doc.children(container2).len(), 1);
    assert_eq!(doc.children(container3).len(), 0);

    let text_nodes = doc.child_nodes(container3);
    assert_eq!(text_nodes.len(), 1);
    assert_eq!(doc.text(text_nodes[0]), Some("Hello World"));
    assert_eq!(doc.text_content(container1), "Hello World");
}

#[cfg(test)]
#[test]
fn test_innermost_container_styles() {
    let mut doc = Document::new();
    let container1 = build(&mut doc).unwrap();
    let container2 = doc.children(container1)[0];
    let container3 = doc.children(container2)[0];

    let style = doc.style(container3).unwrap();
    assert_eq!(style.get("padding"), Some("20rpx"));
    assert_eq!(style.get("height"), Some("100rpx"));
    assert_eq!(style.get("backgroundColor"), Some("#f40"));
    assert_eq!(style.get("margin"), Some("40rpx"));
    assert_eq!(style.get("border"), Some("5px solid #000"));
}

#[cfg(test)]
#[test]
fn test_outer_containers_have_no_height() {
    let mut doc = Document::new();
    let container1 = build(&mut doc).unwrap();
    let container2 = doc.children(container1)[0];

    assert_eq!(doc.style(container1).unwrap().get("height"), None);
    assert_eq!(doc.style(container2).unwrap().get("height"), None);
    assert_eq!(
        doc.style(container1).unwrap().get("background-color"),
        Some("#999")
    );
    assert_eq!(
        doc.style(container2).unwrap().get("background-color"),
        Some("#666")
    );
}
