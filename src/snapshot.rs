use crate::dom::{Document, NodeId};
use crate::metrics::{self, EdgeSizes, Viewport};
use tracing::{span, Level};

/// Renders the document to the regression snapshot: the serialized body
/// markup followed by the resolved box metrics of every element.
/// Output depends only on tree order and declaration order.
pub fn render(doc: &Document, viewport: Viewport) -> String {
    let span = span!(Level::DEBUG, "Rendering snapshot");
    let _enter = span.enter();
    let mut out = String::new();
    out.push_str(&format!("viewport {}x{}\n", viewport.width, viewport.height));
    out.push_str("\n[markup]\n");
    write_markup(doc, doc.body(), 0, &mut out);
    out.push_str("\n[boxes]\n");
    write_boxes(doc, doc.body(), 0, viewport, &mut out);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_markup(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    if let Some(text) = doc.text(id) {
        indent(out, depth);
        out.push_str(&format!("{text:?}\n"));
        return;
    }
    let Some(element) = doc.element(id) else {
        return;
    };
    indent(out, depth);
    if element.style.is_empty() {
        out.push_str(&format!("<{}>", element.tag_name));
    } else {
        out.push_str(&format!(
            "<{} style=\"{}\">",
            element.tag_name,
            element.style.css_text()
        ));
    }
    let children = doc.child_nodes(id);
    if children.is_empty() {
        out.push_str(&format!("</{}>\n", element.tag_name));
        return;
    }
    out.push('\n');
    for child in children {
        write_markup(doc, *child, depth + 1, out);
    }
    indent(out, depth);
    out.push_str(&format!("</{}>\n", element.tag_name));
}

fn edges(e: EdgeSizes) -> String {
    format!("[{} {} {} {}]", e.top, e.right, e.bottom, e.left)
}

fn write_boxes(doc: &Document, id: NodeId, depth: usize, viewport: Viewport, out: &mut String) {
    let Some(element) = doc.element(id) else {
        return;
    };
    let resolved = metrics::resolve(&element.style, viewport);
    let height = match resolved.height {
        Some(h) => format!("{h}"),
        None => "auto".to_string(),
    };
    indent(out, depth);
    out.push_str(&format!(
        "{} padding={} border={} margin={} height={}\n",
        element.tag_name,
        edges(resolved.padding),
        edges(resolved.border),
        edges(resolved.margin),
        height,
    ));
    for child in doc.child_nodes(id) {
        write_boxes(doc, *child, depth + 1, viewport, out);
    }
}

#[cfg(test)]
#[test]
fn test_fixture_snapshot() {
    use crate::fixture;

    let mut doc = Document::new();
    fixture::build(&mut doc).unwrap();
    let snapshot = render(&doc, Viewport::default());

    let target = r#"viewport 750x1334

[markup]
<body>
  <div style="padding: 20rpx; background-color: #999; margin: 40rpx; border: 5px solid #000;">
    <div style="padding: 20rpx; background-color: #666; margin: 40rpx; border: 5px solid #000;">
      <div style="padding: 20rpx; height: 100rpx; background-color: #f40; margin: 40rpx; border: 5px solid #000;">
        "Hello World"
      </div>
    </div>
  </div>
</body>

[boxes]
body padding=[0 0 0 0] border=[0 0 0 0] margin=[0 0 0 0] height=auto
  div padding=[20 20 20 20] border=[5 5 5 5] margin=[40 40 40 40] height=auto
    div padding=[20 20 20 20] border=[5 5 5 5] margin=[40 40 40 40] height=auto
      div padding=[20 20 20 20] border=[5 5 5 5] margin=[40 40 40 40] height=100
"#;
    assert_eq!(snapshot, target);
}

#[cfg(test)]
#[test]
fn test_render_is_stable() {
    use crate::fixture;

    let mut doc = Document::new();
    fixture::build(&mut doc).unwrap();
    let first = render(&doc, Viewport::default());
    let second = render(&doc, Viewport::default());
    assert_eq!(first, second);
}

#[cfg(test)]
#[test]
fn test_empty_body_markup() {
    let doc = Document::new();
    let snapshot = render(&doc, Viewport::default());
    assert!(snapshot.contains("<body></body>"));
}
