#![allow(clippy::unwrap_used)]

//! Anchors for content rendered inside a scaled `<iframe>`.

use folio_dom::{DomRange, DomTree, NodeId, parse_html};
use folio_selection::{
    DomMeasure, Point, Position, PositionDir, Rect, SelectionConfig, Target, Viewport, place_popup,
    resolve_position, text_selection,
};

const CHAPTER: &str =
    r#"<p>Call me <i>Ishmael</i>.</p><aside style="padding: 4px 8px">note</aside>"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bounds() -> Rect {
    Rect::new(0.0, 1000.0, 800.0, 0.0)
}

/// Outer shell with the chapter embedded in its iframe.
fn reader(frame_style: &str) -> (DomTree, NodeId, NodeId) {
    let shell = format!(r#"<div><iframe style="{frame_style}"></iframe></div>"#);
    let mut outer = parse_html(&shell).unwrap();
    let chapter = parse_html(CHAPTER).unwrap();
    let iframe = outer.find_element(outer.root(), "iframe").unwrap();
    let document = outer.embed_document(iframe, &chapter);
    (outer, iframe, document)
}

fn measured<'tree>(tree: &'tree DomTree, iframe: NodeId, document: NodeId) -> DomMeasure<'tree> {
    let para = tree.find_element(document, "p").unwrap();
    let italic = tree.find_element(para, "i").unwrap();
    let texts = tree.children(para).to_vec();
    let italic_text = tree.children(italic)[0];
    DomMeasure::new(tree, Viewport::new(1000.0, 800.0))
        .with_client_rects(iframe, vec![Rect::from_xywh(100.0, 50.0, 400.0, 600.0)])
        .with_client_rects(texts[0], vec![Rect::from_xywh(10.0, 20.0, 60.0, 10.0)])
        .with_client_rects(italic, vec![Rect::from_xywh(70.0, 20.0, 50.0, 10.0)])
        .with_client_rects(italic_text, vec![Rect::from_xywh(70.0, 20.0, 50.0, 10.0)])
        .with_client_rects(texts[2], vec![Rect::from_xywh(120.0, 20.0, 5.0, 10.0)])
}

#[test]
fn span_in_scaled_frame_anchors_above_first_fragment() {
    init_logging();
    let (tree, iframe, document) = reader("transform: matrix(2, 0, 0, 2, 0, 0)");
    let measure = measured(&tree, iframe, document);
    let para = tree.find_element(document, "p").unwrap();
    let range = DomRange::select_node_contents(&tree, para);

    // First fragment maps to left 120, right 240, top 90.
    let position = resolve_position(&measure, &Target::Span(range), bounds(), 10.0, false);
    assert_eq!(position, Position::new(Point::new(180.0, 78.0), PositionDir::Up));
}

#[test]
fn translated_frame_keeps_its_scale() {
    init_logging();
    let (tree, iframe, document) = reader("transform: translate(-50%, 0) scale(2)");
    let measure = measured(&tree, iframe, document);
    let para = tree.find_element(document, "p").unwrap();
    let range = DomRange::select_node_contents(&tree, para);

    let position = resolve_position(&measure, &Target::Span(range), bounds(), 10.0, false);
    assert_eq!(position, Position::new(Point::new(180.0, 78.0), PositionDir::Up));
}

#[test]
fn unsupported_frame_transform_falls_back_to_unscaled() {
    init_logging();
    let (tree, iframe, document) = reader("transform: perspective(500px)");
    let measure = measured(&tree, iframe, document);
    let para = tree.find_element(document, "p").unwrap();
    let range = DomRange::select_node_contents(&tree, para);

    let position = resolve_position(&measure, &Target::Span(range), bounds(), 10.0, false);
    assert_eq!(position, Position::new(Point::new(140.0, 58.0), PositionDir::Up));
}

#[test]
fn element_anchor_uses_padding_from_its_style() {
    init_logging();
    let (tree, iframe, document) = reader("transform: matrix(2, 0, 0, 2, 0, 0)");
    let aside = tree.find_element(document, "aside").unwrap();
    let measure = measured(&tree, iframe, document)
        .with_client_rects(aside, vec![Rect::from_xywh(0.0, 100.0, 200.0, 40.0)]);

    // Content box: left 8, right 192, top 104; scaled and offset into the shell.
    let position = resolve_position(&measure, &Target::Element(aside), bounds(), 10.0, false);
    assert_eq!(position, Position::new(Point::new(300.0, 246.0), PositionDir::Up));
}

#[test]
fn outer_document_elements_are_not_offset() {
    init_logging();
    let (tree, iframe, document) = reader("transform: matrix(2, 0, 0, 2, 0, 0)");
    let shell = tree.find_element(tree.root(), "div").unwrap();
    let measure = measured(&tree, iframe, document)
        .with_client_rects(shell, vec![Rect::from_xywh(100.0, 50.0, 400.0, 600.0)]);

    let position = resolve_position(&measure, &Target::Element(shell), bounds(), 10.0, false);
    assert_eq!(position, Position::new(Point::new(300.0, 38.0), PositionDir::Up));
}

#[test]
fn popup_is_placed_for_a_visible_selection() {
    init_logging();
    let (tree, iframe, document) = reader("transform: matrix(2, 0, 0, 2, 0, 0)");
    let measure = measured(&tree, iframe, document);
    let para = tree.find_element(document, "p").unwrap();
    let range = DomRange::select_node_contents(&tree, para);

    let placement =
        place_popup(&measure, &Target::Span(range), bounds(), &SelectionConfig::default())
            .unwrap();
    assert_eq!(placement.anchor.point, Point::new(180.0, 78.0));
    // 240 x 160 popup centred on the anchor, pushed down to the padding.
    assert_eq!(
        placement.popup,
        Position::new(Point::new(60.0, 10.0), PositionDir::Up)
    );
}

#[test]
fn unmeasured_element_gets_no_popup() {
    init_logging();
    let (tree, iframe, document) = reader("");
    let aside = tree.find_element(document, "aside").unwrap();
    let measure = measured(&tree, iframe, document);

    let target = Target::Element(aside);
    assert_eq!(
        resolve_position(&measure, &target, bounds(), 10.0, false),
        Position::degraded()
    );
    assert!(place_popup(&measure, &target, bounds(), &SelectionConfig::default()).is_none());
}

#[test]
fn selection_carries_extracted_text() {
    init_logging();
    let (tree, _, document) = reader("");
    let para = tree.find_element(document, "p").unwrap();
    let range = DomRange::select_node_contents(&tree, para);

    let selection = text_selection(&tree, "sel-1", range, 3, &["sup"]).with_href("ch01.xhtml");
    assert_eq!(selection.text, "Call me Ishmael.");
    assert_eq!(selection.index, 3);
    assert_eq!(selection.href.as_deref(), Some("ch01.xhtml"));
    assert!(!selection.annotated);
    assert_eq!(selection.range, range);

    let annotated = selection.clone().with_annotated(true);
    assert!(annotated.annotated);
    assert_eq!(annotated.text, selection.text);
    assert!(!annotated.with_annotated(false).annotated);
}
