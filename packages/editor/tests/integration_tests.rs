//! Integration tests for editor crate

use pagecraft_editor::{
    leaf_styles, Document, DropOutcome, EditSession, NodeKind, Parent, Placement, Rejection,
    SequentialIdGenerator,
};
use pagecraft_model::{Node, NodeId, Styles};
use serde_json::json;

fn leaf(id: &str) -> Node {
    Node::leaf(id.into(), NodeKind::Paragraph, id, Styles::new()).unwrap()
}

fn container(id: &str, children: Vec<Node>) -> Node {
    Node::container(id.into(), "", Styles::new(), children)
}

fn session(nodes: Vec<Node>) -> EditSession {
    let doc = Document::from_nodes(nodes).unwrap();
    EditSession::new("test-client", doc).with_id_generator(SequentialIdGenerator::new("new"))
}

fn root_ids(doc: &Document) -> Vec<&str> {
    doc.roots().iter().map(|id| id.as_str()).collect()
}

#[test]
fn test_document_lifecycle() {
    let blob = json!([
        {
            "id": "hero",
            "type": "container",
            "content": "",
            "styles": { "padding": "20px" },
            "children": [
                { "id": "title", "type": "heading", "content": "Welcome", "styles": {} }
            ]
        }
    ]);

    let doc = Document::from_blob(blob.clone());
    assert_eq!(doc.version, 0);
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.find("title").unwrap().content, "Welcome");
    assert_eq!(doc.to_blob().unwrap(), blob);
}

#[test]
fn test_malformed_blob_degrades_to_empty() {
    let bad = [
        json!({ "not": "a list" }),
        json!([{ "id": "x", "type": "table" }]),
        json!([{ "id": "a", "type": "button" }, { "id": "a", "type": "button" }]),
        json!([{ "id": "canvas", "type": "container" }]),
    ];

    for blob in bad {
        assert!(Document::try_from_blob(blob.clone()).is_err());
        assert!(Document::from_blob(blob).is_empty());
    }
}

#[test]
fn test_palette_drop_into_empty_canvas() {
    let mut session = session(vec![]);

    assert!(session.drag_start("heading"));
    session.drag_over("heading", Some("canvas"), Placement::After);
    assert!(session.drop_indicator_id().is_none());

    let outcome = session.drag_end("heading", Some("canvas"), Placement::After);
    let DropOutcome::Inserted { node_id, parent } = outcome else {
        panic!("expected an insert");
    };

    let doc = session.document();
    assert_eq!(parent, Parent::Root);
    assert_eq!(doc.roots(), &[node_id.clone()]);

    let heading = doc.find(&node_id).unwrap();
    assert_eq!(heading.kind, NodeKind::Heading);
    assert_eq!(heading.styles, leaf_styles());
    assert!(heading.children.is_none());
}

#[test]
fn test_palette_drop_nests_into_container() {
    let mut session = session(vec![container("a", vec![])]);
    let before = session.document().find("a").unwrap().clone();

    let outcome = session.drag_end("button", Some("a"), Placement::After);
    assert!(outcome.is_applied());

    let doc = session.document();
    let a = doc.find("a").unwrap();
    assert_eq!(a.children().len(), 1);
    assert_eq!(doc.find(&a.children()[0]).unwrap().kind, NodeKind::Button);

    assert_eq!(a.kind, before.kind);
    assert_eq!(a.content, before.content);
    assert_eq!(a.styles, before.styles);
    assert_eq!(a.parent, before.parent);
}

#[test]
fn test_palette_drop_next_to_leaf() {
    let mut session = session(vec![leaf("x"), leaf("y")]);

    let outcome = session.drag_end("paragraph", Some("x"), Placement::After);
    let DropOutcome::Inserted { node_id, .. } = outcome else {
        panic!("expected an insert");
    };

    assert_eq!(root_ids(session.document()), vec!["x", node_id.as_str(), "y"]);
}

#[test]
fn test_reorder_siblings() {
    let mut session = session(vec![leaf("x"), leaf("y"), leaf("z")]);

    assert!(session.drag_start("x"));
    session.drag_over("x", Some("z"), Placement::After);
    assert_eq!(session.drop_indicator_id(), Some(&NodeId::from("z")));

    let outcome = session.drag_end("x", Some("z"), Placement::After);

    assert_eq!(
        outcome,
        DropOutcome::Moved {
            node_id: "x".into(),
            parent: Parent::Root
        }
    );
    assert_eq!(root_ids(session.document()), vec!["y", "z", "x"]);
    assert!(session.dragging_node_id().is_none());
    assert!(session.drop_indicator_id().is_none());
}

#[test]
fn test_reorder_before_sibling() {
    let mut session = session(vec![leaf("x"), leaf("y"), leaf("z")]);
    session.drag_end("z", Some("x"), Placement::Before);
    assert_eq!(root_ids(session.document()), vec!["z", "x", "y"]);
}

#[test]
fn test_self_drop_is_noop() {
    let mut session = session(vec![leaf("x"), container("c", vec![])]);
    let before = session.document().clone();

    let outcome = session.drag_end("x", Some("x"), Placement::After);

    assert_eq!(outcome.rejection(), Some(&Rejection::SelfDrop));
    assert_eq!(session.document(), &before);
}

#[test]
fn test_invalid_targets_are_noops() {
    let mut session = session(vec![leaf("x")]);
    let before = session.document().clone();

    let cases = [
        (None, Rejection::NoTarget),
        (Some("sidebar-container"), Rejection::InvalidTarget("sidebar-container".into())),
        (Some("button"), Rejection::InvalidTarget("button".into())),
        (Some("ghost"), Rejection::NotFound("ghost".into())),
    ];

    for (over, expected) in cases {
        let outcome = session.drag_end("heading", over, Placement::After);
        assert_eq!(outcome.rejection(), Some(&expected));
        assert_eq!(session.document(), &before);
    }
}

#[test]
fn test_cycle_drop_is_noop() {
    let mut session = session(vec![container(
        "outer",
        vec![container("inner", vec![leaf("deep")])],
    )]);
    let before = session.document().to_blob().unwrap();

    let outcome = session.drag_end("outer", Some("inner"), Placement::After);
    assert_eq!(outcome.rejection(), Some(&Rejection::CycleRejected));

    let outcome = session.drag_end("outer", Some("deep"), Placement::After);
    assert_eq!(outcome.rejection(), Some(&Rejection::CycleRejected));

    assert_eq!(session.document().to_blob().unwrap(), before);
}

#[test]
fn test_column_layout_columns_accept_drops() {
    let mut session = session(vec![]);

    let outcome = session.drag_end("2-columns", Some("canvas"), Placement::After);
    let DropOutcome::Inserted { node_id: row, .. } = outcome else {
        panic!("expected an insert");
    };

    let columns = session.document().find(&row).unwrap().children().to_vec();
    assert_eq!(columns.len(), 2);

    for column in &columns {
        let outcome = session.drag_end("button", Some(column.as_str()), Placement::After);
        assert!(outcome.is_applied());
    }
    for column in &columns {
        assert_eq!(session.document().find(column).unwrap().children().len(), 1);
    }
    assert_eq!(session.document().len(), 5);
}

#[test]
fn test_aborted_palette_drag_leaves_no_trace() {
    let mut session = session(vec![leaf("x")]);
    let before = session.document().clone();

    assert!(session.drag_start("container"));
    session.drag_over("container", Some("x"), Placement::After);
    session.cancel_drag();

    assert_eq!(session.document(), &before);
    assert!(!session.resolver().is_dragging());
}

#[test]
fn test_preview_toggle_cancels_drag() {
    let mut session = session(vec![leaf("x"), leaf("y")]);

    assert!(session.drag_start("x"));
    session.drag_over("x", Some("y"), Placement::After);
    assert!(session.toggle_preview());

    assert!(session.dragging_node_id().is_none());
    assert!(session.drop_indicator_id().is_none());

    let outcome = session.drag_end("x", Some("y"), Placement::After);
    assert_eq!(outcome.rejection(), Some(&Rejection::PreviewMode));
    assert_eq!(root_ids(session.document()), vec!["x", "y"]);
}
