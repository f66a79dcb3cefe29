use serde_json::json;
use tracklet::{
    Attributes, Boundary, BoundaryNode, Children, Emitter, EventOptions, Rendered, Scope,
};

mod common;
use common::{attrs, recording_client, wait_for_events};

async fn click(emitter: &Emitter, name: &str) {
    let _ = emitter
        .emit("clicked", Some(name), None, EventOptions::default())
        .await;
}

#[tokio::test]
async fn test_renders_static_children() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();

    let rendered = node.render(&root, &Boundary::new("test"), Children::Static("Test Content"));
    assert!(node.commit(&rendered).is_none());

    assert_eq!(rendered.output, "Test Content");
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_function_child_receives_bound_emitter() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let node = BoundaryNode::mount();

    let rendered = node.render(
        &root,
        &Boundary::new("test"),
        Children::with_emitter(|_, emit| emit.clone()),
    );
    click(&rendered.output, "button").await;

    let event = recorder.last().unwrap();
    assert_eq!(event.action, "clicked");
    assert_eq!(event.name.as_deref(), Some("button"));
    assert_eq!(event.boundary.as_deref(), Some("test"));
    assert_eq!(event.attributes, Attributes::new());
}

#[tokio::test]
async fn test_viewed_event_on_first_commit() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();

    let props = Boundary::new("test").send_viewed_event(true);
    let rendered = node.render(&root, &props, Children::Static(()));
    assert_eq!(recorder.count(), 0, "render must not emit");

    node.commit(&rendered).expect("viewed emission").await;

    let event = recorder.last().unwrap();
    assert_eq!(event.action, "viewed");
    assert!(event.name.is_none());
    assert_eq!(event.boundary.as_deref(), Some("test"));
    assert_eq!(event.attributes, Attributes::new());
}

#[tokio::test]
async fn test_no_viewed_event_when_disabled() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();

    let props = Boundary::new("test").send_viewed_event(false);
    let rendered = node.render(&root, &props, Children::Static(()));

    assert!(node.commit(&rendered).is_none());
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_viewed_event_fires_once_across_rerenders() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();
    let props = Boundary::new("test").send_viewed_event(true);

    let first = node.render(&root, &props, Children::Static("Test Content"));
    node.commit(&first).expect("viewed emission").await;
    assert_eq!(recorder.count(), 1);

    let same = node.render(&root, &props, Children::Static("Test Content Updated"));
    assert!(node.commit(&same).is_none());

    let renamed = Boundary::new("renamed")
        .attribute("changed", true)
        .send_viewed_event(true);
    let changed = node.render(&root, &renamed, Children::Static("Other"));
    assert!(node.commit(&changed).is_none());

    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn test_toggling_viewed_after_first_commit_is_inert() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));

    let mut node = BoundaryNode::mount();
    let first = node.render(&root, &Boundary::new("test").send_viewed_event(true), Children::Static(()));
    node.commit(&first).expect("viewed emission").await;
    let off = node.render(&root, &Boundary::new("test"), Children::Static(()));
    assert!(node.commit(&off).is_none());

    let mut late = BoundaryNode::mount();
    let first = late.render(&root, &Boundary::new("late"), Children::Static(()));
    assert!(late.commit(&first).is_none());
    let on = late.render(&root, &Boundary::new("late").send_viewed_event(true), Children::Static(()));
    assert!(late.commit(&on).is_none());

    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn test_remount_fires_viewed_again() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let props = Boundary::new("test").send_viewed_event(true);

    for _ in 0..2 {
        let mut node = BoundaryNode::mount();
        let rendered = node.render(&root, &props, Children::Static(()));
        node.commit(&rendered).expect("viewed emission").await;
        node.unmount();
    }

    assert_eq!(recorder.count(), 2);
}

#[tokio::test]
async fn test_unmount_emits_nothing() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();

    let rendered = node.render(&root, &Boundary::new("test").send_viewed_event(true), Children::Static(()));
    node.commit(&rendered).expect("viewed emission").await;
    recorder.clear();

    node.unmount();
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_nested_boundaries_merge_attributes() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let outer = BoundaryNode::mount();
    let inner = BoundaryNode::mount();

    let rendered = outer.render(
        &root,
        &Boundary::new("parent").attribute("parentAttr", "value"),
        Children::scoped(|scope| {
            inner.render(
                scope,
                &Boundary::new("child").attribute("childAttr", "value"),
                Children::with_emitter(|_, emit| emit.clone()),
            )
        }),
    );
    click(&rendered.output.output, "button").await;

    let event = recorder.last().unwrap();
    assert_eq!(event.boundary.as_deref(), Some("parent.child"));
    assert_eq!(
        event.attributes,
        attrs(json!({ "parentAttr": "value", "childAttr": "value" }))
    );
}

#[tokio::test]
async fn test_nested_emitters_keep_their_own_boundary() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let outer = BoundaryNode::mount();
    let inner = BoundaryNode::mount();

    let rendered: Rendered<(Emitter, Emitter)> = outer.render(
        &root,
        &Boundary::new("parent").attribute("parentAttr", "value"),
        Children::with_emitter(|scope, parent_emit| {
            let child = inner.render(
                scope,
                &Boundary::new("child").attribute("childAttr", "value"),
                Children::with_emitter(|_, child_emit| child_emit.clone()),
            );
            (parent_emit.clone(), child.output)
        }),
    );
    let (parent_emit, child_emit) = &rendered.output;

    click(parent_emit, "parent-button").await;
    let event = recorder.last().unwrap();
    assert_eq!(event.name.as_deref(), Some("parent-button"));
    assert_eq!(event.boundary.as_deref(), Some("parent"));
    assert_eq!(event.attributes, attrs(json!({ "parentAttr": "value" })));

    click(child_emit, "child-button").await;
    let event = recorder.last().unwrap();
    assert_eq!(event.name.as_deref(), Some("child-button"));
    assert_eq!(event.boundary.as_deref(), Some("parent.child"));
    assert_eq!(
        event.attributes,
        attrs(json!({ "parentAttr": "value", "childAttr": "value" }))
    );
}

#[tokio::test]
async fn test_deeply_nested_boundaries() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let nodes = [BoundaryNode::mount(), BoundaryNode::mount(), BoundaryNode::mount()];

    let rendered = nodes[0].render(
        &root,
        &Boundary::new("level1").attribute("attr1", "value1"),
        Children::scoped(|scope| {
            nodes[1].render(
                scope,
                &Boundary::new("level2").attribute("attr2", "value2"),
                Children::scoped(|scope| {
                    nodes[2].render(
                        scope,
                        &Boundary::new("level3").attribute("attr3", "value3"),
                        Children::with_emitter(|_, emit| emit.clone()),
                    )
                }),
            )
        }),
    );
    click(&rendered.output.output.output, "deep-button").await;

    let event = recorder.last().unwrap();
    assert_eq!(event.boundary.as_deref(), Some("level1.level2.level3"));
    assert_eq!(
        event.attributes,
        attrs(json!({ "attr1": "value1", "attr2": "value2", "attr3": "value3" }))
    );
}

#[tokio::test]
async fn test_empty_boundary_name() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let node = BoundaryNode::mount();

    let rendered = node.render(
        &root,
        &Boundary::new(""),
        Children::with_emitter(|_, emit| emit.clone()),
    );
    click(&rendered.output, "button").await;

    assert_eq!(recorder.last().unwrap().boundary.as_deref(), Some(""));
}

#[tokio::test]
async fn test_attribute_updates_apply_on_next_render() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();

    let first = node.render(
        &root,
        &Boundary::new("test").attribute("initial", "value"),
        Children::with_emitter(|_, emit| emit.clone()),
    );
    let _ = node.commit(&first);
    click(&first.output, "button").await;
    assert_eq!(recorder.last().unwrap().attributes, attrs(json!({ "initial": "value" })));

    let second = node.render(
        &root,
        &Boundary::new("test").attribute("updated", "value"),
        Children::with_emitter(|_, emit| emit.clone()),
    );
    let _ = node.commit(&second);
    click(&second.output, "button").await;
    assert_eq!(recorder.last().unwrap().attributes, attrs(json!({ "updated": "value" })));
}

#[tokio::test]
async fn test_viewed_event_carries_composed_identity() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let outer = BoundaryNode::mount();
    let mut inner = BoundaryNode::mount();

    let rendered = outer.render(
        &root,
        &Boundary::new("page").attribute("section", "hero"),
        Children::scoped(|scope| {
            inner.render(
                scope,
                &Boundary::new("banner").send_viewed_event(true),
                Children::Static(()),
            )
        }),
    );
    inner.commit(&rendered.output).expect("viewed emission").await;

    let event = recorder.last().unwrap();
    assert_eq!(event.action, "viewed");
    assert_eq!(event.boundary.as_deref(), Some("page.banner"));
    assert_eq!(event.attributes, attrs(json!({ "section": "hero" })));
}

#[tokio::test]
async fn test_viewed_event_is_sent_without_awaiting_commit() {
    let (client, recorder) = recording_client();
    let root = Scope::root(Some(client));
    let mut node = BoundaryNode::mount();

    let rendered = node.render(&root, &Boundary::new("hero").send_viewed_event(true), Children::Static(()));
    let _ = node.commit(&rendered);

    wait_for_events(&recorder, 1).await;
    let event = recorder.last().unwrap();
    assert_eq!(event.action, "viewed");
    assert_eq!(event.boundary.as_deref(), Some("hero"));
}
