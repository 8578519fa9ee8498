//! Common test utilities for building dialogue graph documents.
use bunki::prelude::*;

/// Creates a dialogue node with a multi "Previous" input and a single
/// "Next" output that gates conditional chains.
#[allow(dead_code)]
pub fn speak_node(doc: &mut GraphDocument) -> String {
    let id = doc
        .create_node("dialogue.Speak", Position::new(0.0, 0.0))
        .id
        .clone();
    doc.create_port(&id, PortConfig::input("Previous", "flow"))
        .expect("input port");
    doc.create_port(
        &id,
        PortConfig::output("Next", "flow")
            .with_capacity(PortCapacity::Single)
            .with_conditional_gate(true),
    )
    .expect("output port");
    id
}

/// Looks up a port id on a node by its label.
#[allow(dead_code)]
pub fn port_id(doc: &GraphDocument, node_id: &str, label: &str) -> String {
    doc.find_node(node_id)
        .expect("node")
        .all_ports()
        .find(|port| port.label == label)
        .map(|port| port.id.clone())
        .expect("port by label")
}

/// Connects two ports by id, panicking on unresolvable ids.
#[allow(dead_code)]
pub fn connect_ports(doc: &mut GraphDocument, a: &str, b: &str) -> bool {
    let a = doc.port_ref(a).expect("port ref a");
    let b = doc.port_ref(b).expect("port ref b");
    doc.connect(&a, &b).expect("connect")
}

/// The `(id, conditional_source)` pairs of a node's chain, in port order.
#[allow(dead_code)]
pub fn conditional_sources(doc: &GraphDocument, node_id: &str) -> Vec<(String, Option<String>)> {
    doc.find_node(node_id)
        .expect("node")
        .conditional_ports()
        .map(|port| (port.id.clone(), port.conditional_source.clone()))
        .collect()
}

/// Builds the reference document used by the persistence and integration
/// tests: three dialogue nodes (two grouped), one empty group, a two-link
/// conditional chain, one field port of every kind and a handful of
/// connections.
#[allow(dead_code)]
pub fn sample_document() -> GraphDocument {
    let mut doc = GraphDocument::new();

    let chapter = doc
        .create_group("quest.Chapter", Position::new(40.0, 40.0))
        .id
        .clone();
    doc.rename_group(&chapter, "Intro").expect("rename group");
    let outro = doc
        .create_group("quest.Chapter", Position::new(40.0, 480.0))
        .id
        .clone();
    doc.rename_group(&outro, "Outro").expect("rename group");

    let greeting = speak_node(&mut doc);
    let branch = speak_node(&mut doc);
    let closer = speak_node(&mut doc);
    doc.rename_node(&greeting, "Greeting").expect("rename");
    doc.rename_node(&branch, "Branch").expect("rename");
    doc.rename_node(&closer, "Closer").expect("rename");

    doc.set_group(&greeting, &chapter).expect("group greeting");
    doc.set_group(&branch, &chapter).expect("group branch");

    doc.set_node_text(&greeting, "Oh, it's you again.")
        .expect("text");
    doc.move_node(&branch, Position::new(320.0, 80.0)).expect("move");

    // A bool output used to drive the chain on the branch node.
    doc.create_port(&greeting, PortConfig::output("Flag", "bool"))
        .expect("flag port");

    // Conditional chain of depth two on the branch node.
    let root = doc
        .add_conditional_port(&branch, None)
        .expect("chain root")
        .id
        .clone();
    doc.add_conditional_port(&branch, Some(&root))
        .expect("chain child");

    // One inline field of every kind on the closer.
    doc.create_port(
        &closer,
        PortConfig::input("Mood", "string").with_field(FieldValue::Text("neutral".to_string())),
    )
    .expect("mood field");
    doc.create_port(
        &closer,
        PortConfig::input("Delay", "number").with_field(FieldValue::Number("1.5".to_string())),
    )
    .expect("delay field");
    doc.create_port(
        &closer,
        PortConfig::input("Skippable", "bool").with_field(FieldValue::Bool("true".to_string())),
    )
    .expect("skippable field");

    let greeting_next = port_id(&doc, &greeting, "Next");
    let branch_prev = port_id(&doc, &branch, "Previous");
    let branch_next = port_id(&doc, &branch, "Next");
    let closer_prev = port_id(&doc, &closer, "Previous");
    let greeting_flag = port_id(&doc, &greeting, "Flag");

    assert!(connect_ports(&mut doc, &greeting_next, &branch_prev));
    assert!(connect_ports(&mut doc, &branch_next, &closer_prev));
    assert!(connect_ports(&mut doc, &greeting_flag, &root));

    doc
}
