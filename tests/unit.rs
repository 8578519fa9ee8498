//! Unit tests for tags, field values, port compatibility and the kind catalog.
mod common;
use bunki::error::{AssetError, CatalogError, GraphError};
use bunki::prelude::*;

#[test]
fn test_type_tag_display_and_short_name() {
    let tag = TypeTag::new("quest.Dialogue");
    assert_eq!(format!("{}", tag), "quest.Dialogue");
    assert_eq!(tag.short_name(), "Dialogue");
    assert_eq!(TypeTag::new("actor:Npc").short_name(), "Npc");
    assert_eq!(TypeTag::new("flow").short_name(), "flow");
    assert!(TypeTag::new("").is_empty());
}

#[test]
fn test_tags_intersect_is_verbatim() {
    let number = vec![TypeTag::new(tags::NUMBER)];
    let widened = vec![TypeTag::new(tags::NUMBER), TypeTag::new(tags::STRING)];
    let text = vec![TypeTag::new(tags::STRING)];
    let flow = vec![TypeTag::new("flow")];

    assert!(tags_intersect(&number, &widened));
    assert!(tags_intersect(&widened, &text));
    assert!(!tags_intersect(&number, &text));
    assert!(!tags_intersect(&flow, &number));
    // No coercion: casing and spelling must match exactly.
    assert!(!tags_intersect(&[TypeTag::new("Number")], &number));
}

#[test]
fn test_field_value_for_tag() {
    let bool_field = FieldValue::for_tag(&TypeTag::new(tags::BOOL), "true");
    let number_field = FieldValue::for_tag(&TypeTag::new(tags::NUMBER), "3.5");
    let unknown_field = FieldValue::for_tag(&TypeTag::new("quest.Dialogue"), "hello");

    assert_eq!(bool_field, FieldValue::Bool("true".to_string()));
    assert_eq!(number_field, FieldValue::Number("3.5".to_string()));
    // Unknown tags fall back to the text editor.
    assert_eq!(unknown_field, FieldValue::Text("hello".to_string()));
}

#[test]
fn test_field_value_validators() {
    assert!(FieldValue::Bool("true".to_string()).is_valid());
    assert!(FieldValue::Bool("FALSE".to_string()).is_valid());
    assert!(!FieldValue::Bool("yes".to_string()).is_valid());

    assert!(FieldValue::Number("1.5".to_string()).is_valid());
    assert!(FieldValue::Number("-12".to_string()).is_valid());
    assert!(!FieldValue::Number("twelve".to_string()).is_valid());

    assert!(FieldValue::Text(String::new()).is_valid());
    assert!(FieldValue::Text("anything at all!".to_string()).is_valid());
}

#[test]
fn test_field_value_set_keeps_kind() {
    let mut field = FieldValue::Number("1".to_string());
    field.set("2.5");
    assert_eq!(field, FieldValue::Number("2.5".to_string()));
    assert_eq!(field.raw(), "2.5");
    assert_eq!(field.kind_name(), "number");
    assert_eq!(format!("{}", field), "2.5");
}

#[test]
fn test_port_config_defaults() {
    let mut doc = GraphDocument::new();
    let node = doc.create_node("dialogue.Speak", Position::default()).id.clone();
    let port = doc
        .create_port(&node, PortConfig::output("Next", "flow"))
        .expect("port")
        .clone();

    assert_eq!(port.side, PortSide::Output);
    assert_eq!(port.capacity, PortCapacity::Multi);
    assert_eq!(port.accepted, vec![TypeTag::new("flow")]);
    assert!(!port.removable);
    assert!(!port.conditional);
    assert!(port.conditional_source.is_none());
    assert!(port.field.is_none());
    assert!(port.anchor.is_none());
    assert!(port.connections.is_empty());
}

#[test]
fn test_port_config_widened_accepted_set() {
    let mut doc = GraphDocument::new();
    let node = doc.create_node("dialogue.Speak", Position::default()).id.clone();
    let port = doc
        .create_port(
            &node,
            PortConfig::input("Value", tags::NUMBER)
                .with_accepted(vec![TypeTag::new(tags::NUMBER), TypeTag::new(tags::STRING)]),
        )
        .expect("port")
        .clone();

    assert_eq!(port.value_tag, TypeTag::new(tags::NUMBER));
    assert_eq!(port.accepted.len(), 2);
}

#[test]
fn test_port_side_opposite() {
    assert_eq!(PortSide::Input.opposite(), PortSide::Output);
    assert_eq!(PortSide::Output.opposite(), PortSide::Input);
    assert_eq!(PortSide::Input.to_string(), "input");
    assert_eq!(PortSide::Output.to_string(), "output");
}

#[test]
fn test_can_connect_to_matrix() {
    let mut doc = GraphDocument::new();
    let node = doc.create_node("dialogue.Speak", Position::default()).id.clone();
    let peer = doc.create_node("dialogue.Speak", Position::default()).id.clone();

    let out_flow = doc
        .create_port(&node, PortConfig::output("Next", "flow"))
        .expect("port")
        .id
        .clone();
    let out_flow_again = doc
        .create_port(&node, PortConfig::output("Also", "flow"))
        .expect("port")
        .id
        .clone();
    let in_flow = doc
        .create_port(&peer, PortConfig::input("Previous", "flow"))
        .expect("port")
        .id
        .clone();
    let in_bool = doc
        .create_port(&peer, PortConfig::input("Flag", tags::BOOL))
        .expect("port")
        .id
        .clone();

    let out_port = doc.find_port(&out_flow).expect("port");
    let same_side = doc.find_port(&out_flow_again).expect("port");
    let in_port = doc.find_port(&in_flow).expect("port");
    let wrong_tag = doc.find_port(&in_bool).expect("port");

    assert!(out_port.can_connect_to(in_port));
    assert!(in_port.can_connect_to(out_port));
    assert!(!out_port.can_connect_to(same_side));
    assert!(!out_port.can_connect_to(wrong_tag));
}

#[test]
fn test_error_display() {
    let err = GraphError::BelowMinimalPorts {
        node_id: "node_A".to_string(),
        side: PortSide::Input,
        minimal: 2,
    };
    assert!(err.to_string().contains("node_A"));
    assert!(err.to_string().contains("input"));
    assert!(err.to_string().contains('2'));

    let unknown = GraphError::UnknownPort {
        port_id: "port_X".to_string(),
    };
    assert!(unknown.to_string().contains("port_X"));

    let kind_err = CatalogError::UnknownKind {
        tag: "dialogue.Missing".to_string(),
    };
    assert!(kind_err.to_string().contains("dialogue.Missing"));

    let corrupt = AssetError::CorruptAsset {
        detail: "duplicate node id 'n1'".to_string(),
    };
    assert!(corrupt.to_string().contains("Corrupt asset"));
    assert!(corrupt.to_string().contains("n1"));
}

#[test]
fn test_catalog_depth_arithmetic() {
    let mut catalog = NodeCatalog::new();
    catalog.register_kind("dialogue", KindDescriptor::abstract_kind());
    catalog.register_kind(
        "dialogue.Speak",
        KindDescriptor::concrete().with_parent("dialogue"),
    );
    catalog.register_kind(
        "dialogue.Choice",
        KindDescriptor::concrete().with_parent("dialogue"),
    );
    catalog.register_kind(
        "dialogue.Choice.Timed",
        KindDescriptor::concrete().with_parent("dialogue.Choice"),
    );

    assert_eq!(catalog.depth("dialogue").expect("depth"), 2);
    assert_eq!(catalog.depth("dialogue.Speak").expect("depth"), 3);
    assert_eq!(catalog.depth("dialogue.Choice.Timed").expect("depth"), 4);
}

#[test]
fn test_catalog_index_orders_parents_before_children() {
    let mut catalog = NodeCatalog::new();
    catalog.register_kind("logic", KindDescriptor::abstract_kind());
    catalog.register_kind("logic.And", KindDescriptor::concrete().with_parent("logic"));
    catalog.register_kind("logic.Or", KindDescriptor::concrete().with_parent("logic"));
    catalog.register_kind("dialogue", KindDescriptor::abstract_kind());
    catalog.register_kind(
        "dialogue.Speak",
        KindDescriptor::concrete().with_parent("dialogue"),
    );

    let index = catalog.build_index().expect("index");
    let order: Vec<&str> = index.iter().map(|entry| entry.tag.as_str()).collect();
    assert_eq!(
        order,
        vec!["dialogue", "dialogue.Speak", "logic", "logic.And", "logic.Or"]
    );

    for entry in &index {
        if let Some(parent) = &entry.parent {
            let parent_pos = order
                .iter()
                .position(|tag| *tag == parent.as_str())
                .expect("parent listed");
            let own_pos = order
                .iter()
                .position(|tag| *tag == entry.tag)
                .expect("entry listed");
            assert!(parent_pos < own_pos);
        }
    }

    assert_eq!(index[0].depth, 2);
    assert!(index[0].is_abstract);
    assert_eq!(index[1].depth, 3);
    assert!(!index[1].is_abstract);
}

#[test]
fn test_catalog_concrete_children() {
    let mut catalog = NodeCatalog::new();
    catalog.register_kind("dialogue", KindDescriptor::abstract_kind());
    catalog.register_kind(
        "dialogue.Speak",
        KindDescriptor::concrete().with_parent("dialogue"),
    );
    catalog.register_kind(
        "dialogue.Branching",
        KindDescriptor::abstract_kind().with_parent("dialogue"),
    );
    catalog.register_kind(
        "dialogue.Choice",
        KindDescriptor::concrete().with_parent("dialogue"),
    );

    let children = catalog.concrete_children("dialogue").expect("children");
    assert_eq!(children, vec!["dialogue.Choice", "dialogue.Speak"]);
}

#[test]
fn test_catalog_rejects_unknown_parent() {
    let mut catalog = NodeCatalog::new();
    catalog.register_kind(
        "dialogue.Speak",
        KindDescriptor::concrete().with_parent("dialogue"),
    );

    let err = catalog.build_index().expect_err("detached kind");
    match err {
        CatalogError::UnknownKind { tag } => assert_eq!(tag, "dialogue"),
        other => panic!("expected UnknownKind, got {:?}", other),
    }
    assert!(matches!(
        catalog.descriptor("nope"),
        Err(CatalogError::UnknownKind { .. })
    ));
}

#[test]
fn test_catalog_rejects_parent_cycle() {
    let mut catalog = NodeCatalog::new();
    catalog.register_kind("a", KindDescriptor::abstract_kind().with_parent("b"));
    catalog.register_kind("b", KindDescriptor::abstract_kind().with_parent("a"));

    assert!(matches!(
        catalog.depth("a"),
        Err(CatalogError::CyclicKind { .. })
    ));
    assert!(matches!(
        catalog.build_index(),
        Err(CatalogError::CyclicKind { .. })
    ));
}

#[test]
fn test_catalog_registration_replaces() {
    let mut catalog = NodeCatalog::new();
    assert!(catalog.is_empty());
    assert!(!catalog.contains("dialogue.Speak"));

    catalog.register_kind("dialogue.Speak", KindDescriptor::abstract_kind());
    catalog.register_kind("dialogue.Speak", KindDescriptor::concrete());

    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("dialogue.Speak"));
    assert!(!catalog.contains("dialogue"));
    assert!(!catalog.descriptor("dialogue.Speak").expect("kind").is_abstract);
}
