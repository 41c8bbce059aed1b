use formdom::{Document, Element, Selector};

fn fruit_select(doc: &mut Document) -> formdom::NodeId {
    let body = doc.body();
    doc.insert(
        body,
        Element::select()
            .id("fruit")
            .child(Element::option("Apple").value("apple"))
            .child(
                Element::optgroup("Citrus")
                    .child(Element::option("Lemon"))
                    .child(Element::option("Lime").selected(true)),
            )
            .child(Element::option("Pear").disabled(true)),
    )
}

// ============================================================================
// Building and attributes
// ============================================================================

#[test]
fn test_insert_builds_subtree_in_order() {
    let mut doc = Document::new();
    let select = fruit_select(&mut doc);

    assert_eq!(doc.tag(select), "select");
    assert_eq!(doc.parent(select), Some(doc.body()));
    assert_eq!(doc.children(select).len(), 3);
    assert_eq!(doc.tag(doc.children(select)[1]), "optgroup");
    assert_eq!(doc.attr(doc.children(select)[1], "label"), Some("Citrus"));
    assert!(doc.is_connected(select));
}

#[test]
fn test_data_attributes_use_prefix() {
    let mut doc = Document::new();
    let node = doc.create_element("div");

    doc.set_data(node, "custom-id", "x");
    assert_eq!(doc.attr(node, "data-custom-id"), Some("x"));
    assert_eq!(doc.data(node, "custom-id"), Some("x"));
    assert_eq!(doc.data(node, "missing"), None);
}

#[test]
fn test_classes_do_not_duplicate() {
    let mut doc = Document::new();
    let node = doc.create_element("div");

    doc.add_class(node, "open");
    doc.add_class(node, "open");
    assert_eq!(doc.classes(node), ["open".to_string()]);

    doc.set_class(node, "above", true);
    assert!(doc.has_class(node, "above"));
    doc.remove_class(node, "open");
    assert!(!doc.has_class(node, "open"));
}

#[test]
fn test_text_content_concatenates_descendants() {
    let mut doc = Document::new();
    let body = doc.body();
    let node = doc.insert(
        body,
        Element::div()
            .text("a")
            .child(Element::span().text("b"))
            .child(Element::span().text("c")),
    );
    assert_eq!(doc.text(node), "a");
    assert_eq!(doc.text_content(node), "abc");
}

// ============================================================================
// Form state
// ============================================================================

#[test]
fn test_options_flatten_groups() {
    let mut doc = Document::new();
    let select = fruit_select(&mut doc);

    let labels: Vec<String> = doc
        .options(select)
        .into_iter()
        .map(|o| doc.text_content(o))
        .collect();
    assert_eq!(labels, ["Apple", "Lemon", "Lime", "Pear"]);
    assert_eq!(doc.selected_index(select), Some(2));
    assert_eq!(doc.value(select), "Lime");
}

#[test]
fn test_set_selected_index_is_exclusive() {
    let mut doc = Document::new();
    let select = fruit_select(&mut doc);

    doc.set_selected_index(select, Some(0));
    let selected: Vec<bool> = doc
        .options(select)
        .into_iter()
        .map(|o| doc.is_selected(o))
        .collect();
    assert_eq!(selected, [true, false, false, false]);
    assert_eq!(doc.value(select), "apple");

    doc.set_selected_index(select, None);
    assert_eq!(doc.selected_index(select), None);
    assert_eq!(doc.value(select), "");
}

#[test]
fn test_last_selected_option_wins() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.insert(
        body,
        Element::select()
            .child(Element::option("A").selected(true))
            .child(Element::option("B").selected(true)),
    );
    assert_eq!(doc.selected_index(select), Some(1));
}

// ============================================================================
// Tree mutation
// ============================================================================

#[test]
fn test_insert_before_and_index_in_parent() {
    let mut doc = Document::new();
    let select = fruit_select(&mut doc);
    let wrapper = doc.create_element("div");

    assert!(doc.insert_before(select, wrapper));
    assert_eq!(doc.index_in_parent(wrapper), Some(0));
    assert_eq!(doc.index_in_parent(select), Some(1));

    // Moving the select inside the wrapper re-parents it
    assert!(doc.append(wrapper, select));
    assert_eq!(doc.parent(select), Some(wrapper));
    assert_eq!(doc.children(doc.body()), [wrapper]);
}

#[test]
fn test_insert_before_detached_reference_is_rejected() {
    let mut doc = Document::new();
    let detached = doc.create_element("div");
    let node = doc.create_element("span");

    assert!(!doc.insert_before(detached, node));
    assert_eq!(doc.parent(node), None);
}

#[test]
fn test_append_refuses_cycles() {
    let mut doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append(outer, inner);

    assert!(!doc.append(inner, outer));
    assert_eq!(doc.parent(outer), None);
}

#[test]
fn test_remove_detaches_but_keeps_subtree() {
    let mut doc = Document::new();
    let select = fruit_select(&mut doc);

    doc.remove(select);
    assert!(!doc.is_connected(select));
    assert_eq!(doc.options(select).len(), 4);
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_find_and_closest() {
    let mut doc = Document::new();
    let body = doc.body();
    let root = doc.insert(
        body,
        Element::div().class("cs-select").child(
            Element::ul()
                .class("cs-list")
                .child(Element::li().class("cs-option").text("A"))
                .child(Element::li().class("cs-option").class("selected").text("B")),
        ),
    );

    let options = doc.find(root, &Selector::parse("li.cs-option").unwrap());
    assert_eq!(options.len(), 2);

    let selected = doc.find_one(root, &Selector::class("cs-option").and_class("selected"));
    assert_eq!(selected, Some(options[1]));

    assert_eq!(doc.closest(options[0], &Selector::class("cs-select")), Some(root));
    assert_eq!(doc.closest(root, &Selector::class("cs-select")), Some(root));
    assert_eq!(doc.closest(options[0], &Selector::tag("form")), None);
}

#[test]
fn test_descendant_selector_and_attributes() {
    let mut doc = Document::new();
    let select = fruit_select(&mut doc);

    let nested = doc.query_selector_all(&Selector::parse("#fruit optgroup option").unwrap());
    assert_eq!(nested.len(), 2);

    let by_value = doc.query_selector_all(&Selector::parse("option[value=apple]").unwrap());
    assert_eq!(by_value, [doc.children(select)[0]]);

    let labelled = doc.query_selector_all(&Selector::parse("[label=\"Citrus\"], select").unwrap());
    assert_eq!(labelled, [select, doc.children(select)[1]]);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_outer_html_is_deterministic() {
    let mut doc = Document::new();
    let body = doc.body();
    let node = doc.insert(
        body,
        Element::div()
            .class("a")
            .class("b")
            .data("x", "1")
            .id("main")
            .child(Element::option("<B>").selected(true)),
    );

    assert_eq!(
        doc.outer_html(node),
        "<div class=\"a b\" data-x=\"1\" id=\"main\"><option selected>&lt;B&gt;</option></div>"
    );
}
