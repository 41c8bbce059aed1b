use custom_select::{classes, CustomSelect, Error, Options, Targets};
use formdom::{Document, Element, NodeId, Selector};

fn abc(doc: &mut Document) -> NodeId {
    let body = doc.body();
    doc.insert(
        body,
        Element::select()
            .id("abc")
            .child(Element::option("A").value("a"))
            .child(Element::option("B").value("b").selected(true))
            .child(Element::option("C").value("c")),
    )
}

fn grouped(doc: &mut Document) -> NodeId {
    let body = doc.body();
    doc.insert(
        body,
        Element::select()
            .child(
                Element::optgroup("G")
                    .child(Element::option("D"))
                    .child(Element::option("E")),
            )
            .child(Element::option("F")),
    )
}

fn leaf_items(doc: &Document, list: NodeId) -> Vec<NodeId> {
    let selector = Selector::parse(".cs-option[data-index]").unwrap();
    doc.find(list, &selector)
}

// ============================================================================
// Generated structure
// ============================================================================

#[test]
fn test_container_takes_the_source_place() {
    let mut doc = Document::new();
    let body = doc.body();
    let before = doc.insert(body, Element::div().id("before"));
    let select = abc(&mut doc);
    let after = doc.insert(body, Element::div().id("after"));

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let widget = selects.widget(select).unwrap();
    let root = widget.root();

    assert_eq!(doc.children(body), &[before, root, after]);

    let parts = doc.children(root).to_vec();
    assert_eq!(parts.len(), 3);
    assert!(doc.has_class(parts[0], classes::WRAPPER));
    assert_eq!(doc.children(parts[0]), &[widget.list()]);
    assert!(doc.has_class(parts[1], classes::LABEL));
    assert_eq!(doc.children(parts[1]), &[widget.label()]);
    assert_eq!(parts[2], select);
}

#[test]
fn test_markup() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.insert(
        body,
        Element::select()
            .child(Element::option("A").value("a"))
            .child(Element::option("B").value("b").selected(true)),
    );

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let root = selects.widget(select).unwrap().root();

    assert_eq!(
        doc.outer_html(root),
        concat!(
            r#"<div class="cs-select">"#,
            r#"<div class="cs-wrapper"><ul class="cs-list">"#,
            r#"<li class="cs-option" data-index="0" data-value="a">A</li>"#,
            r#"<li class="cs-option selected" data-index="1" data-value="b">B</li>"#,
            r#"</ul></div>"#,
            r#"<div class="cs-label"><span>B</span></div>"#,
            r#"<select><option value="a">A</option><option value="b" selected>B</option></select>"#,
            r#"</div>"#,
        )
    );
}

#[test]
fn test_groups_render_nested_lists() {
    let mut doc = Document::new();
    let select = grouped(&mut doc);

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let widget = selects.widget(select).unwrap();

    let top = doc.children(widget.list()).to_vec();
    assert_eq!(top.len(), 2);
    assert!(doc.has_class(top[0], classes::OPTION));
    assert!(doc.has_class(top[0], classes::GROUP));
    assert_eq!(doc.text(top[0]), "G");
    assert_eq!(doc.data(top[0], "index"), None);

    let sublist = doc.children(top[0])[0];
    assert!(doc.has_class(sublist, classes::GROUP_LIST));
    assert_eq!(doc.children(sublist).len(), 2);
    assert_eq!(doc.text(top[1]), "F");
}

#[test]
fn test_flattened_order_matches_source_index() {
    let mut doc = Document::new();
    let select = grouped(&mut doc);

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let widget = selects.widget(select).unwrap();

    let items = leaf_items(&doc, widget.list());
    let rendered: Vec<(&str, &str)> = items
        .iter()
        .map(|&item| (doc.text(item), doc.data(item, "index").unwrap_or("")))
        .collect();
    assert_eq!(rendered, [("D", "0"), ("E", "1"), ("F", "2")]);

    // N leaves plus one item per group
    let all = doc.find(widget.list(), &Selector::class(classes::OPTION));
    assert_eq!(all.len(), 4);
}

#[test]
fn test_disabled_markers() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.insert(
        body,
        Element::select()
            .disabled(true)
            .child(Element::option("On"))
            .child(Element::option("Off").disabled(true))
            .child(
                Element::optgroup("Closed")
                    .disabled(true)
                    .child(Element::option("Inside")),
            ),
    );

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let widget = selects.widget(select).unwrap();
    assert!(doc.has_class(widget.root(), classes::DISABLED));

    let items = leaf_items(&doc, widget.list());
    let disabled: Vec<bool> = items
        .iter()
        .map(|&item| doc.has_class(item, classes::DISABLED))
        .collect();
    assert_eq!(disabled, [false, true, true]);
}

// ============================================================================
// Label and placeholder
// ============================================================================

#[test]
fn test_label_shows_selected_option() {
    let mut doc = Document::new();
    let select = abc(&mut doc);

    let selects =
        CustomSelect::new(&mut doc, select, Options::new().placeholder("Pick one")).unwrap();
    let widget = selects.widget(select).unwrap();

    assert_eq!(doc.text(widget.label()), "B");
    assert_eq!(widget.options().placeholder, "Pick one");
}

#[test]
fn test_placeholder_derived_from_first_option() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.insert(
        body,
        Element::select()
            .child(Element::option("First"))
            .child(Element::option("Second")),
    );

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let widget = selects.widget(select).unwrap();

    assert_eq!(doc.text(widget.label()), "First");
    assert_eq!(widget.options().placeholder, "First");
    assert!(widget.tree().selected().is_none());
}

#[test]
fn test_placeholder_descends_into_leading_group() {
    let mut doc = Document::new();
    let select = grouped(&mut doc);

    let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let widget = selects.widget(select).unwrap();

    assert_eq!(doc.text(widget.label()), "D");
}

#[test]
fn test_configured_placeholder_wins_when_nothing_selected() {
    let mut doc = Document::new();
    let select = grouped(&mut doc);

    let selects =
        CustomSelect::new(&mut doc, select, Options::new().placeholder("Choose")).unwrap();
    let widget = selects.widget(select).unwrap();

    assert_eq!(doc.text(widget.label()), "Choose");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_custom_id_and_classes() {
    let mut doc = Document::new();
    let select = abc(&mut doc);

    let options = Options::new().custom_id("picker").custom_class("wide dark");
    let selects = CustomSelect::new(&mut doc, select, options).unwrap();
    let root = selects.widget(select).unwrap().root();

    assert_eq!(doc.get_element_by_id("picker"), Some(root));
    assert!(doc.has_class(root, classes::SELECT));
    assert!(doc.has_class(root, "wide"));
    assert!(doc.has_class(root, "dark"));
}

#[test]
fn test_data_attributes_override_defaults() {
    let mut doc = Document::new();
    let body = doc.body();
    let plain = doc.insert(body, Element::select().child(Element::option("X")));
    let tuned = doc.insert(
        body,
        Element::select()
            .data("custom-class", "narrow")
            .data("custom-id", "tuned")
            .data("placeholder", "Choose")
            .child(Element::option("X")),
    );

    let selects =
        CustomSelect::new(&mut doc, "select", Options::new().custom_class("wide")).unwrap();
    assert_eq!(selects.sources(), [plain, tuned]);

    let plain_root = selects.widget(plain).unwrap().root();
    assert!(doc.has_class(plain_root, "wide"));
    assert_eq!(doc.element_id(plain_root), None);

    let tuned_widget = selects.widget(tuned).unwrap();
    assert!(doc.has_class(tuned_widget.root(), "narrow"));
    assert!(!doc.has_class(tuned_widget.root(), "wide"));
    assert_eq!(doc.element_id(tuned_widget.root()), Some("tuned"));
    assert_eq!(doc.text(tuned_widget.label()), "Choose");
}

#[test]
fn test_json_configuration() {
    let mut doc = Document::new();
    let select = abc(&mut doc);

    let options = Options::from_json(r#"{"customClass": "from-json", "size": 3}"#).unwrap();
    let selects = CustomSelect::new(&mut doc, select, options).unwrap();
    let widget = selects.widget(select).unwrap();

    assert!(doc.has_class(widget.root(), "from-json"));
    assert_eq!(widget.options().size, 3);
}

// ============================================================================
// Targets and errors
// ============================================================================

#[test]
fn test_selector_targets_in_document_order() {
    let mut doc = Document::new();
    let first = abc(&mut doc);
    let second = grouped(&mut doc);

    let selects = CustomSelect::new(&mut doc, "body select", Options::new()).unwrap();
    assert_eq!(selects.len(), 2);
    assert_eq!(selects.sources(), [first, second]);
}

#[test]
fn test_selector_matching_nothing_is_empty() {
    let mut doc = Document::new();
    abc(&mut doc);

    let selects = CustomSelect::new(&mut doc, "select.missing", Options::new()).unwrap();
    assert!(selects.is_empty());
}

#[test]
fn test_node_list_targets() {
    let mut doc = Document::new();
    let first = abc(&mut doc);
    let second = grouped(&mut doc);

    let targets = Targets::from(vec![second, first]);
    let selects = CustomSelect::new(&mut doc, targets, Options::new()).unwrap();
    assert_eq!(selects.sources(), [second, first]);
}

#[test]
fn test_malformed_selector() {
    let mut doc = Document::new();
    abc(&mut doc);

    let err = CustomSelect::new(&mut doc, "select[", Options::new()).unwrap_err();
    assert!(matches!(err, Error::Selector(_)));
}

#[test]
fn test_rejects_non_select() {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.insert(body, Element::div());

    let err = CustomSelect::new(&mut doc, div, Options::new()).unwrap_err();
    assert!(matches!(err, Error::NotASelect { ref tag, .. } if tag == "div"));
}

#[test]
fn test_rejects_multiple() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.insert(
        body,
        Element::select()
            .attr("multiple", "")
            .child(Element::option("A")),
    );

    let err = CustomSelect::new(&mut doc, select, Options::new()).unwrap_err();
    assert!(matches!(err, Error::Multiple(node) if node == select));
}

#[test]
fn test_rejects_control_without_options() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = doc.insert(body, Element::select().child(Element::optgroup("Empty")));

    let err = CustomSelect::new(&mut doc, select, Options::new()).unwrap_err();
    assert!(matches!(err, Error::NoOptions(node) if node == select));
}

#[test]
fn test_rejects_already_managed() {
    let mut doc = Document::new();
    let select = abc(&mut doc);

    let err = CustomSelect::new(&mut doc, vec![select, select], Options::new()).unwrap_err();
    assert!(matches!(err, Error::AlreadyManaged(node) if node == select));

    let _selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
    let err = CustomSelect::new(&mut doc, select, Options::new()).unwrap_err();
    assert!(matches!(err, Error::AlreadyManaged(_)));
}

#[test]
fn test_failed_construction_leaves_document_untouched() {
    let mut doc = Document::new();
    let body = doc.body();
    let select = abc(&mut doc);
    let div = doc.insert(body, Element::div());
    let before = doc.outer_html(body);

    assert!(CustomSelect::new(&mut doc, vec![select, div], Options::new()).is_err());
    assert_eq!(doc.outer_html(body), before);
    assert_eq!(doc.total_listeners(), 0);
}

#[test]
fn test_invalid_json_configuration() {
    let err = Options::from_json("{not json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
