use std::collections::BTreeMap;

/// A detached element description.
///
/// Elements are plain values built with chained setters and materialized into
/// a [`Document`](crate::Document) with [`Document::insert`](crate::Document::insert)
/// or [`Document::build`](crate::Document::build).
///
/// ```
/// use formdom::Element;
///
/// let select = Element::select()
///     .attr("name", "fruit")
///     .child(Element::option("Apple").value("apple"))
///     .child(Element::option("Pear").value("pear").selected(true));
/// assert_eq!(select.children.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,

    // Form state
    pub disabled: bool,
    pub selected: bool,

    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn ul() -> Self {
        Self::new("ul")
    }

    pub fn li() -> Self {
        Self::new("li")
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn select() -> Self {
        Self::new("select")
    }

    /// An `<option>` whose text content is `label`.
    pub fn option(label: impl Into<String>) -> Self {
        Self::new("option").text(label)
    }

    /// An `<optgroup>` carrying `label` as its label attribute.
    pub fn optgroup(label: impl Into<String>) -> Self {
        Self::new("optgroup").attr("label", label)
    }

    // Identity
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set a `data-*` attribute. `key` is given without the `data-` prefix.
    pub fn data(self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.attr(format!("data-{}", key.as_ref()), value)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(self, value: impl Into<String>) -> Self {
        self.attr("value", value)
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
