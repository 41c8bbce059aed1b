//! Widget configuration.

use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use formdom::{Document, NodeId};
use regex::Regex;
use serde::Deserialize;

use crate::error::Result;
use crate::widget::ChangeEvent;

/// Callback invoked after a selection is committed.
pub type OnChange = Rc<dyn Fn(&ChangeEvent)>;

/// Recognized configuration keys, in their camel-case form.
pub const KEYS: [&str; 6] = ["customID", "customClass", "placeholder", "loop", "size", "onChange"];

/// Resolved configuration for one widget.
///
/// Manager-level defaults are merged with per-element `data-*` overrides
/// once per build; a built widget never sees later changes until it is
/// rebuilt.
///
/// `loop_navigation` and `size` are resolved and exposed but do not drive
/// any behavior: keyboard navigation and capped list sizes are not
/// implemented.
///
/// # Example
///
/// ```
/// use custom_select::Options;
///
/// let options = Options::new()
///     .custom_class("compact")
///     .placeholder("Pick one")
///     .on_change(|change| println!("picked {}", change.label));
/// assert_eq!(options.placeholder, "Pick one");
/// ```
#[derive(Clone, Default)]
pub struct Options {
    /// DOM id for the generated container.
    pub custom_id: String,
    /// Extra class(es) for the generated container, whitespace separated.
    pub custom_class: String,
    /// Label shown when nothing is selected. Derived from the first option
    /// when empty.
    pub placeholder: String,
    pub loop_navigation: bool,
    pub size: usize,
    pub on_change: Option<OnChange>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("custom_id", &self.custom_id)
            .field("custom_class", &self.custom_class)
            .field("placeholder", &self.placeholder)
            .field("loop_navigation", &self.loop_navigation)
            .field("size", &self.size)
            .field("on_change", &self.on_change.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration object onto the defaults.
    ///
    /// Keys use their camel-case names (`customID`, `customClass`,
    /// `placeholder`, `loop`, `size`); unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let partial: PartialOptions = serde_json::from_str(json)?;
        Ok(Self::default().merged(partial))
    }

    pub fn custom_id(mut self, id: impl Into<String>) -> Self {
        self.custom_id = id.into();
        self
    }

    pub fn custom_class(mut self, class: impl Into<String>) -> Self {
        self.custom_class = class.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn loop_navigation(mut self, enabled: bool) -> Self {
        self.loop_navigation = enabled;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn on_change(mut self, callback: impl Fn(&ChangeEvent) + 'static) -> Self {
        self.on_change = Some(Rc::new(callback));
        self
    }

    /// Overwrite every field that `partial` sets.
    pub fn merge(&mut self, partial: PartialOptions) {
        if let Some(id) = partial.custom_id {
            self.custom_id = id;
        }
        if let Some(class) = partial.custom_class {
            self.custom_class = class;
        }
        if let Some(placeholder) = partial.placeholder {
            self.placeholder = placeholder;
        }
        if let Some(enabled) = partial.loop_navigation {
            self.loop_navigation = enabled;
        }
        if let Some(size) = partial.size {
            self.size = size;
        }
    }

    pub fn merged(mut self, partial: PartialOptions) -> Self {
        self.merge(partial);
        self
    }

    /// A copy of these options with `element`'s data-attribute overrides
    /// applied.
    pub fn resolve_for(&self, doc: &Document, element: NodeId) -> Self {
        self.clone()
            .merged(PartialOptions::from_data_attributes(doc, element))
    }
}

/// A configuration object where every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PartialOptions {
    #[serde(rename = "customID")]
    pub custom_id: Option<String>,
    #[serde(rename = "customClass")]
    pub custom_class: Option<String>,
    pub placeholder: Option<String>,
    #[serde(rename = "loop")]
    pub loop_navigation: Option<bool>,
    pub size: Option<usize>,
}

impl PartialOptions {
    /// Read `data-*` overrides from `element`, one attribute per key named by
    /// the kebab-cased key (`customID` reads `data-custom-id`).
    ///
    /// Values that don't parse, and `data-on-change` (which cannot carry a
    /// callback), are logged and ignored.
    pub fn from_data_attributes(doc: &Document, element: NodeId) -> Self {
        let mut partial = Self::default();

        for key in KEYS {
            let name = kebab_case(key);
            let Some(raw) = doc.data(element, &name) else {
                continue;
            };

            match key {
                "customID" => partial.custom_id = Some(raw.to_string()),
                "customClass" => partial.custom_class = Some(raw.to_string()),
                "placeholder" => partial.placeholder = Some(raw.to_string()),
                "loop" => match parse_flag(raw) {
                    Some(enabled) => partial.loop_navigation = Some(enabled),
                    None => log::warn!("[options] ignoring data-{name}={raw:?} on {element}: not a boolean"),
                },
                "size" => match raw.trim().parse::<usize>() {
                    Ok(size) => partial.size = Some(size),
                    Err(_) => log::warn!(
                        "[options] ignoring data-{name}={raw:?} on {element}: not a non-negative integer"
                    ),
                },
                _ => log::warn!("[options] ignoring data-{name} on {element}: callbacks cannot be set from markup"),
            }
        }

        partial
    }
}

/// `customID` -> `custom-id`, `customClass` -> `custom-class`.
pub fn kebab_case(key: &str) -> String {
    static BOUNDARY: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("([a-z])([A-Z])").expect("Invalid regex pattern"));
    BOUNDARY.replace_all(key, "$1-$2").to_lowercase()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "" | "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use formdom::Element;

    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("customID"), "custom-id");
        assert_eq!(kebab_case("customClass"), "custom-class");
        assert_eq!(kebab_case("onChange"), "on-change");
        assert_eq!(kebab_case("placeholder"), "placeholder");
    }

    #[test]
    fn test_data_attributes_override_defaults() {
        let mut doc = Document::new();
        let body = doc.body();
        let select = doc.insert(
            body,
            Element::select()
                .data("custom-id", "picker")
                .data("placeholder", "Choose")
                .data("loop", "")
                .data("size", "5"),
        );

        let defaults = Options::new().custom_id("default").custom_class("wide");
        let resolved = defaults.resolve_for(&doc, select);

        assert_eq!(resolved.custom_id, "picker");
        assert_eq!(resolved.custom_class, "wide");
        assert_eq!(resolved.placeholder, "Choose");
        assert!(resolved.loop_navigation);
        assert_eq!(resolved.size, 5);
        assert_eq!(defaults.custom_id, "default");
    }

    #[test]
    fn test_bad_data_values_are_ignored() {
        let mut doc = Document::new();
        let body = doc.body();
        let select = doc.insert(
            body,
            Element::select()
                .data("loop", "sometimes")
                .data("size", "-2")
                .data("on-change", "alert(1)"),
        );

        let resolved = Options::new().size(3).resolve_for(&doc, select);
        assert!(!resolved.loop_navigation);
        assert_eq!(resolved.size, 3);
        assert!(resolved.on_change.is_none());
    }

    #[test]
    fn test_from_json() {
        let options =
            Options::from_json(r#"{"customID": "x", "loop": true, "size": 4, "extra": 1}"#).unwrap();
        assert_eq!(options.custom_id, "x");
        assert!(options.loop_navigation);
        assert_eq!(options.size, 4);
        assert_eq!(options.placeholder, "");

        assert!(Options::from_json(r#"{"size": "big"}"#).is_err());
    }

    #[test]
    fn test_callback_survives_resolution() {
        let doc = Document::new();
        let options = Options::new().on_change(|_| {});
        let resolved = options.resolve_for(&doc, doc.body());
        assert!(resolved.on_change.is_some());
    }
}
