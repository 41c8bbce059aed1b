//! Class names applied to the generated markup. Host stylesheets target
//! these, so they are part of the public contract.

/// Generated container.
pub const SELECT: &str = "cs-select";
/// Wrapper around the option list.
pub const WRAPPER: &str = "cs-wrapper";
/// Top-level option list.
pub const LIST: &str = "cs-list";
/// Every list item, leaf or group header.
pub const OPTION: &str = "cs-option";
/// Group header item.
pub const GROUP: &str = "cs-optgroup";
/// Nested list inside a group header.
pub const GROUP_LIST: &str = "cs-optgroup-list";
/// Visible label block.
pub const LABEL: &str = "cs-label";

pub const OPEN: &str = "open";
pub const ABOVE: &str = "above";
pub const DISABLED: &str = "disabled";
pub const SELECTED: &str = "selected";
pub const ACTIVE: &str = "active";
