//! Status message display.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use crate::dom::{Dom, HIDDEN_CLASS, Selector};

pub const DEFAULT_VARIANT: &str = "info";

/// Variant classes cleared before a new one is applied.
const VARIANT_CLASSES: [&str; 4] = ["alert-info", "alert-success", "alert-danger", "alert-warning"];

/// Write `text` into every element matching `target`.
///
/// Blank text hides the element and clears it. Otherwise the previous variant
/// is replaced by `alert-<variant>` (default [`DEFAULT_VARIANT`]) and the
/// element is shown. Does nothing when no element matches.
pub fn set_status(dom: &dyn Dom, target: &Selector, text: &str, variant: Option<&str>) {
    let message = text.trim();
    let variant = variant.map_or(DEFAULT_VARIANT, str::trim);

    for node in dom.query_all(target) {
        if message.is_empty() {
            dom.add_class(node, HIDDEN_CLASS);
            dom.set_text(node, "");
            continue;
        }
        for class in VARIANT_CLASSES {
            dom.remove_class(node, class);
        }
        dom.remove_class(node, HIDDEN_CLASS);
        dom.add_class(node, &format!("alert-{variant}"));
        dom.set_text(node, message);
    }
}
