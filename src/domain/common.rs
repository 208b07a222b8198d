/// Identifies documents that carry a host-assigned name once persisted.
pub trait Identifiable {
    fn name(&self) -> Option<&str>;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Returns `true` when an optional text field holds something other than whitespace.
pub(crate) fn is_present(value: Option<&str>) -> bool {
    value.map_or(false, |text| !text.trim().is_empty())
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use serde;
