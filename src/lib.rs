//! Declarative keyboard shortcuts for host UI trees: parse key specs,
//! register bindings, resolve each keyboard event against a lazily rebuilt,
//! priority-ordered keymap.

mod binding;
mod dispatch;
mod errors;
mod host;
mod keymap;
mod options;
mod registry;
mod service;

#[cfg(test)]
pub(crate) mod test_host;

pub use crate::binding::{Action, Binding, HotkeyCallback, DEFAULT_ARGUMENT};
pub use crate::dispatch::KeyDispatch;
pub use crate::errors::HotkeyError;
pub use crate::host::{
    Document, Element, ElementId, ElementRef, KeyboardEvent, SyntheticEvent,
};
pub use crate::options::{DefaultOverrides, HotkeyDefaults, HotkeyValue, OptionMap, OptionValue};
pub use crate::registry::BindingRegistry;
pub use crate::service::Hotkeys;
pub use keyspec::{parse_key_spec, parse_key_specs, KeyId, Modifiers, ParseError};
