use std::rc::Rc;

use log::debug;

use crate::binding::{Action, Binding};
use crate::host::{ElementRef, KeyboardEvent};
use crate::service::Hotkeys;

/// What the host must do with the keyboard event after handing it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    /// A binding fired: prevent the event's default behavior and stop it
    /// from reaching other listeners in the same phase.
    Consumed,
    /// No binding fired: let the event proceed normally.
    Ignored,
}

impl KeyDispatch {
    pub fn is_consumed(&self) -> bool {
        *self == KeyDispatch::Consumed
    }
}

impl<C> Hotkeys<C> {
    /// Resolves one keyboard event against the keymap, in a single
    /// synchronous pass.
    pub fn handle_key_event(&mut self, event: &KeyboardEvent) -> KeyDispatch {
        if event.is_spurious() {
            return KeyDispatch::Ignored;
        }
        let key_id = event.key_id();

        // Plain characters typed into editable content are input, not
        // shortcuts.
        if key_id.is_plain_char() && self.typing_into_editable() {
            return KeyDispatch::Ignored;
        }

        let Some(binding) = self.registry.resolve(&key_id) else {
            return KeyDispatch::Ignored;
        };
        let Some(target) = resolve_target(&binding) else {
            return KeyDispatch::Ignored;
        };

        debug!("{} fired {binding:?}", key_id.display());
        match &binding.action {
            Action::Callback { callback, context } => {
                (**callback)(context.as_ref(), &target);
            }
            Action::Dispatch(synthetic) => target.dispatch_event(synthetic),
        }
        KeyDispatch::Consumed
    }

    fn typing_into_editable(&self) -> bool {
        let Some(active) = self
            .document
            .as_ref()
            .and_then(|document| document.active_element())
        else {
            return false;
        };
        active.is_content_editable() || active.has_text_selection()
    }
}

/// The binding's own element if it matches the selector, else its first
/// matching descendant.
fn resolve_target<C>(binding: &Binding<C>) -> Option<ElementRef> {
    if binding.element.matches(&binding.selector) {
        Some(Rc::clone(&binding.element))
    } else {
        binding.element.query_selector(&binding.selector)
    }
}
