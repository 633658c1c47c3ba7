use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use keyspec::KeyId;
use log::debug;

use crate::binding::Binding;
use crate::host::ElementId;
use crate::keymap;

/// Holds every active binding plus the lazily rebuilt key lookup table.
///
/// `keymap: None` marks the cache stale. Every mutation invalidates; the
/// next resolution rebuilds. Keystrokes are assumed to be rarer than
/// binding churn, so the rebuild happens as late as possible.
pub struct BindingRegistry<C> {
    by_element: HashMap<ElementId, IndexMap<String, Rc<Binding<C>>>>,
    /// Enabled bindings in registration order; the keymap build relies on
    /// this order to break priority ties.
    enabled: Vec<Rc<Binding<C>>>,
    keymap: Option<HashMap<KeyId, Rc<Binding<C>>>>,
}

impl<C> Default for BindingRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> BindingRegistry<C> {
    pub fn new() -> Self {
        Self {
            by_element: HashMap::new(),
            enabled: Vec::new(),
            keymap: None,
        }
    }

    /// Stores `binding` under its `(element, argument)` slot, replacing and
    /// unlinking whatever occupied the slot before.
    pub fn register(&mut self, binding: Binding<C>) -> Rc<Binding<C>> {
        let element = ElementId::of(&binding.element);
        let binding = Rc::new(binding);
        debug!("registering {binding:?} on {element:?}");
        if let Some(replaced) = self
            .by_element
            .entry(element)
            .or_default()
            .insert(binding.argument.clone(), Rc::clone(&binding))
        {
            self.remove_enabled(&replaced);
        }
        if binding.enabled {
            self.enabled.push(Rc::clone(&binding));
        }
        self.invalidate();
        binding
    }

    /// No-op if the slot is empty.
    pub fn unregister(&mut self, element: ElementId, argument: &str) {
        let Some(arguments) = self.by_element.get_mut(&element) else {
            return;
        };
        let Some(binding) = arguments.shift_remove(argument) else {
            return;
        };
        if arguments.is_empty() {
            self.by_element.remove(&element);
        }
        debug!("unregistered {binding:?} from {element:?}");
        self.remove_enabled(&binding);
        self.invalidate();
    }

    /// Removes every binding the element owns; used on full detachment.
    pub fn unregister_all(&mut self, element: ElementId) {
        let Some(arguments) = self.by_element.remove(&element) else {
            return;
        };
        debug!("unregistering all {} bindings of {element:?}", arguments.len());
        for binding in arguments.values() {
            self.remove_enabled(binding);
        }
        self.invalidate();
    }

    pub fn binding(&self, element: ElementId, argument: &str) -> Option<&Rc<Binding<C>>> {
        self.by_element.get(&element)?.get(argument)
    }

    /// Looks up the winning binding for `key_id`, rebuilding the keymap
    /// first when stale.
    pub fn resolve(&mut self, key_id: &KeyId) -> Option<Rc<Binding<C>>> {
        if self.keymap.is_none() {
            let keymap = keymap::build_keymap(&self.enabled);
            debug!(
                "rebuilt keymap: {} identifiers from {} enabled bindings",
                keymap.len(),
                self.enabled.len()
            );
            self.keymap = Some(keymap);
        }
        self.keymap.as_ref()?.get(key_id).cloned()
    }

    fn remove_enabled(&mut self, binding: &Rc<Binding<C>>) {
        self.enabled
            .retain(|enabled| !Rc::ptr_eq(enabled, binding));
    }

    fn invalidate(&mut self) {
        self.keymap = None;
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.keymap.is_some()
    }
}

#[cfg(test)]
mod test_registry {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::BindingRegistry;
    use crate::host::ElementId;
    use crate::test_host::{test_binding, AsElement, TestElement};

    #[test]
    fn register_and_resolve() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::new();
        registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save"));

        let key_id = keyspec::parse_key_spec("ctrl+s").unwrap();
        let resolved = registry.resolve(&key_id).unwrap();
        assert_eq!(resolved.argument, "=");
        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+o").unwrap()).is_none());
    }

    #[test]
    fn register_overwrites_the_argument_slot() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::new();
        registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save"));
        registry.register(test_binding(&element, "=", &["ctrl+o"], 0.0, "open"));

        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+s").unwrap()).is_none());
        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+o").unwrap()).is_some());
    }

    #[test]
    fn disabled_bindings_are_stored_but_not_resolved() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::new();
        let mut binding = test_binding(&element, "=", &["ctrl+s"], 0.0, "save");
        binding.enabled = false;
        registry.register(binding);

        assert!(registry
            .binding(ElementId::of(&element), "=")
            .is_some());
        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+s").unwrap()).is_none());
    }

    #[test]
    fn unregister_removes_resolution() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::new();
        registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save"));
        registry.unregister(ElementId::of(&element), "=");

        assert!(registry.binding(ElementId::of(&element), "=").is_none());
        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+s").unwrap()).is_none());
    }

    #[test]
    fn unregister_of_absent_slot_keeps_the_cache_warm() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::<()>::new();
        registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save"));
        registry.resolve(&keyspec::parse_key_spec("ctrl+s").unwrap());
        assert!(registry.is_cached());

        registry.unregister(ElementId::of(&element), "other");
        assert!(registry.is_cached());
    }

    #[test]
    fn unregister_all_clears_every_argument() {
        let element = TestElement::tag("div").as_element();
        let other = TestElement::tag("span").as_element();
        let mut registry = BindingRegistry::new();
        registry.register(test_binding(&element, "save", &["ctrl+s"], 0.0, "save"));
        registry.register(test_binding(&element, "open", &["ctrl+o"], 0.0, "open"));
        registry.register(test_binding(&other, "=", &["ctrl+q"], 0.0, "quit"));

        registry.unregister_all(ElementId::of(&element));

        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+s").unwrap()).is_none());
        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+o").unwrap()).is_none());
        assert!(registry.resolve(&keyspec::parse_key_spec("ctrl+q").unwrap()).is_some());
    }

    #[test]
    fn mutation_invalidates_the_cache() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::<()>::new();
        registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save"));
        registry.resolve(&keyspec::parse_key_spec("ctrl+s").unwrap());
        assert!(registry.is_cached());

        registry.register(test_binding(&element, "other", &["ctrl+o"], 0.0, "open"));
        assert!(!registry.is_cached());
    }

    #[test]
    fn replaced_binding_leaves_the_enabled_set() {
        let element = TestElement::tag("div").as_element();
        let mut registry = BindingRegistry::new();
        registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save"));
        let replacement =
            registry.register(test_binding(&element, "=", &["ctrl+s"], 0.0, "save-v2"));

        let resolved = registry
            .resolve(&keyspec::parse_key_spec("ctrl+s").unwrap())
            .unwrap();
        assert!(Rc::ptr_eq(&resolved, &replacement));
    }
}
