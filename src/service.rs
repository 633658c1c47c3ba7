use std::rc::Rc;

use itertools::Itertools;
use log::info;

use crate::binding::{Binding, DEFAULT_ARGUMENT};
use crate::errors::HotkeyError;
use crate::host::{Document, ElementId, ElementRef};
use crate::options::{self, DefaultOverrides, HotkeyDefaults, HotkeyValue};
use crate::registry::BindingRegistry;

/// The hotkey engine: registry, keymap cache and dispatcher behind one
/// injectable service.
///
/// `C` is the host's logical context type, handed back to callback actions.
/// The service is single-threaded by construction (`Rc` handles
/// throughout); a host owns one instance per application and drives it from
/// its binding lifecycle and keyboard hooks.
pub struct Hotkeys<C> {
    pub(crate) registry: BindingRegistry<C>,
    defaults: HotkeyDefaults,
    pub(crate) document: Option<Rc<dyn Document>>,
    installed: bool,
}

impl<C> Default for Hotkeys<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Hotkeys<C> {
    pub fn new() -> Self {
        Self {
            registry: BindingRegistry::new(),
            defaults: HotkeyDefaults::default(),
            document: None,
            installed: false,
        }
    }

    /// Installs the engine once per application instance: stores the
    /// document handle used for focus queries and merges the optional
    /// default overrides. Repeated calls are complete no-ops, overrides
    /// included.
    pub fn install(&mut self, document: Rc<dyn Document>, overrides: Option<DefaultOverrides>) {
        if self.installed {
            return;
        }
        if let Some(overrides) = overrides {
            self.defaults.apply(overrides);
        }
        self.document = Some(document);
        self.installed = true;
        info!("hotkey service installed");
    }

    /// Drops every binding and returns to the pre-install state.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("hotkey service reset");
    }

    /// Lifecycle hook for a newly attached binding instance.
    pub fn attach(
        &mut self,
        element: &ElementRef,
        argument: Option<&str>,
        value: Option<&HotkeyValue<C>>,
        context: &Rc<C>,
    ) -> Result<(), HotkeyError> {
        let binding = options::normalize(element, argument, value, context, &self.defaults)?;
        if binding.display_keys && element.is_button_like() {
            element.append_key_hint(&binding.keys.iter().join(","));
        }
        self.registry.register(binding);
        Ok(())
    }

    /// Lifecycle hook for a re-rendered binding instance. A structurally
    /// unchanged value keeps the existing binding and the warm keymap
    /// cache; anything else validates first, then replaces.
    pub fn update(
        &mut self,
        element: &ElementRef,
        argument: Option<&str>,
        value: Option<&HotkeyValue<C>>,
        old_value: Option<&HotkeyValue<C>>,
        context: &Rc<C>,
    ) -> Result<(), HotkeyError> {
        if value == old_value {
            return Ok(());
        }
        let binding = options::normalize(element, argument, value, context, &self.defaults)?;
        self.registry.register(binding);
        Ok(())
    }

    /// Lifecycle hook for a detached binding instance.
    pub fn detach(&mut self, element: &ElementRef, argument: Option<&str>) {
        self.registry
            .unregister(ElementId::of(element), argument.unwrap_or(DEFAULT_ARGUMENT));
    }

    /// Removes everything the element owns; used when the element itself
    /// leaves the tree.
    pub fn detach_all(&mut self, element: &ElementRef) {
        self.registry.unregister_all(ElementId::of(element));
    }

    /// The binding currently registered for `(element, argument)`.
    pub fn binding(&self, element: &ElementRef, argument: Option<&str>) -> Option<&Rc<Binding<C>>> {
        self.registry
            .binding(ElementId::of(element), argument.unwrap_or(DEFAULT_ARGUMENT))
    }
}
