use std::collections::HashMap;
use std::rc::Rc;

use itertools::Itertools;
use keyspec::KeyId;

use crate::binding::Binding;

/// Builds the key lookup table from the enabled bindings.
///
/// Bindings are inserted in ascending priority order (stable, so equal
/// priorities keep registration order) and a later insertion overwrites an
/// earlier one for the same identifier. The binding left in the map is
/// therefore the highest-priority one, with ties going to the most recently
/// registered.
pub(crate) fn build_keymap<C>(enabled: &[Rc<Binding<C>>]) -> HashMap<KeyId, Rc<Binding<C>>> {
    let mut keymap = HashMap::new();
    for binding in enabled
        .iter()
        .sorted_by(|a, b| a.priority.total_cmp(&b.priority))
    {
        for key_id in binding.key_ids.iter() {
            keymap.insert(key_id.clone(), Rc::clone(binding));
        }
    }
    keymap
}
