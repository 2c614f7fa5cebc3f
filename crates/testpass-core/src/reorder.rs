//! Drag-and-drop list mutation.
//!
//! Both operations are pure: they take the current arrangement by reference
//! and return the new one. Indices outside the current bounds leave the
//! arrangement unchanged.

use crate::model::ClassificationGroup;

/// A container whose items can be dragged to another container.
pub trait ItemGroup {
    type Item;

    fn items(&self) -> &[Self::Item];

    fn items_mut(&mut self) -> &mut Vec<Self::Item>;
}

impl<T> ItemGroup for Vec<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        self
    }

    fn items_mut(&mut self) -> &mut Vec<T> {
        self
    }
}

impl ItemGroup for ClassificationGroup {
    type Item = String;

    fn items(&self) -> &[String] {
        &self.values
    }

    fn items_mut(&mut self) -> &mut Vec<String> {
        &mut self.values
    }
}

/// Move the element at `from` so it ends up at `to`.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = items.to_vec();
    if from == to || from >= result.len() || to >= result.len() {
        return result;
    }
    let moved = result.remove(from);
    result.insert(to, moved);
    result
}

/// Move one item from a source group into a target group.
///
/// With `target_item == None` the item is appended to the target group;
/// otherwise it is inserted at that position (clamped to the group length).
/// Source and target may be the same group.
pub fn move_between_groups<G: ItemGroup + Clone>(
    groups: &[G],
    source_group: usize,
    source_item: usize,
    target_group: usize,
    target_item: Option<usize>,
) -> Vec<G> {
    let mut result = groups.to_vec();

    let source_len = match result.get(source_group) {
        Some(group) => group.items().len(),
        None => return result,
    };
    if source_item >= source_len || target_group >= result.len() {
        return result;
    }

    let moved = result[source_group].items_mut().remove(source_item);
    let target = result[target_group].items_mut();
    let index = target_item.map_or(target.len(), |i| i.min(target.len()));
    target.insert(index, moved);

    result
}
