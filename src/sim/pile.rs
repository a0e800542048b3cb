// pile.rs - Stacked glyphs: fading and support
//
// Every stacked glyph fades at its own rate and is dropped once invisible.
// A glyph that is neither on the ground nor resting on another stacked glyph
// starts falling again, so losing the bottom of a pile collapses the rest.

use super::Entity;
use crate::world::{Layout, rests_on};

/// Fade, cull and support-check every stacked glyph. Returns how many glyphs
/// were removed.
///
/// Walks back to front and removes with `swap_remove`: the slot refilled by a
/// removal has already been visited, so every glyph is seen exactly once.
pub fn update(entities: &mut Vec<Entity>, layout: &Layout) -> usize {
    let mut removed = 0;

    for i in (0..entities.len()).rev() {
        if !entities[i].is_stacked() {
            continue;
        }

        let e = &mut entities[i];
        e.alpha -= e.decay;
        if e.alpha <= 0.0 {
            entities.swap_remove(i);
            removed += 1;
            continue;
        }

        if !is_supported(entities, i, layout) {
            entities[i].release();
        }
    }

    removed
}

/// Whether the stacked glyph at `i` has something under it
pub fn is_supported(entities: &[Entity], i: usize, layout: &Layout) -> bool {
    let e = &entities[i];
    if layout.on_ground(e.y) {
        return true;
    }

    entities
        .iter()
        .enumerate()
        .any(|(j, other)| j != i && other.is_stacked() && rests_on(e.x, e.y, other.x, other.y))
}
