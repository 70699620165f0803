//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//! Ids are the string ids of the dragged records; zones carry their own id.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop on another draggable item
    Item(String),
    /// Drop on a zone (e.g. a whole column), by zone id
    Zone(String),
}

impl DropTarget {
    /// The raw id under the pointer, whichever kind it is.
    pub fn over_id(&self) -> &str {
        match self {
            DropTarget::Item(id) | DropTarget::Zone(id) => id,
        }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<String>>,
    pub dragging_id_write: WriteSignal<Option<String>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<String>>,
    pub pending_id_write: WriteSignal<Option<String>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<String>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<String>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

impl DndSignals {
    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging_id_read
            .try_with(|d| d.as_deref() == Some(id))
            .unwrap_or(false)
    }

    pub fn is_over(&self, target: &DropTarget) -> bool {
        self.drop_target_read
            .try_with(|t| t.as_ref() == Some(target))
            .unwrap_or(false)
    }

    /// The owning component was unmounted; every handler becomes a no-op.
    pub fn is_disposed(&self) -> bool {
        self.dragging_id_read.is_disposed()
    }
}

/// Clear the gesture and flag the click that follows its mouseup.
/// Returns `false` when the signals are already disposed.
fn reset_drag(dnd: &DndSignals) -> bool {
    if dnd.is_disposed() {
        return false;
    }
    dnd.dragging_id_write.try_set(None);
    dnd.drop_target_write.try_set(None);
    dnd.pending_id_write.try_set(None);
    dnd.drag_just_ended_write.try_set(true);
    true
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    if !reset_drag(dnd) {
        return;
    }
    // Swallow the click that follows the mouseup of a real drag
    let clear = dnd.drag_just_ended_write;
    set_timeout(
        move || {
            clear.try_set(false);
        },
        Duration::from_millis(100),
    );
}

/// Pointer moved to (`x`, `y`). Returns the id whose drag starts now.
fn pointer_moved(dnd: &DndSignals, x: i32, y: i32) -> Option<String> {
    if dnd.dragging_id_read.try_get_untracked()?.is_some() {
        return None;
    }
    let pending = dnd.pending_id_read.try_get_untracked()??;

    let dx = (x - dnd.start_x_read.try_get_untracked()?).abs();
    let dy = (y - dnd.start_y_read.try_get_untracked()?).abs();
    if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
        dnd.dragging_id_write.try_set(Some(pending.clone()));
        return Some(pending);
    }
    None
}

/// Mouse released. Returns the dragged id and target when a drag was on.
fn pointer_released(dnd: &DndSignals) -> Option<(String, Option<DropTarget>)> {
    let dragging_id = dnd.dragging_id_read.try_get_untracked()?;
    let drop_target = dnd.drop_target_read.try_get_untracked()?;

    dnd.pending_id_write.try_set(None);
    // Plain click: the element's click handler runs as usual
    let dragged = dragging_id?;
    Some((dragged, drop_target))
}

/// Escape pressed. Returns `true` when a drag was on.
fn escape_pressed(dnd: &DndSignals) -> bool {
    dnd.dragging_id_read
        .try_with_untracked(|d| d.is_some())
        .unwrap_or(false)
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown(
    dnd: DndSignals,
    item_id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a form control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() {
                    return;
                }
            }
            dnd.pending_id_write.set(Some(item_id.clone()));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mouseenter handler for items
pub fn make_on_item_mouseenter(
    dnd: DndSignals,
    item_id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write
                .set(Some(DropTarget::Item(item_id.clone())));
        }
    }
}

/// Create mouseenter handler for zones
pub fn make_on_zone_mouseenter(
    dnd: DndSignals,
    zone_id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write
                .set(Some(DropTarget::Zone(zone_id.clone())));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Callbacks for one drag-and-drop surface.
pub struct DndHandlers<S, D, C> {
    /// Pointer moved past the threshold with an item pressed
    pub on_start: S,
    /// Mouse released during a drag; the target is `None` outside any target
    pub on_drop: D,
    /// Escape pressed during a drag
    pub on_cancel: C,
}

/// Bind the window-level listeners: mousemove, mouseup and Escape.
///
/// They are removed when the calling component is cleaned up, so a
/// remounted surface never sees the handlers of an earlier one.
pub fn bind_global_handlers<S, D, C>(dnd: DndSignals, handlers: DndHandlers<S, D, C>)
where
    S: Fn(String) + 'static,
    D: Fn(String, Option<DropTarget>) + 'static,
    C: Fn() + 'static,
{
    let DndHandlers {
        on_start,
        on_drop,
        on_cancel,
    } = handlers;

    let mousemove = window_event_listener(ev::mousemove, move |ev| {
        if let Some(started) = pointer_moved(&dnd, ev.client_x(), ev.client_y()) {
            on_start(started);
        }
    });

    let mouseup = window_event_listener(ev::mouseup, move |_ev| {
        if let Some((dragged, target)) = pointer_released(&dnd) {
            end_drag(&dnd);
            on_drop(dragged, target);
        }
    });

    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && escape_pressed(&dnd) {
            end_drag(&dnd);
            on_cancel();
        }
    });

    on_cleanup(move || {
        mousemove.remove();
        mouseup.remove();
        keydown.remove();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_id_covers_both_kinds() {
        assert_eq!(DropTarget::Item("card-1".into()).over_id(), "card-1");
        assert_eq!(
            DropTarget::Zone("droppable-2026-01-05".into()).over_id(),
            "droppable-2026-01-05"
        );
    }

    fn press(dnd: &DndSignals, id: &str, x: i32, y: i32) {
        dnd.pending_id_write.set(Some(id.to_string()));
        dnd.start_x_write.set(x);
        dnd.start_y_write.set(y);
    }

    #[test]
    fn test_drag_starts_past_threshold() {
        let owner = Owner::new();
        owner.with(|| {
            let dnd = create_dnd_signals();
            press(&dnd, "card-1", 100, 100);

            assert_eq!(pointer_moved(&dnd, 103, 104), None);
            assert!(!dnd.is_dragging("card-1"));

            assert_eq!(pointer_moved(&dnd, 110, 100), Some("card-1".to_string()));
            assert!(dnd.is_dragging("card-1"));
            // Already dragging: no second start
            assert_eq!(pointer_moved(&dnd, 140, 100), None);
        });
    }

    #[test]
    fn test_release_reports_target_and_resets() {
        let owner = Owner::new();
        owner.with(|| {
            let dnd = create_dnd_signals();
            press(&dnd, "card-1", 0, 0);
            pointer_moved(&dnd, 20, 0);
            let zone = DropTarget::Zone("droppable-2026-01-05".into());
            dnd.drop_target_write.set(Some(zone.clone()));

            assert!(escape_pressed(&dnd));
            assert_eq!(pointer_released(&dnd), Some(("card-1".to_string(), Some(zone))));
            assert!(reset_drag(&dnd));
            assert!(!dnd.is_dragging("card-1"));
            assert!(dnd.drag_just_ended_read.get_untracked());
            assert!(!escape_pressed(&dnd));
        });
    }

    #[test]
    fn test_release_without_drag_is_a_click() {
        let owner = Owner::new();
        owner.with(|| {
            let dnd = create_dnd_signals();
            press(&dnd, "card-1", 0, 0);
            assert_eq!(pointer_released(&dnd), None);
            assert_eq!(dnd.pending_id_read.get_untracked(), None);
        });
    }

    #[test]
    fn test_events_after_unmount_are_ignored() {
        let owner = Owner::new();
        let dnd = owner.with(create_dnd_signals);
        owner.with(|| press(&dnd, "card-1", 0, 0));
        owner.cleanup();

        assert!(dnd.is_disposed());
        assert_eq!(pointer_moved(&dnd, 50, 50), None);
        assert_eq!(pointer_released(&dnd), None);
        assert!(!escape_pressed(&dnd));
        assert!(!reset_drag(&dnd));
        assert!(!dnd.is_dragging("card-1"));
        // Returns before touching the browser timer
        end_drag(&dnd);
    }
}
