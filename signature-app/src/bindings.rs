//! DOM event listeners feeding the capture surface.

use std::rc::Rc;

use signature_core::SurfaceEvent;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent};

use crate::dom::PadHandle;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Listeners attached for one pad. Dropping this removes them.
pub(crate) struct Bindings {
    listeners: Vec<Listener>,
}

impl Bindings {
    /// Attach mouse listeners to `canvas` and a resize listener to the window.
    pub(crate) fn attach(canvas: &HtmlCanvasElement, state: &PadHandle) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let mut bindings = Self {
            listeners: Vec::with_capacity(5),
        };

        let canvas: &EventTarget = canvas.as_ref();
        bindings.listen(canvas, "mousedown", state, |e| {
            pointer(e).map(|(x, y)| SurfaceEvent::PointerDown { x, y })
        })?;
        bindings.listen(canvas, "mousemove", state, |e| {
            pointer(e).map(|(x, y)| SurfaceEvent::PointerMove { x, y })
        })?;
        bindings.listen(canvas, "mouseup", state, |_| Some(SurfaceEvent::PointerUp))?;
        bindings.listen(canvas, "mouseleave", state, |_| {
            Some(SurfaceEvent::PointerLeave)
        })?;
        bindings.listen(window.as_ref(), "resize", state, |_| {
            Some(SurfaceEvent::Resize)
        })?;

        Ok(bindings)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        state: &PadHandle,
        translate: fn(&Event) -> Option<SurfaceEvent>,
    ) -> Result<(), JsValue> {
        let state = Rc::clone(state);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(surface_event) = translate(&event) else {
                return;
            };
            let Ok(mut pad) = state.try_borrow_mut() else {
                tracing::warn!("Dropped {} while the pad was busy", kind);
                return;
            };
            if let Err(err) = pad.surface.handle_event(&surface_event) {
                tracing::error!("Failed to handle {}: {}", kind, err);
                return;
            }
            // Released moves draw nothing
            if matches!(surface_event, SurfaceEvent::PointerMove { .. })
                && !pad.surface.stroke_state().is_pointer_down()
            {
                return;
            }
            if let Err(err) = pad.repaint() {
                tracing::error!("Repaint failed: {:?}", err);
            }
        });

        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        tracing::debug!("Removed {} listeners", self.listeners.len());
    }
}

#[allow(clippy::cast_precision_loss)]
fn pointer(event: &Event) -> Option<(f32, f32)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some((mouse.client_x() as f32, mouse.client_y() as f32))
}
