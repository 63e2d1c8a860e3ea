//! # Signature Pad WASM Application
//!
//! Browser bindings for the signature capture surface.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web signature-app
//! ```
//!
//! Then attach to a canvas and copy the drawing into a form field:
//! ```javascript
//! import init, { SignaturePad } from './pkg/signature_app.js';
//!
//! await init();
//! const pad = new SignaturePad('canvas');
//!
//! form.addEventListener('submit', () => {
//!     field.value = pad.exportSnapshot();
//! });
//! clearButton.onclick = () => pad.clear();
//! saveButton.onclick = () => pad.download();
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod bindings;
mod dom;

use std::{cell::RefCell, rc::Rc};

use signature_core::{Container, SignaturePayload, Snapshot, SurfaceConfig};
use signature_renderer::pixmap_surface;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;

use crate::bindings::Bindings;
use crate::dom::{js_error, DomContainer, PadHandle, PadState};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Signature pad WASM initialized");
}

/// A signature capture pad attached to a DOM canvas.
#[wasm_bindgen]
pub struct SignaturePad {
    config: SurfaceConfig,
    state: Option<PadHandle>,
    bindings: Option<Bindings>,
}

#[wasm_bindgen]
impl SignaturePad {
    /// Attach a pad with the default pen to the canvas with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas element is not found or 2D context fails.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<SignaturePad, JsValue> {
        Self::attach(container_id, SurfaceConfig::default())
    }

    /// Attach a pad configured from a JSON surface configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the canvas cannot be used.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(container_id: &str, config_json: &str) -> Result<SignaturePad, JsValue> {
        let config = SurfaceConfig::from_json_str(config_json).map_err(js_error)?;
        Self::attach(container_id, config)
    }

    /// Re-attach to a container, discarding the current drawing.
    ///
    /// Listeners from any previous attachment are removed first.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas element is not found or 2D context fails.
    pub fn initialize(&mut self, container_id: &str) -> Result<(), JsValue> {
        self.bindings = None;

        if let Some(state) = self.state.take() {
            if state.borrow().surface.container().id() == container_id {
                return self.reattach(container_id, state);
            }
        }

        let canvas = dom::find_canvas(container_id)?;
        let ctx = dom::context_2d(&canvas)?;
        let container = DomContainer::new(container_id, canvas.clone());
        let surface = pixmap_surface(container, self.config.clone()).map_err(js_error)?;

        let state = Rc::new(RefCell::new(PadState::new(surface, canvas.clone(), ctx)));
        state.borrow().repaint()?;

        self.bindings = Some(Bindings::attach(&canvas, &state)?);
        self.state = Some(state);

        tracing::info!("Signature pad attached to '{}'", container_id);
        Ok(())
    }

    /// Erase the drawing.
    pub fn clear(&mut self) {
        if let Some(state) = &self.state {
            let mut state = state.borrow_mut();
            state.surface.clear();
            if let Err(err) = state.repaint() {
                tracing::error!("Repaint failed: {:?}", err);
            }
        }
    }

    /// Current drawing as a `data:image/png;base64,...` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the pad is not attached or encoding fails.
    #[wasm_bindgen(js_name = exportSnapshot)]
    pub fn export_snapshot(&self) -> Result<String, JsValue> {
        Ok(self.snapshot()?.to_data_uri())
    }

    /// Save the drawing through a temporary download link.
    ///
    /// Without a file name, `signature.png` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the pad is not attached or the link cannot be created.
    pub fn download(&self, file_name: Option<String>) -> Result<(), JsValue> {
        let snapshot = self.snapshot()?;
        let name = download_name(file_name, &snapshot);

        let document = dom::document()?;
        let anchor = document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| JsValue::from_str("Failed to create download link"))?;
        anchor.set_href(&snapshot.to_data_uri());
        anchor.set_download(&name);
        anchor.click();

        tracing::debug!("Downloaded signature as {}", name);
        Ok(())
    }

    /// Surface width in pixels (0 when detached).
    #[must_use]
    pub fn width(&self) -> u32 {
        self.state
            .as_ref()
            .map_or(0, |state| state.borrow().surface.size().width)
    }

    /// Surface height in pixels (0 when detached).
    #[must_use]
    pub fn height(&self) -> u32 {
        self.state
            .as_ref()
            .map_or(0, |state| state.borrow().surface.size().height)
    }

    /// Whether nothing has been drawn since the last clear or resize.
    #[wasm_bindgen(js_name = isBlank)]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match &self.state {
            Some(state) => state.borrow().surface.is_blank(),
            None => true,
        }
    }

    /// Detach all listeners. The drawing can still be exported.
    pub fn destroy(&mut self) {
        if self.bindings.take().is_some() {
            tracing::info!("Signature pad detached");
        }
    }
}

impl SignaturePad {
    fn attach(container_id: &str, config: SurfaceConfig) -> Result<Self, JsValue> {
        let mut pad = Self {
            config,
            state: None,
            bindings: None,
        };
        pad.initialize(container_id)?;
        Ok(pad)
    }

    /// Start over on the surface already bound to `container_id`.
    fn reattach(&mut self, container_id: &str, state: PadHandle) -> Result<(), JsValue> {
        {
            let mut pad = state.borrow_mut();
            pad.surface.reinitialize().map_err(js_error)?;
            pad.repaint()?;
        }
        let canvas = state.borrow().canvas.clone();
        self.bindings = Some(Bindings::attach(&canvas, &state)?);
        self.state = Some(state);

        tracing::info!("Signature pad re-attached to '{}'", container_id);
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot, JsValue> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Signature pad is not attached"))?;
        let snapshot = state.borrow().surface.export_snapshot();
        snapshot.map_err(js_error)
    }
}

fn download_name(requested: Option<String>, snapshot: &Snapshot) -> String {
    requested
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| SignaturePayload::from_snapshot(snapshot).file_name())
}
