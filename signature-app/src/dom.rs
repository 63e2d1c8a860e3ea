//! DOM container and canvas painting.

use std::{cell::RefCell, fmt::Display, rc::Rc};

use signature_core::{Container, LayoutBox};
use signature_renderer::PixmapSurface;
use wasm_bindgen::{prelude::*, Clamped};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

pub(crate) type PadHandle = Rc<RefCell<PadState>>;

/// A canvas element measured through its bounding client rect.
pub(crate) struct DomContainer {
    id: String,
    canvas: HtmlCanvasElement,
}

impl DomContainer {
    pub(crate) fn new(id: &str, canvas: HtmlCanvasElement) -> Self {
        Self {
            id: id.to_string(),
            canvas,
        }
    }
}

impl Container for DomContainer {
    fn id(&self) -> &str {
        &self.id
    }

    #[allow(clippy::cast_possible_truncation)]
    fn layout_box(&self) -> LayoutBox {
        let rect = self.canvas.get_bounding_client_rect();
        LayoutBox::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }
}

/// Surface plus the page canvas it is shown on.
pub(crate) struct PadState {
    pub(crate) surface: PixmapSurface<DomContainer>,
    pub(crate) canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl PadState {
    pub(crate) fn new(
        surface: PixmapSurface<DomContainer>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    ) -> Self {
        Self {
            surface,
            canvas,
            ctx,
        }
    }

    /// Copy the raster onto the canvas, matching its backing size first.
    pub(crate) fn repaint(&self) -> Result<(), JsValue> {
        let size = self.surface.size();
        if self.canvas.width() != size.width || self.canvas.height() != size.height {
            self.canvas.set_width(size.width);
            self.canvas.set_height(size.height);
        }

        let rgba = self.surface.raster().to_rgba();
        let image_data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&rgba[..]),
            size.width,
            size.height,
        )?;
        self.ctx.put_image_data(&image_data, 0.0, 0.0)
    }
}

#[allow(clippy::needless_pass_by_value)]
pub(crate) fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

pub(crate) fn document() -> Result<Document, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}

pub(crate) fn find_canvas(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Canvas element '{id}' not found")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Element is not a canvas"))
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")
        .map_err(|_| JsValue::from_str("Failed to get 2D context"))?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))
}
