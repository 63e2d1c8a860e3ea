//! The hosting element a surface is laid out in.

use std::cell::Cell;
use std::rc::Rc;

use crate::LayoutBox;

/// Layout queries a capture surface makes against its host element.
pub trait Container {
    /// Opaque identifier of the host element.
    fn id(&self) -> &str;

    /// Current on-screen box of the element.
    fn layout_box(&self) -> LayoutBox;
}

/// An in-memory container whose box is set by the caller.
///
/// Clones share the same box, so a driver can keep a handle and resize the
/// container after handing it to a surface.
#[derive(Debug, Clone)]
pub struct FixedContainer {
    id: String,
    layout: Rc<Cell<LayoutBox>>,
}

impl FixedContainer {
    /// Create a container with the given id and box.
    #[must_use]
    pub fn new(id: impl Into<String>, layout: LayoutBox) -> Self {
        Self {
            id: id.into(),
            layout: Rc::new(Cell::new(layout)),
        }
    }

    /// Create a container at the window origin with the given size.
    #[must_use]
    pub fn sized(id: impl Into<String>, width: f32, height: f32) -> Self {
        Self::new(id, LayoutBox::sized(width, height))
    }

    /// Replace the box, as a host layout pass would.
    pub fn set_layout(&self, layout: LayoutBox) {
        self.layout.set(layout);
    }

    /// Change the size, keeping the offset.
    pub fn set_size(&self, width: f32, height: f32) {
        let current = self.layout.get();
        self.layout
            .set(LayoutBox::new(current.left, current.top, width, height));
    }
}

impl Container for FixedContainer {
    fn id(&self) -> &str {
        &self.id
    }

    fn layout_box(&self) -> LayoutBox {
        self.layout.get()
    }
}
