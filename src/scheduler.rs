use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::AppError;

/// Identifies one scheduled frame so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(i32);

impl FrameHandle {
    #[cfg(test)]
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

/// Arms a single future frame callback; each frame re-arms its successor.
pub trait FrameScheduler {
    fn request(&mut self) -> Result<FrameHandle, AppError>;
    fn cancel(&mut self, handle: FrameHandle);
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` scheduler. Clones share the same callback slot.
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Installs the closure the browser invokes with the frame timestamp.
    pub fn install(&self, on_frame: impl FnMut(f64) + 'static) {
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
    }

    /// Drops the frame closure, breaking the cycle through the session it captures.
    pub fn release(&self) {
        self.callback.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) -> Result<FrameHandle, AppError> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref().ok_or(AppError::NoFrameCallback)?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(AppError::js("requestAnimationFrame"))
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}
