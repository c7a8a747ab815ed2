//! Interactor binding
//!
//! An interactor turns pointer and keyboard input into camera motion and
//! emits a render event after each change. Bound to a view, it must not
//! render on its own: every redraw goes through the view's coalescer so the
//! target frame rate holds.

/// Input handler that can request redraws
pub trait Interactor {
    /// Allow or forbid the interactor to render directly
    fn set_enable_render(&mut self, enabled: bool);

    /// Whether the interactor may render directly
    fn enable_render(&self) -> bool;

    /// Name used in logs
    fn name(&self) -> &str {
        "interactor"
    }
}

/// Interactor with no behaviour of its own beyond the render flag
#[derive(Debug, Clone)]
pub struct BasicInteractor {
    name: String,
    enable_render: bool,
}

impl BasicInteractor {
    /// Create an interactor that renders directly until bound to a view
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enable_render: true,
        }
    }
}

impl Interactor for BasicInteractor {
    fn set_enable_render(&mut self, enabled: bool) {
        self.enable_render = enabled;
    }

    fn enable_render(&self) -> bool {
        self.enable_render
    }

    fn name(&self) -> &str {
        &self.name
    }
}
