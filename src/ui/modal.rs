pub const DEFAULT_MAX_HEIGHT: &str = "90vh";

/// Where a click inside the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    CloseButton,
    Backdrop,
    /// Anywhere inside the content panel. Never reaches the backdrop.
    Content,
}

/// Overlay that hosts arbitrary content. No stacking: one open state.
#[derive(Debug)]
pub struct Modal<C> {
    content: C,
    is_open: bool,
    max_height: String,
}

impl<C> Modal<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            is_open: false,
            max_height: DEFAULT_MAX_HEIGHT.to_string(),
        }
    }

    pub fn with_max_height(mut self, max_height: impl Into<String>) -> Self {
        self.max_height = max_height.into();
        self
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn max_height(&self) -> &str {
        &self.max_height
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// Route a click; returns true when it dismissed the modal.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        if !self.is_open {
            return false;
        }
        match target {
            ClickTarget::CloseButton | ClickTarget::Backdrop => {
                self.close();
                true
            }
            ClickTarget::Content => false,
        }
    }
}
