#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowVisibility {
    #[default]
    Visible,
    Hidden,
}

impl WindowVisibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, WindowVisibility::Visible)
    }
}
