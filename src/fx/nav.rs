//! Mobile navigation menu

#[derive(Debug, Clone, Copy, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Following a link collapses the menu
    pub fn link_followed(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value for the toggle's `aria-expanded` attribute
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aria_expanded_mirrors_state() {
        let mut nav = NavMenu::new();
        assert_eq!(nav.aria_expanded(), "false");
        assert!(nav.toggle());
        assert_eq!(nav.aria_expanded(), "true");
        assert!(!nav.toggle());
        assert_eq!(nav.aria_expanded(), "false");
    }

    #[test]
    fn test_link_closes_menu() {
        let mut nav = NavMenu::new();
        nav.toggle();
        nav.link_followed();
        assert!(!nav.is_open());
        nav.link_followed();
        assert!(!nav.is_open());
    }
}
