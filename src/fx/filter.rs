//! Project category tabs
//!
//! Exactly one tab is active. Card visibility is recomputed from scratch on every
//! selection.

/// Category that matches every card
pub const WILDCARD_CATEGORY: &str = "all";

/// Whether a card tagged `card` is shown while `selected` is active
pub fn is_visible(card: &str, selected: &str) -> bool {
    selected == WILDCARD_CATEGORY || card == selected
}

#[derive(Debug, Clone)]
pub struct CategoryFilter {
    tabs: Vec<String>,
    active: usize,
}

impl CategoryFilter {
    /// Tabs in markup order. The wildcard tab starts active when present,
    /// otherwise the first tab.
    pub fn new<I, S>(tabs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tabs: Vec<String> = tabs.into_iter().map(Into::into).collect();
        let active = tabs
            .iter()
            .position(|t| t == WILDCARD_CATEGORY)
            .unwrap_or(0);
        Self { tabs, active }
    }

    /// Activate the tab at `index`. Returns the selected category, or `None` for
    /// an index outside the tab set.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let category = self.tabs.get(index)?;
        self.active = index;
        log::debug!("Filter selected: {}", category);
        Some(category.as_str())
    }

    pub fn active(&self) -> Option<&str> {
        self.tabs.get(self.active).map(String::as_str)
    }

    /// Active flag for each tab, in tab order
    pub fn tab_states(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.tabs.len()).map(move |i| i == self.active)
    }

    /// Visibility for each card tag under the active selection
    pub fn visibility<'a, I>(&self, cards: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let selected = self.active().unwrap_or(WILDCARD_CATEGORY);
        cards.into_iter().map(|card| is_visible(card, selected)).collect()
    }
}
