//! Mobile navigation menu
//!
//! Opening locks page scroll and fades the nav links in one after another.
//! Closing releases the lock and restores the toggle icon right away, plays
//! the links out in reverse, and only drops the nav's `active` class once the
//! CSS close transition has had time to finish.

use crate::config::MenuConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

/// Class/attribute state the host mirrors into the DOM
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuView {
    /// `active` on the toggle button (the "close" icon)
    pub icon_active: bool,
    /// `active` on the nav
    pub nav_active: bool,
    /// `closing` on the nav while the close transition plays
    pub nav_closing: bool,
    /// Scroll-lock attribute on the body
    pub scroll_locked: bool,
}

/// Per-link fade for one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAnimation {
    pub index: usize,
    pub delay_ms: u64,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTransition {
    pub state: MenuState,
    pub view: MenuView,
    pub links: Vec<LinkAnimation>,
}

#[derive(Debug, Clone)]
pub struct MobileMenu {
    config: MenuConfig,
    state: MenuState,
    link_count: usize,
    view: MenuView,
    /// When the nav's `active` class goes after a close
    removal_due: Option<u64>,
}

impl MobileMenu {
    pub fn new(config: MenuConfig, link_count: usize) -> Self {
        Self {
            config,
            state: MenuState::Closed,
            link_count,
            view: MenuView::default(),
            removal_due: None,
        }
    }

    #[inline]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    #[inline]
    pub fn view(&self) -> MenuView {
        self.view
    }

    /// Milliseconds until `tick` has work to do
    pub fn removal_due_in(&self, now_ms: u64) -> Option<u64> {
        self.removal_due.map(|due| due.saturating_sub(now_ms))
    }

    /// Toggle button click
    pub fn toggle(&mut self, now_ms: u64) -> MenuTransition {
        match self.state {
            MenuState::Closed => self.open(),
            MenuState::Open => self.close(now_ms),
        }
    }

    pub fn open(&mut self) -> MenuTransition {
        self.state = MenuState::Open;
        // A re-open cancels a removal that has not happened yet
        self.removal_due = None;
        self.view = MenuView {
            icon_active: true,
            nav_active: true,
            nav_closing: false,
            scroll_locked: true,
        };
        let links = (0..self.link_count)
            .map(|index| LinkAnimation {
                index,
                delay_ms: index as u64 * self.config.link_stagger_ms,
                visible: true,
            })
            .collect();
        self.transition(links)
    }

    /// Close from the toggle or from a nav link click
    pub fn close(&mut self, now_ms: u64) -> MenuTransition {
        if self.state == MenuState::Closed {
            return self.transition(Vec::new());
        }
        self.state = MenuState::Closed;
        self.view.icon_active = false;
        self.view.scroll_locked = false;
        self.view.nav_closing = true;
        self.removal_due = Some(now_ms + self.config.close_delay_ms);

        let last = self.link_count.saturating_sub(1);
        let links = (0..self.link_count)
            .map(|index| LinkAnimation {
                index,
                delay_ms: (last - index) as u64 * self.config.link_stagger_ms,
                visible: false,
            })
            .collect();
        self.transition(links)
    }

    /// Finish a close once its delay elapsed; returns the new view when it changed
    pub fn tick(&mut self, now_ms: u64) -> Option<MenuView> {
        match self.removal_due {
            Some(due) if now_ms >= due => {
                self.removal_due = None;
                self.view.nav_active = false;
                self.view.nav_closing = false;
                Some(self.view)
            }
            _ => None,
        }
    }

    fn transition(&self, links: Vec<LinkAnimation>) -> MenuTransition {
        MenuTransition {
            state: self.state,
            view: self.view,
            links,
        }
    }
}
