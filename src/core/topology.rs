//! core::topology
//!
//! Static knowledge about how the app's root routes relate to each other.
//!
//! # Overview
//!
//! The root navigator hosts at most three layers: the bottom tab, a central
//! pane and a modal overlay. The [`Topology`] classifies root-level names
//! into those layers and carries the mapping tables that keep them
//! consistent:
//!
//! - bottom tab → default central pane
//! - central pane → bottom tab
//! - central pane ← right-modal screens that sit on top of it
//! - right-modal screens opened directly from the tab list
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::topology::{RootKind, Topology};
//!
//! let topology = Topology::kiroku();
//! assert_eq!(topology.kind("RightModalNavigator"), RootKind::RightModal);
//! assert_eq!(topology.tab_for_central("Statistics_Period"), Some("Statistics_Tab"));
//! ```

use crate::core::screens::{navigators, screens};

/// Layer a root-level route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    BottomTab,
    CentralPane,
    RightModal,
    LeftModal,
    /// Full-screen flow such as the time-zone fix.
    FlowModal,
    NotFound,
    /// Anything else (auth screens, force update).
    Other,
}

/// Classification and mapping tables of the root navigator.
#[derive(Debug, Clone)]
pub struct Topology {
    bottom_tab: &'static str,
    right_modal: &'static str,
    left_modal: &'static str,
    flow_modals: Vec<&'static str>,
    not_found: &'static str,
    default_tab: &'static str,
    tab_to_central: Vec<(&'static str, &'static str)>,
    central_to_tab: Vec<(&'static str, &'static str)>,
    central_to_modal: Vec<(&'static str, Vec<&'static str>)>,
    opened_from_tab_list: Vec<&'static str>,
}

impl Topology {
    /// Tables of the Kiroku app.
    pub fn kiroku() -> Self {
        use screens::*;

        Self {
            bottom_tab: navigators::BOTTOM_TAB,
            right_modal: navigators::RIGHT_MODAL,
            left_modal: navigators::LEFT_MODAL,
            flow_modals: vec![navigators::TZ_FIX_MODAL],
            not_found: NOT_FOUND,
            default_tab: HOME,
            tab_to_central: vec![
                (HOME, HOME_OVERVIEW),
                (STATISTICS_TAB, STATISTICS_OVERVIEW),
            ],
            central_to_tab: vec![
                (HOME_OVERVIEW, HOME),
                (STATISTICS_OVERVIEW, STATISTICS_TAB),
                (STATISTICS_PERIOD, STATISTICS_TAB),
            ],
            central_to_modal: vec![
                (
                    HOME_OVERVIEW,
                    vec![
                        settings::ROOT,
                        settings::ACCOUNT,
                        settings::PREFERENCES,
                        settings::LANGUAGE,
                        settings::ABOUT,
                        settings::TIMEZONE,
                        main_menu::ROOT,
                        main_menu::PREFERENCES,
                    ],
                ),
                (STATISTICS_OVERVIEW, vec![achievements::ROOT]),
            ],
            opened_from_tab_list: vec![main_menu::ROOT, social::ROOT],
        }
    }

    /// Classify a root-level route name.
    pub fn kind(&self, name: &str) -> RootKind {
        if name == self.bottom_tab {
            RootKind::BottomTab
        } else if name == self.right_modal {
            RootKind::RightModal
        } else if name == self.left_modal {
            RootKind::LeftModal
        } else if self.flow_modals.contains(&name) {
            RootKind::FlowModal
        } else if name == self.not_found {
            RootKind::NotFound
        } else if self.is_central_pane(name) {
            RootKind::CentralPane
        } else {
            RootKind::Other
        }
    }

    /// Left or right modal navigator.
    pub fn is_side_modal(&self, name: &str) -> bool {
        matches!(self.kind(name), RootKind::RightModal | RootKind::LeftModal)
    }

    /// Any overlay that sits above the bottom tab and central pane.
    pub fn is_overlay(&self, name: &str) -> bool {
        matches!(
            self.kind(name),
            RootKind::RightModal | RootKind::LeftModal | RootKind::FlowModal
        )
    }

    /// Root routes that `dismiss_modal` is allowed to pop.
    pub fn is_dismissible(&self, name: &str) -> bool {
        self.is_overlay(name) || name == self.not_found
    }

    pub fn is_central_pane(&self, name: &str) -> bool {
        self.central_to_tab.iter().any(|(central, _)| *central == name)
    }

    pub fn bottom_tab(&self) -> &'static str {
        self.bottom_tab
    }

    pub fn right_modal(&self) -> &'static str {
        self.right_modal
    }

    /// Tab selected when nothing else decides.
    pub fn default_tab(&self) -> &'static str {
        self.default_tab
    }

    /// Central pane shown next to `tab` on wide layouts.
    pub fn default_central_for_tab(&self, tab: &str) -> Option<&'static str> {
        lookup(&self.tab_to_central, tab)
    }

    /// Tab that owns `central`.
    pub fn tab_for_central(&self, central: &str) -> Option<&'static str> {
        lookup(&self.central_to_tab, central)
    }

    /// Central pane that sits under the right-modal screen `screen`.
    pub fn central_for_modal_screen(&self, screen: &str) -> Option<&'static str> {
        self.central_to_modal
            .iter()
            .find(|(_, modal_screens)| modal_screens.contains(&screen))
            .map(|(central, _)| *central)
    }

    /// Right-modal screens opened from the tab list, which never get a
    /// central pane underneath on narrow layouts.
    pub fn is_opened_from_tab_list(&self, screen: &str) -> bool {
        self.opened_from_tab_list.contains(&screen)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::kiroku()
    }
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}
