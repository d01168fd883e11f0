//! linking::diff
//!
//! Companion routes (bottom tab and central pane) that the live tree lacks.
//!
//! When a modal declares mandatory companions, the tab and central pane it
//! expects underneath must exist before the modal is pushed. The diff finds
//! which of them differ from the live tree and turns them into pushes, tab
//! first.

use crate::core::state::{Route, RouteState};
use crate::core::topology::{RootKind, Topology};
use crate::core::types::NavigatorKey;

use super::action::NavigationAction;
use super::adapt::AdaptedState;

/// Companion routes to establish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialStateDiff {
    /// Tab to focus in the bottom tab navigator.
    pub bottom_tab: Option<Route>,
    /// Whole bottom tab navigator, when the live tree has none.
    pub bottom_tab_navigator: Option<Route>,
    /// Central pane to push on the root stack.
    pub central_pane: Option<Route>,
}

impl PartialStateDiff {
    /// Compare the companions of `target` with `current`.
    ///
    /// Returns an empty diff unless the target's companions are mandatory.
    pub fn between(current: &RouteState, target: &AdaptedState, topology: &Topology) -> Self {
        let mut diff = Self::default();
        if !target.metainfo.is_central_pane_and_bottom_tab_mandatory {
            return diff;
        }

        if let Some(target_tabs) = target.bottom_tab(topology) {
            let target_tab = target_tabs.state().and_then(RouteState::top);
            match topmost_bottom_tab(current, topology) {
                None => diff.bottom_tab_navigator = Some(target_tabs.clone()),
                Some((current_tab, _)) => {
                    if let Some(target_tab) = target_tab {
                        if !current_tab.same_place(target_tab) {
                            diff.bottom_tab = Some(target_tab.clone());
                        }
                    }
                }
            }
        }

        if let Some(target_central) = target.central_pane(topology) {
            let differs = match topmost_central_pane(current, topology) {
                Some(current_central) => !current_central.same_place(target_central),
                None => true,
            };
            if differs {
                diff.central_pane = Some(target_central.clone());
            }
        }

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.bottom_tab.is_none() && self.bottom_tab_navigator.is_none() && self.central_pane.is_none()
    }

    /// Pushes establishing the diff, bottom tab first.
    pub fn actions(&self, current: &RouteState, topology: &Topology) -> Vec<NavigationAction> {
        let root = current.key().cloned();
        let mut actions = Vec::new();

        if let Some(navigator) = &self.bottom_tab_navigator {
            actions.push(NavigationAction::push(navigator.clone(), root.clone()));
        }
        if let Some(tab) = &self.bottom_tab {
            let tabs_key = topmost_bottom_tab(current, topology).and_then(|(_, key)| key.cloned());
            actions.push(NavigationAction::push(tab.clone(), tabs_key));
        }
        if let Some(central) = &self.central_pane {
            actions.push(NavigationAction::push(central.clone(), root));
        }

        actions
    }
}

/// The focused tab of the last bottom tab navigator on the root stack, with
/// that navigator's state key.
pub fn topmost_bottom_tab<'a>(
    state: &'a RouteState,
    topology: &Topology,
) -> Option<(&'a Route, Option<&'a NavigatorKey>)> {
    let tabs = state.find_last(topology.bottom_tab())?.state()?;
    Some((tabs.top()?, tabs.key()))
}

/// The last central pane on the root stack.
pub fn topmost_central_pane<'a>(state: &'a RouteState, topology: &Topology) -> Option<&'a Route> {
    state.find_last_by(|route| topology.kind(route.name().as_str()) == RootKind::CentralPane)
}
