//! linking::adapt
//!
//! Raw tree → adapted tree.
//!
//! # Shape
//!
//! An adapted root state holds, in order: the bottom tab, at most one
//! central pane and at most one overlay. The first matching case wins:
//!
//! 1. Right modal present: resolve the central pane that belongs under the
//!    modal (`backTo` first, then the central ← modal table) and build
//!    `[tab, central?, modal]`.
//! 2. Left modal or flow modal present: `[default tab, modal]`.
//! 3. Central pane present: `[matching tab, central]`.
//! 4. Bottom tab only: as is on narrow layouts, plus the tab's default
//!    central pane on wide layouts.
//! 5. Anything else: unchanged.
//!
//! [`Metainfo`] records whether the tab and central pane were dictated by the
//! path or defaulted.

use serde::Serialize;
use tracing::{debug, warn};

use super::parse::parse_path;
use super::LinkingError;
use crate::core::registry::RouteRegistry;
use crate::core::state::{Route, RouteState};
use crate::core::topology::{RootKind, Topology};
use crate::core::types::{pick, Layout, Params, ScreenName};

/// Maximum number of `backTo` hops followed when resolving what sits under
/// a right modal.
const MAX_BACK_TO_DEPTH: usize = 8;

/// Flags describing which parts of an adapted state were inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metainfo {
    /// The tab and central pane come from the path and must be established
    /// before the overlay is shown.
    pub is_central_pane_and_bottom_tab_mandatory: bool,
}

impl Default for Metainfo {
    fn default() -> Self {
        Self {
            is_central_pane_and_bottom_tab_mandatory: true,
        }
    }
}

/// An invariant-respecting root state plus its metainfo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdaptedState {
    pub state: RouteState,
    pub metainfo: Metainfo,
}

impl AdaptedState {
    /// The bottom tab navigator route, if present.
    pub fn bottom_tab<'a>(&'a self, topology: &Topology) -> Option<&'a Route> {
        self.state.find(topology.bottom_tab())
    }

    /// The central pane route, if present.
    pub fn central_pane<'a>(&'a self, topology: &Topology) -> Option<&'a Route> {
        self.state
            .find_last_by(|route| topology.kind(route.name().as_str()) == RootKind::CentralPane)
    }
}

/// Rewrites raw trees into adapted ones.
#[derive(Debug, Clone, Copy)]
pub struct StateAdapter<'a> {
    registry: &'a RouteRegistry,
    topology: &'a Topology,
    layout: Layout,
}

impl<'a> StateAdapter<'a> {
    pub fn new(registry: &'a RouteRegistry, topology: &'a Topology, layout: Layout) -> Self {
        Self {
            registry,
            topology,
            layout,
        }
    }

    /// Adapt a raw tree.
    ///
    /// # Errors
    ///
    /// Returns `LinkingError::AdaptationImpossible` if `raw` has no routes.
    pub fn adapt(&self, raw: &RouteState) -> Result<AdaptedState, LinkingError> {
        if raw.is_empty() {
            return Err(LinkingError::AdaptationImpossible);
        }
        let t = self.topology;

        if let Some(modal) = raw.find(t.right_modal()) {
            return Ok(self.adapt_right_modal(modal));
        }

        if let Some(modal) = raw.find_last_by(|r| {
            matches!(
                t.kind(r.name().as_str()),
                RootKind::LeftModal | RootKind::FlowModal
            )
        }) {
            return Ok(AdaptedState {
                state: RouteState::new(vec![self.bottom_tab_route(t.default_tab()), modal.clone()]),
                metainfo: Metainfo {
                    is_central_pane_and_bottom_tab_mandatory: false,
                },
            });
        }

        if let Some(central) =
            raw.find_last_by(|r| t.kind(r.name().as_str()) == RootKind::CentralPane)
        {
            let tab = t
                .tab_for_central(central.name().as_str())
                .unwrap_or_else(|| t.default_tab());
            return Ok(AdaptedState {
                state: RouteState::new(vec![self.bottom_tab_route(tab), central.clone()]),
                metainfo: Metainfo::default(),
            });
        }

        if let Some(tabs) = raw.find(t.bottom_tab()) {
            return Ok(self.adapt_bottom_tab(tabs));
        }

        Ok(AdaptedState {
            state: raw.clone(),
            metainfo: Metainfo::default(),
        })
    }

    fn adapt_right_modal(&self, modal: &Route) -> AdaptedState {
        let t = self.topology;
        let leaf = modal.focused_leaf();
        let mut metainfo = Metainfo::default();

        let mut matching = self.matching_root_route(leaf, 0);
        let from_tab_list = t.is_opened_from_tab_list(leaf.name().as_str());

        if matching.is_none() {
            warn!(
                screen = %leaf.name(),
                "{}",
                LinkingError::NoMatchingRootRoute {
                    screen: leaf.name().to_string()
                }
            );
        }
        if matching.is_none() || from_tab_list {
            metainfo.is_central_pane_and_bottom_tab_mandatory = false;
            if matching.is_none() && !self.layout.is_narrow() {
                matching = self.default_central(t.default_tab());
            }
        }

        let tab = matching
            .as_ref()
            .and_then(|central| t.tab_for_central(central.name().as_str()))
            .unwrap_or_else(|| t.default_tab());

        let mut routes = vec![self.bottom_tab_route(tab)];
        if let Some(central) = matching {
            if !self.layout.is_narrow() || !from_tab_list {
                routes.push(central);
            }
        }
        routes.push(modal.clone());

        AdaptedState {
            state: RouteState::new(routes),
            metainfo,
        }
    }

    fn adapt_bottom_tab(&self, tabs: &Route) -> AdaptedState {
        let mut routes = vec![tabs.clone()];
        let mut metainfo = Metainfo::default();

        if !self.layout.is_narrow() {
            let tab = tabs
                .state()
                .and_then(RouteState::top)
                .map(|tab| tab.name().as_str())
                .unwrap_or_else(|| self.topology.default_tab());
            match self.default_central(tab) {
                Some(central) => routes.push(central),
                None => metainfo.is_central_pane_and_bottom_tab_mandatory = false,
            }
        }

        AdaptedState {
            state: RouteState::new(routes),
            metainfo,
        }
    }

    /// Central pane that belongs under the right-modal screen `leaf`.
    fn matching_root_route(&self, leaf: &Route, depth: usize) -> Option<Route> {
        if depth >= MAX_BACK_TO_DEPTH {
            debug!(screen = %leaf.name(), "backTo chain too deep, giving up");
            return None;
        }

        if let Some(back_to) = leaf.params().get("backTo") {
            match parse_path(back_to, self.registry) {
                Ok(state) => {
                    if let Some(modal) = state.find(self.topology.right_modal()) {
                        return self.matching_root_route(modal.focused_leaf(), depth + 1);
                    }
                    if let Some(central) = state.find_last_by(|r| {
                        self.topology.kind(r.name().as_str()) == RootKind::CentralPane
                    }) {
                        return Some(central.clone());
                    }
                }
                Err(error) => debug!(back_to = %back_to, %error, "ignoring backTo"),
            }
        }

        let central = self.topology.central_for_modal_screen(leaf.name().as_str())?;
        let params = match self.registry.pattern_for(central) {
            Some(pattern) => pick(leaf.params(), &pattern.pattern().param_names()),
            None => Params::new(),
        };
        Some(Route::Screen {
            name: ScreenName::from_static(central),
            params,
        })
    }

    fn default_central(&self, tab: &str) -> Option<Route> {
        self.topology
            .default_central_for_tab(tab)
            .map(|central| Route::screen(central, Params::new()))
    }

    /// Bottom tab navigator focused on `tab`, with the navigator's initial
    /// tab below it when they differ.
    fn bottom_tab_route(&self, tab: &'static str) -> Route {
        let initial = self
            .registry
            .navigator(self.topology.bottom_tab())
            .and_then(|n| n.initial_route_name.as_ref())
            .filter(|initial| *initial != tab);

        let mut routes = Vec::with_capacity(2);
        if let Some(initial) = initial {
            routes.push(Route::Screen {
                name: initial.clone(),
                params: Params::new(),
            });
        }
        routes.push(Route::screen(tab, Params::new()));

        Route::navigator(self.topology.bottom_tab(), RouteState::new(routes))
    }
}
