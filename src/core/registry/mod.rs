//! core::registry
//!
//! The route registry: which path patterns lead to which screens, and which
//! navigators those screens live in.
//!
//! # Overview
//!
//! The app declares its routes once as a nested [`LinkingConfig`]. At startup
//! the config is flattened into a [`RouteRegistry`]: one [`RoutePattern`] per
//! addressable screen, sorted by specificity, plus the navigator table
//! (children and initial route of every navigator). The registry is read-only
//! afterwards.
//!
//! # Invariants
//!
//! - Every screen and navigator name is declared exactly once
//! - Patterns are tried most specific first; ties keep declaration order
//!
//! # Example
//!
//! ```
//! use kiroku_nav::core::registry::{LinkingConfig, NestedConfig, RouteRegistry};
//!
//! let config = LinkingConfig::new()
//!     .navigator(
//!         "BottomTabNavigator",
//!         NestedConfig::new().path("").initial("Home").screen("Home", "home"),
//!     )
//!     .screen("NotFound", "*");
//!
//! let registry = RouteRegistry::from_config(&config).unwrap();
//! assert_eq!(registry.pattern_for("Home").unwrap().pattern().as_str(), "home");
//! ```

pub mod kiroku;
pub mod pattern;

pub use pattern::{PathPattern, Segment};

use std::collections::BTreeMap;

use thiserror::Error;

use super::types::{ScreenName, TypeError};

/// Errors from building the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("screen declared more than once: {0}")]
    DuplicateScreen(String),

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("initial route '{initial}' is not a child of navigator '{navigator}'")]
    UnknownInitialRoute { navigator: String, initial: String },

    #[error(transparent)]
    InvalidName(#[from] TypeError),
}

/// Declarative, nested route configuration.
///
/// Mirrors the `{screens: {ScreenId: PathPatternOrNestedConfig}}` literal the
/// app is configured with. Declaration order is significant: it breaks ties
/// between equally specific patterns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkingConfig {
    pub screens: Vec<(String, ScreenConfig)>,
}

impl LinkingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a leaf screen reachable at `path`.
    pub fn screen(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.screens
            .push((name.into(), ScreenConfig::Path(path.into())));
        self
    }

    /// Declare a navigator and its children.
    pub fn navigator(mut self, name: impl Into<String>, config: NestedConfig) -> Self {
        self.screens
            .push((name.into(), ScreenConfig::Nested(config)));
        self
    }
}

/// Configuration of a single entry in a `screens` table.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenConfig {
    /// A leaf screen with its path.
    Path(String),
    /// A navigator with children.
    Nested(NestedConfig),
}

/// A navigator entry of the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedConfig {
    /// Own path; children are nested below it unless `exact`.
    pub path: Option<String>,
    /// Do not inherit the parent's path.
    pub exact: bool,
    /// Route placed below any other matched child.
    pub initial_route_name: Option<String>,
    pub screens: Vec<(String, ScreenConfig)>,
}

impl NestedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial_route_name = Some(name.into());
        self
    }

    pub fn screen(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.screens
            .push((name.into(), ScreenConfig::Path(path.into())));
        self
    }

    pub fn navigator(mut self, name: impl Into<String>, config: NestedConfig) -> Self {
        self.screens
            .push((name.into(), ScreenConfig::Nested(config)));
        self
    }
}

/// A flattened, addressable route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    screen: ScreenName,
    pattern: PathPattern,
    parent_screens: Vec<ScreenName>,
}

impl RoutePattern {
    /// The screen (or navigator) this pattern leads to.
    pub fn screen(&self) -> &ScreenName {
        &self.screen
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Navigators enclosing the screen, outermost first.
    pub fn parent_screens(&self) -> &[ScreenName] {
        &self.parent_screens
    }
}

/// A navigator declared in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorInfo {
    pub children: Vec<ScreenName>,
    pub initial_route_name: Option<ScreenName>,
}

impl NavigatorInfo {
    /// Route shown when the navigator is opened without a specific child.
    pub fn default_child(&self) -> Option<&ScreenName> {
        self.initial_route_name
            .as_ref()
            .or_else(|| self.children.first())
    }
}

/// The flattened registry.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    /// Patterns in match order.
    patterns: Vec<RoutePattern>,
    /// Index into `patterns` by screen name.
    by_screen: BTreeMap<ScreenName, usize>,
    navigators: BTreeMap<ScreenName, NavigatorInfo>,
}

impl RouteRegistry {
    /// Flatten a nested config.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names, malformed patterns, invalid screen names
    /// and initial routes that are not children of their navigator.
    pub fn from_config(config: &LinkingConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        let mut declared = Vec::new();
        registry.flatten(&config.screens, "", &[], &mut declared)?;

        // Stable sort: equally specific patterns keep declaration order.
        declared.sort_by(|a: &RoutePattern, b: &RoutePattern| {
            a.pattern
                .cmp_specificity(&b.pattern)
                .then_with(|| b.parent_screens.len().cmp(&a.parent_screens.len()))
        });

        for (i, pattern) in declared.iter().enumerate() {
            registry.by_screen.insert(pattern.screen.clone(), i);
        }
        registry.patterns = declared;
        Ok(registry)
    }

    fn flatten(
        &mut self,
        screens: &[(String, ScreenConfig)],
        parent_path: &str,
        parents: &[ScreenName],
        out: &mut Vec<RoutePattern>,
    ) -> Result<(), RegistryError> {
        for (name, config) in screens {
            let screen = ScreenName::new(name.as_str())?;
            if self.navigators.contains_key(&screen)
                || out.iter().any(|p: &RoutePattern| p.screen == screen)
            {
                return Err(RegistryError::DuplicateScreen(name.clone()));
            }

            match config {
                ScreenConfig::Path(path) => {
                    out.push(RoutePattern {
                        screen,
                        pattern: PathPattern::parse(&join(parent_path, path))?,
                        parent_screens: parents.to_vec(),
                    });
                }
                ScreenConfig::Nested(nested) => {
                    let own_path = match &nested.path {
                        Some(path) if nested.exact => path.clone(),
                        Some(path) => join(parent_path, path),
                        None => parent_path.to_string(),
                    };
                    if nested.path.is_some() {
                        out.push(RoutePattern {
                            screen: screen.clone(),
                            pattern: PathPattern::parse(&own_path)?,
                            parent_screens: parents.to_vec(),
                        });
                    }

                    let children = nested
                        .screens
                        .iter()
                        .map(|(child, _)| ScreenName::new(child.as_str()))
                        .collect::<Result<Vec<_>, _>>()?;
                    let initial_route_name = match &nested.initial_route_name {
                        Some(initial) => {
                            let initial = ScreenName::new(initial.as_str())?;
                            if !children.contains(&initial) {
                                return Err(RegistryError::UnknownInitialRoute {
                                    navigator: name.clone(),
                                    initial: initial.to_string(),
                                });
                            }
                            Some(initial)
                        }
                        None => None,
                    };
                    self.navigators.insert(
                        screen.clone(),
                        NavigatorInfo {
                            children,
                            initial_route_name,
                        },
                    );

                    let mut chain = parents.to_vec();
                    chain.push(screen);
                    self.flatten(&nested.screens, &own_path, &chain, out)?;
                }
            }
        }
        Ok(())
    }

    /// All patterns in the order they are tried.
    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    /// Pattern leading to `screen`.
    pub fn pattern_for(&self, screen: &str) -> Option<&RoutePattern> {
        let index = *self.by_screen.get(screen)?;
        self.patterns.get(index)
    }

    /// Navigator table entry for `name`, if it is a navigator.
    pub fn navigator(&self, name: &str) -> Option<&NavigatorInfo> {
        self.navigators.get(name)
    }

    pub fn is_navigator(&self, name: &str) -> bool {
        self.navigator(name).is_some()
    }
}

/// Join two pattern fragments with a single `/`.
fn join(parent: &str, child: &str) -> String {
    let parts: Vec<&str> = parent
        .split('/')
        .chain(child.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    parts.join("/")
}
