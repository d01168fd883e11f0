//! core::types
//!
//! Strong types for core navigation concepts.
//!
//! # Types
//!
//! - [`ScreenName`] - Validated screen or navigator identifier
//! - [`NavigatorKey`] - Key of a live navigator instance (action target)
//! - [`Params`] - Route parameters
//! - [`Layout`] - Narrow (phone) or wide (tablet/desktop) layout
//! - [`LinkType`] - How the caller wants a link to be followed
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use kiroku_nav::core::types::{NavigatorKey, ScreenName};
//!
//! let screen = ScreenName::new("Settings_Root").unwrap();
//! assert_eq!(screen.as_str(), "Settings_Root");
//!
//! assert!(ScreenName::new("settings root").is_err());
//! assert!(NavigatorKey::new("").is_err());
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid screen name: {0}")]
    InvalidScreenName(String),

    #[error("invalid navigator key: {0}")]
    InvalidNavigatorKey(String),

    #[error("invalid layout '{0}', must be one of: narrow, wide")]
    InvalidLayout(String),
}

/// Route parameters.
///
/// Values that are undefined are simply absent, so two parameter sets compare
/// equal exactly when their defined entries are shallow-equal.
pub type Params = BTreeMap<String, String>;

/// Keep only the entries of `params` whose key is listed in `keys`.
///
/// # Example
///
/// ```
/// use kiroku_nav::core::types::{pick, Params};
///
/// let mut params = Params::new();
/// params.insert("date".into(), "2024-05-01".into());
/// params.insert("backTo".into(), "/home".into());
///
/// let picked = pick(&params, &["date"]);
/// assert_eq!(picked.len(), 1);
/// assert_eq!(picked["date"], "2024-05-01");
/// ```
pub fn pick(params: &Params, keys: &[&str]) -> Params {
    params
        .iter()
        .filter(|(key, _)| keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// A validated screen or navigator name.
///
/// Names must:
/// - Be non-empty
/// - Start with an ASCII letter
/// - Contain only ASCII letters, digits and `_`
///
/// # Example
///
/// ```
/// use kiroku_nav::core::types::ScreenName;
///
/// assert!(ScreenName::new("RightModalNavigator").is_ok());
/// assert!(ScreenName::new("DrinkingSession_Live").is_ok());
///
/// assert!(ScreenName::new("").is_err());
/// assert!(ScreenName::new("_Hidden").is_err());
/// assert!(ScreenName::new("with-dash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScreenName(String);

impl ScreenName {
    /// Create a new validated screen name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidScreenName` if the name is malformed.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Create a screen name from a compile-time constant.
    ///
    /// Used for the identifiers in [`crate::core::screens`], which are
    /// covered by unit tests instead of runtime validation.
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(Self::validate(name).is_ok(), "bad screen constant {name}");
        Self(name.to_string())
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let mut chars = name.chars();
        match chars.next() {
            None => {
                return Err(TypeError::InvalidScreenName(
                    "screen name cannot be empty".into(),
                ))
            }
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(TypeError::InvalidScreenName(format!(
                    "screen name must start with a letter: '{name}'"
                )))
            }
            Some(_) => {}
        }

        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(TypeError::InvalidScreenName(format!(
                "screen name cannot contain '{bad}': '{name}'"
            )));
        }

        Ok(())
    }

    /// Get the screen name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ScreenName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ScreenName> for String {
    fn from(name: ScreenName) -> Self {
        name.0
    }
}

impl AsRef<str> for ScreenName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ScreenName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ScreenName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ScreenName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a live navigator instance.
///
/// Keys are assigned by the navigation container, never by the parser, and
/// are the `target` of dispatched actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NavigatorKey(String);

impl NavigatorKey {
    /// Create a new navigator key.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNavigatorKey` if the key is empty or
    /// contains whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TypeError::InvalidNavigatorKey(
                "navigator key cannot be empty".into(),
            ));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidNavigatorKey(format!(
                "navigator key cannot contain whitespace: '{key}'"
            )));
        }
        Ok(Self(key))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NavigatorKey {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NavigatorKey> for String {
    fn from(key: NavigatorKey) -> Self {
        key.0
    }
}

impl fmt::Display for NavigatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen layout at the moment a link is followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Phone-sized: the central pane is hidden behind the bottom tab.
    #[default]
    Narrow,
    /// Tablet/desktop: bottom tab and central pane are visible side by side.
    Wide,
}

impl Layout {
    /// Check if this is the narrow layout.
    pub fn is_narrow(self) -> bool {
        self == Layout::Narrow
    }
}

impl FromStr for Layout {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "narrow" => Ok(Layout::Narrow),
            "wide" => Ok(Layout::Wide),
            _ => Err(TypeError::InvalidLayout(s.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Narrow => write!(f, "narrow"),
            Layout::Wide => write!(f, "wide"),
        }
    }
}

/// How a link should be followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkType {
    /// Regular navigation: push new content, reuse what is already open.
    #[default]
    Navigate,
    /// Always push, even when the target already exists in the stack.
    Push,
    /// Move "up" in a flow: dismiss back to the target when it is already
    /// underneath, replace the top route otherwise.
    Up,
}
