//! core::registry::kiroku
//!
//! The route table of the Kiroku app.

use super::{LinkingConfig, NestedConfig, RegistryError, RouteRegistry};
use crate::core::screens::{navigators, screens};

/// Nested linking config of the app, in declaration order.
pub fn linking_config() -> LinkingConfig {
    use screens::*;

    LinkingConfig::new()
        .screen(FORCE_UPDATE, "force-update")
        .screen(LOG_IN, "log-in")
        .screen(SIGN_UP, "sign-up")
        .navigator(
            navigators::BOTTOM_TAB,
            NestedConfig::new()
                .path("")
                .initial(HOME)
                .screen(HOME, "home")
                .screen(STATISTICS_TAB, "statistics"),
        )
        .screen(HOME_OVERVIEW, "home/overview")
        .screen(STATISTICS_OVERVIEW, "statistics/overview")
        .screen(STATISTICS_PERIOD, "statistics/period/:period")
        .screen(NOT_FOUND, "*")
        .navigator(
            navigators::LEFT_MODAL,
            NestedConfig::new().navigator(
                left_modal::SEARCH,
                NestedConfig::new().screen(search::ROOT, "search"),
            ),
        )
        .navigator(
            navigators::RIGHT_MODAL,
            NestedConfig::new()
                .navigator(
                    right_modal::SETTINGS,
                    NestedConfig::new()
                        .screen(settings::ROOT, "settings")
                        .screen(settings::ACCOUNT, "settings/account")
                        .screen(settings::PREFERENCES, "settings/preferences")
                        .screen(settings::LANGUAGE, "settings/preferences/language")
                        .screen(settings::ABOUT, "settings/about")
                        .screen(settings::TIMEZONE, "settings/timezone"),
                )
                .navigator(
                    right_modal::DAY_OVERVIEW,
                    NestedConfig::new().screen(day_overview::ROOT, "day/:date"),
                )
                .navigator(
                    right_modal::DRINKING_SESSION,
                    NestedConfig::new()
                        .screen(drinking_session::ROOT, "drinking-session/:sessionId")
                        .screen(drinking_session::LIVE, "drinking-session/:sessionId/live")
                        .screen(drinking_session::EDIT, "drinking-session/:sessionId/edit")
                        .screen(
                            drinking_session::SUMMARY,
                            "drinking-session/:sessionId/summary",
                        ),
                )
                .navigator(
                    right_modal::PROFILE,
                    NestedConfig::new()
                        .screen(profile::ROOT, "profile/:userID")
                        .screen(profile::FRIENDS_FRIENDS, "profile/:userID/friends"),
                )
                .navigator(
                    right_modal::SOCIAL,
                    NestedConfig::new()
                        .screen(social::ROOT, "social")
                        .screen(social::FRIEND_LIST, "social/friend-list")
                        .screen(social::FRIEND_REQUESTS, "social/friend-requests")
                        .screen(social::FRIEND_SEARCH, "social/friend-search"),
                )
                .navigator(
                    right_modal::ACHIEVEMENTS,
                    NestedConfig::new().screen(achievements::ROOT, "achievements"),
                )
                .navigator(
                    right_modal::MAIN_MENU,
                    NestedConfig::new()
                        .screen(main_menu::ROOT, "main-menu")
                        .screen(main_menu::PREFERENCES, "main-menu/preferences"),
                ),
        )
        .navigator(
            navigators::TZ_FIX_MODAL,
            NestedConfig::new()
                .screen(tz_fix::INTRODUCTION, "tz-fix/introduction")
                .screen(tz_fix::DETECTION, "tz-fix/detection")
                .screen(tz_fix::CONFIRMATION, "tz-fix/confirmation")
                .screen(tz_fix::SELECTION, "tz-fix/selection")
                .screen(tz_fix::SUCCESS, "tz-fix/success"),
        )
}

/// Flattened registry of the app.
///
/// # Errors
///
/// Only fails if the static table above is malformed, which the tests below
/// rule out.
pub fn registry() -> Result<RouteRegistry, RegistryError> {
    RouteRegistry::from_config(&linking_config())
}
