//! core::screens
//!
//! Identifiers of every navigator and screen in the Kiroku app.
//!
//! Navigator names appear as root-level (or nested) routes that own a child
//! state; screen names are leaves. Names are plain `&'static str` so they can
//! be compared against [`ScreenName`](super::types::ScreenName) directly.

/// Navigator identifiers.
pub mod navigators {
    pub const BOTTOM_TAB: &str = "BottomTabNavigator";
    pub const LEFT_MODAL: &str = "LeftModalNavigator";
    pub const RIGHT_MODAL: &str = "RightModalNavigator";
    pub const TZ_FIX_MODAL: &str = "TzFixModalNavigator";
}

/// Screen identifiers, grouped by the flow they belong to.
pub mod screens {
    pub const FORCE_UPDATE: &str = "ForceUpdate";
    pub const LOG_IN: &str = "LogIn";
    pub const SIGN_UP: &str = "SignUp";
    pub const NOT_FOUND: &str = "NotFound";

    // Bottom tab
    pub const HOME: &str = "Home";
    pub const STATISTICS_TAB: &str = "Statistics_Tab";

    // Central panes
    pub const HOME_OVERVIEW: &str = "Home_Overview";
    pub const STATISTICS_OVERVIEW: &str = "Statistics_Overview";
    pub const STATISTICS_PERIOD: &str = "Statistics_Period";

    /// Flows hosted by the left modal navigator.
    pub mod left_modal {
        pub const SEARCH: &str = "LeftModal_Search";
    }

    /// Flows hosted by the right modal navigator.
    pub mod right_modal {
        pub const SETTINGS: &str = "RightModal_Settings";
        pub const DAY_OVERVIEW: &str = "RightModal_DayOverview";
        pub const DRINKING_SESSION: &str = "RightModal_DrinkingSession";
        pub const PROFILE: &str = "RightModal_Profile";
        pub const SOCIAL: &str = "RightModal_Social";
        pub const ACHIEVEMENTS: &str = "RightModal_Achievements";
        pub const MAIN_MENU: &str = "RightModal_MainMenu";
    }

    pub mod search {
        pub const ROOT: &str = "Search_Root";
    }

    pub mod settings {
        pub const ROOT: &str = "Settings_Root";
        pub const ACCOUNT: &str = "Settings_Account";
        pub const PREFERENCES: &str = "Settings_Preferences";
        pub const LANGUAGE: &str = "Settings_Language";
        pub const ABOUT: &str = "Settings_About";
        pub const TIMEZONE: &str = "Settings_Timezone";
    }

    pub mod day_overview {
        pub const ROOT: &str = "DayOverview_Root";
    }

    pub mod drinking_session {
        pub const ROOT: &str = "DrinkingSession_Root";
        pub const LIVE: &str = "DrinkingSession_Live";
        pub const EDIT: &str = "DrinkingSession_Edit";
        pub const SUMMARY: &str = "DrinkingSession_Summary";
    }

    pub mod profile {
        pub const ROOT: &str = "Profile_Root";
        pub const FRIENDS_FRIENDS: &str = "Profile_FriendsFriends";
    }

    pub mod social {
        pub const ROOT: &str = "Social_Root";
        pub const FRIEND_LIST: &str = "Social_FriendList";
        pub const FRIEND_REQUESTS: &str = "Social_FriendRequests";
        pub const FRIEND_SEARCH: &str = "Social_FriendSearch";
    }

    pub mod achievements {
        pub const ROOT: &str = "Achievements_Root";
    }

    pub mod main_menu {
        pub const ROOT: &str = "MainMenu_Root";
        pub const PREFERENCES: &str = "MainMenu_Preferences";
    }

    pub mod tz_fix {
        pub const INTRODUCTION: &str = "TzFix_Introduction";
        pub const DETECTION: &str = "TzFix_Detection";
        pub const CONFIRMATION: &str = "TzFix_Confirmation";
        pub const SELECTION: &str = "TzFix_Selection";
        pub const SUCCESS: &str = "TzFix_Success";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScreenName;

    #[test]
    fn constants_are_valid_screen_names() {
        let all = [
            navigators::BOTTOM_TAB,
            navigators::LEFT_MODAL,
            navigators::RIGHT_MODAL,
            navigators::TZ_FIX_MODAL,
            screens::FORCE_UPDATE,
            screens::LOG_IN,
            screens::SIGN_UP,
            screens::NOT_FOUND,
            screens::HOME,
            screens::STATISTICS_TAB,
            screens::HOME_OVERVIEW,
            screens::STATISTICS_OVERVIEW,
            screens::STATISTICS_PERIOD,
            screens::left_modal::SEARCH,
            screens::right_modal::SETTINGS,
            screens::right_modal::DAY_OVERVIEW,
            screens::right_modal::DRINKING_SESSION,
            screens::right_modal::PROFILE,
            screens::right_modal::SOCIAL,
            screens::right_modal::ACHIEVEMENTS,
            screens::right_modal::MAIN_MENU,
            screens::search::ROOT,
            screens::settings::ROOT,
            screens::settings::ACCOUNT,
            screens::settings::PREFERENCES,
            screens::settings::LANGUAGE,
            screens::settings::ABOUT,
            screens::settings::TIMEZONE,
            screens::day_overview::ROOT,
            screens::drinking_session::ROOT,
            screens::drinking_session::LIVE,
            screens::drinking_session::EDIT,
            screens::drinking_session::SUMMARY,
            screens::profile::ROOT,
            screens::profile::FRIENDS_FRIENDS,
            screens::social::ROOT,
            screens::social::FRIEND_LIST,
            screens::social::FRIEND_REQUESTS,
            screens::social::FRIEND_SEARCH,
            screens::achievements::ROOT,
            screens::main_menu::ROOT,
            screens::main_menu::PREFERENCES,
            screens::tz_fix::INTRODUCTION,
            screens::tz_fix::DETECTION,
            screens::tz_fix::CONFIRMATION,
            screens::tz_fix::SELECTION,
            screens::tz_fix::SUCCESS,
        ];

        for name in all {
            assert!(ScreenName::new(name).is_ok(), "{name} is not valid");
        }
    }
}
