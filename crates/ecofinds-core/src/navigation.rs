//! # Navigation
//!
//! Which screen is showing, as a pure state transition.
//!
//! ```text
//!            ┌──────────┐  login / register   ┌──────┐
//!            │  login   │ ──────────────────► │ home │ ◄── any screen
//!            │ register │ ◄────────────────── │      │
//!            └──────────┘       logout        └──┬───┘
//!                                                │ open_product(id)
//!   add-product ──(listed)──► my-listings         ▼
//!   cart ──(checkout)──► purchases         product-detail
//! ```
//!
//! While nobody is signed in only `login` and `register` are reachable;
//! any other target lands on `login`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Every screen of the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Home,
    AddProduct,
    MyListings,
    ProductDetail,
    Cart,
    Purchases,
    Profile,
}

impl Screen {
    /// Screens reachable without a session.
    pub const fn is_auth_screen(&self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }
}

/// Current screen plus the product the detail screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Navigator {
    current: Screen,
    selected_product: Option<String>,
}

impl Navigator {
    /// Starting screen: `home` for a restored session, `login` otherwise.
    pub fn new(authenticated: bool) -> Self {
        Navigator {
            current: if authenticated { Screen::Home } else { Screen::Login },
            selected_product: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn selected_product(&self) -> Option<&str> {
        self.selected_product.as_deref()
    }

    /// Moves to `target`, applying the auth gate.
    ///
    /// `product-detail` without a selected product falls back to `home`.
    ///
    /// ## Returns
    /// The screen actually shown.
    pub fn navigate(&mut self, target: Screen, authenticated: bool) -> Screen {
        let screen = match target {
            t if !authenticated && !t.is_auth_screen() => Screen::Login,
            Screen::ProductDetail if self.selected_product.is_none() => Screen::Home,
            t => t,
        };

        if screen != Screen::ProductDetail {
            self.selected_product = None;
        }
        self.current = screen;
        screen
    }

    /// Selects a product and shows its detail screen.
    pub fn open_product(&mut self, product_id: &str, authenticated: bool) -> Screen {
        if !authenticated {
            return self.navigate(Screen::Login, false);
        }
        self.selected_product = Some(product_id.to_string());
        self.navigate(Screen::ProductDetail, true)
    }

    /// After login or registration.
    pub fn signed_in(&mut self) -> Screen {
        self.navigate(Screen::Home, true)
    }

    pub fn signed_out(&mut self) -> Screen {
        self.navigate(Screen::Login, false)
    }

    /// After a listing was created.
    pub fn product_listed(&mut self) -> Screen {
        self.navigate(Screen::MyListings, true)
    }

    pub fn checked_out(&mut self) -> Screen {
        self.navigate(Screen::Purchases, true)
    }

    /// Clears a selection pointing at a deleted product.
    pub fn forget_product(&mut self, product_id: &str) {
        if self.selected_product.as_deref() == Some(product_id) {
            self.selected_product = None;
            if self.current == Screen::ProductDetail {
                self.current = Screen::Home;
            }
        }
    }

    /// The navigation bar is hidden on auth screens and while signed out.
    pub fn show_navigation(&self, authenticated: bool) -> bool {
        authenticated && !self.current.is_auth_screen()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_screen() {
        assert_eq!(Navigator::new(false).current(), Screen::Login);
        assert_eq!(Navigator::new(true).current(), Screen::Home);
    }

    #[test]
    fn test_anonymous_is_gated_to_auth_screens() {
        let mut nav = Navigator::new(false);
        assert_eq!(nav.navigate(Screen::Cart, false), Screen::Login);
        assert_eq!(nav.navigate(Screen::Register, false), Screen::Register);
        assert_eq!(nav.open_product("1", false), Screen::Login);
        assert_eq!(nav.selected_product(), None);
    }

    #[test]
    fn test_open_product_selects_it() {
        let mut nav = Navigator::new(true);
        assert_eq!(nav.open_product("7", true), Screen::ProductDetail);
        assert_eq!(nav.selected_product(), Some("7"));

        nav.navigate(Screen::Cart, true);
        assert_eq!(nav.selected_product(), None);
    }

    #[test]
    fn test_product_detail_needs_selection() {
        let mut nav = Navigator::new(true);
        assert_eq!(nav.navigate(Screen::ProductDetail, true), Screen::Home);
    }

    #[test]
    fn test_flow_transitions() {
        let mut nav = Navigator::new(false);
        assert_eq!(nav.signed_in(), Screen::Home);
        assert_eq!(nav.product_listed(), Screen::MyListings);
        assert_eq!(nav.checked_out(), Screen::Purchases);
        assert_eq!(nav.signed_out(), Screen::Login);
    }

    #[test]
    fn test_forget_deleted_product() {
        let mut nav = Navigator::new(true);
        nav.open_product("3", true);
        nav.forget_product("other");
        assert_eq!(nav.current(), Screen::ProductDetail);

        nav.forget_product("3");
        assert_eq!(nav.current(), Screen::Home);
        assert_eq!(nav.selected_product(), None);
    }

    #[test]
    fn test_show_navigation() {
        let mut nav = Navigator::new(true);
        assert!(nav.show_navigation(true));
        assert!(!nav.show_navigation(false));

        nav.navigate(Screen::Register, true);
        assert!(!nav.show_navigation(true));
    }

    #[test]
    fn test_screen_names() {
        assert_eq!(serde_json::to_string(&Screen::AddProduct).unwrap(), r#""add-product""#);
        let screen: Screen = serde_json::from_str(r#""my-listings""#).unwrap();
        assert_eq!(screen, Screen::MyListings);
    }
}
