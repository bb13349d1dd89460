//! # Session Commands
//!
//! Sign-in, registration, sign-out and session restore.
//!
//! ```text
//! ┌──────────┐  login / register  ┌──────────┐
//! │  Login   │ ─────────────────► │   Home   │
//! │ Register │ ◄───────────────── │  (nav)   │
//! └──────────┘       logout       └──────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use ecofinds_core::{Marketplace, Screen, SessionState};

use crate::error::ApiError;
use crate::state::{log_restore, MarketState, SessionStore};

/// What the frontend needs to pick a screen after a session change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: SessionState,
    pub screen: Screen,
    pub show_navigation: bool,
    /// Distinct products in the cart (the nav badge).
    pub cart_count: usize,
}

impl From<&Marketplace<SessionStore>> for SessionResponse {
    fn from(market: &Marketplace<SessionStore>) -> Self {
        SessionResponse {
            session: market.session_state().clone(),
            screen: market.navigator().current(),
            show_navigation: market.show_navigation(),
            cart_count: market.cart_count(),
        }
    }
}

/// Re-reads the persisted session, e.g. on app start.
pub fn restore(market: &MarketState) -> Result<SessionResponse, ApiError> {
    debug!("restore command");
    market.with_market_mut(|m| -> Result<SessionResponse, ApiError> {
        log_restore(&m.restore()?);
        Ok(SessionResponse::from(&*m))
    })
}

/// Signs in with any non-empty email and password.
pub fn login(
    market: &MarketState,
    email: &str,
    password: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %email, "login command");
    market.with_market_mut(|m| -> Result<SessionResponse, ApiError> {
        let user = m.login(email, password)?;
        info!(user_id = %user.id, username = %user.username, "User signed in");
        Ok(SessionResponse::from(&*m))
    })
}

pub fn register(
    market: &MarketState,
    username: &str,
    email: &str,
    password: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(username = %username, email = %email, "register command");
    market.with_market_mut(|m| -> Result<SessionResponse, ApiError> {
        let user = m.register(username, email, password)?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(SessionResponse::from(&*m))
    })
}

/// Signs out and clears the cart.
pub fn logout(market: &MarketState) -> Result<SessionResponse, ApiError> {
    debug!("logout command");
    market.with_market_mut(|m| -> Result<SessionResponse, ApiError> {
        m.logout()?;
        info!("User signed out");
        Ok(SessionResponse::from(&*m))
    })
}

pub fn get_session(market: &MarketState) -> SessionResponse {
    debug!("get_session command");
    market.with_market(|m| SessionResponse::from(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use ecofinds_core::{KeyValueStore, MemoryStore, SESSION_KEY};

    fn market_with(store: MemoryStore) -> MarketState {
        MarketState::open(&ConfigState::default(), Box::new(store)).unwrap()
    }

    #[test]
    fn test_login_then_logout() {
        let market = market_with(MemoryStore::new());

        let signed_in = login(&market, "demo@ecofinds.com", "pw").unwrap();
        assert_eq!(signed_in.screen, Screen::Home);
        assert!(signed_in.show_navigation);
        assert_eq!(signed_in.session.user().unwrap().username, "demo");

        let signed_out = logout(&market).unwrap();
        assert_eq!(signed_out.session, SessionState::Anonymous);
        assert_eq!(signed_out.screen, Screen::Login);
        assert!(!signed_out.show_navigation);
    }

    #[test]
    fn test_login_validation_error() {
        let market = market_with(MemoryStore::new());
        let err = login(&market, "", "pw").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[test]
    fn test_restore_existing_session() {
        let mut store = MemoryStore::new();
        store
            .set(SESSION_KEY, r#"{"id":"u1","username":"demo","email":"demo@x.com"}"#)
            .unwrap();
        let market = market_with(store);

        let session = restore(&market).unwrap();
        assert_eq!(session.session.user().unwrap().id, "u1");
        assert_eq!(session.screen, Screen::Home);
        assert_eq!(get_session(&market).cart_count, 0);
    }

    #[test]
    fn test_restore_with_corrupt_record() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, r#"{"id":"u1""#).unwrap();
        let market = market_with(store);

        let session = restore(&market).unwrap();
        assert_eq!(session.session, SessionState::Anonymous);
        assert_eq!(session.screen, Screen::Login);
    }

    #[test]
    fn test_register() {
        let market = market_with(MemoryStore::new());
        let session = register(&market, "green", "g@x.com", "pw").unwrap();
        assert_eq!(session.session.user().unwrap().username, "green");
    }
}
