//! # Profile Commands
//!
//! Editing the signed-in user's username and email.

use tracing::{debug, info};

use crate::commands::auth::SessionResponse;
use crate::error::ApiError;
use crate::state::MarketState;

/// Saves the profile form.
///
/// ## User Workflow
/// ```text
/// Profile screen ──► [Edit] ──► update_profile() ← THIS FUNCTION
///                                    │
///                                    ├── blank username or email → VALIDATION_ERROR
///                                    │
///                                    └── OK → persisted, same user id
/// ```
pub fn update_profile(
    market: &MarketState,
    username: &str,
    email: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(username = %username, email = %email, "update_profile command");
    market.with_market_mut(|m| -> Result<SessionResponse, ApiError> {
        let user = m.update_profile(username, email)?;
        info!(user_id = %user.id, username = %user.username, "Profile updated");
        Ok(SessionResponse::from(&*m))
    })
}
