//! # IPC Dispatcher
//!
//! The frontend talks to the shell with one JSON object per line.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request / Reply                                      │
//! │                                                                         │
//! │  stdin   {"cmd":"login","args":{"email":"demo@ecofinds.com",            │
//! │                                "password":"pw"}}                        │
//! │             │                                                           │
//! │             ▼                                                           │
//! │          Invocation::Login { email, password }                          │
//! │             │                                                           │
//! │             ▼                                                           │
//! │          commands::auth::login(&state.market, ..)                       │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  stdout  {"ok":{"session":{...},"screen":"home",...}}                   │
//! │     or   {"error":{"code":"VALIDATION_ERROR","message":"..."}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands without arguments may omit `args`; every other command needs it,
//! even when all of its fields are optional (`"args":{}`).
//! Replies come back in request order.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

use ecofinds_core::{CatalogQuery, Currency, GroupingBasis, ProductForm, Screen};

use crate::commands;
use crate::error::ApiError;
use crate::state::AppState;

/// Every request the frontend can send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "cmd",
    content = "args",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Invocation {
    // Session
    Restore,
    Login {
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    GetSession,
    UpdateProfile {
        username: String,
        email: String,
    },

    // Navigation
    Navigate {
        screen: Screen,
    },
    OpenProduct {
        product_id: String,
    },

    // Catalog
    QueryProducts {
        #[serde(default)]
        query: CatalogQuery,
    },
    AddProduct {
        form: ProductForm,
    },
    DeleteProduct {
        product_id: String,
    },
    MyListings,

    // Cart
    GetCart,
    AddToCart {
        product_id: String,
    },
    RemoveFromCart {
        product_id: String,
    },
    Checkout,

    // Purchases
    Purchases {
        #[serde(default)]
        basis: GroupingBasis,
    },

    // Lifecycle
    ProductJourney {
        product_id: String,
    },

    // Display
    FormatPrice {
        cents: i64,
    },
    SetCurrency {
        currency: Currency,
    },
    GetConfig,

    // Media
    LoadImage {
        path: PathBuf,
    },
}

/// One line written back to the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    Ok(Value),
    Error(ApiError),
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => Reply::Ok(value),
            Err(err) => Reply::Error(err),
        }
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Could not serialize reply: {}", e);
        ApiError::internal("Could not serialize reply")
    })
}

/// Runs one invocation against the app state.
pub async fn dispatch(state: &AppState, invocation: Invocation) -> Result<Value, ApiError> {
    let market = &state.market;

    match invocation {
        Invocation::Restore => to_value(commands::auth::restore(market)?),
        Invocation::Login { email, password } => {
            to_value(commands::auth::login(market, &email, &password)?)
        }
        Invocation::Register {
            username,
            email,
            password,
        } => to_value(commands::auth::register(market, &username, &email, &password)?),
        Invocation::Logout => to_value(commands::auth::logout(market)?),
        Invocation::GetSession => to_value(commands::auth::get_session(market)),
        Invocation::UpdateProfile { username, email } => {
            to_value(commands::profile::update_profile(market, &username, &email)?)
        }

        Invocation::Navigate { screen } => to_value(commands::navigation::navigate(market, screen)),
        Invocation::OpenProduct { product_id } => {
            to_value(commands::navigation::open_product(market, &product_id)?)
        }

        Invocation::QueryProducts { query } => {
            to_value(commands::product::query_products(market, &query)?)
        }
        Invocation::AddProduct { form } => to_value(commands::product::add_product(market, form)?),
        Invocation::DeleteProduct { product_id } => {
            to_value(commands::product::delete_product(market, &product_id)?)
        }
        Invocation::MyListings => to_value(commands::product::my_listings(market)?),

        Invocation::GetCart => to_value(commands::cart::get_cart(market)?),
        Invocation::AddToCart { product_id } => {
            to_value(commands::cart::add_to_cart(market, &product_id)?)
        }
        Invocation::RemoveFromCart { product_id } => {
            to_value(commands::cart::remove_from_cart(market, &product_id)?)
        }
        Invocation::Checkout => to_value(commands::cart::checkout(market)?),

        Invocation::Purchases { basis } => {
            to_value(commands::purchases::purchases(market, basis)?)
        }

        Invocation::ProductJourney { product_id } => {
            to_value(commands::lifecycle::product_journey(market, &product_id)?)
        }

        Invocation::FormatPrice { cents } => to_value(commands::config::format_price(market, cents)),
        Invocation::SetCurrency { currency } => {
            to_value(commands::config::set_currency(market, currency))
        }
        Invocation::GetConfig => to_value(commands::config::get_config(&state.config, market)),

        Invocation::LoadImage { path } => to_value(commands::media::load_image(&path).await?),
    }
}

/// Parses and runs one request line, returning the serialized reply.
pub async fn handle_line(state: &AppState, line: &str) -> String {
    let reply = match serde_json::from_str::<Invocation>(line) {
        Ok(invocation) => {
            debug!(?invocation, "Dispatching");
            Reply::from(dispatch(state, invocation).await)
        }
        Err(e) => {
            warn!("Malformed request: {}", e);
            Reply::Error(ApiError::validation(format!("Malformed request: {}", e)))
        }
    };

    serde_json::to_string(&reply).unwrap_or_else(|e| {
        error!("Could not serialize reply: {}", e);
        r#"{"error":{"code":"INTERNAL","message":"Could not serialize reply"}}"#.to_string()
    })
}

/// Answers requests from `reader` on `writer` until the reader is closed.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = handle_line(state, line).await;
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    debug!("Input closed");
    Ok(())
}
