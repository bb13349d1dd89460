//! # Commands Module
//!
//! All commands exposed to the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── auth.rs        ◄─── Login, register, logout, restore
//! ├── profile.rs     ◄─── Profile edits
//! ├── navigation.rs  ◄─── Screen changes, product detail
//! ├── product.rs     ◄─── Browse, add, delete, my listings
//! ├── cart.rs        ◄─── Cart manipulation and checkout
//! ├── purchases.rs   ◄─── Purchase history by month
//! ├── lifecycle.rs   ◄─── QR lifecycle tracker
//! ├── config.rs      ◄─── Configuration and currency toggle
//! └── media.rs       ◄─── Image files for new listings
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  {"cmd":"add_to_cart","args":{"productId":"3"}}                         │
//! │         │                                                               │
//! │         │ (one JSON object per line on stdin)                           │
//! │         ▼                                                               │
//! │  ipc::dispatch                                                          │
//! │  ─────────────                                                          │
//! │  Invocation::AddToCart { product_id }                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &state.market,           ◄── Only the state it needs              │
//! │      &product_id,             ◄── From args                            │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":{"entries":[...],"totals":{...}}}                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cart;
pub mod config;
pub mod lifecycle;
pub mod media;
pub mod navigation;
pub mod product;
pub mod profile;
pub mod purchases;
