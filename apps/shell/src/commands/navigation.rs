//! # Navigation Commands
//!
//! Screen changes requested by the navigation bar and product cards.

use serde::Serialize;
use tracing::debug;

use ecofinds_core::Screen;

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::MarketState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    /// Screen actually shown (signed-out users land on login).
    pub screen: Screen,
    pub selected_product: Option<String>,
    pub show_navigation: bool,
}

/// Product detail screen payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: ProductDto,
    /// Hides "Add to Cart" on the user's own listing.
    pub is_own_product: bool,
    pub navigation: NavigationResponse,
}

pub fn navigate(market: &MarketState, screen: Screen) -> NavigationResponse {
    debug!(screen = ?screen, "navigate command");
    market.with_market_mut(|m| {
        let shown = m.navigate(screen);
        NavigationResponse {
            screen: shown,
            selected_product: m.navigator().selected_product().map(str::to_string),
            show_navigation: m.show_navigation(),
        }
    })
}

/// Opens a listing's detail screen.
pub fn open_product(market: &MarketState, product_id: &str) -> Result<ProductDetailResponse, ApiError> {
    debug!(product_id = %product_id, "open_product command");
    market.with_market_mut(|m| -> Result<ProductDetailResponse, ApiError> {
        let formatter = m.formatter();
        let product = ProductDto::new(m.open_product(product_id)?, &formatter);
        let is_own_product = m.is_own_product(product_id)?;

        Ok(ProductDetailResponse {
            product,
            is_own_product,
            navigation: NavigationResponse {
                screen: m.navigator().current(),
                selected_product: m.navigator().selected_product().map(str::to_string),
                show_navigation: m.show_navigation(),
            },
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::auth;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use ecofinds_core::MemoryStore;

    fn market() -> MarketState {
        MarketState::open(&ConfigState::default(), Box::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_signed_out_navigation_lands_on_login() {
        let market = market();
        let response = navigate(&market, Screen::Purchases);
        assert_eq!(response.screen, Screen::Login);
        assert!(!response.show_navigation);

        assert_eq!(navigate(&market, Screen::Register).screen, Screen::Register);
    }

    #[test]
    fn test_open_product() {
        let market = market();
        assert_eq!(
            open_product(&market, "3").unwrap_err().code,
            ErrorCode::NotAuthenticated
        );

        auth::login(&market, "demo@ecofinds.com", "pw").unwrap();
        let detail = open_product(&market, "3").unwrap();
        assert_eq!(detail.product.product.title, "iPhone 12 Pro");
        assert_eq!(detail.product.formatted_price, "$599.00");
        assert!(!detail.is_own_product);
        assert_eq!(detail.navigation.screen, Screen::ProductDetail);
        assert_eq!(detail.navigation.selected_product.as_deref(), Some("3"));
    }

    #[test]
    fn test_open_missing_product() {
        let market = market();
        auth::login(&market, "demo@ecofinds.com", "pw").unwrap();
        assert_eq!(open_product(&market, "404").unwrap_err().code, ErrorCode::NotFound);
    }
}
