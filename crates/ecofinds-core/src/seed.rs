//! # Demo Catalog
//!
//! The ten listings a fresh install starts with. None of them belong to the
//! mock user, so every one of them can be bought.

use chrono::{DateTime, TimeZone, Utc};

use crate::catalog::CatalogStore;
use crate::money::Money;
use crate::types::{Category, Product};

const IMAGE_BASE: &str = "https://images.unsplash.com";

struct SeedListing {
    id: &'static str,
    title: &'static str,
    category: Category,
    description: &'static str,
    dollars: i64,
    seller_id: &'static str,
    photo: &'static str,
    listed: (i32, u32, u32),
}

const LISTINGS: [SeedListing; 10] = [
    SeedListing {
        id: "1",
        title: "Vintage Denim Jacket",
        category: Category::Clothing,
        description: "Classic vintage denim jacket in excellent condition. Perfect for sustainable fashion lovers. Timeless style with authentic wear.",
        dollars: 45,
        seller_id: "user2",
        photo: "photo-1556041068-5874261f23e5",
        listed: (2024, 1, 15),
    },
    SeedListing {
        id: "2",
        title: "Wooden Coffee Table",
        category: Category::Furniture,
        description: "Handcrafted wooden coffee table with natural grain patterns. Some wear but very sturdy. Perfect centerpiece for any living room.",
        dollars: 120,
        seller_id: "user3",
        photo: "photo-1754999809963-79a41e8fb648",
        listed: (2024, 1, 20),
    },
    SeedListing {
        id: "3",
        title: "iPhone 12 Pro",
        category: Category::Electronics,
        description: "iPhone 12 Pro in excellent condition. Battery health 85%. Includes original charger and protective case. No scratches on screen.",
        dollars: 599,
        seller_id: "user4",
        photo: "photo-1674105644415-ceeee2f8eff3",
        listed: (2024, 2, 1),
    },
    SeedListing {
        id: "4",
        title: "Leather Work Boots",
        category: Category::Clothing,
        description: "Genuine leather work boots with excellent durability. Well-maintained with plenty of life left. Perfect for outdoor work or fashion.",
        dollars: 85,
        seller_id: "user5",
        photo: "photo-1482627663883-327aa8c0cefe",
        listed: (2024, 2, 3),
    },
    SeedListing {
        id: "5",
        title: "Collection of Classic Books",
        category: Category::Books,
        description: "Curated collection of classic literature books in good condition. Perfect for book lovers and collectors. Mix of genres included.",
        dollars: 25,
        seller_id: "user6",
        photo: "photo-1684859634430-3fb8d390e119",
        listed: (2024, 2, 5),
    },
    SeedListing {
        id: "6",
        title: "Urban Commuter Bicycle",
        category: Category::Sports,
        description: "Reliable urban bicycle perfect for daily commuting. Well-maintained with new tires. Includes bike lock and lights.",
        dollars: 220,
        seller_id: "user7",
        photo: "photo-1642158097299-ecf5a136247e",
        listed: (2024, 2, 8),
    },
    SeedListing {
        id: "7",
        title: "Succulent Plant Collection",
        category: Category::HomeAndGarden,
        description: "Beautiful collection of healthy succulent plants in decorative pots. Easy to care for and perfect for home decoration.",
        dollars: 15,
        seller_id: "user8",
        photo: "photo-1591661287055-96c54cb2e4f2",
        listed: (2024, 2, 10),
    },
    SeedListing {
        id: "8",
        title: "Hiking Backpack",
        category: Category::Sports,
        description: "High-quality hiking backpack with multiple compartments. Lightly used on a few weekend trips. Great for outdoor adventures.",
        dollars: 75,
        seller_id: "user9",
        photo: "photo-1729543983267-4b8b621191a3",
        listed: (2024, 2, 12),
    },
    SeedListing {
        id: "9",
        title: "Vintage Ceramic Mug Set",
        category: Category::HomeAndGarden,
        description: "Set of 4 vintage ceramic mugs with beautiful glaze patterns. Perfect for your morning coffee or tea routine. No chips or cracks.",
        dollars: 18,
        seller_id: "user10",
        photo: "photo-1689402059898-d097d15eeb98",
        listed: (2024, 2, 14),
    },
    SeedListing {
        id: "10",
        title: "Designer Sunglasses",
        category: Category::Clothing,
        description: "Stylish designer sunglasses in excellent condition. UV protection included. Comes with original case and cleaning cloth.",
        dollars: 65,
        seller_id: "user11",
        photo: "photo-1523754865311-b886113bb8de",
        listed: (2024, 2, 16),
    },
];

fn listed_on((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The demo listings in catalog order.
pub fn demo_products() -> Vec<Product> {
    LISTINGS
        .iter()
        .map(|l| Product {
            id: l.id.to_string(),
            title: l.title.to_string(),
            category: l.category,
            description: l.description.to_string(),
            price: Money::from_dollars(l.dollars),
            seller_id: l.seller_id.to_string(),
            image_url: Some(format!("{}/{}?fit=max&w=1080", IMAGE_BASE, l.photo)),
            created_at: listed_on(l.listed),
        })
        .collect()
}

/// A catalog holding the demo listings.
pub fn demo_catalog() -> CatalogStore {
    CatalogStore::with_products(demo_products())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MockVerifier;
    use std::collections::HashSet;

    #[test]
    fn test_demo_catalog_shape() {
        let products = demo_products();
        assert_eq!(products.len(), 10);
        assert_eq!(products[0].title, "Vintage Denim Jacket");
        assert_eq!(products[0].price.cents(), 4500);
        assert_eq!(products[9].title, "Designer Sunglasses");

        let ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_demo_dates_are_real() {
        let products = demo_products();
        assert_eq!(products[0].created_at.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert_eq!(products[9].created_at.to_rfc3339(), "2024-02-16T00:00:00+00:00");
    }

    #[test]
    fn test_mock_user_owns_nothing() {
        let catalog = demo_catalog();
        assert!(catalog.list_by_owner(MockVerifier::USER_ID).is_empty());
    }
}
