//! Static per-category search configuration.

use nearby_places_models::AmenityCategory;

/// Fixed table of per-category search radii plus the report truncation
/// limit. Loaded once, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct CategoryPlan {
    /// Maximum number of ranked entries retained per category section.
    pub top_n: usize,
    /// Maximum number of provider pages fetched per proximity query.
    /// A deliberate cap trading completeness for latency and cost.
    pub page_limit: u32,
}

impl Default for CategoryPlan {
    fn default() -> Self {
        Self {
            top_n: 5,
            page_limit: 2,
        }
    }
}

impl CategoryPlan {
    /// Search radius in meters for the given category.
    #[must_use]
    pub const fn radius_for(&self, category: AmenityCategory) -> u32 {
        match category {
            AmenityCategory::Cafe => 1000,
            AmenityCategory::Park => 1500,
            AmenityCategory::Gym | AmenityCategory::Pharmacy | AmenityCategory::SubwayStation => {
                2000
            }
            AmenityCategory::Hospital | AmenityCategory::ShoppingMall => 5000,
            AmenityCategory::School => 8000,
        }
    }

    /// Whether this category additionally tracks the single closest
    /// place.
    #[must_use]
    pub const fn has_nearest(&self, category: AmenityCategory) -> bool {
        matches!(
            category,
            AmenityCategory::Hospital | AmenityCategory::SubwayStation
        )
    }
}
