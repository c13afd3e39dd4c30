//! Presentation hints keyed by subcategory.
//!
//! Every known subcategory gets an explicit arm; `Other` falls through to the
//! neutral default so a new grouping renders instead of disappearing.

use crate::catalog::identity::SubCategory;
use serde::Serialize;

pub const DEFAULT_SERVICE_IMAGE: &str = "/images/services/default-service.jpg";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryIcon {
    Globe,
    Target,
    BarChart,
    Shield,
    Star,
    Layers,
    Zap,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SubCategoryStyle {
    pub label: &'static str,
    pub icon: CategoryIcon,
    pub badge_class: &'static str,
    pub illustration: &'static str,
}

const DEFAULT_STYLE: SubCategoryStyle = SubCategoryStyle {
    label: "Autres",
    icon: CategoryIcon::BarChart,
    badge_class: "bg-gray-100 text-gray-800",
    illustration: DEFAULT_SERVICE_IMAGE,
};

impl SubCategory {
    pub fn style(&self) -> SubCategoryStyle {
        match self {
            SubCategory::Visibilite => SubCategoryStyle {
                label: "Visibilité",
                icon: CategoryIcon::Globe,
                badge_class: "bg-blue-100 text-blue-800",
                illustration: "/images/services/seo-visibility.jpg",
            },
            SubCategory::Conversion => SubCategoryStyle {
                label: "Conversion",
                icon: CategoryIcon::Target,
                badge_class: "bg-green-100 text-green-800",
                illustration: "/images/services/conversion-optimization.jpg",
            },
            SubCategory::Vente => SubCategoryStyle {
                label: "Vente",
                icon: CategoryIcon::BarChart,
                badge_class: "bg-purple-100 text-purple-800",
                illustration: "/images/services/ecommerce-sales.jpg",
            },
            SubCategory::Optimisation => SubCategoryStyle {
                label: "Optimisation",
                icon: CategoryIcon::Shield,
                badge_class: "bg-orange-100 text-orange-800",
                illustration: "/images/services/performance-optimization.jpg",
            },
            SubCategory::Growth => SubCategoryStyle {
                label: "Croissance",
                icon: CategoryIcon::Star,
                badge_class: "bg-pink-100 text-pink-800",
                illustration: "/images/services/business-growth.jpg",
            },
            SubCategory::Plateforme => SubCategoryStyle {
                label: "Plateformes",
                icon: CategoryIcon::Layers,
                badge_class: "bg-indigo-100 text-indigo-800",
                illustration: "/images/services/platform-development.jpg",
            },
            SubCategory::Innovation => SubCategoryStyle {
                label: "Innovation",
                icon: CategoryIcon::Zap,
                badge_class: "bg-red-100 text-red-800",
                illustration: "/images/services/innovation-tech.jpg",
            },
            SubCategory::Other(_) => DEFAULT_STYLE,
        }
    }
}
