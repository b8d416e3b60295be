//! Registry of the REST resources the admin panel lists.

use crate::shared::list_page::ListPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Categories,
    Subcategories,
    Brands,
    Breeds,
    Collections,
    Products,
    Banners,
    Sliders,
    Coupons,
    Campaigns,
    Newsletter,
    Orders,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Categories,
        ResourceKind::Subcategories,
        ResourceKind::Brands,
        ResourceKind::Breeds,
        ResourceKind::Collections,
        ResourceKind::Products,
        ResourceKind::Banners,
        ResourceKind::Sliders,
        ResourceKind::Coupons,
        ResourceKind::Campaigns,
        ResourceKind::Newsletter,
        ResourceKind::Orders,
        ResourceKind::Users,
    ];

    /// Collection endpoint, relative to the API base url.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Categories => "api/category",
            ResourceKind::Subcategories => "api/subcategory",
            ResourceKind::Brands => "api/brand",
            ResourceKind::Breeds => "api/breed",
            ResourceKind::Collections => "api/collection",
            ResourceKind::Products => "api/products",
            ResourceKind::Banners => "api/banner",
            ResourceKind::Sliders => "api/slider",
            ResourceKind::Coupons => "api/coupon",
            ResourceKind::Campaigns => "api/campaign",
            ResourceKind::Newsletter => "api/newsletter",
            ResourceKind::Orders => "api/orders",
            ResourceKind::Users => "api/users",
        }
    }

    /// Endpoint of a single record, e.g. `api/users/64f0...`. The id is
    /// percent-encoded as one path segment.
    pub fn item_endpoint(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint(), urlencoding::encode(id))
    }

    /// Where the backend nests rows for this resource.
    pub fn list_path(&self) -> ListPath {
        match self {
            ResourceKind::Categories => ListPath::new("/data/category", Some("/data/total")),
            ResourceKind::Subcategories => ListPath::new("/data", Some("/total")),
            ResourceKind::Brands | ResourceKind::Breeds | ResourceKind::Collections => {
                ListPath::new("/data", Some("/total"))
            }
            ResourceKind::Products | ResourceKind::Orders | ResourceKind::Users => {
                ListPath::new("/data/data", Some("/data/total"))
            }
            ResourceKind::Banners | ResourceKind::Sliders => ListPath::new("/data", None),
            ResourceKind::Coupons | ResourceKind::Campaigns => {
                ListPath::new("/data", Some("/pagination/total"))
            }
            ResourceKind::Newsletter => ListPath::new("/data/subscribers", Some("/data/total")),
        }
    }

    /// Whether the endpoint accepts `sortBy`/`order` query parameters.
    ///
    /// Orders are sorted locally within the loaded page.
    pub fn sorts_on_server(&self) -> bool {
        !matches!(
            self,
            ResourceKind::Orders | ResourceKind::Banners | ResourceKind::Sliders
        )
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKind::Categories => "categories",
            ResourceKind::Subcategories => "subcategories",
            ResourceKind::Brands => "brands",
            ResourceKind::Breeds => "breeds",
            ResourceKind::Collections => "collections",
            ResourceKind::Products => "products",
            ResourceKind::Banners => "banners",
            ResourceKind::Sliders => "sliders",
            ResourceKind::Coupons => "coupons",
            ResourceKind::Campaigns => "campaigns",
            ResourceKind::Newsletter => "newsletter",
            ResourceKind::Orders => "orders",
            ResourceKind::Users => "users",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Categories => "Categories",
            ResourceKind::Subcategories => "Subcategories",
            ResourceKind::Brands => "Brands",
            ResourceKind::Breeds => "Breeds",
            ResourceKind::Collections => "Collections",
            ResourceKind::Products => "Products",
            ResourceKind::Banners => "Banners",
            ResourceKind::Sliders => "Sliders",
            ResourceKind::Coupons => "Coupons",
            ResourceKind::Campaigns => "Campaigns",
            ResourceKind::Newsletter => "Newsletter",
            ResourceKind::Orders => "Orders",
            ResourceKind::Users => "Customers",
        }
    }

    /// Sidebar group the resource is listed under.
    pub fn group(&self) -> &'static str {
        match self {
            ResourceKind::Categories
            | ResourceKind::Subcategories
            | ResourceKind::Brands
            | ResourceKind::Breeds
            | ResourceKind::Collections
            | ResourceKind::Products => "Catalog",
            ResourceKind::Banners | ResourceKind::Sliders => "Merchandising",
            ResourceKind::Coupons | ResourceKind::Campaigns | ResourceKind::Newsletter => {
                "Marketing"
            }
            ResourceKind::Orders | ResourceKind::Users => "Sales",
        }
    }

    /// Orders are read-only in the panel.
    pub fn allows_delete(&self) -> bool {
        !matches!(self, ResourceKind::Orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for kind in ResourceKind::ALL {
            assert!(seen.insert(kind.slug()));
            assert_eq!(ResourceKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ResourceKind::from_slug("pets"), None);
    }

    #[test]
    fn test_item_endpoint() {
        assert_eq!(ResourceKind::Users.item_endpoint("42"), "api/users/42");
        assert_eq!(ResourceKind::Brands.item_endpoint("a/b c"), "api/brand/a%2Fb%20c");
        assert_eq!(ResourceKind::Categories.endpoint(), "api/category");
    }

    #[test]
    fn test_orders_sort_locally() {
        assert!(!ResourceKind::Orders.sorts_on_server());
        assert!(ResourceKind::Products.sorts_on_server());
        assert!(!ResourceKind::Orders.allows_delete());
    }
}
