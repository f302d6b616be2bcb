//! Styling services offered from the hub screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    ClothingCare,
    WeatherRecommendations,
    TrendingLooks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylingService {
    pub id: ServiceId,
    pub name: &'static str,
    pub description: &'static str,
    /// Only available services can be opened.
    pub available: bool,
}

const CATALOG: &[StylingService] = &[
    StylingService {
        id: ServiceId::ClothingCare,
        name: "Clothing Care Assistant",
        description: "Get personalized tips from our Chat Bot regarding the care of any of your clothing items.",
        available: true,
    },
    StylingService {
        id: ServiceId::WeatherRecommendations,
        name: "Weather Based Recommendations",
        description: "Dress perfectly for the weather everyday with our tailored outfit suggestions based on your wardrobe.",
        available: false,
    },
    StylingService {
        id: ServiceId::TrendingLooks,
        name: "Trending Looks Today",
        description: "Stay stylish with the latest trending outfits curated just for you.",
        available: false,
    },
];

/// All services, in hub display order.
pub fn catalog() -> &'static [StylingService] {
    CATALOG
}

impl ServiceId {
    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        CATALOG
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.id)
    }

    pub fn service(self) -> &'static StylingService {
        CATALOG
            .iter()
            .find(|s| s.id == self)
            .unwrap_or(&CATALOG[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_clothing_care_is_available() {
        let available: Vec<ServiceId> = catalog()
            .iter()
            .filter(|s| s.available)
            .map(|s| s.id)
            .collect();
        assert_eq!(available, vec![ServiceId::ClothingCare]);
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(
            ServiceId::from_name("CLOTHING CARE ASSISTANT"),
            Some(ServiceId::ClothingCare)
        );
        assert_eq!(
            ServiceId::from_name(" trending looks today "),
            Some(ServiceId::TrendingLooks)
        );
        assert_eq!(ServiceId::from_name("Laundry"), None);
    }

    #[test]
    fn test_service_lookup_matches_id() {
        for service in catalog() {
            assert_eq!(service.id.service().name, service.name);
        }
    }
}
