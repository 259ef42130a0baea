/// Watch-provider filter resolved from the widget's platform tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFilter {
    /// Catalog watch-provider id, unset for unknown platforms
    pub provider_id: Option<u32>,
    /// Two-letter region code used for both discovery and provider filtering
    pub region: &'static str,
}

/// Platform tag -> (watch-provider id, region), iterated in declaration order
const PLATFORM_PROVIDERS: &[(&str, u32, &str)] = &[
    ("netflix", 8, "US"),
    ("prime", 9, "IN"),
    ("hotstar", 337, "IN"),
];

const DEFAULT_REGION: &str = "US";

impl ProviderFilter {
    /// Resolves a platform tag (case-insensitive) to a provider filter.
    ///
    /// Unknown or absent platforms leave the provider unset and fall back to
    /// the default region.
    pub fn resolve(platform: Option<&str>) -> Self {
        let tag = platform.unwrap_or_default().to_lowercase();
        for (name, provider_id, region) in PLATFORM_PROVIDERS {
            if tag == *name {
                return Self {
                    provider_id: Some(*provider_id),
                    region,
                };
            }
        }
        Self {
            provider_id: None,
            region: DEFAULT_REGION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_platforms() {
        let netflix = ProviderFilter::resolve(Some("netflix"));
        assert_eq!(netflix.provider_id, Some(8));
        assert_eq!(netflix.region, "US");

        let prime = ProviderFilter::resolve(Some("prime"));
        assert_eq!(prime.provider_id, Some(9));
        assert_eq!(prime.region, "IN");

        let hotstar = ProviderFilter::resolve(Some("hotstar"));
        assert_eq!(hotstar.provider_id, Some(337));
        assert_eq!(hotstar.region, "IN");
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(ProviderFilter::resolve(Some("Netflix")).provider_id, Some(8));
        assert_eq!(ProviderFilter::resolve(Some("HOTSTAR")).provider_id, Some(337));
    }

    #[test]
    fn test_unknown_or_absent_platform_defaults() {
        for platform in [None, Some("hulu"), Some("")] {
            let filter = ProviderFilter::resolve(platform);
            assert_eq!(filter.provider_id, None);
            assert_eq!(filter.region, "US");
        }
    }
}
