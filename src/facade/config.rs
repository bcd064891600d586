use crate::core::DEFAULT_PAGE_SIZE;
use crate::store::DEFAULT_ID_PREFIX;

/// Hub-wide configuration: id prefix, default page size and the seeding
/// sentinel key.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Prefix for store-generated record ids.
    pub id_prefix: String,

    /// Page size used by [`StoreHub::query`](super::StoreHub::query).
    pub default_page_size: u32,

    /// Backing-store key that marks seeding as done.
    pub sentinel_key: String,
}

impl HubConfig {
    pub fn new() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            sentinel_key: "flatstore.seeded".to_string(),
        }
    }

    /// Set the record id prefix
    pub fn id_prefix(mut self, prefix: &str) -> Self {
        self.id_prefix = prefix.to_string();
        self
    }

    /// Set the default page size
    pub fn default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Set the seeding sentinel key
    pub fn sentinel_key(mut self, key: &str) -> Self {
        self.sentinel_key = key.to_string();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.id_prefix.is_empty() {
            return Err("id_prefix cannot be empty".to_string());
        }

        if self.default_page_size == 0 {
            return Err("default_page_size must be > 0".to_string());
        }

        if self.sentinel_key.is_empty() {
            return Err("sentinel_key cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.id_prefix, "rec");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.sentinel_key, "flatstore.seeded");
    }

    #[test]
    fn test_builder_pattern() {
        let config = HubConfig::new()
            .id_prefix("ms")
            .default_page_size(25)
            .sentinel_key("erp.seeded");

        assert_eq!(config.id_prefix, "ms");
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.sentinel_key, "erp.seeded");
    }

    #[test]
    fn test_validate() {
        let valid = HubConfig::new();
        assert!(valid.validate().is_ok());

        let empty_prefix = HubConfig::new().id_prefix("");
        assert!(empty_prefix.validate().is_err());

        let zero_page = HubConfig::new().default_page_size(0);
        assert!(zero_page.validate().is_err());

        let empty_sentinel = HubConfig::new().sentinel_key("");
        assert!(empty_sentinel.validate().is_err());
    }
}
