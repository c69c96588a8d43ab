//! Static domain-to-models registry.
//!
//! Built once at startup and read-only afterwards: a lookup failure is an
//! ordinary `None`, never a panic, and callers redirect to domain selection
//! rather than proceeding.

use thunai_types::domain::DomainInfo;

/// Process-wide table mapping a domain key to its display metadata and
/// ordered candidate model list.
pub struct DomainRegistry {
    domains: Vec<DomainInfo>,
}

impl DomainRegistry {
    /// Build a registry from an explicit catalog.
    ///
    /// Every entry must carry at least one model; empty entries are a
    /// configuration mistake and are dropped with a warning.
    pub fn new(domains: Vec<DomainInfo>) -> Self {
        let domains = domains
            .into_iter()
            .filter(|d| {
                if d.models.is_empty() {
                    tracing::warn!(domain = %d.key, "dropping domain with no candidate models");
                    false
                } else {
                    true
                }
            })
            .collect();
        Self { domains }
    }

    /// Build the registry with the built-in default catalog.
    pub fn with_defaults() -> Self {
        Self::new(default_catalog())
    }

    /// Look up a domain by key. Pure, no side effects.
    pub fn resolve(&self, key: &str) -> Option<&DomainInfo> {
        self.domains.iter().find(|d| d.key == key)
    }

    /// Iterate domains in catalog order, for the selection view.
    pub fn iter(&self) -> impl Iterator<Item = &DomainInfo> {
        self.domains.iter()
    }

    /// Whether `model` is one of `domain`'s candidates.
    pub fn offers(&self, domain: &str, model: &str) -> bool {
        self.resolve(domain)
            .is_some_and(|d| d.models.iter().any(|m| m == model))
    }

    /// Compare the catalog against the model list the backend reports it
    /// can serve, returning `(domain, model)` pairs the backend lacks.
    /// Used for startup validation; missing models are a warning, not fatal.
    pub fn missing_models(&self, available: &[String]) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for domain in &self.domains {
            for model in &domain.models {
                if !available.iter().any(|a| a == model) {
                    missing.push((domain.key.clone(), model.clone()));
                }
            }
        }
        missing
    }
}

/// The built-in domain catalog.
fn default_catalog() -> Vec<DomainInfo> {
    fn entry(key: &str, name: &str, icon: &str, description: &str, models: &[&str]) -> DomainInfo {
        DomainInfo {
            key: key.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            models: models.iter().map(|m| m.to_string()).collect(),
        }
    }

    vec![
        entry(
            "healthcare",
            "Healthcare",
            "\u{1F3E5}",
            "Medical advice, health information, and wellness guidance",
            &["bharatbuddy", "puzhavan"],
        ),
        entry(
            "agriculture",
            "Agriculture",
            "\u{1F33E}",
            "Farming techniques, crop management, and agricultural practices",
            &["gennai", "puzhavan"],
        ),
        entry(
            "coding",
            "Coding",
            "\u{1F4BB}",
            "Programming help, code review, and software development",
            &["codemium", "creaton"],
        ),
        entry(
            "education",
            "Education",
            "\u{1F4DA}",
            "Learning resources, tutoring, and educational content",
            &["buddyllama", "creaton"],
        ),
        entry(
            "nature_medicine",
            "Natural Medicine",
            "\u{1F33F}",
            "Herbal remedies, traditional medicine, and natural healing",
            &["puzhavan", "bharatbuddy"],
        ),
        entry(
            "tamil",
            "Tamil Language",
            "\u{1F1EE}\u{1F1F3}",
            "Tamil language support, translation, and cultural information",
            &["tamil-llama-7b-instruct-v0.2", "buddyllama"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_domain() {
        let registry = DomainRegistry::with_defaults();
        let info = registry.resolve("healthcare").unwrap();
        assert_eq!(info.name, "Healthcare");
        assert!(!info.models.is_empty());
    }

    #[test]
    fn test_resolve_unknown_domain_is_none() {
        let registry = DomainRegistry::with_defaults();
        assert!(registry.resolve("astrology").is_none());
    }

    #[test]
    fn test_model_may_appear_in_multiple_domains() {
        let registry = DomainRegistry::with_defaults();
        let count = registry
            .iter()
            .filter(|d| d.models.iter().any(|m| m == "puzhavan"))
            .count();
        assert!(count > 1);
    }

    #[test]
    fn test_offers_checks_membership() {
        let registry = DomainRegistry::with_defaults();
        assert!(registry.offers("coding", "codemium"));
        assert!(!registry.offers("coding", "bharatbuddy"));
        assert!(!registry.offers("nonexistent", "codemium"));
    }

    #[test]
    fn test_empty_model_list_is_dropped() {
        let registry = DomainRegistry::new(vec![DomainInfo {
            key: "empty".to_string(),
            name: "Empty".to_string(),
            icon: String::new(),
            description: String::new(),
            models: Vec::new(),
        }]);
        assert!(registry.resolve("empty").is_none());
    }

    #[test]
    fn test_missing_models_against_backend() {
        let registry = DomainRegistry::with_defaults();
        let available: Vec<String> = registry
            .iter()
            .flat_map(|d| d.models.iter().cloned())
            .filter(|m| m != "gennai")
            .collect();

        let missing = registry.missing_models(&available);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0], ("agriculture".to_string(), "gennai".to_string()));
    }
}
