//! Namespace-qualified element names.

use std::fmt;

use super::namespaces::Namespace;

/// Element name resolved against the in-scope namespace declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementName {
    namespace: Option<Namespace>,
    namespace_uri: String,
    local_name: String,
}

impl ElementName {
    /// Create a name from a namespace URI (empty when unbound) and local name.
    #[must_use]
    pub fn new(namespace_uri: impl Into<String>, local_name: impl Into<String>) -> Self {
        let namespace_uri = namespace_uri.into();
        Self {
            namespace: Namespace::from_uri(&namespace_uri),
            namespace_uri,
            local_name: local_name.into(),
        }
    }

    /// Create a name in one of the known vocabularies.
    #[must_use]
    pub fn qualified(namespace: Namespace, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace),
            namespace_uri: namespace.uri().to_string(),
            local_name: local_name.into(),
        }
    }

    /// Known vocabulary of this element, `None` for foreign or unbound names.
    #[must_use]
    pub fn namespace(&self) -> Option<Namespace> {
        self.namespace
    }

    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        &self.namespace_uri
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Check whether this is `local_name` in `namespace`.
    #[must_use]
    pub fn is(&self, namespace: Namespace, local_name: &str) -> bool {
        self.namespace == Some(namespace) && self.local_name == local_name
    }
}

/// Clark notation: `{uri}local`, or just `local` for unbound names.
impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_uri.is_empty() {
            f.write_str(&self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace_uri, self.local_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resolves_known_namespace() {
        let name = ElementName::new("urn:cz:isvs:ruian:schemas:ParcelaIntTypy:v1", "Id");
        assert_eq!(name.namespace(), Some(Namespace::Parcela));
        assert!(name.is(Namespace::Parcela, "Id"));
        assert!(!name.is(Namespace::Common, "Id"));
    }

    #[test]
    fn test_unknown_namespace_keeps_uri() {
        let name = ElementName::new("urn:example:future", "Kod");
        assert_eq!(name.namespace(), None);
        assert_eq!(name.namespace_uri(), "urn:example:future");
        assert_eq!(name.to_string(), "{urn:example:future}Kod");
    }

    #[test]
    fn test_display_unbound() {
        assert_eq!(ElementName::new("", "root").to_string(), "root");
    }
}
