//! Built-in type catalogs for libraries whose javadoc host offers no usable index

use crate::doc_engine::types::TypeElement;

/// A static type listing that replaces both remote strategies for one library
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCatalog {
    /// Substring of the library's javadoc URL that selects this catalog
    pub url_marker: &'static str,
    pub package: &'static str,
    pub labels: &'static [&'static str],
}

impl BuiltinCatalog {
    pub fn matches(&self, url: &str) -> bool {
        url.contains(self.url_marker)
    }

    pub fn elements(&self) -> Vec<TypeElement> {
        self.labels
            .iter()
            .map(|label| TypeElement::new(self.package, *label))
            .collect()
    }
}

pub const R2DBC_SPI: BuiltinCatalog = BuiltinCatalog {
    url_marker: "r2dbc.io",
    package: "io.r2dbc.spi",
    labels: &[
        "Batch",
        "Blob",
        "Clob",
        "Closeable",
        "ColumnMetadata",
        "Connection",
        "ConnectionFactories",
        "ConnectionFactory",
        "ConnectionFactoryMetadata",
        "ConnectionFactoryOptions",
        "ConnectionFactoryOptions.Builder",
        "ConnectionFactoryProvider",
        "ConnectionMetadata",
        "IsolationLevel",
        "Lifecycle",
        "NoSuchOptionException",
        "Nullability",
        "Option",
        "OutParameterMetadata",
        "OutParameters",
        "OutParametersMetadata",
        "Parameter",
        "Parameter.In",
        "Parameter.Out",
        "Parameters",
        "R2dbcBadGrammarException",
        "R2dbcDataIntegrityViolationException",
        "R2dbcException",
        "R2dbcNonTransientException",
        "R2dbcNonTransientResourceException",
        "R2dbcPermissionDeniedException",
        "R2dbcRollbackException",
        "R2dbcTimeoutException",
        "R2dbcTransientException",
        "R2dbcTransientResourceException",
        "R2dbcType",
        "Readable",
        "ReadableMetadata",
        "Result",
        "Result.Message",
        "Result.OutSegment",
        "Result.RowSegment",
        "Result.Segment",
        "Result.UpdateCount",
        "Row",
        "RowMetadata",
        "Statement",
        "TransactionDefinition",
        "Type",
        "Type.InferredType",
        "ValidationDepth",
        "Wrapped",
    ],
};

/// Catalogs consulted before any network strategy
pub const BUILTIN_CATALOGS: &[BuiltinCatalog] = &[R2DBC_SPI];

/// Find the built-in catalog for a library URL, if any
pub fn builtin_for(url: &str) -> Option<&'static BuiltinCatalog> {
    BUILTIN_CATALOGS.iter().find(|catalog| catalog.matches(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r2dbc_catalog_selected_by_url() {
        let catalog = builtin_for("https://r2dbc.io/spec/1.0.0.RELEASE/api").unwrap();
        let elements = catalog.elements();
        assert!(elements.contains(&TypeElement::new("io.r2dbc.spi", "ConnectionFactory")));
        assert!(elements.iter().all(|e| e.package == "io.r2dbc.spi"));
    }

    #[test]
    fn test_other_urls_have_no_catalog() {
        let url = "https://docs.spring.io/spring-framework/docs/6.1.8/javadoc-api";
        assert!(builtin_for(url).is_none());
    }
}
