//! Discovery of external javadoc sites from an Antora-style attribute document
//!
//! Recognized line shapes (anything else is ignored):
//!
//! ```text
//! version-spring-data-jdbc: '3.3.0'
//! url-spring-data-jdbc-javadoc: 'https://docs.spring.io/spring-data/jdbc/docs/{version-spring-data-jdbc}/api'
//! javadoc-location-org-springframework-boot: '{url-spring-boot-javadoc}'
//! ```

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(version-[A-Za-z0-9_.-]+)\s*:\s*(.*?)\s*$").expect("static regex")
});
static URL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*url-([A-Za-z0-9_.-]+)-javadoc\s*:\s*(.*?)\s*$").expect("static regex")
});
static LOCATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*javadoc-location-([A-Za-z0-9_.-]+)\s*:").expect("static regex")
});
static VERSION_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(version-[A-Za-z0-9_.-]+)\}").expect("static regex"));

/// An external javadoc site discovered in the config document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavadocLibrary {
    /// Attribute name used as the location placeholder, e.g. `url-spring-data-jdbc-javadoc`
    pub placeholder: String,
    /// Base URL with version placeholders expanded and corrections applied
    pub url: String,
}

impl JavadocLibrary {
    /// Location prefix for javadoc macros, e.g. `{url-spring-data-jdbc-javadoc}`
    pub fn location_prefix(&self) -> String {
        format!("{{{}}}", self.placeholder)
    }

    /// True when the URL still contains a `{...}` placeholder
    pub fn has_unresolved_placeholder(&self) -> bool {
        VERSION_PLACEHOLDER.is_match(&self.url)
    }
}

/// Everything the index build needs from the config document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavadocConfig {
    /// External libraries in document line order
    pub libraries: Vec<JavadocLibrary>,
    /// Packages already documented through a `javadoc-location-*` mapping
    pub known_packages: Vec<String>,
    pub versions: HashMap<String, String>,
}

/// Parses the config document
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    self_name: String,
    url_substitutions: Vec<(String, String)>,
}

impl ConfigResolver {
    /// `self_name` identifies the running module's own `url-<name>-javadoc`
    /// entries, which are skipped.
    pub fn new(self_name: impl Into<String>, url_substitutions: Vec<(String, String)>) -> Self {
        Self {
            self_name: self_name.into(),
            url_substitutions,
        }
    }

    pub fn resolve<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> JavadocConfig {
        let lines: Vec<&str> = lines.into_iter().collect();

        let versions: HashMap<String, String> = lines
            .iter()
            .filter_map(|line| VERSION_LINE.captures(line))
            .map(|caps| (caps[1].to_string(), unquote(&caps[2]).to_string()))
            .collect();

        let known_packages = lines
            .iter()
            .filter_map(|line| LOCATION_LINE.captures(line))
            .map(|caps| caps[1].replace('-', "."))
            .collect();

        let libraries = lines
            .iter()
            .filter_map(|line| URL_LINE.captures(line))
            .filter(|caps| !caps[1].starts_with(&self.self_name))
            .map(|caps| {
                let placeholder = format!("url-{}-javadoc", &caps[1]);
                let url = self.expand(&placeholder, unquote(&caps[2]), &versions);
                debug!("Discovered javadoc site {} -> {}", placeholder, url);
                JavadocLibrary { placeholder, url }
            })
            .collect();

        JavadocConfig {
            libraries,
            known_packages,
            versions,
        }
    }

    fn expand(&self, placeholder: &str, raw: &str, versions: &HashMap<String, String>) -> String {
        let expanded = VERSION_PLACEHOLDER.replace_all(raw, |caps: &Captures| {
            match versions.get(&caps[1]) {
                Some(version) => version.clone(),
                None => {
                    warn!("Unresolved placeholder {} in {}", &caps[0], placeholder);
                    caps[0].to_string()
                }
            }
        });

        self.url_substitutions
            .iter()
            .fold(expanded.into_owned(), |url, (from, to)| url.replace(from, to))
    }
}

/// Scalar value of a YAML line: quotes removed, trailing ` # comment` dropped
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.find(quote).map(|end| &rest[..end]))
        {
            return inner;
        }
    }
    match value.find(" #") {
        Some(comment) => value[..comment].trim_end(),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"name: boot
asciidoc:
  attributes:
    version-spring-data-jdbc: '3.3.0'
    url-spring-boot-javadoc: '{url-spring-boot-docs}/api/java'
    url-spring-data-jdbc-javadoc: 'https://docs.spring.io/spring-data/jdbc/docs/{version-spring-data-jdbc}/api'
    url-jooq-javadoc: https://www.jooq.org/javadoc/{version-jooq}
    javadoc-location-org-springframework-boot: '{url-spring-boot-javadoc}'
    javadoc-location-org-springframework-data-jdbc: '{url-spring-data-jdbc-javadoc}'
"#;

    #[test]
    fn test_resolve_expands_versions_and_skips_self() {
        let config = ConfigResolver::new("spring-boot", Vec::new()).resolve(DOC.lines());

        assert_eq!(config.versions["version-spring-data-jdbc"], "3.3.0");
        assert_eq!(
            config.libraries,
            vec![
                JavadocLibrary {
                    placeholder: "url-spring-data-jdbc-javadoc".into(),
                    url: "https://docs.spring.io/spring-data/jdbc/docs/3.3.0/api".into(),
                },
                JavadocLibrary {
                    placeholder: "url-jooq-javadoc".into(),
                    url: "https://www.jooq.org/javadoc/{version-jooq}".into(),
                },
            ]
        );
        assert!(!config.libraries[0].has_unresolved_placeholder());
        assert!(config.libraries[1].has_unresolved_placeholder());
        assert_eq!(
            config.known_packages,
            vec!["org.springframework.boot", "org.springframework.data.jdbc"]
        );
    }

    #[test]
    fn test_url_substitutions_apply_after_expansion() {
        let resolver = ConfigResolver::new(
            "spring-boot",
            vec![("/docs/3.3.0/api".into(), "/docs/3.3.1/api".into())],
        );
        let config = resolver.resolve(DOC.lines());
        assert_eq!(
            config.libraries[0].url,
            "https://docs.spring.io/spring-data/jdbc/docs/3.3.1/api"
        );
        assert_eq!(config.libraries[0].location_prefix(), "{url-spring-data-jdbc-javadoc}");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("\"b\""), "b");
        assert_eq!(unquote("c"), "c");
    }

    #[test]
    fn test_unquote_drops_trailing_comment() {
        assert_eq!(unquote("\"https://x/api\" # note"), "https://x/api");
        assert_eq!(unquote("'https://x/api'   # note"), "https://x/api");
        assert_eq!(unquote("https://x/api # note"), "https://x/api");
        assert_eq!(unquote("https://x/api#anchor"), "https://x/api#anchor");
    }

    #[test]
    fn test_resolve_ignores_trailing_comments() {
        let doc = concat!(
            "version-a: 1.0 # pinned\n",
            "url-a-javadoc: \"https://x/{version-a}/api\" # comment\n",
        );
        let config = ConfigResolver::new("spring-boot", Vec::new()).resolve(doc.lines());
        assert_eq!(config.libraries[0].url, "https://x/1.0/api");
    }
}
