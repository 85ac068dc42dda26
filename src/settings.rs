//! Tunable tables for index building and rewriting.
//!
//! Defaults target the Spring documentation sets this tool was written for.
//! A JSON document can replace any field; missing fields keep their default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Package prefix of the module being migrated; code spans starting with
    /// it are always treated as type references
    pub root_package: String,
    /// Name of the module's own `url-<name>-javadoc` entries
    pub self_name: String,
    /// Attribute used by legacy cross-references, without braces
    pub xref_attribute: String,
    /// Literal `(from, to)` replacements for known-broken upstream URLs
    pub url_substitutions: Vec<(String, String)>,
    /// Packages that always keep an external location prefix
    pub always_external_packages: Vec<String>,
    /// Short annotation names (without `@`) to qualified names
    pub annotation_aliases: BTreeMap<String, String>,
    /// Short class names to qualified names
    pub class_aliases: BTreeMap<String, String>,
    /// Code spans that look like types but never are
    pub deny_list: Vec<String>,
    /// Prefixes of example names that are skipped without a diagnostic
    pub quiet_prefixes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let pairs = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };
        let strings = |entries: &[&str]| entries.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            root_package: "org.springframework.boot".to_string(),
            self_name: "spring-boot".to_string(),
            xref_attribute: "security-api-url".to_string(),
            url_substitutions: vec![(
                "https://docs.jboss.org/hibernate/orm/".to_string(),
                "https://docs.hibernate.org/orm/".to_string(),
            )],
            always_external_packages: strings(&[
                "org.springframework.security.oauth2.server.authorization",
            ]),
            annotation_aliases: pairs(&[
                ("Autowired", "org.springframework.beans.factory.annotation.Autowired"),
                ("Bean", "org.springframework.context.annotation.Bean"),
                ("Component", "org.springframework.stereotype.Component"),
                ("Configuration", "org.springframework.context.annotation.Configuration"),
                ("Import", "org.springframework.context.annotation.Import"),
                ("Primary", "org.springframework.context.annotation.Primary"),
                ("Profile", "org.springframework.context.annotation.Profile"),
                ("Service", "org.springframework.stereotype.Service"),
                ("Test", "org.junit.jupiter.api.Test"),
                ("Transactional", "org.springframework.transaction.annotation.Transactional"),
                ("Value", "org.springframework.beans.factory.annotation.Value"),
            ]),
            class_aliases: pairs(&[
                ("Environment", "org.springframework.core.env.Environment"),
            ]),
            deny_list: strings(&[
                "Dockerfile",
                "Procfile",
                "Gemfile",
                "Jenkinsfile",
                "Vagrantfile",
                "Makefile",
                "README.md",
                "Tiltfile",
                "application.properties",
                "application.yaml",
                "application.yml",
                "bootstrap.properties",
                "build.gradle",
                "pom.xml",
                "settings.gradle",
                "spring.factories",
            ]),
            quiet_prefixes: strings(&["My"]),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| SettingsError::Parse {
            path: display,
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
