//! Choice between bare and site-prefixed javadoc locations

/// Decides whether a type needs an external location prefix.
///
/// Packages under a known package are documented through the module's own
/// javadoc location mappings, so their bare name resolves. Packages listed
/// as always-external keep their prefix even inside a known package.
#[derive(Debug, Clone, Default)]
pub struct LocationPolicy {
    known_packages: Vec<String>,
    always_external: Vec<String>,
}

impl LocationPolicy {
    pub fn new(known_packages: Vec<String>, always_external: Vec<String>) -> Self {
        Self {
            known_packages,
            always_external,
        }
    }

    pub fn is_known(&self, package: &str) -> bool {
        let under = |prefix: &String| {
            package == prefix
                || package
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        };
        self.known_packages.iter().any(under) && !self.always_external.iter().any(under)
    }

    /// Resolved location of `package.class_name` published under `location_prefix`
    /// (a `{placeholder}` string)
    pub fn resolve(&self, location_prefix: &str, package: &str, class_name: &str) -> String {
        if self.is_known(package) {
            format!("{package}.{class_name}")
        } else {
            format!("{location_prefix}/{package}.{class_name}")
        }
    }
}
