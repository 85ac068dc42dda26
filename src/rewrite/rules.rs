//! Heuristics deciding which code spans are worth resolving.
//!
//! These grew out of false positives seen in real documentation and are
//! best-effort: a span that slips through simply produces a "no mapping"
//! diagnostic, one that is wrongly rejected stays as plain code.

use std::collections::{BTreeMap, HashSet};

use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct TypeNameRules {
    root_package: String,
    deny_list: HashSet<String>,
    quiet_prefixes: Vec<String>,
    annotation_aliases: BTreeMap<String, String>,
    class_aliases: BTreeMap<String, String>,
}

impl TypeNameRules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            root_package: settings.root_package.clone(),
            deny_list: settings.deny_list.iter().cloned().collect(),
            quiet_prefixes: settings.quiet_prefixes.clone(),
            annotation_aliases: settings.annotation_aliases.clone(),
            class_aliases: settings.class_aliases.clone(),
        }
    }

    /// Whether a code span token plausibly names a type or annotation
    pub fn is_likely_type(&self, token: &str) -> bool {
        !self.deny_list.contains(token) && looks_like_type(token, &self.root_package)
    }

    /// Example names such as `MyService` that are never looked up
    pub fn is_quiet(&self, name: &str) -> bool {
        self.quiet_prefixes.iter().any(|prefix| {
            name.strip_prefix(prefix.as_str())
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_uppercase)
        })
    }

    /// Index key for a name, after alias substitution.
    ///
    /// `name` must already have its `@` stripped.
    pub fn lookup_key<'a>(&'a self, name: &'a str, annotation: bool) -> &'a str {
        let aliases = if annotation {
            &self.annotation_aliases
        } else {
            &self.class_aliases
        };
        aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

fn looks_like_type(token: &str, root_package: &str) -> bool {
    if token.chars().count() <= 1 {
        return false;
    }
    if !root_package.is_empty() && token.starts_with(root_package) {
        return true;
    }

    let mut chars = token.chars();
    let first = chars.next().unwrap_or_default();
    if first == '@' && chars.next().is_some_and(char::is_uppercase) {
        return true;
    }
    if first.is_uppercase() && !is_all_uppercase(token) {
        return true;
    }

    // `java.util.List`: lowercase package followed by a type-like segment
    match token.rsplit_once('.') {
        Some((head, last)) => {
            !head.is_empty()
                && !head.chars().any(char::is_uppercase)
                && looks_like_type(last, root_package)
        }
        None => false,
    }
}

fn is_all_uppercase(token: &str) -> bool {
    token
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase)
}
