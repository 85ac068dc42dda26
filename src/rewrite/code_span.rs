//! Bare code-span pass: `` `Widget` `` becomes `javadoc:com.example.Widget[]`
//! when the name index knows exactly one location for it.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::rules::TypeNameRules;
use super::xref::ANNOTATION_FORMAT;
use super::RewriteError;
use crate::index_core::{Lookup, NameIndex};

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^|\s)`(@?[A-Za-z][A-Za-z0-9_.$]*)`").expect("static regex")
});
static JAVADOC_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"javadoc:[^\s\[]*\[[^\]]*\]").expect("static regex"));

#[derive(Debug, Clone)]
pub struct CodeSpanPass<'a> {
    index: &'a NameIndex,
    rules: TypeNameRules,
}

impl<'a> CodeSpanPass<'a> {
    pub fn new(index: &'a NameIndex, rules: TypeNameRules) -> Self {
        Self { index, rules }
    }

    /// Rewrite every resolvable code span; `None` when nothing changed.
    ///
    /// Spans inside the text argument of an existing `javadoc:` macro are
    /// left alone.
    pub fn apply(&self, text: &str) -> Result<Option<String>, RewriteError> {
        let macros: Vec<Range<usize>> = JAVADOC_MACRO
            .find_iter(text)
            .map(|m| m.range())
            .collect();

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        let mut matched = false;

        for caps in CODE_SPAN.captures_iter(text) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            if macros.iter().any(|r| r.contains(&whole.start())) {
                continue;
            }
            let Some(replacement) = self.resolve(token.as_str())? else {
                continue;
            };

            output.push_str(&text[last..token.start() - 1]);
            output.push_str(&replacement);
            last = whole.end();
            matched = true;
        }

        if !matched {
            return Ok(None);
        }
        output.push_str(&text[last..]);
        Ok(Some(output))
    }

    /// Macro replacing `token`, if it names exactly one indexed type
    pub fn resolve(&self, token: &str) -> Result<Option<String>, RewriteError> {
        if !self.rules.is_likely_type(token) {
            return Ok(None);
        }
        let (annotation, name) = match token.strip_prefix('@') {
            Some(name) => (true, name),
            None => (false, token),
        };
        if self.rules.is_quiet(name) {
            debug!("Skipping example name `{}`", token);
            return Ok(None);
        }

        let key = self.rules.lookup_key(name, annotation);
        match self.index.lookup(key) {
            Lookup::Missing => {
                warn!("No javadoc mapping for `{}`", token);
                Ok(None)
            }
            Lookup::Unique(location) => {
                let argument = if annotation { ANNOTATION_FORMAT } else { "" };
                Ok(Some(format!("javadoc:{location}[{argument}]")))
            }
            Lookup::Ambiguous(candidates) => Err(RewriteError::Ambiguous {
                key: key.to_string(),
                candidates: candidates.to_vec(),
            }),
        }
    }
}
