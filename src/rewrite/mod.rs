//! Text rewriting from legacy API links and code spans to `javadoc:` macros.
//!
//! Two passes run in sequence: the explicit cross-reference pass, which
//! needs nothing but the text, and the code-span pass, which resolves bare
//! names through a [`NameIndex`].

pub mod code_span;
pub mod rules;
pub mod xref;

use crate::index_core::NameIndex;
use crate::settings::Settings;

pub use code_span::CodeSpanPass;
pub use rules::TypeNameRules;
pub use xref::{XrefPass, ANNOTATION_FORMAT};

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Ambiguous reference `{key}` could be any of: {}", .candidates.join(", "))]
    Ambiguous { key: String, candidates: Vec<String> },

    #[error("Invalid cross-reference attribute pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone)]
pub struct Rewriter<'a> {
    xref: XrefPass,
    code_spans: Option<CodeSpanPass<'a>>,
}

impl<'a> Rewriter<'a> {
    /// Rewriter running only the explicit cross-reference pass
    pub fn xrefs_only(settings: &Settings) -> Result<Self, RewriteError> {
        Ok(Self {
            xref: XrefPass::new(&settings.xref_attribute)?,
            code_spans: None,
        })
    }

    /// Rewriter running both passes against `index`
    pub fn new(settings: &Settings, index: &'a NameIndex) -> Result<Self, RewriteError> {
        Ok(Self {
            xref: XrefPass::new(&settings.xref_attribute)?,
            code_spans: Some(CodeSpanPass::new(index, TypeNameRules::from_settings(settings))),
        })
    }

    /// Rewritten text, or `None` when the result is identical to `text`.
    ///
    /// An ambiguous code span aborts the rewrite.
    pub fn rewrite(&self, text: &str) -> Result<Option<String>, RewriteError> {
        let after_xrefs = self.xref.apply(text);
        let current = after_xrefs.as_deref().unwrap_or(text);

        let after_spans = match &self.code_spans {
            Some(pass) => pass.apply(current)?,
            None => None,
        };

        Ok(after_spans.or(after_xrefs).filter(|output| output != text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_core::NameIndexBuilder;

    #[test]
    fn test_both_passes_compose() {
        let mut builder = NameIndexBuilder::new();
        builder.register_type("com.example", "Widget", "com.example.Widget");
        let index = builder.build();
        let rewriter = Rewriter::new(&Settings::default(), &index).unwrap();

        let out = rewriter
            .rewrite("{security-api-url}com/example/Gadget.html[Click `Widget`] and `Widget`")
            .unwrap();
        assert_eq!(
            out.as_deref(),
            Some("javadoc:com.example.Gadget[Click `Widget`] and javadoc:com.example.Widget[]")
        );
    }

    #[test]
    fn test_no_change_is_none() {
        let rewriter = Rewriter::xrefs_only(&Settings::default()).unwrap();
        assert_eq!(rewriter.rewrite("plain text").unwrap(), None);
    }
}
