//! Legacy cross-reference pass.
//!
//! Rewrites `{attr}org/example/Widget.html#anchor[text]` into
//! `javadoc:org.example.Widget#anchor[text]`.

use regex::{Captures, Regex};

/// Macro argument selecting annotation rendering
pub const ANNOTATION_FORMAT: &str = "format=annotation";

#[derive(Debug, Clone)]
pub struct XrefPass {
    pattern: Regex,
}

impl XrefPass {
    /// `attribute` is the AsciiDoc attribute holding the API base URL,
    /// without braces (e.g. `security-api-url`).
    pub fn new(attribute: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"\{{{}\}}([^.]+)/(.*?)\.html(#[^\[]+)?\[(.*?)\]",
            regex::escape(attribute)
        ))?;
        Ok(Self { pattern })
    }

    /// Rewrite every cross-reference; `None` when there is none
    pub fn apply(&self, text: &str) -> Option<String> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        let mut matched = false;

        for caps in self.pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            output.push_str(&text[last..whole.start()]);
            output.push_str(&render(&caps));
            last = whole.end();
            matched = true;
        }

        if !matched {
            return None;
        }
        output.push_str(&text[last..]);
        Some(output)
    }
}

fn render(caps: &Captures<'_>) -> String {
    let package = caps[1].replace('/', ".");
    let class_name = &caps[2];
    let anchor = caps.get(3).map_or("", |m| m.as_str());
    let text = &caps[4];

    let argument = if text == format!("`@{class_name}`") {
        ANNOTATION_FORMAT
    } else if text == format!("`{class_name}`") || text == class_name {
        ""
    } else {
        text
    };

    format!(
        "javadoc:{package}.{}{anchor}[{argument}]",
        class_name.replace('.', "$")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass() -> XrefPass {
        XrefPass::new("security-api-url").unwrap()
    }

    #[test]
    fn test_nested_class_uses_dollar() {
        let out = pass()
            .apply("See {security-api-url}org/example/Widget.Part.html[`Widget.Part`].")
            .unwrap();
        assert_eq!(out, "See javadoc:org.example.Widget$Part[].");
    }

    #[test]
    fn test_bare_class_name_collapses() {
        let out = pass()
            .apply("{security-api-url}org/example/Widget.html[Widget]")
            .unwrap();
        assert_eq!(out, "javadoc:org.example.Widget[]");
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        assert_eq!(pass().apply("{other-api-url}org/example/Widget.html[Widget]"), None);
    }
}
