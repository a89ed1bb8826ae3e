//! `<script>` block extraction for single-file components.

use oxc_span::SourceType;

/// Upper bound on blocks taken from one file.
const MAX_SCRIPT_BLOCKS: usize = 2;

/// Script content of one `<script>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    pub source: &'a str,
    /// Byte offset of `source` within the file.
    pub offset: usize,
    /// Value of the `lang` attribute, e.g. `ts` or `tsx`.
    pub lang: Option<&'a str>,
}

impl ScriptBlock<'_> {
    pub fn is_typescript(&self) -> bool {
        matches!(self.lang, Some("ts" | "tsx"))
    }

    /// Parser dialect for the block. Unknown languages parse as JavaScript.
    pub fn source_type(&self) -> SourceType {
        match self.lang {
            Some("ts") => SourceType::ts(),
            Some("tsx") => SourceType::tsx(),
            Some("jsx") => SourceType::jsx(),
            _ => SourceType::mjs(),
        }
    }
}

/// Extract the `<script>` and `<script setup>` blocks of a `.vue` file.
///
/// Blocks with a `src` attribute have no inline content and are skipped.
/// An unterminated block is ignored.
pub fn extract_vue_scripts(content: &str) -> Vec<ScriptBlock<'_>> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while blocks.len() < MAX_SCRIPT_BLOCKS {
        let Some(open) = content[cursor..].find("<script") else {
            break;
        };
        let tag_start = cursor + open;
        let Some(tag_len) = content[tag_start..].find('>') else {
            break;
        };
        let attrs = &content[tag_start + "<script".len()..tag_start + tag_len];
        let body_start = tag_start + tag_len + 1;
        let Some(close) = content[body_start..].find("</script>") else {
            break;
        };
        let body_end = body_start + close;
        cursor = body_end + "</script>".len();

        // `<scripts>` or similar is not a script tag.
        if !attrs.is_empty() && !attrs.starts_with(char::is_whitespace) {
            continue;
        }
        if has_attribute(attrs, "src") {
            continue;
        }

        blocks.push(ScriptBlock {
            source: &content[body_start..body_end],
            offset: body_start,
            lang: lang(attrs),
        });
    }

    blocks
}

fn has_attribute(attrs: &str, name: &str) -> bool {
    attrs
        .split_whitespace()
        .any(|attr| attr == name || attr.starts_with(&format!("{name}=")))
}

fn lang(attrs: &str) -> Option<&str> {
    attrs
        .split_whitespace()
        .find_map(|attr| attr.strip_prefix("lang="))
        .map(|value| value.trim_matches(|c| c == '"' || c == '\''))
}
