use regex::{Captures, Regex};

use crate::config::PermissionTemplate;
use crate::error::Result;

pub const READ_ANCHOR: &str = "const wasmCode = await Deno.readFile(wasm_url);";
pub const FETCH_ANCHOR: &str = "wasmCode = await (await fetch(wasm_url)).arrayBuffer();";

/// Inserts a guard line in front of one anchored line of generated JS
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pattern: Regex,
    guard: String,
}

/// Result of applying a rule: the new text and how many lines matched the
/// anchor. Only the first match is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub matches: usize,
}

impl RewriteRule {
    /// `anchor` must make up the whole line apart from surrounding
    /// horizontal whitespace.
    pub fn new(name: &'static str, anchor: &str, guard: String) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?m)^(?P<indent>[ \t]*){}[ \t\r]*$",
            regex::escape(anchor)
        ))?;
        Ok(Self {
            name,
            pattern,
            guard,
        })
    }

    pub fn apply(&self, text: &str) -> Rewrite {
        let matches = self.pattern.find_iter(text).count();
        if matches == 0 {
            return Rewrite {
                text: text.to_string(),
                matches,
            };
        }

        let text = self
            .pattern
            .replacen(text, 1, |caps: &Captures| {
                format!("{}{}\n{}", &caps["indent"], self.guard, &caps[0])
            })
            .into_owned();
        Rewrite { text, matches }
    }
}

/// Request read access to the wasm file before reading it from disk
pub fn read_path_rule(perms: &PermissionTemplate) -> Result<RewriteRule> {
    RewriteRule::new(
        "read-path",
        READ_ANCHOR,
        format!(
            r#"if ({}) {}({{ name: "read", path: wasm_url }});"#,
            perms.presence_check, perms.request_fn
        ),
    )
}

/// Request net access to the wasm host before fetching it
pub fn fetch_path_rule(perms: &PermissionTemplate) -> Result<RewriteRule> {
    RewriteRule::new(
        "fetch-path",
        FETCH_ANCHOR,
        format!(
            r#"if ({}) {}({{ name: "net", host: wasm_url.host }});"#,
            perms.presence_check, perms.request_fn
        ),
    )
}
