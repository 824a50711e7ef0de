//! Building JXA programs around Omni Automation scripts
//!
//! Each OmniJS asset is a function expression taking one `args` object and
//! returning a JSON-serializable value. [`Script::omnijs`] embeds the
//! arguments and the function in a single OmniJS program, then hands that
//! program to OmniFocus from JXA:
//!
//! ```text
//! Application('OmniFocus').evaluateJavascript("<omnijs program>")
//! ```
//!
//! Nothing is spliced into script text except JSON produced by `serde_json`,
//! so names, notes and ids can hold any character.

use serde::Serialize;

use super::error::BridgeResult;

pub(crate) const DUMP_DATABASE: &str = include_str!("scripts/dump_database.js");
pub(crate) const ADD_TASK: &str = include_str!("scripts/add_task.js");
pub(crate) const ADD_PROJECT: &str = include_str!("scripts/add_project.js");
pub(crate) const EDIT_ITEM: &str = include_str!("scripts/edit_item.js");
pub(crate) const REMOVE_ITEM: &str = include_str!("scripts/remove_item.js");

/// A complete JXA program, ready for `osascript -l JavaScript`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    name: &'static str,
    source: String,
}

impl Script {
    /// Wrap an OmniJS function expression and its arguments
    pub fn omnijs<A: Serialize + ?Sized>(
        name: &'static str,
        function: &str,
        args: &A,
    ) -> BridgeResult<Self> {
        let args = js_literal(args)?;
        let program = format!(
            "(() => {{\n\
             const args = {args};\n\
             const run = {function};\n\
             try {{\n\
             return JSON.stringify(run(args));\n\
             }} catch (e) {{\n\
             return JSON.stringify({{ success: false, error: String(e) }});\n\
             }}\n\
             }})()",
            args = args,
            function = function.trim().trim_end_matches(';'),
        );

        let source = format!(
            "const app = Application('OmniFocus');\n\
             app.includeStandardAdditions = false;\n\
             app.evaluateJavascript({});\n",
            js_literal(&program)?
        );

        Ok(Self { name, source })
    }

    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The JXA program text
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Serialize a value as a JavaScript literal.
///
/// JSON is valid JavaScript apart from U+2028 and U+2029, which older
/// engines treat as line terminators inside string literals.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> BridgeResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029"))
}
