//! Compression options for the production minification pass.

use serde::{Deserialize, Serialize};

/// Calls whose return values are unused and may be dropped entirely.
pub const DEFAULT_PURE_FUNCTIONS: &[&str] = &["console.log", "console.info"];

/// What the minifier strips from packaged output.
///
/// This intentionally changes program behavior: diagnostic output present in
/// development is gone from the shipped build. `console.warn`, `console.error`
/// and user-defined functions survive unless named in `pure_function_names`.
///
/// With `drop_console` on, every `console.*` call is replaced by `undefined`
/// wherever it appears, arguments included: `console.log(counter++)` no
/// longer increments `counter`. Names that are only declared pure are
/// handled more carefully. Such a call is dropped only as a whole statement,
/// and side-effecting arguments are kept (`track(x)` survives
/// `logger.log(track(x))`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOptions {
    pub drop_console: bool,
    pub drop_debugger: bool,
    pub pure_function_names: Vec<String>,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            drop_console: true,
            drop_debugger: true,
            pure_function_names: DEFAULT_PURE_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CompressionOptions {
    /// Options with `names` as the pure-function list. Console and debugger
    /// stripping stay on.
    pub fn with_pure_functions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pure_function_names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether `callee` (a dotted member path such as `console.log`) is
    /// declared pure.
    ///
    /// Matching is exact: `log` and `logger.log` are not `console.log`.
    pub fn is_declared_pure(&self, callee: &str) -> bool {
        self.pure_function_names.iter().any(|name| name == callee)
    }

    /// Whether a statement-level call to `callee` with side-effect free
    /// arguments is removed from the output.
    pub fn marks_for_removal(&self, callee: &str) -> bool {
        self.is_declared_pure(callee) || self.drops_unconditionally(callee)
    }

    /// Whether every call to `callee` is replaced by `undefined`, whatever its
    /// arguments or position.
    pub fn drops_unconditionally(&self, callee: &str) -> bool {
        self.drop_console && is_console_member(callee)
    }
}

fn is_console_member(callee: &str) -> bool {
    callee
        .strip_prefix("console.")
        .is_some_and(|method| !method.is_empty() && !method.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_strip_console_and_debugger() {
        let options = CompressionOptions::default();
        assert!(options.drop_console);
        assert!(options.drop_debugger);
        assert_eq!(options.pure_function_names, ["console.log", "console.info"]);
    }

    #[test]
    fn console_log_is_marked() {
        let options = CompressionOptions::default();
        assert!(options.marks_for_removal("console.log"));
        assert!(options.is_declared_pure("console.info"));
    }

    #[test]
    fn user_defined_log_is_not_marked() {
        let options = CompressionOptions::default();
        assert!(!options.marks_for_removal("log"));
        assert!(!options.marks_for_removal("logger.log"));
        assert!(!options.marks_for_removal("window.console.log"));
    }

    #[test]
    fn declared_user_function_is_marked() {
        let options = CompressionOptions::with_pure_functions(["console.log", "logger.log"]);
        assert!(options.marks_for_removal("logger.log"));
        assert!(!options.marks_for_removal("logger.warn"));
    }

    #[test]
    fn drop_console_covers_other_console_methods() {
        let options = CompressionOptions::with_pure_functions(Vec::<String>::new());
        assert!(!options.is_declared_pure("console.warn"));
        assert!(options.marks_for_removal("console.warn"));
    }

    #[test]
    fn only_console_calls_drop_unconditionally() {
        let options = CompressionOptions::with_pure_functions(["logger.log"]);
        assert!(options.drops_unconditionally("console.log"));
        assert!(options.drops_unconditionally("console.error"));
        assert!(!options.drops_unconditionally("logger.log"));

        let keep_console = CompressionOptions {
            drop_console: false,
            ..CompressionOptions::default()
        };
        assert!(!keep_console.drops_unconditionally("console.log"));
        assert!(keep_console.marks_for_removal("console.log"));
        assert!(!keep_console.marks_for_removal("console.warn"));
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(CompressionOptions::default()).unwrap();
        assert_eq!(value["dropConsole"], true);
        assert_eq!(value["pureFunctionNames"][1], "console.info");
    }
}
