//! Placeholder resolution against an environment.
//!
//! Responsibilities:
//! - Recognize `${NAME}` and `${NAME:default}` placeholder values.
//! - Resolve the variable through an [`Environment`], falling back to the
//!   default when the variable is unset or empty.
//!
//! Does NOT handle:
//! - Merging property sources (see snapshot.rs).
//! - Interpolation inside larger strings: a placeholder replaces the whole
//!   value, surrounding text is discarded.
//!
//! Invariants:
//! - A value is only treated as a placeholder when its first character is
//!   `$`; everything else passes through unchanged and counts as resolved.
//! - Only the first `{...}` span is considered.
//! - The placeholder body splits on the first `:`; colons after that belong
//!   to the default.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::env::Environment;

/// A raw value after placeholder resolution.
///
/// `resolved` is false in exactly one case: a placeholder whose variable
/// was unset and which carried no default. The value is then the empty
/// string, and callers can tell "present but unresolved" apart from a
/// legitimately empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub value: String,
    pub resolved: bool,
}

impl ResolvedValue {
    fn literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            resolved: true,
        }
    }
}

fn placeholder_matcher() -> &'static Regex {
    static MATCHER: OnceLock<Regex> = OnceLock::new();
    // The pattern is fixed, so compilation cannot fail at runtime.
    MATCHER.get_or_init(|| Regex::new(r"\{(.*?)\}").expect("placeholder pattern"))
}

/// Resolves `${NAME:default}` placeholders against an [`Environment`].
pub struct Resolver {
    env: Arc<dyn Environment>,
}

impl Resolver {
    /// Create a resolver reading variables from `env`.
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }

    /// Resolve one raw value.
    ///
    /// Resolution rules, in order:
    /// - Values not starting with `$`, and `$`-values without a `{...}`
    ///   span, pass through unchanged as resolved.
    /// - A set, non-empty variable resolves to its value.
    /// - An unset or empty variable resolves to the default when one is
    ///   present.
    /// - Without a default, an unset variable yields an unresolved empty
    ///   value; a variable set to the empty string yields a resolved one.
    pub fn resolve(&self, raw: &str) -> ResolvedValue {
        if !raw.starts_with('$') {
            return ResolvedValue::literal(raw);
        }
        let Some(captures) = placeholder_matcher().captures(raw) else {
            return ResolvedValue::literal(raw);
        };
        let body = &captures[1];
        let (name, default) = match body.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };

        let current = self.env.lookup(name);
        match current {
            Some(value) if !value.is_empty() => ResolvedValue {
                value,
                resolved: true,
            },
            // Unset and set-to-empty both fall back to the default.
            _ => match default {
                Some(default) => ResolvedValue::literal(default),
                None => ResolvedValue {
                    resolved: current.is_some(),
                    value: current.unwrap_or_default(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use serial_test::serial;

    fn resolver(vars: &[(&str, &str)]) -> Resolver {
        let env: MapEnv = vars.iter().copied().collect();
        Resolver::new(Arc::new(env))
    }

    #[test]
    fn test_plain_value_passes_through() {
        let r = resolver(&[]);
        assert_eq!(r.resolve("plain-value"), ResolvedValue::literal("plain-value"));
        assert_eq!(r.resolve(""), ResolvedValue::literal(""));
    }

    #[test]
    fn test_dollar_without_braces_passes_through() {
        let r = resolver(&[("FOO", "set")]);
        assert_eq!(r.resolve("$FOO"), ResolvedValue::literal("$FOO"));
        assert_eq!(r.resolve("$"), ResolvedValue::literal("$"));
    }

    #[test]
    fn test_set_variable_resolves_to_its_value() {
        let r = resolver(&[("LOCAL_KEY", "local-value")]);
        assert_eq!(
            r.resolve("${LOCAL_KEY}"),
            ResolvedValue::literal("local-value")
        );
    }

    #[test]
    fn test_set_variable_wins_over_default() {
        let r = resolver(&[("LOCAL_KEY", "local-value")]);
        assert_eq!(
            r.resolve("${LOCAL_KEY:fallback}"),
            ResolvedValue::literal("local-value")
        );
    }

    #[test]
    fn test_unset_variable_uses_default() {
        let r = resolver(&[]);
        assert_eq!(
            r.resolve("${LOCAL_KEY:fallback}"),
            ResolvedValue::literal("fallback")
        );
    }

    #[test]
    fn test_empty_variable_uses_default() {
        let r = resolver(&[("LOCAL_KEY", "")]);
        assert_eq!(
            r.resolve("${LOCAL_KEY:fallback}"),
            ResolvedValue::literal("fallback")
        );
    }

    #[test]
    fn test_unset_variable_without_default_is_unresolved() {
        let r = resolver(&[]);
        assert_eq!(
            r.resolve("${LOCAL_KEY}"),
            ResolvedValue {
                value: String::new(),
                resolved: false,
            }
        );
    }

    #[test]
    fn test_empty_variable_without_default_is_resolved_empty() {
        let r = resolver(&[("LOCAL_KEY", "")]);
        assert_eq!(
            r.resolve("${LOCAL_KEY}"),
            ResolvedValue {
                value: String::new(),
                resolved: true,
            }
        );
    }

    #[test]
    fn test_default_keeps_colons() {
        // Only the first colon separates name from default
        let r = resolver(&[]);
        assert_eq!(
            r.resolve("${SERVICE_URL:http://localhost:5000}"),
            ResolvedValue::literal("http://localhost:5000")
        );
    }

    #[test]
    fn test_first_brace_span_wins() {
        let r = resolver(&[("A", "a-value"), ("B", "b-value")]);
        assert_eq!(r.resolve("${A}${B}"), ResolvedValue::literal("a-value"));
    }

    #[test]
    fn test_placeholder_replaces_whole_value() {
        // Text around the braces is discarded, not interpolated
        let r = resolver(&[("NAME", "value")]);
        assert_eq!(r.resolve("$pre{NAME}post"), ResolvedValue::literal("value"));
    }

    #[test]
    fn test_empty_body_is_unresolved() {
        let r = resolver(&[]);
        assert_eq!(
            r.resolve("${}"),
            ResolvedValue {
                value: String::new(),
                resolved: false,
            }
        );
    }

    #[test]
    #[serial]
    fn test_resolves_against_process_environment() {
        use crate::env::ProcessEnv;

        let r = Resolver::new(Arc::new(ProcessEnv));
        temp_env::with_vars(
            [("_CLOUDCONFIG_TEST_RESOLVER_VAR", Some("from-process"))],
            || {
                assert_eq!(
                    r.resolve("${_CLOUDCONFIG_TEST_RESOLVER_VAR}"),
                    ResolvedValue::literal("from-process")
                );
            },
        );
    }
}
