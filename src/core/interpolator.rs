// src/core/interpolator.rs

use crate::models::Variables;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    // Escapes first, then a complete placeholder, then any stray brace.
    static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("placeholder pattern is valid");
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error(
        "Unknown variable '{{{name}}}' in command token '{token}'. Available variables: {}.",
        Variables::KEYS.join(", ")
    )]
    UnknownVariable { name: String, token: String },
    #[error("Unterminated '{{' in command token '{token}'. Use '{{{{' for a literal brace.")]
    UnterminatedPlaceholder { token: String },
    #[error("Unmatched '}}' in command token '{token}'. Use '}}}}' for a literal brace.")]
    UnmatchedClosingBrace { token: String },
}

/// Substitutes `{name}` placeholders with values from a fixed variable set.
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    variables: &'a Variables,
}

impl<'a> Interpolator<'a> {
    pub fn new(variables: &'a Variables) -> Self {
        Self { variables }
    }

    /// Expands every placeholder in a single token.
    ///
    /// `{{` and `}}` produce literal braces. Any other brace that is not part of
    /// a `{name}` placeholder, and any name that is not a known variable, is an error.
    pub fn expand_string(&self, token: &str) -> Result<String, TemplateError> {
        let mut expanded = String::with_capacity(token.len());
        let mut last_end = 0;

        for captures in PLACEHOLDER_RE.captures_iter(token) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            expanded.push_str(token.get(last_end..whole.start()).unwrap_or_default());
            last_end = whole.end();

            match (whole.as_str(), captures.get(1)) {
                ("{{", _) => expanded.push('{'),
                ("}}", _) => expanded.push('}'),
                (_, Some(name)) => {
                    let value = self.variables.get(name.as_str()).ok_or_else(|| {
                        TemplateError::UnknownVariable {
                            name: name.as_str().to_string(),
                            token: token.to_string(),
                        }
                    })?;
                    expanded.push_str(&value.to_string());
                }
                ("{", None) => {
                    return Err(TemplateError::UnterminatedPlaceholder {
                        token: token.to_string(),
                    });
                }
                _ => {
                    return Err(TemplateError::UnmatchedClosingBrace {
                        token: token.to_string(),
                    });
                }
            }
        }

        expanded.push_str(token.get(last_end..).unwrap_or_default());
        Ok(expanded)
    }

    /// Expands each token of a command. Fails on the first bad token.
    pub fn expand_command(&self, command: &[String]) -> Result<Vec<String>, TemplateError> {
        command
            .iter()
            .map(|token| self.expand_string(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_variables() -> Variables {
        Variables {
            line: 5,
            column: 10,
            filename: "/repo/src/a.py".to_string(),
            directory: "/repo/src".to_string(),
            project: "/repo".to_string(),
            any_project: String::new(),
            package: String::new(),
            git: "/repo".to_string(),
        }
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_expands_goto_command() {
        let vars = sample_variables();
        let command = strings(&["code", "-g", "{filename}:{line}:{column}"]);
        let expanded = Interpolator::new(&vars).expand_command(&command).unwrap();
        assert_eq!(expanded, strings(&["code", "-g", "/repo/src/a.py:5:10"]));
    }

    #[test]
    fn test_tokens_without_placeholders_are_untouched() {
        let vars = sample_variables();
        let interpolator = Interpolator::new(&vars);
        assert_eq!(
            interpolator.expand_string("--new-window").unwrap(),
            "--new-window"
        );
        assert_eq!(interpolator.expand_string("").unwrap(), "");
    }

    #[test]
    fn test_unresolved_anchor_expands_to_empty_string() {
        let vars = sample_variables();
        let expanded = Interpolator::new(&vars)
            .expand_string("[{package}]")
            .unwrap();
        assert_eq!(expanded, "[]");
    }

    #[test]
    fn test_unknown_variable_is_an_error() {
        let vars = sample_variables();
        let err = Interpolator::new(&vars)
            .expand_string("{filname}")
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownVariable {
                name: "filname".to_string(),
                token: "{filname}".to_string(),
            }
        );
        assert!(err.to_string().contains("filename"));
    }

    #[test]
    fn test_unknown_variable_aborts_whole_command() {
        let vars = sample_variables();
        let command = strings(&["subl", "{unknown}", "{filename}"]);
        assert!(Interpolator::new(&vars).expand_command(&command).is_err());
    }

    #[test]
    fn test_double_braces_are_literal() {
        let vars = sample_variables();
        let expanded = Interpolator::new(&vars)
            .expand_string("{{\"line\": {line}}}")
            .unwrap();
        assert_eq!(expanded, "{\"line\": 5}");
    }

    #[test]
    fn test_stray_braces_are_rejected() {
        let vars = sample_variables();
        let interpolator = Interpolator::new(&vars);
        assert!(matches!(
            interpolator.expand_string("{line"),
            Err(TemplateError::UnterminatedPlaceholder { .. })
        ));
        assert!(matches!(
            interpolator.expand_string("line}"),
            Err(TemplateError::UnmatchedClosingBrace { .. })
        ));
    }

    #[test]
    fn test_expansion_is_repeatable() {
        let vars = sample_variables();
        let command = strings(&["idea", "{project}", "--line", "{line}", "{filename}"]);
        let interpolator = Interpolator::new(&vars);
        let first = interpolator.expand_command(&command).unwrap();
        let second = interpolator.expand_command(&command).unwrap();
        assert_eq!(first, second);
    }
}
