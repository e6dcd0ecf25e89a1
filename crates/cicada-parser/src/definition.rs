//! Pipeline definition document parser
//!
//! Decodes the raw bytes of a `.cicada.yaml` document into a
//! [`PipelineDefinition`]. The document has three top-level sections:
//!
//! ```yaml
//! trigger: action == 'opened'
//! params:
//!   - name: COMMIT_SHA
//!     value: hook.sha
//! tasks:
//!   - name: echo-commit-sha
//!     steps:
//!       - name: echo
//!         image: ubuntu
//!         script: |
//!           echo "$(params.COMMIT_SHA)"
//! ```
//!
//! Declaration order of tasks, steps, and bindings is preserved. All
//! expressions are parsed here so later evaluation can never hit a syntax
//! error.

use crate::error::{ParseError, Result};
use crate::expression::ExpressionParser;
use crate::yaml;
use cicada_core::ast::{ParamBinding, ParamDecl, PipelineDefinition, Step, Task, Trigger};
use serde_yaml::Value as YamlValue;
use std::collections::HashSet;

/// Pipeline definition parser
pub struct DefinitionParser;

impl DefinitionParser {
    /// Parse a definition document from raw bytes
    pub fn parse(bytes: &[u8]) -> Result<PipelineDefinition> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ParseError::MalformedDocument(format!("invalid UTF-8: {}", e)))?;
        Self::parse_str(text)
    }

    /// Parse a definition document from a string
    pub fn parse_str(text: &str) -> Result<PipelineDefinition> {
        let doc: YamlValue = serde_yaml::from_str(text)?;
        Self::parse_document(&doc)
    }

    fn parse_document(doc: &YamlValue) -> Result<PipelineDefinition> {
        if !doc.is_mapping() {
            return Err(ParseError::SchemaViolation {
                field: "document".to_string(),
                message: "expected a mapping at the top level".to_string(),
            });
        }

        let trigger_source = yaml::get_str(doc, "trigger")?;
        let expression = ExpressionParser::parse_trigger(&trigger_source)?;
        let trigger = Trigger {
            source: trigger_source,
            expression,
        };

        let param_bindings = match yaml::get_opt_sequence(doc, "params")? {
            Some(items) => Self::parse_bindings(items)?,
            None => Vec::new(),
        };

        let tasks = match yaml::get_opt_sequence(doc, "tasks")? {
            Some(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::parse_task(item, i))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(PipelineDefinition {
            trigger,
            param_bindings,
            tasks,
        })
    }

    fn parse_bindings(items: &[YamlValue]) -> Result<Vec<ParamBinding>> {
        let mut bindings = Vec::with_capacity(items.len());
        let mut seen = HashSet::new();

        for (i, item) in items.iter().enumerate() {
            let field = format!("params[{}]", i);
            if !item.is_mapping() {
                return Err(ParseError::SchemaViolation {
                    field,
                    message: "expected a mapping with 'name' and 'value'".to_string(),
                });
            }
            let name = yaml::get_str(item, "name")?;
            let source = yaml::get_str(item, "value")?;

            if !seen.insert(name.clone()) {
                return Err(ParseError::SchemaViolation {
                    field,
                    message: format!("duplicate parameter binding '{}'", name),
                });
            }

            let expression = ExpressionParser::parse_value_source(&source)?;
            bindings.push(ParamBinding {
                name,
                source,
                expression,
            });
        }

        Ok(bindings)
    }

    fn parse_task(item: &YamlValue, index: usize) -> Result<Task> {
        let field = format!("tasks[{}]", index);
        if !item.is_mapping() {
            return Err(ParseError::SchemaViolation {
                field,
                message: "expected a mapping".to_string(),
            });
        }

        let name = yaml::get_str(item, "name")?;

        let params = match yaml::get_opt_sequence(item, "params")? {
            Some(items) => items
                .iter()
                .map(|p| Self::parse_param_decl(p, &name))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let steps = match yaml::get_opt_sequence(item, "steps")? {
            Some(items) if !items.is_empty() => items
                .iter()
                .enumerate()
                .map(|(i, s)| Self::parse_step(s, &name, i))
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(ParseError::SchemaViolation {
                    field: format!("tasks[{}].steps", index),
                    message: format!("task '{}' has no steps", name),
                });
            }
        };

        Ok(Task {
            name,
            params,
            steps,
        })
    }

    fn parse_param_decl(item: &YamlValue, task: &str) -> Result<ParamDecl> {
        if !item.is_mapping() {
            return Err(ParseError::SchemaViolation {
                field: format!("task '{}' params", task),
                message: "expected a mapping with 'name'".to_string(),
            });
        }
        Ok(ParamDecl {
            name: yaml::get_str(item, "name")?,
            description: yaml::get_opt_str(item, "description")?,
        })
    }

    fn parse_step(item: &YamlValue, task: &str, index: usize) -> Result<Step> {
        let field = format!("task '{}' steps[{}]", task, index);
        if !item.is_mapping() {
            return Err(ParseError::SchemaViolation {
                field,
                message: "expected a mapping".to_string(),
            });
        }

        let name = yaml::get_opt_str(item, "name")?;
        let image = yaml::get_str(item, "image")?;
        let script = yaml::get_opt_str(item, "script")?;

        let command = match yaml::get_opt_sequence(item, "command")? {
            Some(items) => items
                .iter()
                .map(|v| {
                    v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                        yaml::wrong_type("command", "a sequence of strings", v)
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        // a step is a command or an inline script, never neither
        if command.is_empty() && script.is_none() {
            return Err(ParseError::SchemaViolation {
                field,
                message: "step needs either a command or a script".to_string(),
            });
        }

        Ok(Step {
            name,
            image,
            command,
            script,
        })
    }
}
