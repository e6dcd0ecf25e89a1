//! Pipeline definition AST
//!
//! The parsed, immutable representation of a `.cicada.yaml` document: the
//! trigger expression, the parameter bindings, and the task list. Declaration
//! order is preserved everywhere because it is execution order.

use super::expression::Expression;
use serde::{Deserialize, Serialize};

/// A parsed pipeline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    /// The trigger deciding whether an event launches a run
    pub trigger: Trigger,

    /// Parameter bindings, in declaration order
    pub param_bindings: Vec<ParamBinding>,

    /// The tasks to execute, in declaration order
    pub tasks: Vec<Task>,
}

/// The trigger expression, retained both as source text and as its
/// pre-parsed tree so syntax errors surface once per definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// The expression source text as written in the document
    pub source: String,

    /// The parsed expression
    pub expression: Expression,
}

/// A parameter binding: a name and the event-context expression it
/// resolves from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamBinding {
    /// Parameter name, unique within the definition
    pub name: String,

    /// The source expression text (a field path or a literal)
    pub source: String,

    /// The parsed source expression
    pub expression: Expression,
}

/// A single task in the definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task name
    pub name: String,

    /// Parameters the task declares, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDecl>,

    /// The task's steps, in declaration order (required, non-empty)
    pub steps: Vec<Step>,
}

/// A declared task parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single step: a container image with either a command or an inline
/// script body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Container image
    pub image: String,

    /// Command to run (required unless `script` is set)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    /// Inline script body (required unless `command` is set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl PipelineDefinition {
    /// Look up a declared parameter across all tasks by name
    pub fn declared_param(&self, name: &str) -> Option<&ParamDecl> {
        self.tasks
            .iter()
            .flat_map(|t| t.params.iter())
            .find(|p| p.name == name)
    }

    /// Look up a parameter binding by name
    pub fn binding(&self, name: &str) -> Option<&ParamBinding> {
        self.param_bindings.iter().find(|b| b.name == name)
    }
}

impl Task {
    /// Create a new task
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Add a step
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Add a declared parameter
    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

impl ParamDecl {
    /// Create a new declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Step {
    /// Create a command step
    pub fn command(image: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            name: None,
            image: image.into(),
            command,
            script: None,
        }
    }

    /// Create a script step
    pub fn script(image: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: None,
            image: image.into(),
            command: Vec::new(),
            script: Some(script.into()),
        }
    }

    /// Set the step name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;
    use crate::Value;

    fn sample_definition() -> PipelineDefinition {
        PipelineDefinition {
            trigger: Trigger {
                source: "action == 'opened'".to_string(),
                expression: Expression::binary(
                    Expression::field_access(vec!["action".to_string()]),
                    Operator::Eq,
                    Expression::literal(Value::String("opened".to_string())),
                ),
            },
            param_bindings: vec![ParamBinding {
                name: "COMMIT_SHA".to_string(),
                source: "hook.sha".to_string(),
                expression: Expression::field_access(vec![
                    "hook".to_string(),
                    "sha".to_string(),
                ]),
            }],
            tasks: vec![Task::new("echo-commit-sha")
                .with_param(ParamDecl::new("COMMIT_SHA").with_description("the SHA"))
                .with_step(
                    Step::script("ubuntu", "echo \"$(params.COMMIT_SHA)\"\n").named("echo"),
                )],
        }
    }

    #[test]
    fn test_declared_param_lookup() {
        let def = sample_definition();
        let decl = def.declared_param("COMMIT_SHA").unwrap();
        assert_eq!(decl.description.as_deref(), Some("the SHA"));
        assert!(def.declared_param("MISSING").is_none());
    }

    #[test]
    fn test_binding_lookup() {
        let def = sample_definition();
        assert_eq!(def.binding("COMMIT_SHA").unwrap().source, "hook.sha");
        assert!(def.binding("OTHER").is_none());
    }

    #[test]
    fn test_step_builders() {
        let step = Step::command("alpine", vec!["echo".to_string(), "hi".to_string()]);
        assert!(step.script.is_none());
        assert_eq!(step.command.len(), 2);

        let step = Step::script("ubuntu", "echo hi").named("greet");
        assert!(step.command.is_empty());
        assert_eq!(step.name.as_deref(), Some("greet"));
    }

    #[test]
    fn test_definition_serde_round_trip() {
        let def = sample_definition();
        let json = serde_json::to_string(&def).unwrap();
        let back: PipelineDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }
}
