//! Specification compiler
//!
//! Merges the parsed task graph, the resolved parameters, the source
//! descriptor, and the workspace identifier into a complete
//! [`ExecutionSpec`]. The compiler is a total, side-effect-free function:
//! the same four inputs always produce byte-identical output, so a caller
//! can safely retry around it.

use crate::error::{CompileError, Result};
use crate::params::ResolvedParams;
use cicada_core::ast::{PipelineDefinition, Step, Task};
use cicada_core::execution::{
    ExecutionSpec, ParamSpec, ParamType, StepSpec, TaskSpec, WorkspaceBinding,
};
use cicada_core::SourceDescriptor;

/// Name of the synthesized checkout task, always at index 0
pub const CHECKOUT_TASK_NAME: &str = "source-checkout";

/// Name of the checkout task's single step
pub const CHECKOUT_STEP_NAME: &str = "clone";

/// Logical name of the shared workspace
pub const WORKSPACE_NAME: &str = "source";

const PARAM_REF_PREFIX: &str = "$(params.";

/// Compiler options
///
/// Everything that was a process-wide constant in earlier designs is
/// explicit configuration here, so one process can compile for multiple
/// tenants with different settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOptions {
    /// Image the synthesized checkout step runs in
    pub checkout_image: String,

    /// Path the workspace is mounted at inside task containers
    pub workspace_mount_path: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            checkout_image: "alpine/git".to_string(),
            workspace_mount_path: "/workspace/source".to_string(),
        }
    }
}

/// The specification compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompilerOptions,
}

impl Compiler {
    /// Create a compiler with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }

    /// Compile a definition into an execution specification.
    ///
    /// For a definition with tasks, the output's first task is the
    /// synthesized checkout task bound to `source`; the definition's own
    /// tasks follow in declaration order with every `$(params.NAME)`
    /// reference substituted. A definition with zero tasks compiles to a
    /// specification with no executable work.
    pub fn compile(
        &self,
        definition: &PipelineDefinition,
        params: &ResolvedParams,
        source: &SourceDescriptor,
        workspace_id: &str,
    ) -> Result<ExecutionSpec> {
        let mut tasks = Vec::with_capacity(definition.tasks.len() + 1);
        if !definition.tasks.is_empty() {
            tasks.push(self.checkout_task(source));
            for task in &definition.tasks {
                tasks.push(self.compile_task(task, params)?);
            }
        }

        let param_specs = params
            .iter()
            .map(|(name, value)| ParamSpec {
                name: name.to_string(),
                param_type: ParamType::infer(value),
                value: value.clone(),
                description: definition
                    .declared_param(name)
                    .and_then(|decl| decl.description.clone()),
            })
            .collect();

        tracing::debug!(
            tasks = tasks.len(),
            params = params.len(),
            "definition compiled"
        );

        Ok(ExecutionSpec {
            params: param_specs,
            tasks,
            workspace: WorkspaceBinding {
                name: WORKSPACE_NAME.to_string(),
                volume: workspace_id.to_string(),
                mount_path: self.options.workspace_mount_path.clone(),
            },
        })
    }

    fn checkout_task(&self, source: &SourceDescriptor) -> TaskSpec {
        TaskSpec {
            name: CHECKOUT_TASK_NAME.to_string(),
            steps: vec![StepSpec {
                name: CHECKOUT_STEP_NAME.to_string(),
                image: self.options.checkout_image.clone(),
                command: vec![
                    "git-init".to_string(),
                    "-url".to_string(),
                    source.repo_url.clone(),
                    "-revision".to_string(),
                    source.revision.clone(),
                    "-path".to_string(),
                    self.options.workspace_mount_path.clone(),
                ],
                script: None,
            }],
        }
    }

    fn compile_task(&self, task: &Task, params: &ResolvedParams) -> Result<TaskSpec> {
        let steps = task
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.compile_step(step, i, params))
            .collect::<Result<Vec<_>>>()?;

        Ok(TaskSpec {
            name: task.name.clone(),
            steps,
        })
    }

    fn compile_step(&self, step: &Step, index: usize, params: &ResolvedParams) -> Result<StepSpec> {
        let command = step
            .command
            .iter()
            .map(|arg| substitute(arg, params))
            .collect::<Result<Vec<_>>>()?;

        let script = step
            .script
            .as_deref()
            .map(|body| substitute(body, params))
            .transpose()?;

        Ok(StepSpec {
            name: step
                .name
                .clone()
                .unwrap_or_else(|| format!("step-{}", index)),
            image: step.image.clone(),
            command,
            script,
        })
    }
}

/// Replace every `$(params.NAME)` reference in `text` with its resolved
/// value. A reference to a name the resolver did not produce is fatal: an
/// unsubstituted placeholder must never pass through silently.
fn substitute(text: &str, params: &ResolvedParams) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(PARAM_REF_PREFIX) {
        out.push_str(&rest[..start]);
        let after = &rest[start + PARAM_REF_PREFIX.len()..];
        let end = after.find(')').ok_or_else(|| {
            let name: String = after
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            CompileError::UnresolvedParameter {
                name,
                message: "unterminated parameter reference".to_string(),
            }
        })?;
        let name = &after[..end];

        match params.get(name) {
            Some(value) => out.push_str(&value.render()),
            None => {
                return Err(CompileError::UnresolvedParameter {
                    name: name.to_string(),
                    message: "referenced but not bound in the definition".to_string(),
                });
            }
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::resolve;
    use cicada_core::EventContext;
    use cicada_parser::DefinitionParser;

    const EXAMPLE: &str = r#"
trigger: action == 'opened'
params:
  - name: COMMIT_SHA
    value: hook.sha
tasks:
  - name: echo-commit-sha
    params:
      - name: COMMIT_SHA
        description: the SHA for the pull_request
    steps:
      - name: echo
        image: ubuntu
        script: |
          #!/usr/bin/env bash
          echo "$(params.COMMIT_SHA)"
"#;

    fn context() -> EventContext {
        EventContext::builder()
            .string("action", "opened")
            .string("hook.sha", "ec26c3e57ca3a959ca5aad62de7213c562f8c821")
            .build()
    }

    fn compile_example() -> ExecutionSpec {
        let definition = DefinitionParser::parse_str(EXAMPLE).unwrap();
        let params = resolve(&definition.param_bindings, &context()).unwrap();
        let source = SourceDescriptor::new(
            "https://github.com/Codertocat/Hello-World.git",
            "ec26c3e57ca3a959ca5aad62de7213c562f8c821",
        );
        Compiler::new()
            .compile(&definition, &params, &source, "volume-1")
            .unwrap()
    }

    #[test]
    fn test_checkout_task_is_first() {
        let spec = compile_example();
        assert_eq!(spec.tasks.len(), 2);
        assert_eq!(spec.tasks[0].name, CHECKOUT_TASK_NAME);

        let clone = &spec.tasks[0].steps[0];
        assert_eq!(clone.name, CHECKOUT_STEP_NAME);
        assert_eq!(
            clone.command,
            vec![
                "git-init",
                "-url",
                "https://github.com/Codertocat/Hello-World.git",
                "-revision",
                "ec26c3e57ca3a959ca5aad62de7213c562f8c821",
                "-path",
                "/workspace/source",
            ]
        );
    }

    #[test]
    fn test_parameter_substitution_in_script() {
        let spec = compile_example();
        let script = spec.tasks[1].steps[0].script.as_deref().unwrap();
        assert!(script.contains("echo \"ec26c3e57ca3a959ca5aad62de7213c562f8c821\""));
        assert!(!script.contains("$(params"));
    }

    #[test]
    fn test_param_declarations_carry_type_and_description() {
        let spec = compile_example();
        assert_eq!(spec.params.len(), 1);
        assert_eq!(spec.params[0].name, "COMMIT_SHA");
        assert_eq!(spec.params[0].param_type, ParamType::String);
        assert_eq!(
            spec.params[0].description.as_deref(),
            Some("the SHA for the pull_request")
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let first = serde_json::to_vec(&compile_example()).unwrap();
        let second = serde_json::to_vec(&compile_example()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_three_tasks_compile_to_four() {
        let doc = r#"
trigger: "true"
tasks:
  - name: one
    steps:
      - image: alpine
        command: [echo, one]
  - name: two
    steps:
      - image: alpine
        command: [echo, two]
  - name: three
    steps:
      - image: alpine
        command: [echo, three]
"#;
        let definition = DefinitionParser::parse_str(doc).unwrap();
        let params = ResolvedParams::default();
        let source = SourceDescriptor::new("https://example.com/repo.git", "abc123");
        let spec = Compiler::new()
            .compile(&definition, &params, &source, "volume-1")
            .unwrap();

        assert_eq!(spec.task_count(), 4);
        let names: Vec<_> = spec.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec![CHECKOUT_TASK_NAME, "one", "two", "three"]);
    }

    #[test]
    fn test_zero_task_definition_compiles_to_no_work() {
        let definition = DefinitionParser::parse_str("trigger: \"true\"").unwrap();
        let spec = Compiler::new()
            .compile(
                &definition,
                &ResolvedParams::default(),
                &SourceDescriptor::new("https://example.com/repo.git", "abc123"),
                "volume-1",
            )
            .unwrap();
        assert!(!spec.has_work());
    }

    #[test]
    fn test_unbound_reference_is_fatal() {
        let doc = r#"
trigger: "true"
tasks:
  - name: broken
    steps:
      - image: alpine
        command: [echo, "$(params.MISSING)"]
"#;
        let definition = DefinitionParser::parse_str(doc).unwrap();
        let err = Compiler::new()
            .compile(
                &definition,
                &ResolvedParams::default(),
                &SourceDescriptor::new("https://example.com/repo.git", "abc123"),
                "volume-1",
            )
            .unwrap_err();
        match err {
            CompileError::UnresolvedParameter { name, .. } => assert_eq!(name, "MISSING"),
            other => panic!("Expected UnresolvedParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_reference_is_fatal() {
        let resolved = ResolvedParams::default();
        let err = substitute("echo $(params.SHA", &resolved).unwrap_err();
        assert!(matches!(err, CompileError::UnresolvedParameter { .. }));
    }

    #[test]
    fn test_numeric_substitution_renders_without_fraction() {
        let ctx = EventContext::builder().number("hook.number", 2.0).build();
        let doc = r#"
trigger: "true"
params:
  - name: PR_NUMBER
    value: hook.number
tasks:
  - name: announce
    steps:
      - image: alpine
        command: [echo, "pr-$(params.PR_NUMBER)"]
"#;
        let definition = DefinitionParser::parse_str(doc).unwrap();
        let params = resolve(&definition.param_bindings, &ctx).unwrap();
        let spec = Compiler::new()
            .compile(
                &definition,
                &params,
                &SourceDescriptor::new("https://example.com/repo.git", "abc123"),
                "volume-1",
            )
            .unwrap();

        assert_eq!(spec.tasks[1].steps[0].command[1], "pr-2");
        assert_eq!(spec.params[0].param_type, ParamType::Number);
    }

    #[test]
    fn test_custom_options() {
        let compiler = Compiler::with_options(CompilerOptions {
            checkout_image: "registry.internal/git-init:v2".to_string(),
            workspace_mount_path: "/src".to_string(),
        });
        let definition = DefinitionParser::parse_str(
            "trigger: \"true\"\ntasks:\n  - name: t\n    steps:\n      - image: alpine\n        command: [\"true\"]\n",
        )
        .unwrap();
        let spec = compiler
            .compile(
                &definition,
                &ResolvedParams::default(),
                &SourceDescriptor::new("https://example.com/repo.git", "abc123"),
                "volume-9",
            )
            .unwrap();

        assert_eq!(spec.tasks[0].steps[0].image, "registry.internal/git-init:v2");
        assert!(spec.tasks[0].steps[0].command.contains(&"/src".to_string()));
        assert_eq!(spec.workspace.mount_path, "/src");
        assert_eq!(spec.workspace.volume, "volume-9");
    }
}
