//! Pull-request hook handling
//!
//! The orchestration path: fetch the definition at the event's head ref,
//! parse it, evaluate the trigger, resolve parameters, provision the
//! workspace, compile, and submit. Anything that means "no run" (missing
//! definition file, trigger did not fire, nothing to execute) returns
//! `Ok(None)` - a suppressed run is success, not failure.

use crate::config::HooksConfig;
use crate::error::Result;
use crate::event::PullRequestEvent;
use crate::runs::{RunRequest, RunSubmitter};
use crate::scm::ScmClient;
use crate::volumes::VolumeCreator;
use cicada_compiler::{params, trigger, Compiler};
use cicada_parser::DefinitionParser;
use uuid::Uuid;

/// Handles pull-request webhook events
pub struct HookHandler<S, V, R> {
    scm: S,
    volumes: V,
    runs: R,
    config: HooksConfig,
    compiler: Compiler,
}

impl<S, V, R> HookHandler<S, V, R>
where
    S: ScmClient,
    V: VolumeCreator,
    R: RunSubmitter,
{
    /// Create a new handler
    pub fn new(scm: S, volumes: V, runs: R, config: HooksConfig) -> Self {
        let compiler = Compiler::with_options(config.compiler.clone());
        Self {
            scm,
            volumes,
            runs,
            config,
            compiler,
        }
    }

    /// Get a reference to the source-control collaborator
    pub fn scm(&self) -> &S {
        &self.scm
    }

    /// Get a reference to the volume collaborator
    pub fn volumes(&self) -> &V {
        &self.volumes
    }

    /// Get a reference to the run-submission collaborator
    pub fn runs(&self) -> &R {
        &self.runs
    }

    /// Get a reference to the handler configuration
    pub fn config(&self) -> &HooksConfig {
        &self.config
    }

    /// Handle a pull-request event end to end.
    ///
    /// Returns the orchestrator's created-run resource, or `None` when no
    /// run should be launched for this event.
    pub async fn pull_request(
        &self,
        event: &PullRequestEvent,
    ) -> Result<Option<serde_json::Value>> {
        let repo = &event.repository.full_name;
        tracing::info!(repo = %repo, action = %event.action, "processing pull request hook");

        let content = match self
            .scm
            .file_contents(
                repo,
                &self.config.definition_path,
                &event.pull_request.head_ref,
            )
            .await
        {
            Ok(content) => content,
            Err(err) if err.is_not_found() => {
                tracing::info!(repo = %repo, "no pipeline definition found");
                return Ok(None);
            }
            Err(err) => {
                tracing::error!(repo = %repo, error = %err, "error fetching pipeline definition");
                return Err(err.into());
            }
        };

        let definition = DefinitionParser::parse(&content)?;
        let context = event.event_context();

        let decision = trigger::evaluate(&definition.trigger.expression, &context)?;
        for path in &decision.undefined {
            tracing::warn!(repo = %repo, path = %path, "trigger referenced undefined event field");
        }
        if !decision.fired {
            tracing::info!(repo = %repo, trigger = %definition.trigger.source, "trigger did not fire");
            return Ok(None);
        }

        if definition.tasks.is_empty() {
            tracing::info!(repo = %repo, "definition declares no tasks, skipping run");
            return Ok(None);
        }

        let resolved = params::resolve(&definition.param_bindings, &context)?;

        let volume = self.volumes.create_volume(&self.config.volume_size).await?;
        let spec = self
            .compiler
            .compile(&definition, &resolved, &event.source(), &volume.name)?;

        let name = format!("{}{}", self.config.run_name_prefix, Uuid::new_v4());
        let created = self
            .runs
            .submit_run(RunRequest {
                name: name.clone(),
                spec,
            })
            .await?;

        tracing::info!(repo = %repo, run = %name, "pipeline run created");
        Ok(Some(created))
    }
}
