//! `site-provisioner` binary
//!
//! Exit codes: 0 when the workflow succeeded, 1 when it finished with errors, 2 on a fault
//! (bad configuration or input, aborted workflow).

mod cli;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use site_provisioner_core::{
    CoreError, DomainService, ProvisionerConfig, ProvisioningSaga, ServiceContext,
    SiteBootstrapService, WorkflowRequest,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_INCOMPLETE: u8 = 1;
const EXIT_FAULT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAULT)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config =
        ProvisionerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Provision {
            domain,
            years,
            no_whois_guard,
            project,
        } => {
            let project_id = match project {
                Some(id) => id,
                None => config.require_project()?.to_string(),
            };
            let request = WorkflowRequest::new(domain)
                .with_years(years)
                .with_whois_guard(!no_whois_guard);
            provision(&config, &project_id, request, cli.json).await
        }
        Command::Check { domain } => {
            let ctx = Arc::new(ServiceContext::from_config(&config, None)?);
            let availability = DomainService::new(ctx).check_availability(&domain).await?;
            if cli.json {
                println!("{}", output::json(&availability)?);
            } else {
                println!("{}", output::availability(&availability));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Bootstrap {
            name,
            private,
            domain,
        } => {
            config.require_github()?;
            let ctx = Arc::new(ServiceContext::from_config(&config, None)?);
            let outcome = SiteBootstrapService::new(ctx)
                .bootstrap(&name, private)
                .await?;
            if cli.json {
                println!("{}", output::json(&outcome)?);
            } else {
                println!("{}", output::bootstrap(&outcome));
            }

            match domain {
                Some(domain) => {
                    provision(&config, &outcome.project.id, WorkflowRequest::new(domain), cli.json)
                        .await
                }
                None => Ok(ExitCode::SUCCESS),
            }
        }
    }
}

async fn provision(
    config: &ProvisionerConfig,
    project_id: &str,
    request: WorkflowRequest,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let ctx = Arc::new(ServiceContext::from_config(config, Some(project_id))?);
    let saga = ProvisioningSaga::new(ctx, config.workflow.clone());

    match saga.run(request).await {
        Ok(result) => {
            if json {
                println!("{}", output::json(&result)?);
            } else {
                print!("{}", output::workflow(&result));
            }
            Ok(if result.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_INCOMPLETE)
            })
        }
        Err(CoreError::WorkflowAborted {
            reason,
            compensation,
        }) => {
            if json {
                let body = serde_json::json!({
                    "aborted": true,
                    "reason": reason,
                    "compensation": compensation,
                });
                println!("{}", output::json(&body)?);
            } else {
                eprint!("{}", output::aborted(&reason, &compensation));
            }
            Ok(ExitCode::from(EXIT_FAULT))
        }
        Err(e) => Err(e.into()),
    }
}
