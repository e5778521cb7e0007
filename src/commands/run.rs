//! Implementation of the `pit run` command.
//!
//! Wires the real collaborators (shell, git, start service) into a
//! [`Pipeline`] and runs every preset in order.

use super::plan::{build_plans, print_plans};
use crate::cli::{GlobalArgs, RunArgs};
use crate::context::RunContext;
use crate::error::{PitError, Result};
use crate::fs::{ensure_dir, remove_dir_if_exists};
use crate::pipeline::{Collaborators, Pipeline, PipelineSettings, RunReport};
use crate::preset::Preset;
use crate::process::ShellRunner;
use crate::provision::{StarterDownloader, StarterGenerator};
use crate::repo::GitRepositoryInitializer;
use crate::validate::ProjectValidator;
use crate::version::{LoggingVersionRewriter, PropertyVersionRewriter, VersionRewriter};
use tracing::{info, warn};

pub fn cmd_run(global: &GlobalArgs, args: RunArgs) -> Result<()> {
    let ctx = RunContext::resolve(global, args.tmp.as_deref())?;
    let presets = Preset::parse_all(&args.presets)?;

    if args.test {
        return print_plans(&build_plans(&presets, &ctx)?, false);
    }

    let port = args.port.unwrap_or(ctx.config.port);
    if port == 0 {
        return Err(PitError::UserError("port must be greater than 0".to_string()));
    }

    info!(
        presets = %args.presets.join(","),
        version = args.target_version.as_deref().unwrap_or("current"),
        tmp = %ctx.base_dir.display(),
        port,
        offline = args.offline,
        "starting run"
    );

    if args.clean {
        if args.offline {
            warn!("--clean removes the projects --offline would reuse");
        }
        if remove_dir_if_exists(&ctx.base_dir)? {
            info!("Removed {}", ctx.base_dir.display());
        }
    }
    ensure_dir(&ctx.base_dir)?;

    let config = &ctx.config;
    let runner = ShellRunner;
    let repository = GitRepositoryInitializer::new(config.git_identity());
    let generator = StarterGenerator::new(&config.generators, &runner, &repository);
    let downloader = StarterDownloader::new(&config.start_url, config.download_timeout());
    let validator = ProjectValidator::new(config, &runner);
    let property_rewriter = PropertyVersionRewriter::from_config(config);
    let versioner: &dyn VersionRewriter = if config.rewrite_versions {
        &property_rewriter
    } else {
        &LoggingVersionRewriter
    };

    let pipeline = Pipeline::new(
        Collaborators {
            generator: &generator,
            downloader: &downloader,
            repository: &repository,
            validator: &validator,
            versioner,
            runner: &runner,
        },
        PipelineSettings {
            base_dir: ctx.base_dir.clone(),
            offline: args.offline,
            target_version: args.target_version,
            port,
            mode: args.mode,
        },
    );

    let report = pipeline.run_all(&presets);
    print_summary(&report, &presets);
    report.into_result()
}

/// Presets after a fatal failure are listed as skipped.
fn print_summary(report: &RunReport, presets: &[Preset]) {
    println!();
    println!("Summary");
    println!("=======");
    for outcome in &report.outcomes {
        let status = match outcome.failing_phase() {
            None => "ok".to_string(),
            Some(phase) => format!("{} failed", phase),
        };
        println!("  {:30} {}", outcome.preset, status);
    }
    for preset in presets.iter().skip(report.outcomes.len()) {
        println!("  {:30} skipped", preset);
    }
}
