//! Implementation of the `pit plan` command.

use crate::cli::{GlobalArgs, PlanArgs};
use crate::context::RunContext;
use crate::error::{PitError, Result};
use crate::plan::PresetPlan;
use crate::preset::Preset;

pub fn cmd_plan(global: &GlobalArgs, args: PlanArgs) -> Result<()> {
    let ctx = RunContext::resolve(global, args.tmp.as_deref())?;
    let presets = Preset::parse_all(&args.presets)?;
    let plans = build_plans(&presets, &ctx)?;
    print_plans(&plans, args.json)
}

pub(super) fn build_plans(presets: &[Preset], ctx: &RunContext) -> Result<Vec<PresetPlan>> {
    presets
        .iter()
        .map(|preset| PresetPlan::new(preset, &ctx.config, &ctx.base_dir))
        .collect()
}

pub(super) fn print_plans(plans: &[PresetPlan], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(plans)
            .map_err(|e| PitError::UserError(format!("failed to serialize plan: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    for (i, plan) in plans.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", plan);
    }
    Ok(())
}
