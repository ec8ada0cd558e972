use anyhow::{Context, Result, bail};

use conf_regroup::CanonConfig;
use conf_regroup::pipeline::{Stage, verify_stage};

use crate::cli::VerifyArgs;
use crate::config::build_canon_config;
use crate::display::{Context as DisplayContext, Progress, print_grouping_report, problem_summary};

pub fn run_verify(args: VerifyArgs, ctx: DisplayContext) -> Result<()> {
    let canon = build_canon_config(&args.canon, CanonConfig::default())
        .build()
        .context("Invalid structure key options")?;

    let mut progress = Progress::new(ctx.interactive, 1);
    let step = Stage::Verify.to_string();

    progress.step(&step);
    let report = verify_stage(&args.input, args.source.as_deref(), &canon)
        .with_context(|| format!("Failed to check '{}'", args.input.display()))?;

    if !report.is_clean() {
        progress.warn_step(&step, &[]);
        if ctx.interactive {
            print_grouping_report(&report);
        }
        bail!(
            "'{}' is not cleanly grouped: {}",
            args.input.display(),
            problem_summary(&report)
        );
    }

    progress.complete_step(&step, &[format!("{} structures contiguous", report.structures)]);
    if ctx.interactive {
        print_grouping_report(&report);
    }
    progress.finish("Verification complete");
    Ok(())
}
