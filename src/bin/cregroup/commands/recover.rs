use anyhow::{Context, Result};

use conf_regroup::pipeline::{Stage, recover_stage};

use crate::cli::RecoverArgs;
use crate::display::{Context as DisplayContext, Progress, print_recover_summary};

pub fn run_recover(args: RecoverArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 1);
    let step = Stage::Recover.to_string();

    progress.step(&step);
    let summary = recover_stage(&args.input, &args.titles, &args.output).with_context(|| {
        format!(
            "Failed to restore the order of '{}' from '{}'",
            args.input.display(),
            args.titles.display()
        )
    })?;
    progress.complete_step(&step, &[format!("{} records reordered", summary.records)]);

    if ctx.interactive {
        print_recover_summary(&summary);
    }

    progress.finish("Recovery complete");
    Ok(())
}
