use anyhow::{Context, Result, bail};

use conf_regroup::pipeline::{Stage, renumber_stage};

use crate::cli::RenumberArgs;
use crate::display::{Context as DisplayContext, Progress, print_renumber_summary};

pub fn run_renumber(args: RenumberArgs, ctx: DisplayContext) -> Result<()> {
    if args.prefix.is_empty() {
        bail!("Title prefix must not be empty");
    }

    let mut progress = Progress::new(ctx.interactive, 1);
    let step = Stage::Renumber.to_string();

    progress.step(&step);
    let summary = renumber_stage(&args.input, &args.output, &args.prefix)
        .with_context(|| format!("Failed to renumber '{}'", args.input.display()))?;
    progress.complete_step(&step, &[format!("Prefix: {}_", args.prefix)]);

    if ctx.interactive {
        print_renumber_summary(&summary);
    }

    progress.finish("Renumbering complete");
    Ok(())
}
