use anyhow::{Context, Result};

use conf_regroup::pipeline::{Stage, concat_stage};

use crate::cli::ConcatArgs;
use crate::display::{Context as DisplayContext, Progress, print_concat_summary};

pub fn run_concat(args: ConcatArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 1);
    let step = Stage::Concat.to_string();

    progress.step(&step);
    let summary = concat_stage(&args.first, &args.second, &args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    progress.complete_step(&step, &[]);

    if ctx.interactive {
        print_concat_summary(&summary);
    }

    progress.finish("Concatenation complete");
    Ok(())
}
