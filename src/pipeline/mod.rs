//! File-level stages of the regrouping workflow.
//!
//! Each stage reads its inputs from disk, calls into [`crate::regroup`], and
//! writes its outputs, so stages can be run one at a time (as the `cregroup`
//! subcommands do) or chained with [`run_all`]:
//!
//! 1. [`detect_stage`]: input SD file to `redo` / `good` title lists.
//! 2. [`extract_stage`]: twice, once per title list.
//! 3. [`recover_stage`]: put the extracted `redo` records back in grouped order.
//! 4. [`concat_stage`]: `good` records followed by the regrouped ones.
//! 5. [`renumber_stage`]: sequential titles over the combined file.
//! 6. [`verify_stage`]: check the result is grouped, uniquely titled, and
//!    holds exactly the conformers of the input.

mod config;
mod error;
mod stages;

pub use config::{PipelineConfig, StageFiles};
pub use error::Error;
pub use stages::{
    ConcatSummary, DetectSummary, ExtractSummary, RecoverSummary, RenumberSummary, RunSummary,
    Stage, concat_stage, detect_stage, extract_stage, recover_stage, renumber_stage, run_all,
    run_all_with, verify_stage,
};
