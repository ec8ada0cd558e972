mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{
    print_concat_summary, print_detect_summary, print_extract_summary, print_grouping_report,
    print_recover_summary, print_renumber_summary, print_split_groups, problem_summary,
};

/// Whether banner, spinners and tables go to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    /// Interactive only when stderr is a terminal and `--quiet` is unset.
    pub fn new(quiet: bool) -> Self {
        Self {
            interactive: !quiet && crate::io::stderr_is_tty(),
        }
    }
}
