use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "cregroup",
    about = "Regroup split conformer sets in multi-record SD files",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find structures whose conformers are split and write redo/good title lists
    #[command(visible_alias = "d")]
    Detect(DetectArgs),

    /// Copy the records named in a title list, keeping source order
    #[command(visible_alias = "x")]
    Extract(ExtractArgs),

    /// Restore the title-list order of a re-extracted SD file
    Recover(RecoverArgs),

    /// Concatenate two SD files byte for byte
    Concat(ConcatArgs),

    /// Retitle records sequentially as PREFIX_1 .. PREFIX_N
    Renumber(RenumberArgs),

    /// Check that every structure is contiguous and titles are unique,
    /// optionally against the original file
    Verify(VerifyArgs),

    /// Run the whole workflow from an input file or a TOML config
    #[command(visible_alias = "r")]
    Run(RunArgs),
}

/// Options accepted by every command.
#[derive(Args)]
pub struct GlobalOptions {
    /// Suppress banner, progress and tables (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// How structure keys are computed.
#[derive(Args)]
#[command(next_help_heading = "Structure Keys")]
pub struct CanonOptions {
    /// Key method (defaults to graph, or tag when --tag is given)
    #[arg(long = "canon", value_name = "METHOD")]
    pub method: Option<CanonMethod>,

    /// SD data item holding a precomputed key (tag method)
    #[arg(long, value_name = "NAME")]
    pub tag: Option<String>,

    /// Ignore stereo parities and wedge bonds
    #[arg(long)]
    pub no_stereo: bool,

    /// Ignore formal charges
    #[arg(long)]
    pub no_charges: bool,

    /// Fold explicit hydrogens into their heavy atoms
    #[arg(long)]
    pub no_hydrogens: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CanonMethod {
    /// Canonical hash of the connection table
    Graph,
    /// Value of an SD data item
    Tag,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Input SD file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output list of titles to regroup
    #[arg(long, value_name = "FILE", default_value = "titles_redo.txt")]
    pub redo: PathBuf,

    /// Output list of titles already grouped
    #[arg(long, value_name = "FILE", default_value = "titles_good.txt")]
    pub good: PathBuf,

    #[command(flatten)]
    pub canon: CanonOptions,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Source SD file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Title list, one per line
    #[arg(short, long, value_name = "FILE")]
    pub titles: PathBuf,

    /// Output SD file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct RecoverArgs {
    /// SD file whose records are out of order
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Title list in the desired order
    #[arg(short, long, value_name = "FILE")]
    pub titles: PathBuf,

    /// Output SD file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ConcatArgs {
    /// File written first
    #[arg(value_name = "FIRST")]
    pub first: PathBuf,

    /// File appended after FIRST
    #[arg(value_name = "SECOND")]
    pub second: PathBuf,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct RenumberArgs {
    /// Input SD file
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output SD file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Title prefix
    #[arg(long, value_name = "PREFIX", default_value = "full")]
    pub prefix: String,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// SD file to check
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Original SD file; also check that no conformer was lost or repeated
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    #[command(flatten)]
    pub canon: CanonOptions,
}

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input SD file (overrides the config)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for intermediate and output files (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Title prefix for the final renumbering (overrides the config)
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    #[command(flatten)]
    pub canon: CanonOptions,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_is_counted_after_subcommand() {
        let cli = Cli::try_parse_from(["cregroup", "verify", "-i", "a.sdf", "-vv"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert!(!cli.global.quiet);
    }

    #[test]
    fn verify_takes_optional_source() {
        let cli =
            Cli::try_parse_from(["cregroup", "verify", "-i", "out.sdf", "-s", "in.sdf"]).unwrap();
        let Command::Verify(args) = cli.command else {
            panic!("expected verify command");
        };
        assert_eq!(args.source, Some(PathBuf::from("in.sdf")));
    }

    #[test]
    fn run_accepts_input_without_config() {
        let cli = Cli::try_parse_from(["cregroup", "run", "-i", "a.sdf", "--tag", "SMILES"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.config.is_none());
        assert_eq!(args.input, Some(PathBuf::from("a.sdf")));
        assert_eq!(args.canon.tag.as_deref(), Some("SMILES"));
    }
}
