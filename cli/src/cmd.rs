pub mod fetch;
pub mod init;
pub mod run;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Directory for the testcase cache and build scratch dirs [default: .aoj-verify]
    #[arg(long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Fetch testcases of the annotated problem, then build and judge the program
    #[command(alias("r"))]
    Run(run::Args),

    /// Fetch testcases of the annotated problem into the cache
    Fetch(fetch::Args),

    /// Build and judge the program against already-fetched testcases
    #[command(alias("t"))]
    Test(test::Args),

    /// Create an example `aoj-verify.toml`
    Init(init::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Run(args) => run::exec(args, self).await,
            Fetch(args) => fetch::exec(args, self).await,
            Test(args) => test::exec(args, self).await,
            Init(args) => init::exec(args, self),
        }
    }
}
