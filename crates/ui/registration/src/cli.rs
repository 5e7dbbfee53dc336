// src/cli.rs
use clap::{Args, Parser, Subcommand};

use crate::config::{Mode, Overrides};
use crate::domain::FormRecord;

#[derive(Parser, Debug)]
#[command(name = "registration", version, about = "Create your account from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Deployment mode (selects endpoint and transport)
    #[arg(long, value_enum, global = true)]
    pub mode: Option<Mode>,

    /// Public base URL used to build the production endpoint
    #[arg(long, value_name = "URL", global = true)]
    pub public_url: Option<String>,

    /// Talk to the real endpoint even outside production
    #[arg(long, global = true)]
    pub no_mock: bool,

    /// Colour theme (dark, high-contrast)
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 30.0)]
    pub frame_rate: f64,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run interactive TUI (default)
    Run,
    /// Submit a single registration without the TUI (scripts/smoke tests)
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

impl From<SubmitArgs> for FormRecord {
    fn from(args: SubmitArgs) -> Self {
        FormRecord::new(args.name, args.email, args.password, args.confirm_password)
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            mode: self.mode,
            public_url: self.public_url.clone(),
            no_mock: self.no_mock,
            theme: self.theme.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["registration", "--mode", "test"]);
        assert!(cli.cmd.is_none());
        assert_eq!(cli.overrides().mode, Some(Mode::Test));
    }

    #[test]
    fn submit_args_become_a_record() {
        let cli = Cli::parse_from([
            "registration",
            "submit",
            "--name",
            "Jo",
            "--email",
            "jo@x.com",
            "--password",
            "abc123",
            "--confirm-password",
            "abc123",
            "--no-mock",
        ]);
        let Some(Cmd::Submit(args)) = cli.cmd.as_ref() else {
            panic!("expected submit subcommand");
        };
        let record = FormRecord::from(args.clone());
        assert_eq!(record.confirm_password, "abc123");
        assert!(cli.overrides().no_mock);
    }
}
