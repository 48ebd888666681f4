use clap::Parser;
use std::ffi::OsString;

/// Exit status for a command line usage error (sysexits `EX_USAGE`).
pub const EX_USAGE: i32 = 64;

/// A utility to translate the written word.
///
/// `-p` is the only option; there is no `-h` or `-V`.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(
    name = "idiom",
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Seed the top box from the primary selection and translate it on startup
    #[arg(short = 'p', long = "primary")]
    pub primary: bool,
}

impl Cli {
    /// Parses the process arguments, exiting with `EX_USAGE` on bad input.
    pub fn parse_or_exit() -> Self {
        Self::parse_from_or_exit(std::env::args_os())
    }

    pub fn parse_from_or_exit<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => {
                let _ = e.print();
                std::process::exit(EX_USAGE);
            }
        }
    }
}
