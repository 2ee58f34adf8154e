pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use css0_core::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Decode {
            archive,
            out,
            strict_checksum,
            keep_intermediate,
        } => handlers::handle_decode(archive, out, strict_checksum, keep_intermediate),
        Commands::Build {
            css0,
            input,
            out,
            merge,
            scale,
            strict_checksum,
            ignore_invalid_target,
        } => handlers::handle_build(
            css0,
            input,
            out,
            merge,
            scale,
            strict_checksum,
            ignore_invalid_target,
        ),
        Commands::List { highscores } => handlers::handle_list(highscores),
        Commands::Verify { archive } => handlers::handle_verify(archive),
    }
}
