/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::{io, process::ExitCode};

use env_logger::Env;
use log::{debug, error};
use mailbox_search::{cli::Cli, PathReporter, Result, Scanner};

fn main() -> ExitCode {
    let cli = Cli::from_args();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    debug!("Configuration: {:?}", config);

    let stdout = io::stdout();
    let mut reporter = PathReporter::new(stdout.lock());
    Scanner::new(&config).scan(&mut reporter)?;

    Ok(())
}
