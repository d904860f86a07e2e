use std::io::{self, Write};

use color_eyre::Result;
use tracing_subscriber::prelude::*;

use crate::{
    config::Config,
    state::{Flow, State},
};

#[macro_use]
extern crate tracing;

pub mod builtins;
pub mod cmd;
pub mod config;
pub mod input;
pub mod parse;
pub mod prelude;
pub mod process;
pub mod state;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    let (writer, _guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &config.log.directory,
        &config.log.file,
    ));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .init();

    color_eyre::install()?;

    trace!(?config, "starting");

    let tty = termion::is_tty(&io::stdout());
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut state = State::new(config);

    loop {
        state.render(&mut stdout, tty)?;

        let Some(line) = input::read_line(&mut stdin)? else {
            trace!("end of input");
            if tty {
                writeln!(stdout)?;
            }
            break;
        };

        if state.execute(&line) == Flow::Exit {
            break;
        }
    }

    Ok(())
}
