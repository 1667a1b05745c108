//! `css-hooks`: compile hook configurations and flatten style files.

use env_logger::{Builder, Env};
use log::error;
use std::env;
use std::io;
use std::process::exit;

use css_hooks_cli::{Command, run};

fn main() {
    let _log_init: Result<(), _> = Builder::from_env(Env::default().filter_or("RUST_LOG", "warn"))
        .is_test(false)
        .try_init();
    let mut args = env::args();
    let _prog_name: Option<String> = args.next();
    let result = Command::parse(args).and_then(|command| run(&command, &mut io::stdout().lock()));
    if let Err(err) = result {
        error!("error: {err:#}");
        exit(1);
    }
}
