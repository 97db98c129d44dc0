// SPDX-License-Identifier: MPL-2.0
use iced_toaster::app::{self, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
iced_toaster: toast notification playground

USAGE:
  iced_toaster [OPTIONS]

OPTIONS:
  --config-dir <DIR>    Directory holding settings.toml
  --position <POS>      top-left, top-center, top-right,
                        bottom-left, bottom-center or bottom-right
  --theme <MODE>        light, dark or system
  -h, --help            Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unknown arguments");
    }

    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        position: args.opt_value_from_str("--position")?,
        theme: args.opt_value_from_str("--theme")?,
    })
}
