// SPDX-License-Identifier: MPL-2.0
use eco_waste::app::{self, Flags};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `eco_waste=debug`.
const LOG_ENV: &str = "ECO_WASTE_LOG";

const HELP: &str = "\
EcoWaste - guided waste-collection capture

USAGE:
  eco_waste [OPTIONS]

OPTIONS:
  -h, --help              Print this help
      --lang <LOCALE>     Interface language (e.g. en-US, hi)
      --config-dir <DIR>  Directory holding settings.toml
      --data-dir <DIR>    Directory holding state.cbor

ENVIRONMENT:
  ECO_WASTE_LOG           Log filter (default: info)
  ECO_WASTE_CONFIG_DIR    Config directory when --config-dir is absent
  ECO_WASTE_DATA_DIR      Data directory when --data-dir is absent
";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    init_logging();

    let flags = Flags {
        lang: read_option(&mut args, "--lang"),
        config_dir: read_option(&mut args, "--config-dir"),
        data_dir: read_option(&mut args, "--data-dir"),
    };

    let unused = args.finish();
    if !unused.is_empty() {
        tracing::warn!(?unused, "ignoring unknown arguments");
    }

    app::run(flags)
}

fn read_option(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(%err, option = key, "ignoring invalid argument");
            None
        }
    }
}
