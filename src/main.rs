// SPDX-License-Identifier: MPL-2.0
use ragchat::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
RagChat - desktop client for a retrieval-augmented chat backend

USAGE:
  ragchat [OPTIONS]

OPTIONS:
  --lang <LOCALE>        Interface language (en-US, pt-BR, es)
  --server-url <URL>     Backend base URL (default: http://localhost:8080)
  --config-dir <DIR>     Directory holding settings.toml
  --data-dir <DIR>       Directory holding persisted state
  --i18n-dir <DIR>       Directory with .ftl files overriding the bundled ones
  -h, --help             Print this help

ENVIRONMENT:
  RAGCHAT_CONFIG_DIR, RAGCHAT_DATA_DIR, RUST_LOG
";

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        server_url: args.opt_value_from_str("--server-url")?,
        i18n_dir: args.opt_value_from_str("--i18n-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(flags)
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ragchat=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}
