// SPDX-License-Identifier: MPL-2.0
use iced_turntable::app::{self, paths, Flags};
use iced_turntable::directory_scanner::{FrameDirectory, FALLBACK_PRODUCT_NAME};
use iced_turntable::logging;
use iced_turntable::media::DefaultFrameSource;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const HELP: &str = "\
iced_turntable - drag-to-rotate product viewer

USAGE:
  iced_turntable [OPTIONS] [URI ...]

OPTIONS:
  --name <product>      Product name (title and saved-state key)
  --dir <frames dir>    Show every image in a directory, sorted by file name
  --root <asset root>   Directory that root-relative URIs (/...) resolve against
  --data-dir <dir>      Where viewer state is saved
  --config-dir <dir>    Where settings.toml is read from
  -h, --help            Print this help

URIs may be file paths, file://, http(s):// or data:image/... URIs.
";

struct Args {
    name: Option<String>,
    dir: Option<PathBuf>,
    root: Option<PathBuf>,
    data_dir: Option<String>,
    config_dir: Option<String>,
    uris: Vec<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let name = args.opt_value_from_str("--name")?;
    let dir = args.opt_value_from_str("--dir")?;
    let root = args.opt_value_from_str("--root")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let uris = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();

    Ok(Some(Args {
        name,
        dir,
        root,
        data_dir,
        config_dir,
        uris,
    }))
}

fn main() -> ExitCode {
    logging::init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(args.data_dir, args.config_dir);

    let mut uris = args.uris;
    let mut product_name = args.name;
    if let Some(dir) = &args.dir {
        match FrameDirectory::scan(dir) {
            Ok(frames) => {
                tracing::info!(directory = %dir.display(), frames = frames.len(), "scanned frame directory");
                uris.extend(frames.uris());
                product_name.get_or_insert_with(|| frames.product_name());
            }
            Err(err) => {
                tracing::error!(directory = %dir.display(), error = %err, "cannot read frame directory");
                return ExitCode::FAILURE;
            }
        }
    }

    let source = match DefaultFrameSource::new(args.root) {
        Ok(source) => source,
        Err(err) => {
            tracing::error!(error = %err, "cannot create frame source");
            return ExitCode::FAILURE;
        }
    };

    let flags = Flags {
        product_name: product_name.unwrap_or_else(|| FALLBACK_PRODUCT_NAME.to_string()),
        uris,
        source: Arc::new(source),
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}
