use clap::Parser;
use wasm_bindgen::prelude::*;

pub use driver::*;
pub use storage::*;

mod driver;
mod storage;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Parses launch options from the page hash, e.g. `#-vv&--seed=42`.
fn launch_args() -> Option<Args> {
    use gloo::utils::window;

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => Some(args),
        Err(err) => {
            log::warn!("Ignoring launch arguments {:?}: {}", location_hash, err);
            None
        }
    }
}

pub(crate) fn launch_seed() -> Option<u64> {
    launch_args().and_then(|args| args.seed)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    if let Some(log_level) = launch_args().and_then(|args| args.verbose.log_level()) {
        if let Err(err) = console_log::init_with_level(log_level) {
            web_sys::console::warn_1(&format!("Error initializing logger: {}", err).into());
        }
    }

    log::debug!("Engine loaded, waiting for the shell");
}
