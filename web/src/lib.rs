use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;
mod config;
mod countdown;
mod creature;
mod games;
mod landing;
mod roster;
mod theme;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Page to open
    #[arg(value_enum)]
    page: Option<app::Page>,

    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Creature API base URL instead of the one in event.toml
    #[arg(long)]
    api_base: Option<String>,
}

impl Args {
    /// Parses a location hash such as `#gauntlet&-vv&--seed=42`.
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        let parts = hash.split(['#', '&']).filter(|part| !part.is_empty());
        Self::try_parse_from(std::iter::once("codegate").chain(parts))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window().location().hash().unwrap_or_default();
    let args = Args::from_hash(&location_hash).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring hash arguments: {}", err));
        Args::parse_from(["codegate"])
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("failed to initialize logger: {}", err));
        }
    }
    log::debug!("args: {:?}", args);

    let Some(root) = document().get_element_by_id("app") else {
        log::error!("could not find id=\"app\" element");
        return;
    };

    let props = app::AppProps {
        page: args.page.unwrap_or_default(),
        seed: args.seed.unwrap_or_else(utils::js_random_seed),
        api_base: args.api_base.map(Into::into),
    };

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_and_flags_from_hash() {
        let args = Args::from_hash("#gauntlet&-vv&--seed=42&--api-base=http://localhost:8080").unwrap();

        assert_eq!(args.page, Some(app::Page::Gauntlet));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.api_base.as_deref(), Some("http://localhost:8080"));
        assert!(args.verbose.log_level().is_some());
    }

    #[test]
    fn empty_hash_uses_defaults() {
        for hash in ["", "#", "#&"] {
            let args = Args::from_hash(hash).unwrap();
            assert_eq!(args.page, None);
            assert_eq!(args.seed, None);
        }
    }

    #[test]
    fn unknown_page_is_an_error() {
        assert!(Args::from_hash("#sponsors").is_err());
    }
}
