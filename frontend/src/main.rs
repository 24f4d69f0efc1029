//! Browser entry point: binds the page behaviors to the real DOM and
//! publishes the helpers other scripts call.

mod config;
mod globals;
mod storage;
mod web_env;

use std::rc::Rc;

use sitekit_shared::{SiteBehaviors, UiError};

use crate::web_env::WebEnvironment;

fn init_logging() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
}

fn run() -> Result<(), UiError> {
    let env = Rc::new(WebEnvironment::new()?);
    let config = config::load(env.document());
    let store = storage::open(env.window());
    let site = Rc::new(SiteBehaviors::install(Rc::clone(&env), store, config));
    globals::publish(env.window(), site)?;
    log::info!("page behaviors ready");
    Ok(())
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        log::error!("page behaviors failed to start: {err}");
    }
}
