use std::path::Path;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use minish::config::{Config, ConfigLoader};
use minish::repl;

fn load_config() -> Config {
    let Some(home) = std::env::var_os("HOME") else {
        return ConfigLoader::default_config();
    };
    let path = Path::new(&home).join(".minishrc");
    if !path.exists() {
        return ConfigLoader::default_config();
    }
    match ConfigLoader::load_from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("minish: {}: {}", path.display(), e);
            ConfigLoader::default_config()
        }
    }
}

fn main() {
    let _ = TermLogger::init(
        LevelFilter::Warn,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    repl::start(load_config());
}
