use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use thiserror::Error;

use crate::symtab::Backend;

#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    pub prompt2: String,
    pub symtab_backend: Backend,
    pub token_buf_init: usize,
    pub token_buf_max: usize,
    pub env_vars: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "$ ".to_string(),
            prompt2: "> ".to_string(),
            symtab_backend: Backend::Hash,
            token_buf_init: 1024,
            token_buf_max: 64 * 1024,
            env_vars: HashMap::new(),
        }
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            src.push_str(&line?);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    /// `key=value` per line, `#` comments. Values are taken verbatim after
    /// the first `=` so prompts may keep trailing spaces.
    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: no '=' found: {}",
                    lineno + 1,
                    line
                )));
            };
            let key = key.trim();

            match key {
                "prompt" => config.prompt = value.to_string(),
                "prompt2" => config.prompt2 = value.to_string(),
                "symtab_backend" => {
                    config.symtab_backend = match value.trim() {
                        "hash" => Backend::Hash,
                        "list" => Backend::List,
                        other => {
                            return Err(ConfigError::Parse(format!(
                                "line {}: unknown symtab backend: {}",
                                lineno + 1,
                                other
                            )))
                        }
                    };
                }
                "token_buf_init" => config.token_buf_init = parse_size(lineno, value)?,
                "token_buf_max" => config.token_buf_max = parse_size(lineno, value)?,
                k if k.starts_with("env.") => {
                    let var = k.trim_start_matches("env.").to_string();
                    config.env_vars.insert(var, value.to_string());
                }
                _ => {
                    return Err(ConfigError::Parse(format!(
                        "line {}: unknown key: {}",
                        lineno + 1,
                        key
                    )))
                }
            }
        }

        Ok(config)
    }
}

fn parse_size(lineno: usize, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| {
        ConfigError::Parse(format!("line {}: invalid size: {}", lineno + 1, value))
    })
}
