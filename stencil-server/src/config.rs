use std::{fs, ops::RangeInclusive};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use stencil::{Options, Overrides};

#[derive(Parser, Debug, Clone, Deserialize)]
#[command(name = "server")]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    #[clap(long)]
    #[arg(short = 'c')]
    #[serde(default)]
    pub config: Option<String>,
    #[clap(long, env)]
    #[arg(default_value_t = String::from("server=info"))]
    #[serde(default = "default_rust_log")]
    pub rust_log: String,
    #[clap(long, env)]
    #[arg(default_value_t = String::from("0.0.0.0"))]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[clap(long, env)]
    #[arg(value_parser = port_in_range, short = 'p', default_value_t = 30080)]
    #[serde(default = "default_port")]
    pub port: u16,
    #[clap(long, env)]
    #[arg(default_value_t = String::from("templates/**/*"))]
    #[serde(default = "default_templates")]
    pub templates: String,
    #[clap(long, env)]
    #[serde(default)]
    pub content_type: Option<String>,
    #[clap(long, env)]
    #[serde(default)]
    pub error_template: Option<String>,
}

impl AppConfig {
    pub fn options(&self) -> Options {
        Options::default().apply(Overrides {
            content_type: self.content_type.clone(),
            error_template: self.error_template.clone(),
        })
    }
}

fn default_rust_log() -> String {
    String::from("server=info")
}

fn default_endpoint() -> String {
    String::from("0.0.0.0")
}

fn default_port() -> u16 {
    30080
}

fn default_templates() -> String {
    String::from("templates/**/*")
}

const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a port number"))?;
    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn load(cfg: &str) -> Result<AppConfig> {
    let content =
        fs::read_to_string(cfg).context("could not read config file")?;
    toml::from_str(&content).context("could not parse config file")
}
