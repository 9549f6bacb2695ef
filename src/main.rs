// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use loglet::config::{load_and_validate_config, MessageConfig, RenderStyle};
use std::env;
use std::io::{self, Read};

const USAGE: &str = "Usage: loglet [--config <file.yaml|file.toml>] [--pretty] <json-payload | ->";

/// Command line options for the demo
struct Args {
    config: Option<String>,
    pretty: bool,
    payload: String,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut config = None;
    let mut pretty = false;
    let mut payload = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(args.next().context("--config needs a file path")?);
            }
            "--pretty" => pretty = true,
            _ if payload.is_none() => payload = Some(arg),
            _ => bail!("unexpected argument '{}'\n{}", arg, USAGE),
        }
    }

    let payload = match payload.as_deref() {
        None => bail!(USAGE),
        Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            buf
        }
        Some(text) => text.to_string(),
    };

    Ok(Args {
        config,
        pretty,
        payload,
    })
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let mut cfg = match &args.config {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("failed to load config {}", path))?,
        None => MessageConfig::default(),
    };
    if args.pretty {
        cfg.render = RenderStyle::Pretty;
    }

    loglet::observability::init(&cfg.log_filter);

    let payload: serde_json::Value =
        serde_json::from_str(&args.payload).context("payload is not valid JSON")?;
    let msg = cfg.compose(payload)?;

    let rendered = cfg.render(&msg);
    print!("[{}] {}", msg.priority(), rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
