//! `santa` — draw and reveal Secret Santa assignments from the terminal.
//!
//! # Usage
//!
//! ```
//! santa draw family.toml
//! santa draw family.toml --url http://localhost:3000 --show
//! santa reveal eyJuYW1lIjoiQSIsImFzc2lnbmVkVG8iOiJCIn0
//! ```

mod client;
mod roster;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use client::ApiClient;
use rand::{SeedableRng, rngs::StdRng};
use santa_core::{
  Matcher, codec, draw,
  store::{RevealStore, TokenStore},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "santa", about = "Secret Santa draws with private reveal links")]
struct Args {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Draw assignments for the roster in FILE.
  Draw {
    /// TOML roster: `[[participant]]` tables with `name` and `exclusions`.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Draw through a running server instead of locally.
    #[arg(long, env = "SANTA_URL")]
    url: Option<String>,

    /// Also print who gives to whom. Spoils the surprise for the operator.
    #[arg(long)]
    show: bool,

    /// Retry ceiling for local draws.
    #[arg(long, default_value_t = santa_core::matcher::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,
  },

  /// Show the pairing behind a reveal reference.
  Reveal {
    reference: String,

    /// Ask a running server instead of decoding the token locally.
    #[arg(long, env = "SANTA_URL")]
    url: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  match Args::parse().command {
    Command::Draw { file, url, show, max_attempts } => {
      let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("reading roster {}", file.display()))?;
      let entries = roster::parse(&raw).context("parsing roster")?;

      let rows: Vec<(String, String, String)> = match url {
        Some(url) => ApiClient::new(url)?
          .generate(&entries)
          .await?
          .assignments
          .into_iter()
          .map(|a| (a.name, a.assigned_to, a.reference))
          .collect(),
        None => {
          let records: Vec<_> = draw(
            &entries,
            &Matcher::new(max_attempts),
            &mut StdRng::from_entropy(),
          )?
          .into_iter()
          .map(|d| d.record)
          .collect();
          let tokens = TokenStore.publish(records.clone()).await?;
          records
            .into_iter()
            .zip(tokens)
            .map(|(r, token)| (r.name, r.assigned_to, token))
            .collect()
        }
      };

      for (name, assigned_to, reference) in rows {
        if show {
          println!("{name}\t→ {assigned_to}\t{reference}");
        } else {
          println!("{name}\t{reference}");
        }
      }
    }

    Command::Reveal { reference, url } => {
      let found = match url {
        Some(url) => ApiClient::new(url)?
          .reveal(&reference)
          .await?
          .map(|v| (v.name, v.assigned_to)),
        None => codec::decode(&reference).map(|r| (r.name, r.assigned_to)),
      };
      match found {
        Some((name, assigned_to)) => println!("{name}, you are giving a gift to {assigned_to}."),
        None => bail!("assignment not found"),
      }
    }
  }

  Ok(())
}
