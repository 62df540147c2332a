//! `modsync resolve` — turn one provider entry into a descriptor.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use modsync_core::Config;
use modsync_providers::ProviderRegistry;

/// Arguments for `modsync resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Provider key, e.g. `curseforge` or `modrinth`.
    pub provider: String,

    /// Entry identifiers as key=value pairs, e.g. `versionId=kF3whRqC`.
    #[arg(required = true, value_parser = parse_pair)]
    pub ids: Vec<(String, String)>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let entry = Value::Object(
            self.ids
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect::<Map<_, _>>(),
        );
        let providers = ProviderRegistry::with_defaults(config);
        let descriptor = providers
            .resolve(&self.provider, &entry)
            .with_context(|| format!("could not resolve {} entry {entry}", self.provider))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&descriptor).context("failed to serialize descriptor")?
            );
        } else {
            println!("filename:  {}", descriptor.filename());
            println!("hash:      {} ({})", descriptor.expected_hash(), descriptor.hash_algorithm());
            println!("url:       {}", descriptor.source_url());
        }
        Ok(())
    }
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() && !v.is_empty() => Ok((k.to_owned(), v.to_owned())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}
