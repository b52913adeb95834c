// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rover preference CLI.
//!
//! `show` loads a full session (normalization included) and prints the
//! effective values; `set` stages one raw value and commits it immediately;
//! `reset` rewrites every key back to its default. Values are stored as
//! plain strings, so `set` accepts whatever the loaders accept.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use anyhow::{bail, Result};
use clap::Parser;
use rover_prefs_core::key::{PrefKey, PREF_DOMAIN};
use rover_prefs_core::model::PrefModel;
use rover_prefs_core::store::PrefStore;
use rover_prefs_fs::FsPrefStore;
use rover_prefs_session::PreferenceSession;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Command to execute
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the effective (normalized) preference values
    Show {
        /// Emit JSON instead of the plain listing
        #[clap(long)]
        json: bool,
    },
    /// Stage one raw value and commit it
    Set {
        /// Preference key (e.g. MaxDistance)
        key: String,
        /// Raw value as stored (e.g. 2.5, On, Pod)
        value: String,
    },
    /// Rewrite every key back to its default and commit
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match args.cmd {
        Command::Show { json } => show(json).await,
        Command::Set { key, value } => set(&key, &value).await,
        Command::Reset => reset().await,
    }
}

async fn show(json: bool) -> Result<()> {
    let store = FsPrefStore::new()?;
    let (session, _events) = PreferenceSession::new(store);
    session.load().await;
    let model = session.model().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        for key in PrefKey::ALL {
            println!("{:<14}{}", key.name(), model.get(key));
        }
    }
    Ok(())
}

async fn set(key: &str, value: &str) -> Result<()> {
    let Some(key) = PrefKey::from_name(key) else {
        bail!("unknown preference key: {key}");
    };
    let store = FsPrefStore::new()?;
    store.set_pref(PREF_DOMAIN, key.name(), value).await?;
    store.update_prefs().await?;
    println!("{} = {}", key.name(), value);
    Ok(())
}

async fn reset() -> Result<()> {
    let store = FsPrefStore::new()?;
    let defaults = PrefModel::default();
    for key in PrefKey::ALL {
        let encoded = defaults.get(key).to_string();
        store.set_pref(PREF_DOMAIN, key.name(), &encoded).await?;
    }
    store.update_prefs().await?;
    println!("reset {} keys in {PREF_DOMAIN}", PrefKey::ALL.len());
    Ok(())
}
