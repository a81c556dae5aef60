//! yield-ledger: an agricultural provenance registry.
//!
//! Producers enroll, register land plots, run crop cycles, and record
//! harvest outputs; independent certifiers attest to the state of plots,
//! cycles, or production records; record owners grant or revoke viewer
//! access over any record. Every mutating entry point resolves the caller
//! identity first, checks the relevant ownership or role predicate, then
//! either fails with a tagged error code or commits the write atomically
//! and returns a newly minted sequential id.
//!
//! # Architecture
//!
//! ## Single serialized store
//!
//! All state lives in one SQLite database under `.yield-ledger/data/`.
//! Mutations route through the [`core::broker::LedgerBroker`] for:
//! - Serialization (in-process lock, one operation at a time)
//! - Audit logging (`ledger.events.jsonl`)
//!
//! ## Domains
//!
//! - `identity`: producer and certifier profiles, exactly-once per caller
//! - `plots`: land plots, owner fixed at creation
//! - `cycles`: crop cycles, owned transitively through their plot
//! - `production`: harvest records, owned transitively through their cycle
//! - `attestations`: append-only certifier statements about any record
//! - `access`: viewer grant bookkeeping, managed by each record's owner
//!
//! ## Error codes
//!
//! Domain failures surface stable numeric codes: `NotAuthorized` (100),
//! `AlreadyRegistered` (102), `NotCertifier` (107). Absent records on fetch
//! are not errors.
//!
//! # Examples
//!
//! ```bash
//! # Initialize a ledger store
//! yield-ledger init
//!
//! # Enroll and register a plot
//! yield-ledger enroll-producer --caller wallet_1 --name "Alex Kumar" --region Punjab
//! yield-ledger register-plot --caller wallet_1 --location "31.5N 74.3E" --area 150 --soil-type "Alluvial Silt"
//!
//! # Inspect a record
//! yield-ledger fetch plot --id 1
//! ```

pub mod core;
pub mod registry;

use crate::core::principal::Principal;
use crate::core::{db, error};
use crate::registry::reference::{RecordKind, RecordRef};
use crate::registry::{access, attestations, cycles, identity, plots, production};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(
    name = "yield-ledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Agricultural provenance registry"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize the ledger store (creates `.yield-ledger/data/`).
    Init {
        /// Directory to initialize (defaults to current working directory).
        #[clap(short, long)]
        dir: Option<PathBuf>,
    },
    /// Enroll the caller as a producer.
    EnrollProducer {
        #[clap(long)]
        caller: Principal,
        #[clap(long)]
        name: String,
        #[clap(long)]
        region: String,
    },
    /// Register the caller as a certifier.
    RegisterCertifier {
        #[clap(long)]
        caller: Principal,
        #[clap(long)]
        org: String,
        #[clap(long)]
        specialization: String,
    },
    /// Register a new land plot owned by the caller.
    RegisterPlot {
        #[clap(long)]
        caller: Principal,
        #[clap(long)]
        location: String,
        #[clap(long)]
        area: u64,
        #[clap(long)]
        soil_type: String,
    },
    /// Overwrite a plot's mutable properties (owner-only).
    AdjustPlot {
        #[clap(long)]
        caller: Principal,
        #[clap(long)]
        plot_id: u64,
        #[clap(long)]
        location: String,
        #[clap(long)]
        area: u64,
        #[clap(long)]
        soil_type: String,
        #[clap(long)]
        active: bool,
    },
    /// Open a crop cycle on a plot the caller owns.
    InitiateCycle {
        #[clap(long)]
        caller: Principal,
        #[clap(long)]
        plot_id: u64,
        #[clap(long)]
        crop: String,
        #[clap(long)]
        start_time: u64,
        #[clap(long, default_value = "")]
        inputs: String,
        #[clap(long, default_value = "")]
        notes: String,
    },
    /// Record harvest output for a cycle the caller owns.
    RecordOutput {
        #[clap(long)]
        caller: Principal,
        #[clap(long)]
        cycle_id: u64,
        #[clap(long)]
        quantity: u64,
        #[clap(long)]
        quality: String,
        #[clap(long)]
        harvest_time: u64,
        #[clap(long, default_value = "")]
        notes: String,
    },
    /// Lodge a certifier attestation against a record.
    LodgeAttestation {
        #[clap(long)]
        caller: Principal,
        #[clap(long, value_enum)]
        kind: RecordKind,
        #[clap(long)]
        target_id: u64,
        #[clap(long)]
        status: String,
        #[clap(long, default_value = "")]
        remarks: String,
    },
    /// Grant a viewer access to a record (owner-only).
    AuthorizeViewer {
        #[clap(long)]
        caller: Principal,
        #[clap(long, value_enum)]
        kind: RecordKind,
        #[clap(long)]
        target_id: u64,
        #[clap(long)]
        viewer: Principal,
        #[clap(long)]
        level: String,
    },
    /// Revoke a viewer's access to a record (owner-only, idempotent).
    WithdrawViewer {
        #[clap(long)]
        caller: Principal,
        #[clap(long, value_enum)]
        kind: RecordKind,
        #[clap(long)]
        target_id: u64,
        #[clap(long)]
        viewer: Principal,
    },
    /// Read-only lookups. Absent records print `null`, never an error.
    Fetch(FetchCli),
}

#[derive(clap::Args, Debug)]
struct FetchCli {
    #[clap(subcommand)]
    command: FetchCommand,
}

#[derive(Subcommand, Debug)]
enum FetchCommand {
    /// Producer profile by principal.
    Producer {
        #[clap(long)]
        principal: Principal,
    },
    /// Certifier profile by principal.
    Certifier {
        #[clap(long)]
        principal: Principal,
    },
    /// Land plot by id.
    Plot {
        #[clap(long)]
        id: u64,
    },
    /// Crop cycle by id.
    Cycle {
        #[clap(long)]
        id: u64,
    },
    /// Production record by id.
    Production {
        #[clap(long)]
        id: u64,
    },
    /// Attestation by id.
    Attestation {
        #[clap(long)]
        id: u64,
    },
    /// Access grant by (kind, target id, viewer).
    Grant {
        #[clap(long, value_enum)]
        kind: RecordKind,
        #[clap(long)]
        target_id: u64,
        #[clap(long)]
        viewer: Principal,
    },
}

fn find_ledger_project_root(start_dir: &Path) -> Result<PathBuf, error::LedgerError> {
    let mut current_dir = PathBuf::from(start_dir);
    loop {
        if current_dir.join(".yield-ledger").exists() {
            return Ok(current_dir);
        }
        if !current_dir.pop() {
            return Err(error::LedgerError::NotFound(
                "'.yield-ledger' directory not found in current or parent directories. Run `yield-ledger init` first.".to_string(),
            ));
        }
    }
}

pub fn run() -> Result<(), error::LedgerError> {
    let cli = Cli::parse();
    let current_dir = std::env::current_dir()?;

    match cli.command {
        Command::Init { dir } => {
            let target_dir = match dir {
                Some(d) => d,
                None => current_dir,
            };
            let target_dir =
                std::fs::canonicalize(&target_dir).map_err(error::LedgerError::IoError)?;
            let store_root = target_dir.join(".yield-ledger").join("data");
            std::fs::create_dir_all(&store_root).map_err(error::LedgerError::IoError)?;
            db::initialize_ledger_db(&store_root)?;
            println!(
                "{} Ledger initialized at {}",
                "●".bright_green(),
                store_root.display()
            );
            Ok(())
        }
        command => {
            let project_root = find_ledger_project_root(&current_dir)?;
            let store_root = project_root.join(".yield-ledger").join("data");
            db::initialize_ledger_db(&store_root)?;
            run_command(&store_root, command)
        }
    }
}

fn run_command(store_root: &Path, command: Command) -> Result<(), error::LedgerError> {
    match command {
        Command::Init { .. } => unreachable!(),
        Command::EnrollProducer {
            caller,
            name,
            region,
        } => {
            identity::enroll_producer(store_root, &caller, &name, &region)?;
            println!("{} Producer enrolled: {}", "✓".bright_green(), caller);
        }
        Command::RegisterCertifier {
            caller,
            org,
            specialization,
        } => {
            identity::register_certifier(store_root, &caller, &org, &specialization)?;
            println!("{} Certifier registered: {}", "✓".bright_green(), caller);
        }
        Command::RegisterPlot {
            caller,
            location,
            area,
            soil_type,
        } => {
            let id = plots::register_plot(store_root, &caller, &location, area, &soil_type)?;
            println!("{} Plot registered: {}", "✓".bright_green(), id);
        }
        Command::AdjustPlot {
            caller,
            plot_id,
            location,
            area,
            soil_type,
            active,
        } => {
            plots::adjust_plot_properties(
                store_root,
                &caller,
                plot_id,
                &location,
                area,
                &soil_type,
                active,
            )?;
            println!("{} Plot {} adjusted", "✓".bright_green(), plot_id);
        }
        Command::InitiateCycle {
            caller,
            plot_id,
            crop,
            start_time,
            inputs,
            notes,
        } => {
            let id = cycles::initiate_crop_cycle(
                store_root,
                &caller,
                plot_id,
                &crop,
                start_time,
                &inputs,
                &notes,
            )?;
            println!("{} Crop cycle initiated: {}", "✓".bright_green(), id);
        }
        Command::RecordOutput {
            caller,
            cycle_id,
            quantity,
            quality,
            harvest_time,
            notes,
        } => {
            let id = production::record_production_output(
                store_root,
                &caller,
                cycle_id,
                quantity,
                &quality,
                harvest_time,
                &notes,
            )?;
            println!("{} Production recorded: {}", "✓".bright_green(), id);
        }
        Command::LodgeAttestation {
            caller,
            kind,
            target_id,
            status,
            remarks,
        } => {
            let id = attestations::lodge_attestation(
                store_root,
                &caller,
                RecordRef::new(kind, target_id),
                &status,
                &remarks,
            )?;
            println!("{} Attestation lodged: {}", "✓".bright_green(), id);
        }
        Command::AuthorizeViewer {
            caller,
            kind,
            target_id,
            viewer,
            level,
        } => {
            access::authorize_viewer(
                store_root,
                &caller,
                RecordRef::new(kind, target_id),
                &viewer,
                &level,
            )?;
            println!(
                "{} Viewer {} authorized on {}/{}",
                "✓".bright_green(),
                viewer,
                kind,
                target_id
            );
        }
        Command::WithdrawViewer {
            caller,
            kind,
            target_id,
            viewer,
        } => {
            access::withdraw_viewer_access(
                store_root,
                &caller,
                RecordRef::new(kind, target_id),
                &viewer,
            )?;
            println!(
                "{} Viewer {} withdrawn from {}/{}",
                "✓".bright_green(),
                viewer,
                kind,
                target_id
            );
        }
        Command::Fetch(fetch_cli) => run_fetch(store_root, fetch_cli)?,
    }
    Ok(())
}

fn run_fetch(store_root: &Path, cli: FetchCli) -> Result<(), error::LedgerError> {
    let json = match cli.command {
        FetchCommand::Producer { principal } => {
            serde_json::to_value(identity::fetch_producer_profile(store_root, &principal)?)
        }
        FetchCommand::Certifier { principal } => {
            serde_json::to_value(identity::fetch_certifier_profile(store_root, &principal)?)
        }
        FetchCommand::Plot { id } => serde_json::to_value(plots::fetch_land_data(store_root, id)?),
        FetchCommand::Cycle { id } => {
            serde_json::to_value(cycles::fetch_cycle_data(store_root, id)?)
        }
        FetchCommand::Production { id } => {
            serde_json::to_value(production::fetch_production_data(store_root, id)?)
        }
        FetchCommand::Attestation { id } => {
            serde_json::to_value(attestations::fetch_attestation_data(store_root, id)?)
        }
        FetchCommand::Grant {
            kind,
            target_id,
            viewer,
        } => serde_json::to_value(access::fetch_access_grant(
            store_root,
            RecordRef::new(kind, target_id),
            &viewer,
        )?),
    };
    println!("{}", serde_json::to_string_pretty(&json.unwrap()).unwrap());
    Ok(())
}
