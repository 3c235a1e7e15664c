//! SysSonic - hear your machine's health

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use syssonic::config::{self, OutputFormat, SonicConfig};
use syssonic::mapping::MappingEngine;
use syssonic::metrics::{MetricsSource, Scenario, ScenarioSource, SystemMetrics, Workload};
use syssonic::render::{self, AudioRenderer};
use tokio::sync::{broadcast, Notify};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Map {
            scenario,
            cpu,
            memory,
            disk_read,
            disk_write,
            net_rx,
            net_tx,
            temp,
        } => {
            let cfg = config::load_or_default(&cli.config)?;
            let workload = match scenario {
                Some(slug) => slug.parse::<Scenario>()?.workload(),
                None => Workload::new(
                    "Command Line Snapshot",
                    SystemMetrics::default()
                        .with_cpu(cpu)
                        .with_memory(memory)
                        .with_disk(disk_read, disk_write)
                        .with_network(net_rx, net_tx)
                        .with_temperature(temp),
                ),
            };

            let engine = MappingEngine::new(&cfg.mapping);
            let mut renderer = make_renderer(cli.format, &cfg);
            render_workload(renderer.as_mut(), &engine, &workload)?;
        }

        Commands::Demo => {
            let cfg = config::load_or_default(&cli.config)?;
            let engine = MappingEngine::new(&cfg.mapping);
            let mut renderer = make_renderer(cli.format, &cfg);

            for workload in playlist(&cfg) {
                render_workload(renderer.as_mut(), &engine, &workload)?;
            }
        }

        Commands::Watch { count, interval_ms } => {
            let cfg = config::load_or_default(&cli.config)?;
            let interval_ms = interval_ms.unwrap_or(cfg.source.interval_ms);
            if interval_ms < 10 {
                bail!("Interval must be at least 10 ms");
            }
            let interval = Duration::from_millis(interval_ms);
            watch(&cfg, cli.format, interval, count)?;
        }

        Commands::Check => {
            println!("Checking configuration at {:?}...", cli.config);

            match config::load_config(&cli.config) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!(
                        "  Disk reference: {:.0} bytes/s",
                        cfg.mapping.disk_reference_bytes
                    );
                    println!(
                        "  Network reference: {:.0} bytes/s",
                        cfg.mapping.network_reference_bytes
                    );
                    println!("  Base tempo: {:.0} BPM", cfg.mapping.base_tempo_bpm);
                    println!("  Interval: {} ms", cfg.source.interval_ms);
                    println!("  Looping: {}", cfg.source.looping);
                    println!("  Format: {:?}", cfg.output.format);
                    println!("  Scenarios: {}", cfg.scenarios.len());
                    for scenario in &cfg.scenarios {
                        println!("    - {}", scenario.name);
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../syssonic.example.yaml");

            let path = &cli.config;
            if path.exists() {
                println!("{:?} already exists. Not overwriting.", path);
            } else {
                std::fs::write(path, example_config)
                    .with_context(|| format!("failed to write {:?}", path))?;
                println!("Created {:?} with example configuration.", path);
            }
        }
    }

    Ok(())
}

/// Built-in workloads followed by the configured ones
fn playlist(cfg: &SonicConfig) -> Vec<Workload> {
    let mut playlist = Scenario::playlist();
    playlist.extend(cfg.scenarios.iter().map(|s| s.workload()));
    playlist
}

fn make_renderer(format: Option<OutputFormat>, cfg: &SonicConfig) -> Box<dyn AudioRenderer> {
    render::renderer_for(format.unwrap_or(cfg.output.format), std::io::stdout())
}

fn render_workload(
    renderer: &mut dyn AudioRenderer,
    engine: &MappingEngine,
    workload: &Workload,
) -> Result<()> {
    let params = engine.map_with(&workload.metrics, &workload.extended);
    debug!(
        label = %workload.label,
        melody = %params.melody_note,
        bass = %params.bass_description,
        tempo_bpm = params.tempo_bpm,
        extended = params.extended.is_some(),
        "mapped snapshot"
    );
    renderer.render(&workload.label, &workload.metrics, &params)?;
    Ok(())
}

fn watch(
    cfg: &SonicConfig,
    format: Option<OutputFormat>,
    interval: Duration,
    count: usize,
) -> Result<()> {
    let entries = playlist(cfg);
    // A one-shot replay ends after a single pass
    let limit = match (count, cfg.source.looping) {
        (0, false) => entries.len(),
        (n, _) => n,
    };

    let engine = MappingEngine::new(&cfg.mapping);
    let mut renderer = make_renderer(format, cfg);

    let shutdown = Arc::new(Notify::new());
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.notify_one())
            .context("failed to install Ctrl+C handler")?;
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut source = ScenarioSource::new("replay", entries, interval)?
            .with_looping(cfg.source.looping);
        let mut rx = source.subscribe();
        source.start()?;
        info!(interval_ms = interval.as_millis() as u64, limit, "watching");

        let mut seen = 0usize;
        while limit == 0 || seen < limit {
            tokio::select! {
                received = rx.recv() => match received {
                    Ok(snapshot) => {
                        let workload = Workload::new(snapshot.label, snapshot.metrics)
                            .with_extended(snapshot.extended);
                        render_workload(renderer.as_mut(), &engine, &workload)?;
                        seen += 1;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "renderer fell behind, dropped snapshots");
                        // Dropped snapshots still count toward the limit
                        seen = seen.saturating_add(usize::try_from(skipped).unwrap_or(usize::MAX));
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("replay finished");
                        break;
                    }
                },
                _ = shutdown.notified() => {
                    info!("interrupted");
                    break;
                }
            }
        }

        source.stop();
        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
