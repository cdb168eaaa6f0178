//! basic — run one riskweb simulation and write its history.
//!
//! ```text
//! basic [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! Without a config file the reference scenario is used: 10 agents, three
//! risk factors, 30 ticks, a Network intervention on ticks 15–17 and an
//! Individual intervention on ticks 20–24.  History goes to `OUTPUT_DIR`
//! (default `output/basic`) as CSV tables plus `history.json`.
//!
//! Set `RUST_LOG=debug` for per-tick logging.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use rw_core::{InterventionKind, InterventionParams, SeverityBand, SimConfig, Tick};
use rw_output::{CsvWriter, HistoryObserver, HistoryWriter, JsonWriter};
use rw_sim::{SimObserver, Simulation, TickSnapshot, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64  = 42;
const DEFAULT_OUT: &str = "output/basic";

// ── Reference scenario ────────────────────────────────────────────────────────

fn reference_config() -> SimConfig {
    let intervention = |kind, start, duration| InterventionParams {
        kind,
        start_tick:   Tick(start),
        duration,
        tar_severity: SeverityBand::new(0.4, 1.0),
        p_rewire:     0.25,
        p_enrolled:   1.0,
        p_beh_change: 1.0,
    };
    SimConfig {
        seed: SEED,
        intervention_params: vec![
            intervention(InterventionKind::Network, 15, 3),
            intervention(InterventionKind::Individual, 20, 5),
        ],
        ..SimConfig::default()
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(reference_config());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = SimConfig::from_json_reader(BufReader::new(file))
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(config)
}

// ── Observer wrapper to tally attempts ────────────────────────────────────────

struct TallyObserver<W: HistoryWriter> {
    inner:    HistoryObserver<W>,
    attempts: usize,
}

impl<W: HistoryWriter> SimObserver for TallyObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.attempts += summary.attempts;
        if summary.attempts > 0 {
            info!(tick = tick.0, attempts = summary.attempts, "attempts this tick");
        }
    }

    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        self.inner.on_snapshot(snapshot);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let config = load_config(args.first())?;
    let out_dir = args.get(1).cloned().unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));

    println!("=== basic — riskweb ===");
    println!(
        "Agents: {}  |  Risk factors: {}  |  Ticks: {}  |  Seed: {}",
        config.n_agents, config.n_beh, config.ticks, config.seed
    );
    for p in &config.intervention_params {
        println!("  {:<10} ticks {}..={}", p.kind, p.start_tick.0, p.last_tick().0);
    }
    println!();

    // 1. Output.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = TallyObserver { inner: HistoryObserver::new(writer), attempts: 0 };

    // 2. Run.
    let mut sim = Simulation::new(config)?;
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "CSV output failed");
    }

    // 3. JSON history.
    let mut json = JsonWriter::new(&out_dir)?;
    json.write_history(sim.history())?;
    json.finish()?;

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  snapshots : {}", sim.history().len());
    println!("  attempts  : {}", obs.attempts);
    println!("  output    : {}", out_dir.display());
    println!();

    println!("{:<8} {:<6} {:<10} {:<9} {:<8}", "Agent", "Beh", "Risk", "Attempts", "Enrolled");
    println!("{}", "-".repeat(45));
    if let Some(last) = sim.history().last() {
        for a in &last.agents {
            let beh: String = a.behavior.iter().map(|b| b.to_string()).collect();
            println!(
                "{:<8} {:<6} {:<10.5} {:<9} {:<8}",
                a.name,
                beh,
                a.current_risk,
                a.attempts,
                if a.enrolled { "yes" } else { "no" },
            );
        }
        for i in &last.interventions {
            println!(
                "{:<10} enrolled {:>3}  behaviors improved {:>4}",
                i.kind, i.enrolled, i.behaviors_improved
            );
        }
    }

    Ok(())
}
