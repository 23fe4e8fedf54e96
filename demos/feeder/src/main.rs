//! citybus-feeder: runs the bus network simulation and writes its output.
//!
//! Without `--network`/`--fleet` the embedded two-line sample network is
//! used.  Without `--output` nothing is written; progress is logged only.
//!
//! ```text
//! citybus-feeder --ticks 1440 --start 1700000000 --utc-offset-hours 1 \
//!     --output ./out --format csv
//! ```

mod network;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use cb_core::{SimConfig, Tick};
use cb_demand::{ArrivalModel, ExpectedArrivals, PoissonArrivals};
use cb_fleet::{ConstantSpeed, SpeedModel, UniformSpeed};
use cb_network::{TransitNetwork, load_network_csv};
use cb_output::{CsvWriter, JsonLinesWriter, OutputWriter, SimOutputObserver};
use cb_sim::{ArrivalEvent, SimBuilder, SimObserver, SimStats, TickSnapshot};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Arrivals {
    /// Poisson-distributed arrivals (stochastic)
    Poisson,
    /// Expected value rounded to whole passengers (deterministic)
    Expected,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
}

#[derive(Parser, Debug)]
#[command(
    name = "citybus-feeder",
    version,
    about = "Simulate city bus lines and emit bus/stop snapshots",
    long_about = "Moves buses along their lines tick by tick, generates waiting \
                  passengers with a time-of-day Poisson model, and records bus \
                  positions, stop queues, and every boarding/alighting event.\n\n\
                  Settings from --config are applied first; individual flags \
                  override them."
)]
struct Args {
    /// Network CSV (line_id,line_name,stop_id,stop_name,lat,lon,terminal,arrival_rate)
    #[arg(long, requires = "fleet")]
    network: Option<PathBuf>,

    /// Fleet CSV (bus_id,line_id,capacity,initial_position[,direction])
    #[arg(long, requires = "network")]
    fleet: Option<PathBuf>,

    /// JSON file with simulation settings (any subset of fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Seconds per tick
    #[arg(long)]
    tick_secs: Option<u32>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Unix timestamp of the first tick
    #[arg(long)]
    start: Option<i64>,

    /// Local time offset from UTC in hours (e.g. 1 or -5.5)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset_hours: Option<f64>,

    /// Lower bound of the alighting fraction at regular stops
    #[arg(long)]
    alight_min: Option<f64>,

    /// Upper bound of the alighting fraction at regular stops
    #[arg(long)]
    alight_max: Option<f64>,

    /// Mean bus speed in km/h
    #[arg(long, default_value_t = 25.0)]
    speed_kmh: f64,

    /// Per-tick random speed variation (± km/h); 0 keeps the speed constant
    #[arg(long, default_value_t = 0.0)]
    speed_jitter_kmh: f64,

    /// Passenger arrival model
    #[arg(long, value_enum, default_value_t = Arrivals::Poisson)]
    arrivals: Arrivals,

    /// Output directory; omit to write nothing
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Snapshot every N ticks
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Sleep one tick interval between ticks; press Enter to stop
    #[arg(long)]
    realtime: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// `--config` first, then flag overrides.
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        if let Some(v) = self.ticks {
            config.total_ticks = v;
        }
        if let Some(v) = self.tick_secs {
            config.tick_duration_secs = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.start {
            config.start_unix_secs = v;
        }
        if let Some(h) = self.utc_offset_hours {
            if !h.is_finite() {
                bail!("--utc-offset-hours must be a number, got {h}");
            }
            config.utc_offset_secs = (h * 3_600.0).round() as i32;
        }
        if let Some(v) = self.alight_min {
            config.alight_fraction_min = v;
        }
        if let Some(v) = self.alight_max {
            config.alight_fraction_max = v;
        }
        if let Some(v) = self.snapshot_every {
            config.output_interval_ticks = v;
        }
        Ok(config)
    }

    fn arrival_model(&self) -> Box<dyn ArrivalModel> {
        match self.arrivals {
            Arrivals::Poisson => Box::new(PoissonArrivals),
            Arrivals::Expected => Box::new(ExpectedArrivals),
        }
    }

    fn speed_model(&self) -> Result<Box<dyn SpeedModel>> {
        if !self.speed_kmh.is_finite() || self.speed_kmh < 0.0 {
            bail!("--speed-kmh must be a non-negative number, got {}", self.speed_kmh);
        }
        if self.speed_jitter_kmh > 0.0 {
            Ok(Box::new(UniformSpeed::around(self.speed_kmh, self.speed_jitter_kmh)?))
        } else {
            Ok(Box::new(ConstantSpeed(self.speed_kmh)))
        }
    }

    fn load_network(&self) -> Result<TransitNetwork> {
        match (&self.network, &self.fleet) {
            (Some(network), Some(fleet)) => load_network_csv(network, fleet)
                .with_context(|| format!("loading network {}", network.display())),
            _ => {
                log::info!("no network given, using the embedded sample network");
                network::sample_network().context("loading embedded sample network")
            }
        }
    }

    fn writer(&self) -> Result<Option<Box<dyn OutputWriter>>> {
        let Some(dir) = &self.output else {
            return Ok(None);
        };
        let writer: Box<dyn OutputWriter> = match self.format {
            Format::Csv => Box::new(CsvWriter::new(dir)?),
            Format::Jsonl => Box::new(JsonLinesWriter::new(dir)?),
        };
        log::info!("writing {:?} output to {}", self.format, dir.display());
        Ok(Some(writer))
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Forwards to the output writer (if any), logs progress, and paces the run
/// in realtime mode.
struct FeederObserver {
    output:    Option<SimOutputObserver<Box<dyn OutputWriter>>>,
    pace:      Option<Duration>,
    log_every: u64,
    visits:    u64,
}

impl SimObserver for FeederObserver {
    fn on_arrival(&mut self, event: &ArrivalEvent) {
        if let Some(out) = &mut self.output {
            out.on_arrival(event);
        }
    }

    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        if let Some(out) = &mut self.output {
            out.on_snapshot(snapshot);
        }
    }

    fn on_tick_end(&mut self, tick: Tick, visits: usize) {
        self.visits += visits as u64;
        if (tick.0 + 1).is_multiple_of(self.log_every) {
            log::info!("{}: {} stop visits so far", tick + 1, self.visits);
        }
        if let Some(pace) = self.pace {
            std::thread::sleep(pace);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &SimStats) {
        if let Some(out) = &mut self.output {
            out.on_sim_end(final_tick, stats);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let config = args.sim_config()?;
    let network = args.load_network()?;

    let mut sim = SimBuilder::new(config.clone(), network)
        .arrivals(args.arrival_model())
        .speed(args.speed_model()?)
        .build()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    if args.realtime {
        log::info!("realtime mode: press Enter to stop");
        let flag = Arc::clone(&shutdown);
        std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().lock().read_line(&mut line);
            flag.store(true, Ordering::Relaxed);
        });
    }

    let mut observer = FeederObserver {
        output:    args.writer()?.map(SimOutputObserver::new),
        pace:      args
            .realtime
            .then(|| Duration::from_secs(config.tick_duration_secs as u64)),
        log_every: (3_600 / config.tick_duration_secs.max(1) as u64).max(1),
        visits:    0,
    };

    let started = Instant::now();
    let stopped = sim.run_until(&mut observer, &shutdown)?;
    let elapsed = started.elapsed();

    let stats = &sim.stats;
    log::info!(
        "finished at {stopped} in {:.2?}: {} passengers generated, {} boarded, {} alighted, {} turnarounds",
        elapsed, stats.generated, stats.boarded, stats.alighted, stats.turnarounds
    );
    log::info!(
        "{} still waiting, {} on board",
        sim.stops.total_waiting(),
        sim.fleet.total_passengers()
    );

    if let Some(mut out) = observer.output {
        if out.failures() > 0 {
            let first = out.take_error().map(|e| e.to_string()).unwrap_or_default();
            log::warn!("{} output writes failed; first error: {first}", out.failures());
        }
    }
    Ok(())
}
