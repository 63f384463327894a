//! mission-runner: headless driver for the shepherd mission engine.
//!
//! Usage:
//!   mission-runner --seed 12345 --ticks 3600
//!   mission-runner --config data/mission.json --session-db session.db --session my-tab
//!   mission-runner --seed 12345 --ipc-mode

use anyhow::Result;
use shepherd_core::{
    config::MissionConfig,
    entrance::{EntranceSequence, EntranceStage, StartupGate, StartupPlan},
    engine::MissionEngine,
    store::SessionStore,
    types::SessionId,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick {
        count: u64,
    },
    UpdateStats {
        fields: serde_json::Map<String, serde_json::Value>,
    },
    AppendLog {
        message: String,
        #[serde(default = "default_severity")]
        severity: String,
    },
    Ask {
        query: String,
    },
    InspectDebris,
    Quit,
}

fn default_severity() -> String {
    "normal".to_string()
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 60u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = string_arg(&args, "--config");
    let session_db = string_arg(&args, "--session-db").unwrap_or(":memory:");
    let session_id: SessionId = string_arg(&args, "--session")
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let config = match config_path {
        Some(path) => MissionConfig::load(path)?,
        None => MissionConfig::default(),
    };

    if !ipc_mode {
        println!("=== Orbital Shepherds mission-runner ===");
        println!("  seed:        {seed}");
        println!("  ticks:       {ticks}");
        println!("  config:      {}", config_path.unwrap_or("(defaults)"));
        println!("  session:     {session_id}");
        println!("  session db:  {session_db}");
        println!();
    }

    let store = if session_db == ":memory:" {
        SessionStore::in_memory()?
    } else {
        SessionStore::open(session_db)?
    };
    store.migrate()?;

    let mut engine = MissionEngine::build(session_id.clone(), seed, config);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        run_entrance(&store, &session_id)?;
        engine.run_ticks(ticks)?;
        print_summary(&engine);
    }

    Ok(())
}

/// Play the entrance sequence unless this session has already seen it.
fn run_entrance(store: &SessionStore, session_id: &str) -> Result<()> {
    let gate = StartupGate::new(store, session_id);
    if gate.plan()? == StartupPlan::ShowDashboard {
        println!("(entrance sequence already shown this session)");
        return Ok(());
    }

    let mut sequence = EntranceSequence::new();
    let mut last = None;
    while !sequence.dashboard_ready() {
        let stage = sequence.advance(Duration::from_millis(250));
        if last != Some(stage) {
            match stage {
                EntranceStage::Meteor    => println!("  ☄  incoming meteor..."),
                EntranceStage::Explosion => println!("  ✹  impact"),
                EntranceStage::Complete  => println!("  ✓  entrance complete"),
            }
            last = Some(stage);
        }
    }
    gate.complete()?;
    println!();
    Ok(())
}

fn run_ipc_loop(engine: &mut MissionEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        if let IpcCommand::Quit = cmd {
            break;
        }

        match handle_command(engine, cmd) {
            Ok(Some(extra)) => writeln!(stdout, "{}", serde_json::to_string(&extra)?)?,
            Ok(None) => writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?,
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Apply one command. Returns a custom reply, or `None` to reply with the snapshot.
fn handle_command(
    engine: &mut MissionEngine,
    cmd: IpcCommand,
) -> shepherd_core::MissionResult<Option<serde_json::Value>> {
    match cmd {
        IpcCommand::GetState | IpcCommand::Quit => {}
        IpcCommand::Tick { count } => {
            for event in engine.run_ticks(count)? {
                log::debug!("ipc tick: {}", event.type_name());
            }
        }
        IpcCommand::UpdateStats { fields } => {
            engine.update_stats_fields(&fields)?;
        }
        IpcCommand::AppendLog { message, severity } => {
            engine.append_operation_log_raw(&message, &severity)?;
        }
        IpcCommand::Ask { query } => {
            let receipt = engine.submit_query(&query)?;
            log::info!(
                "query queued, reply due at tick {} ({} pending)",
                receipt.due,
                engine.assistant().pending_count()
            );
        }
        IpcCommand::InspectDebris => {
            let detail = engine.inspect_debris();
            return Ok(Some(serde_json::to_value(detail)?));
        }
    }
    Ok(None)
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(engine: &MissionEngine) {
    let snapshot = engine.snapshot();
    let fleet = &engine.state().fleet;

    println!("=== MISSION SUMMARY ===");
    println!("  session:          {}", engine.session_id);
    println!("  elapsed:          {}", snapshot.elapsed);
    println!("  debris tracked:   {}", snapshot.stats.total_debris_tracked);
    println!("  consumed today:   {}", snapshot.stats.debris_consumed_today);
    println!("  recycled:         {:.0} kg", snapshot.stats.material_recycled_kg);
    println!("  bio-fuel:         {:.0} L", snapshot.stats.bio_fuel_liters);
    println!("  kessler risk:     {:.1}%", snapshot.stats.kessler_probability);
    if let Some(weather) = snapshot.space_weather {
        println!("  solar wind:       {:.0} km/s", weather.solar_wind);
        println!("  K-index:          {:.1}", weather.k_index);
    }

    println!();
    println!("=== FLEET ===");
    println!(
        "  active {} / {} | avg health {:.0}% | avg energy {:.0}%",
        fleet.active_count(),
        fleet.len(),
        fleet.average_health(),
        fleet.average_energy()
    );
    for unit in fleet.units() {
        println!(
            "  {} | {:<20} | {:?} | H {:>3}% | E {:>3}%",
            unit.id,
            unit.task.label(),
            unit.status,
            unit.health,
            unit.energy
        );
    }

    let assistant = engine.assistant();
    println!();
    println!("=== ASSISTANT ===");
    println!(
        "  {} messages | {} pending",
        assistant.transcript().len(),
        assistant.pending_count()
    );

    println!();
    println!("=== OPERATIONS FEED (latest 10) ===");
    if snapshot.logs.is_empty() {
        println!("  (no entries)");
    }
    for entry in snapshot.logs.iter().take(10) {
        println!("  [{}] {:<8} {}", entry.time, entry.severity.as_str(), entry.message);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
