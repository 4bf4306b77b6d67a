use anyhow::Result;
use log::{debug, error, info, trace, warn};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use swarm_common::{InputEvent, InputKind, SceneConfig, TickSnapshot, World};
use swarm_engine::personality::ensure_all_personalities;
use swarm_engine::scene::build_world;
use swarm_engine::simulation::final_positions;
use swarm_engine::SwarmSimulation;

fn apply_input(sim: &SwarmSimulation, world: &mut World, event: &InputEvent) {
    match event.kind {
        InputKind::Move => sim.set_pointer_position(world, event.x, event.y),
        InputKind::Click => sim.add_mouse_target(world, event.x, event.y),
    }
}

fn save_snapshots(snapshots: &[TickSnapshot], base_filename: &str, format: &str) -> Result<()> {
    match format {
        "bincode" => {
            // Binary format (much more compact)
            let filename = format!("{}_snapshots.bin", base_filename);
            let file = File::create(&filename)?;
            bincode::serialize_into(file, snapshots)?;
            info!("All snapshots saved to {} (binary format)", filename);
        }
        "messagepack" => {
            let filename = format!("{}_snapshots.msgpack", base_filename);
            let mut file = File::create(&filename)?;
            rmp_serde::encode::write(&mut file, snapshots)?;
            info!("All snapshots saved to {} (MessagePack format)", filename);
        }
        other => {
            if other != "json" {
                error!("Unknown output format: {}. Using JSON instead.", other);
            }
            let filename = format!("{}_snapshots.json", base_filename);
            let json_string = serde_json::to_string(snapshots)?;
            File::create(&filename)?.write_all(json_string.as_bytes())?;
            info!("All snapshots saved to {} ({} KB)", filename, json_string.len() / 1024);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    info!("Starting Swarm Engine...");

    // --- Load Configuration ---
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = SceneConfig::load(&config_path)?;
    let params = config.sim_params();
    debug!("Simulation Parameters: {:#?}", params);

    // --- Initialize World ---
    let mut sim = SwarmSimulation::seeded(params, config.initial_conditions.seed);
    sim.set_record_creatures(config.output.save_creatures_in_snapshot);
    let mut world = build_world(&config, sim.rng_mut())?;
    info!("World initialized with {} creatures.", world.creature_count());
    let assigned = ensure_all_personalities(&mut world, sim.rng_mut());
    debug!("Assigned {} personalities up front.", assigned);

    let total_ticks = config.timing.total_ticks;
    let mut record_interval = config.timing.record_interval_ticks;
    if record_interval == 0 {
        warn!("Record interval is 0 ticks. Recording every tick.");
        record_interval = 1;
    }
    info!("Recording snapshot every {} ticks.", record_interval);

    let mut input = config.input.clone();
    input.sort_by_key(|e| e.tick);
    let mut pending_input = input.iter().peekable();

    info!("Starting simulation loop for {} ticks...", total_ticks);
    let start_time = Instant::now();
    let mut previous_print_time = start_time;

    // --- Initial Snapshot (tick 0) ---
    sim.record_snapshot(&world);

    for tick in 0..total_ticks {
        while let Some(event) = pending_input.next_if(|e| e.tick <= tick) {
            apply_input(&sim, &mut world, event);
        }

        let step_start_time = Instant::now();
        let report = sim.advance(&mut world, config.timing.frame_ms);
        let step_duration = step_start_time.elapsed();

        for event in &report.completed {
            info!("Tick {}: win condition {} completed: {}", report.tick, event.index, event.message);
        }

        let current_time = Instant::now();
        let should_print_status = current_time.duration_since(previous_print_time).as_secs_f64() >= 5.0;
        let is_record_step = report.tick % record_interval == 0;
        let is_last_step = tick + 1 == total_ticks;

        if should_print_status || is_record_step || is_last_step {
            info!(
                "Tick [{}/{}] | Creatures: {} | Collisions: {} | Step Time: {:6.3} ms | Elapsed: {:.2} s",
                report.tick,
                total_ticks,
                world.creature_count(),
                report.collisions,
                step_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;

            if is_record_step || is_last_step {
                sim.record_snapshot(&world);
            }
        } else {
            trace!(
                "Tick [{}/{}] completed in {:.3} ms",
                report.tick,
                total_ticks,
                step_duration.as_secs_f64() * 1000.0
            );
        }
    }

    let total_duration = start_time.elapsed();
    info!("Simulation finished in {:.3} seconds.", total_duration.as_secs_f64());

    let pending = world.win_conditions.iter().filter(|w| !w.completed).count();
    if pending > 0 {
        info!("{} win condition(s) still pending.", pending);
    }

    // --- Save Recorded Data ---
    let output = &config.output;
    if output.save_snapshots {
        let format = output.format.as_deref().unwrap_or("json");
        if let Err(e) = save_snapshots(sim.recorded_snapshots(), &output.base_filename, format) {
            error!("Error saving snapshots: {}", e);
        }
    } else {
        info!("Skipping saving snapshots as per config.");
    }

    if output.save_positions {
        let filename = format!("{}_final_positions.csv", output.base_filename);
        match csv::Writer::from_path(&filename) {
            Ok(mut writer) => {
                writer.write_record(["x", "y"])?;
                for pos in final_positions(&world) {
                    writer.write_record(&[format!("{:.4}", pos.x), format!("{:.4}", pos.y)])?;
                }
                writer.flush()?;
                info!("Final positions saved to {}", filename);
            }
            Err(e) => error!("Error saving CSV file '{}': {}", filename, e),
        }
    } else {
        info!("Skipping saving final positions as per config.");
    }

    info!("Simulation Complete.");
    Ok(())
}
