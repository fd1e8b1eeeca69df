use crate::systems::{apply_surface_tension, cleanup_empty_cells, simulate_flow, TickCounters};

use super::{PerfTimer, SpreadSimulation};

pub(super) fn update(sim: &mut SpreadSimulation, dt: f32) {
    // Negative or non-finite steps would run flow backwards
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let perf_on = sim.perf_enabled;
    if perf_on {
        sim.perf_stats.reset();
    }
    let tick_start = perf_on.then(PerfTimer::start);

    sim.frame += 1;
    sim.clock += dt as f64;
    sim.store.set_clock(sim.clock);

    // === Paper texture ===
    let t0 = perf_on.then(PerfTimer::start);
    sim.texture.decay(sim.config.texture_decay, sim.config.texture_floor);
    if let Some(t0) = t0 {
        sim.perf_stats.texture_ms = t0.elapsed_ms();
    }

    // === Combat effects ===
    let lifetime = sim.config.effect_lifetime;
    sim.effects.retain_mut(|effect| {
        effect.age += dt;
        effect.age < lifetime
    });

    // === Flow ===
    let t0 = perf_on.then(PerfTimer::start);
    simulate_flow(&mut sim.context(), dt);
    if let Some(t0) = t0 {
        sim.perf_stats.flow_ms = t0.elapsed_ms();
    }

    // === Surface tension ===
    let t0 = perf_on.then(PerfTimer::start);
    apply_surface_tension(&mut sim.context());
    if let Some(t0) = t0 {
        sim.perf_stats.tension_ms = t0.elapsed_ms();
    }

    // === Cleanup ===
    let t0 = perf_on.then(PerfTimer::start);
    cleanup_empty_cells(&mut sim.context());
    sim.store.end_tick(sim.clock);
    if let Some(t0) = t0 {
        sim.perf_stats.cleanup_ms = t0.elapsed_ms();
    }

    if let Some(t0) = tick_start {
        sim.perf_stats.tick_ms = t0.elapsed_ms();
        sim.perf_stats.record_counters(&sim.counters);
        sim.perf_stats.cell_count = sim.store.len() as u32;
        sim.perf_stats.chunk_count = sim.store.chunk_stats().map_or(0, |s| s.loaded as u32);
    }
    // Deposits made between ticks count toward the next tick
    sim.counters = TickCounters::default();
}
