use crate::domain::SimConfig;

use super::perf_stats::PerfStats;
use super::SpreadSimulation;

pub(super) fn enable_perf_metrics(sim: &mut SpreadSimulation, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn perf_stats(sim: &SpreadSimulation) -> PerfStats {
    sim.perf_stats.clone()
}

// Runtime tweaks ignore values that would break the tick.

pub(super) fn set_flow_rate(sim: &mut SpreadSimulation, rate: f32) {
    if rate.is_finite() && rate > 0.0 {
        sim.config.flow_rate = rate;
    }
}

pub(super) fn set_surface_tension(sim: &mut SpreadSimulation, threshold: f32) {
    if threshold.is_finite() && threshold >= 0.0 {
        sim.config.surface_tension = threshold;
    }
}

pub(super) fn set_source_strength(sim: &mut SpreadSimulation, strength: f32) {
    if strength.is_finite() && strength >= 0.0 {
        sim.config.source_strength = strength;
    }
}

pub(super) fn set_combat_ratio(sim: &mut SpreadSimulation, ratio: f32) {
    if ratio.is_finite() && ratio > 0.0 {
        sim.config.combat_ratio = ratio;
    }
}

pub(super) fn set_config(sim: &mut SpreadSimulation, config: SimConfig) -> Result<(), String> {
    if let Err(e) = config.validate() {
        console_warn!("config rejected: {}", e);
        return Err(e);
    }
    if config.backend != sim.config.backend {
        return Err("backend is fixed at construction".to_string());
    }
    sim.config = config;
    Ok(())
}
