//! Deposit resolution - the only place a cell can change color
//!
//! Empty target: new cell with a full source.
//! Same color: top up to the volume cap and refresh the source.
//! Other color: attack vs. defense, biased by paper texture. A capture
//! overwrites the cell wholesale; a hold only marks the spot contested.

use super::{SystemContext, SpreadParams};
use crate::core::CellKey;
use crate::domain::{Cell, CombatEffect, InkColor, StrokeIntent};

const CREATE_SOURCE: f32 = 1.0;
const CREATE_SATURATION: f32 = 0.3;
const REFRESH_SOURCE: f32 = 0.5;

// Texture bias
const CONTESTED_FRICTION: f32 = 0.5;
const SATURATION_DEFENSE: f32 = 0.3;

// Capture
const DEFENSE_RETAINED: f32 = 0.4;
const STOLEN_RETAINED: f32 = 0.5;
const MIN_CAPTURE_VOLUME: f32 = 0.1;
const CAPTURE_SOURCE: f32 = 0.3;
const CAPTURE_CONTESTED: f32 = 0.5;
const CAPTURE_SATURATION: f32 = 0.2;

const HOLD_CONTESTED: f32 = 0.3;

/// One unit of ink landing on a cell
#[derive(Clone, Copy, Debug)]
pub struct Deposit<'a> {
    pub key: CellKey,
    pub volume: f32,
    pub color: InkColor,
    pub owner_id: Option<&'a str>,
    pub intent: StrokeIntent,
    pub params: SpreadParams,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositOutcome {
    Created,
    Reinforced,
    /// Attacker took the cell
    Captured,
    /// Defender kept the cell
    Held,
    /// Eraser color, non-positive or non-finite volume, or storage refused the cell
    Rejected,
}

/// Apply one deposit, resolving combat against whatever owns the cell
pub fn add_ink_volume(ctx: &mut SystemContext, deposit: &Deposit) -> DepositOutcome {
    if deposit.color.is_eraser() || !(deposit.volume.is_finite() && deposit.volume > 0.0) {
        return DepositOutcome::Rejected;
    }
    let cfg = ctx.config;
    let cap = cfg.volume_cap();
    let max_texture = cfg.max_texture;

    let Some(existing) = ctx.store.get(deposit.key) else {
        let mut cell = Cell::new(
            deposit.color,
            0.0,
            deposit.owner_id.map(str::to_owned),
            deposit.intent,
        );
        cell.set_volume(deposit.volume, cap);
        cell.source = CREATE_SOURCE;
        if !ctx.store.insert(deposit.key, cell) {
            return DepositOutcome::Rejected;
        }
        ctx.counters.cells_created += 1;
        let texture = ctx.texture.entry(deposit.key);
        texture.add_saturation(CREATE_SATURATION, max_texture);
        texture.last_color = Some(deposit.color);
        return DepositOutcome::Created;
    };

    if existing.color == deposit.color {
        if let Some(cell) = ctx.store.get_mut(deposit.key) {
            cell.set_volume(cell.volume + deposit.volume, cap);
            cell.source = (cell.source + REFRESH_SOURCE).min(1.0);
            cell.settled = false;
        }
        ctx.texture.entry(deposit.key).last_color = Some(deposit.color);
        return DepositOutcome::Reinforced;
    }

    // Combat
    let defender_color = existing.color;
    let defender_volume = existing.volume;
    let (contested, saturation) = ctx
        .texture
        .get(deposit.key)
        .map(|t| (t.contested, t.saturation))
        .unwrap_or((0.0, 0.0));

    let attack = deposit.volume * deposit.params.combat_bonus / (1.0 + contested * CONTESTED_FRICTION);
    let defense = defender_volume * (1.0 + saturation * SATURATION_DEFENSE);

    if attack > defense * cfg.combat_ratio {
        let stolen = defender_volume * cfg.steal_fraction;
        let volume = (attack - defense * DEFENSE_RETAINED + stolen * STOLEN_RETAINED).max(MIN_CAPTURE_VOLUME);
        if let Some(cell) = ctx.store.get_mut(deposit.key) {
            cell.color = deposit.color;
            cell.owner_id = deposit.owner_id.map(str::to_owned);
            cell.intent = deposit.intent;
            cell.set_volume(volume, cap);
            cell.source = CAPTURE_SOURCE;
            cell.pressure = 0.0;
            cell.settled = false;
        }

        let texture = ctx.texture.entry(deposit.key);
        texture.add_contested(CAPTURE_CONTESTED, max_texture);
        texture.add_saturation(CAPTURE_SATURATION, max_texture);
        texture.last_color = Some(deposit.color);

        ctx.effects.push(CombatEffect {
            position: deposit.key.center(cfg.cell_size),
            winner_color: deposit.color,
            loser_color: defender_color,
            intensity: ((attack - defense) / attack).clamp(0.0, 1.0),
            age: 0.0,
        });
        ctx.counters.combats += 1;
        DepositOutcome::Captured
    } else {
        ctx.texture.entry(deposit.key).add_contested(HOLD_CONTESTED, max_texture);
        ctx.counters.combats += 1;
        DepositOutcome::Held
    }
}
