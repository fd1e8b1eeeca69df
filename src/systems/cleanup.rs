use super::SystemContext;

/// Remove every cell below `min_volume`. Returns how many went.
pub fn cleanup_empty_cells(ctx: &mut SystemContext) -> usize {
    let min_volume = ctx.config.min_volume;
    let mut drained = Vec::new();
    ctx.store.for_each(&mut |key, cell| {
        if cell.volume < min_volume {
            drained.push(key);
        }
    });
    drained.sort_unstable();
    for key in drained.iter() {
        ctx.store.remove(*key);
    }
    ctx.counters.cells_removed += drained.len() as u32;
    drained.len()
}
