use super::*;
use crate::domain::StrokeIntent;

fn manager(chunk_size: u32, max_chunks: usize) -> ChunkManager {
    ChunkManager::new(ChunkConfig {
        chunk_size,
        max_chunks,
        unload_delay: 2.0,
    })
}

fn ink(volume: f32) -> Cell {
    Cell::new(InkColor(0xff0000ff), volume, None, StrokeIntent::Territory)
}

#[test]
fn world_to_chunk_floors_negative_coordinates() {
    let m = manager(16, 8);
    assert_eq!(m.world_to_chunk(0, 0), ChunkCoord::new(0, 0));
    assert_eq!(m.world_to_chunk(15, 16), ChunkCoord::new(0, 1));
    assert_eq!(m.world_to_chunk(-1, -16), ChunkCoord::new(-1, -1));
    assert_eq!(m.world_to_chunk(-17, 0), ChunkCoord::new(-2, 0));
    assert_eq!(m.world_to_local(-1, -16), (15, 0));
    assert_eq!(m.world_to_local(33, 7), (1, 7));
}

#[test]
fn eviction_never_picks_occupied_or_unsettled_chunks() {
    let mut m = manager(4, 3);

    // Occupied, refreshed: settled only if its cell is settled.
    let a = m.get_or_create_chunk(ChunkCoord::new(0, 0), 0.0).unwrap();
    let mut cell = ink(0.5);
    cell.settled = true;
    a.put(1, 1, cell);

    // Empty but never refreshed: still unsettled.
    m.get_or_create_chunk(ChunkCoord::new(1, 0), 1.0).unwrap();
    // Empty and refreshed: the only legal victim.
    m.get_or_create_chunk(ChunkCoord::new(2, 0), 2.0).unwrap();
    m.get_mut(ChunkCoord::new(2, 0)).unwrap().refresh_summary();
    m.get_mut(ChunkCoord::new(0, 0)).unwrap().refresh_summary();

    assert!(m.get(ChunkCoord::new(0, 0)).unwrap().is_settled());
    assert_eq!(m.eviction_candidate(), Some(ChunkCoord::new(2, 0)));

    m.get_or_create_chunk(ChunkCoord::new(3, 0), 3.0).unwrap();
    assert!(m.get(ChunkCoord::new(2, 0)).is_none());
    assert!(m.get(ChunkCoord::new(0, 0)).is_some());
    assert!(m.get(ChunkCoord::new(1, 0)).is_some());
    assert_eq!(m.stats().evictions, 1);

    // Nothing evictable now: allocation is refused.
    assert!(m.get_or_create_chunk(ChunkCoord::new(9, 9), 4.0).is_none());
    assert_eq!(m.stats().refused, 1);
    assert_eq!(m.len(), 3);
}

#[test]
fn eviction_prefers_least_recently_active() {
    let mut m = manager(4, 8);
    for (i, cx) in [5, 2, 7].iter().enumerate() {
        m.get_or_create_chunk(ChunkCoord::new(*cx, 0), 10.0 - i as f64).unwrap();
    }
    m.refresh_summaries();
    assert_eq!(m.eviction_candidate(), Some(ChunkCoord::new(7, 0)));

    m.mark_active(ChunkCoord::new(7, 0), 20.0);
    m.refresh_summaries();
    assert_eq!(m.eviction_candidate(), Some(ChunkCoord::new(2, 0)));
}

#[test]
fn cleanup_waits_for_unload_delay_and_mark_active_cancels() {
    let mut m = manager(4, 8);
    m.get_or_create_chunk(ChunkCoord::new(0, 0), 0.0).unwrap();
    m.refresh_summaries();

    assert_eq!(m.schedule_cleanup(1.0), 0);
    assert_eq!(m.get(ChunkCoord::new(0, 0)).unwrap().idle_for(2.0), Some(1.0));

    // Activity cancels the pending unload and restarts the clock.
    assert!(m.mark_active(ChunkCoord::new(0, 0), 2.5));
    assert_eq!(m.schedule_cleanup(3.5), 0);
    m.refresh_summaries();
    assert_eq!(m.schedule_cleanup(4.0), 0);
    assert_eq!(m.schedule_cleanup(6.0), 1);
    assert!(m.is_empty());
    assert_eq!(m.stats().unloads, 1);
    // Idempotent once gone.
    assert_eq!(m.schedule_cleanup(100.0), 0);
}

#[test]
fn ghost_border_mirrors_neighbor_edges() {
    let mut m = manager(4, 8);
    m.get_or_create_chunk(ChunkCoord::new(0, 0), 0.0).unwrap().put(3, 2, ink(0.7));
    m.get_or_create_chunk(ChunkCoord::new(1, 0), 0.0).unwrap().put(0, 1, ink(0.4));
    m.get_or_create_chunk(ChunkCoord::new(0, 1), 0.0).unwrap();
    m.refresh_ghosts();

    let east = m.get(ChunkCoord::new(1, 0)).unwrap();
    assert_eq!(east.sample(-1, 2).map(|s| s.volume), Some(0.7));
    assert_eq!(east.sample(-1, 1), None);

    let west = m.get(ChunkCoord::new(0, 0)).unwrap();
    assert_eq!(west.sample(4, 1).map(|s| s.volume), Some(0.4));
    assert_eq!(west.sample(3, 2).map(|s| s.volume), Some(0.7));
    // Corners are outside the 4-connected border.
    assert_eq!(west.sample(-1, -1), None);

    let [north, _, _, _] = m.neighbor_chunks(ChunkCoord::new(0, 1));
    assert_eq!(north.map(|c| c.coord()), Some(ChunkCoord::new(0, 0)));
}

#[test]
fn visible_chunks_answers_viewport_queries() {
    let mut m = manager(8, 16);
    for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(1, 0), ChunkCoord::new(-1, -1), ChunkCoord::new(5, 5)] {
        m.get_or_create_chunk(coord, 0.0).unwrap();
    }
    // cell_size 2 -> one chunk spans 16 world units
    let view = Viewport::new(-4.0, -4.0, 20.0, 10.0);
    assert_eq!(
        m.visible_chunks(&view, 2.0),
        vec![ChunkCoord::new(-1, -1), ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)]
    );
    let huge = Viewport::new(-1000.0, -1000.0, 1000.0, 1000.0);
    assert_eq!(m.visible_chunks(&huge, 2.0).len(), 4);
}
