use std::collections::HashMap;

use super::*;

/// Whole-world hash map. Grows without bound; cleanup is the only reclaim.
#[derive(Default)]
pub struct SparseStore {
    cells: HashMap<CellKey, Cell>,
}

impl SparseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellStore for SparseStore {
    #[inline]
    fn get(&self, key: CellKey) -> Option<&Cell> {
        self.cells.get(&key)
    }

    #[inline]
    fn get_mut(&mut self, key: CellKey) -> Option<&mut Cell> {
        self.cells.get_mut(&key)
    }

    fn insert(&mut self, key: CellKey, cell: Cell) -> bool {
        self.cells.insert(key, cell);
        true
    }

    fn remove(&mut self, key: CellKey) -> Option<Cell> {
        self.cells.remove(&key)
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn sorted_keys(&self) -> Vec<CellKey> {
        let mut keys: Vec<CellKey> = self.cells.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    fn for_each(&self, f: &mut dyn FnMut(CellKey, &Cell)) {
        for (key, cell) in self.cells.iter() {
            f(*key, cell);
        }
    }

    fn cells_in_rect(&self, min: (i32, i32), max: (i32, i32), f: &mut dyn FnMut(CellKey, &Cell)) {
        let area = (max.0 as i64 - min.0 as i64 + 1) * (max.1 as i64 - min.1 as i64 + 1);
        if area <= 0 {
            return;
        }
        if area as u64 <= self.cells.len() as u64 {
            for gy in min.1..=max.1 {
                for gx in min.0..=max.0 {
                    let key = CellKey::new(gx, gy);
                    if let Some(cell) = self.cells.get(&key) {
                        f(key, cell);
                    }
                }
            }
        } else {
            for (key, cell) in self.cells.iter() {
                let (gx, gy) = key.coords();
                if gx >= min.0 && gx <= max.0 && gy >= min.1 && gy <= max.1 {
                    f(*key, cell);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn backend_name(&self) -> &'static str {
        "sparse"
    }
}
