//! Paper texture - per-location memory of ink and fighting
//!
//! Entries are keyed like cells but live independently: erasing or draining a
//! cell leaves its texture behind until it decays away.

use std::collections::HashMap;

use crate::core::CellKey;
use crate::domain::TextureEntry;

#[derive(Clone, Debug, Default)]
pub struct PaperTexture {
    entries: HashMap<CellKey, TextureEntry>,
}

impl PaperTexture {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: CellKey) -> Option<&TextureEntry> {
        self.entries.get(&key)
    }

    /// Entry at `key`, created zeroed on first touch
    #[inline]
    pub fn entry(&mut self, key: CellKey) -> &mut TextureEntry {
        self.entries.entry(key).or_default()
    }

    pub fn remove(&mut self, key: CellKey) -> Option<TextureEntry> {
        self.entries.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &TextureEntry)> + '_ {
        self.entries.iter().map(|(k, e)| (*k, e))
    }

    /// Geometric decay of both fields; entries with both below `floor` are
    /// dropped. Returns how many were dropped.
    pub fn decay(&mut self, factor: f32, floor: f32) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| {
            e.saturation *= factor;
            e.contested *= factor;
            e.saturation >= floor || e.contested >= floor
        });
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_drops_only_when_both_fields_are_negligible() {
        let mut texture = PaperTexture::new();
        texture.entry(CellKey::new(0, 0)).saturation = 0.5;
        {
            let e = texture.entry(CellKey::new(1, 0));
            e.saturation = 0.0105;
            e.contested = 0.0;
        }
        {
            let e = texture.entry(CellKey::new(2, 0));
            e.saturation = 0.0;
            e.contested = 0.8;
        }

        assert_eq!(texture.decay(0.9, 0.01), 1);
        assert!(texture.get(CellKey::new(1, 0)).is_none());
        assert!((texture.get(CellKey::new(0, 0)).unwrap().saturation - 0.45).abs() < 1e-6);
        assert!(texture.get(CellKey::new(2, 0)).is_some());
    }

    #[test]
    fn repeated_decay_eventually_empties() {
        let mut texture = PaperTexture::new();
        texture.entry(CellKey::new(3, -3)).add_contested(1.0, 1.0);
        let mut ticks = 0;
        while !texture.is_empty() {
            texture.decay(0.995, 0.01);
            ticks += 1;
            assert!(ticks < 2000);
        }
        // 0.995^n drops below 0.01 around n = 919
        assert!((900..940).contains(&ticks), "ticks = {}", ticks);
    }
}
