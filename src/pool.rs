use rand::seq::SliceRandom;

use crate::blanks::{chip_counts, BlankLayout};
use crate::model::Pair;

pub type ChipId = usize;

/// Reordering hook for the matching pool. Production uses [`random_shuffle`];
/// tests inject a deterministic order.
pub type ShuffleFn = fn(&mut [usize]);

pub fn random_shuffle(order: &mut [usize]) {
    order.shuffle(&mut rand::thread_rng());
}

pub fn identity_shuffle(_order: &mut [usize]) {}

/// One draggable occurrence of an option. Hiding a chip keeps its identity so
/// a later removal restores the exact same chip.
#[derive(Debug, Clone)]
pub struct Chip {
    pub id: ChipId,
    pub text: String,
    /// Index of the option (fill) or pair (matching) this chip came from.
    pub original_index: usize,
    /// Distinguishes duplicate chips of the same option text.
    pub occurrence: usize,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct OptionPool {
    chips: Vec<Chip>,
}

impl OptionPool {
    /// Fill pool: one chip per (option, occurrence), so repeated words have
    /// enough chips to cover every blank they appear in.
    pub fn for_fill(options: &[String], layout: &BlankLayout) -> Self {
        let counts = chip_counts(layout, options);
        let mut chips = Vec::new();
        for (index, option) in options.iter().enumerate() {
            for occurrence in 0..counts[index] {
                chips.push(Chip {
                    id: chips.len(),
                    text: option.clone(),
                    original_index: index,
                    occurrence,
                    visible: true,
                });
            }
        }
        OptionPool { chips }
    }

    /// Matching pool: the right-hand side of every pair, shuffled once at
    /// render time. Left items stay in author order; only this pool reorders.
    pub fn for_matching(pairs: &[Pair], shuffle: ShuffleFn) -> Self {
        let mut order: Vec<usize> = (0..pairs.len()).collect();
        shuffle(&mut order);
        let chips = order
            .iter()
            .enumerate()
            .map(|(id, &pair_index)| Chip {
                id,
                text: pairs[pair_index].right.clone(),
                original_index: pair_index,
                occurrence: 0,
                visible: true,
            })
            .collect();
        OptionPool { chips }
    }

    pub fn chip(&self, id: ChipId) -> &Chip {
        &self.chips[id]
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn hide(&mut self, id: ChipId) {
        self.chips[id].visible = false;
    }

    pub fn show(&mut self, id: ChipId) {
        self.chips[id].visible = true;
    }

    pub fn show_all(&mut self) {
        for chip in &mut self.chips {
            chip.visible = true;
        }
    }

    pub fn is_visible(&self, id: ChipId) -> bool {
        self.chips[id].visible
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn visible_chips(&self) -> impl Iterator<Item = &Chip> {
        self.chips.iter().filter(|c| c.visible)
    }

    /// First visible chip whose text matches exactly. Used when restoring a
    /// fill answer: any chip with the right text is interchangeable.
    pub fn find_visible_by_text(&self, text: &str) -> Option<ChipId> {
        self.chips
            .iter()
            .find(|c| c.visible && c.text == text)
            .map(|c| c.id)
    }

    pub fn find_visible_by_original(&self, original_index: usize) -> Option<ChipId> {
        self.chips
            .iter()
            .find(|c| c.visible && c.original_index == original_index)
            .map(|c| c.id)
    }
}
