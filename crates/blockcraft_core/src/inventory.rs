use thiserror::Error;

pub const INVENTORY_SLOTS: usize = 10;

/// Slot selected when scrolling down past slot 0.
// Independent of INVENTORY_SLOTS.
pub const DOWN_WRAP_SLOT: usize = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("no item to add")]
    MissingItem,
    #[error("all {INVENTORY_SLOTS} inventory slots are occupied")]
    Full,
}

/// Fixed array of item references plus the selected slot.
///
/// `T` is whatever identifies an item in the host (an `Entity` in the client).
#[derive(Debug, Clone)]
pub struct Inventory<T> {
    pub slots: [Option<T>; INVENTORY_SLOTS],
    pub current_slot: usize,
}

impl<T: Copy> Default for Inventory<T> {
    fn default() -> Self {
        Self {
            slots: [None; INVENTORY_SLOTS],
            current_slot: 0,
        }
    }
}

impl<T: Copy + PartialEq> Inventory<T> {
    /// Put the item in the lowest-indexed empty slot.
    pub fn try_add(&mut self, item: Option<T>) -> Result<usize, InventoryError> {
        let item = item.ok_or(InventoryError::MissingItem)?;
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(InventoryError::Full)?;
        self.slots[slot] = Some(item);
        Ok(slot)
    }

    pub fn add_item(&mut self, item: Option<T>) -> bool {
        self.try_add(item).is_ok()
    }

    pub fn get(&self, slot: usize) -> Option<T> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn current_item(&self) -> Option<T> {
        self.get(self.current_slot)
    }

    pub fn move_up_slot(&mut self) {
        self.current_slot = (self.current_slot + 1) % INVENTORY_SLOTS;
    }

    pub fn move_down_slot(&mut self) {
        if self.current_slot == 0 {
            self.current_slot = DOWN_WRAP_SLOT;
            return;
        }
        self.current_slot = (self.current_slot - 1) % INVENTORY_SLOTS;
    }

    /// Clear every slot referring to `item`. Returns the number of slots cleared.
    pub fn remove(&mut self, item: T) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if *slot == Some(item) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Clear slots whose item no longer exists.
    pub fn retain_alive(&mut self, mut alive: impl FnMut(T) -> bool) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if let Some(item) = *slot {
                if !alive(item) {
                    *slot = None;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}
