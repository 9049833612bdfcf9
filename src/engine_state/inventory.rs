//! # Inventory
//!
//! The player's hotbar: a fixed row of slots, each empty or holding a stack of
//! one block type.

use serde::{Deserialize, Serialize};

use super::voxels::block::block_type::BlockType;

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: usize = 9;
/// Largest stack a slot can hold.
pub const MAX_STACK: u32 = 64;

/// Some number of blocks of one type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// What the stack holds. Never `AIR`.
    pub block_type: BlockType,
    /// How many, from 1 to [`MAX_STACK`]
    pub count: u32,
}

/// The player's hotbar.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::engine_state::{
///     inventory::Inventory, voxels::block::block_type::BlockType,
/// };
///
/// let mut inventory = Inventory::default();
/// assert_eq!(inventory.add(BlockType::DIRT, 70), 0);
/// assert_eq!(inventory.count_of(BlockType::DIRT), 70);
/// assert!(inventory.remove(BlockType::DIRT, 1));
/// ```
///
/// Deserialisation runs [`Inventory::validate`], so a decoded inventory never
/// holds an out-of-range selection or an impossible stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredInventory")]
pub struct Inventory {
    slots: [Option<ItemStack>; HOTBAR_SLOTS],
    selected: usize,
}

/// Wire shape of an [`Inventory`] before validation.
#[derive(Deserialize)]
struct StoredInventory {
    slots: [Option<ItemStack>; HOTBAR_SLOTS],
    selected: usize,
}

impl TryFrom<StoredInventory> for Inventory {
    type Error = String;

    fn try_from(stored: StoredInventory) -> Result<Self, Self::Error> {
        let inventory = Inventory {
            slots: stored.slots,
            selected: stored.selected,
        };
        inventory.validate()?;
        Ok(inventory)
    }
}

impl Inventory {
    /// Adds blocks, topping up existing stacks of the same type before using
    /// empty slots.
    ///
    /// # Returns
    /// How many blocks did not fit. Air never fits.
    pub fn add(&mut self, block_type: BlockType, count: u32) -> u32 {
        if block_type == BlockType::AIR {
            return count;
        }

        let mut remaining = count;
        for stack in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if stack.block_type == block_type {
                let moved = remaining.min(MAX_STACK - stack.count);
                stack.count += moved;
                remaining -= moved;
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(MAX_STACK);
                *slot = Some(ItemStack {
                    block_type,
                    count: moved,
                });
                remaining -= moved;
            }
        }

        remaining
    }

    /// Removes `count` blocks of a type, emptying slots that run out.
    ///
    /// # Returns
    /// `false`, leaving the inventory untouched, if fewer than `count` are held.
    pub fn remove(&mut self, block_type: BlockType, count: u32) -> bool {
        if self.count_of(block_type) < count {
            return false;
        }

        let mut remaining = count;
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot else {
                continue;
            };
            if stack.block_type != block_type {
                continue;
            }
            let taken = remaining.min(stack.count);
            stack.count -= taken;
            remaining -= taken;
            if stack.count == 0 {
                *slot = None;
            }
        }
        true
    }

    /// Total number of blocks of a type across all slots.
    pub fn count_of(&self, block_type: BlockType) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.block_type == block_type)
            .map(|stack| stack.count)
            .sum()
    }

    /// Selects a slot. Out-of-range indices are ignored.
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= HOTBAR_SLOTS {
            return false;
        }
        self.selected = slot;
        true
    }

    /// Moves the selection by `delta` slots, wrapping around.
    pub fn cycle(&mut self, delta: i32) {
        self.selected = (self.selected as i32 + delta).rem_euclid(HOTBAR_SLOTS as i32) as usize;
    }

    /// Index of the selected slot.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Block type in the selected slot, if any.
    pub fn selected_block(&self) -> Option<BlockType> {
        self.slots
            .get(self.selected)
            .copied()
            .flatten()
            .map(|stack| stack.block_type)
    }

    /// All slots in hotbar order.
    pub fn slots(&self) -> &[Option<ItemStack>; HOTBAR_SLOTS] {
        &self.slots
    }

    /// Checks values that deserialisation alone cannot rule out.
    ///
    /// # Returns
    /// A description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.selected >= HOTBAR_SLOTS {
            return Err(format!("selected slot {} out of range", self.selected));
        }
        for (index, stack) in self.slots.iter().enumerate() {
            let Some(stack) = stack else {
                continue;
            };
            if stack.block_type == BlockType::AIR {
                return Err(format!("slot {} holds air", index));
            }
            if stack.count == 0 || stack.count > MAX_STACK {
                return Err(format!("slot {} holds {} items", index, stack.count));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fills_existing_stacks_first() {
        let mut inventory = Inventory::default();
        inventory.add(BlockType::STONE, 10);
        inventory.add(BlockType::DIRT, 1);
        inventory.add(BlockType::STONE, 60);

        let slots = inventory.slots();
        assert_eq!(slots[0].unwrap().count, 64);
        assert_eq!(slots[1].unwrap().block_type, BlockType::DIRT);
        assert_eq!(slots[2].unwrap().count, 6);
        assert_eq!(inventory.count_of(BlockType::STONE), 70);
    }

    #[test]
    fn overflow_is_returned() {
        let mut inventory = Inventory::default();
        let capacity = MAX_STACK * HOTBAR_SLOTS as u32;
        assert_eq!(inventory.add(BlockType::WOOD, capacity + 5), 5);
        assert_eq!(inventory.add(BlockType::LEAVES, 1), 1);
    }

    #[test]
    fn air_is_never_stored() {
        let mut inventory = Inventory::default();
        assert_eq!(inventory.add(BlockType::AIR, 3), 3);
        assert_eq!(inventory, Inventory::default());
    }

    #[test]
    fn remove_empties_slots_and_refuses_shortfall() {
        let mut inventory = Inventory::default();
        inventory.add(BlockType::GRASS, 2);

        assert!(!inventory.remove(BlockType::GRASS, 3));
        assert_eq!(inventory.count_of(BlockType::GRASS), 2);

        assert!(inventory.remove(BlockType::GRASS, 2));
        assert_eq!(inventory.slots()[0], None);
        assert_eq!(inventory.selected_block(), None);
    }

    #[test]
    fn selection_wraps_and_rejects_out_of_range() {
        let mut inventory = Inventory::default();
        inventory.cycle(-1);
        assert_eq!(inventory.selected(), HOTBAR_SLOTS - 1);
        inventory.cycle(2);
        assert_eq!(inventory.selected(), 1);
        assert!(!inventory.select(HOTBAR_SLOTS));
        assert_eq!(inventory.selected(), 1);
    }

    #[test]
    fn validate_flags_bad_stacks() {
        let mut inventory = Inventory::default();
        inventory.add(BlockType::STONE, 1);
        assert!(inventory.validate().is_ok());

        inventory.slots[3] = Some(ItemStack {
            block_type: BlockType::DIRT,
            count: 65,
        });
        assert!(inventory.validate().is_err());
    }

    #[test]
    fn decoding_rejects_out_of_range_selection() {
        let json = r#"{
            "slots": [null, null, null, null, null, null, null, null, null],
            "selected": 42
        }"#;
        let err = serde_json::from_str::<Inventory>(json).unwrap_err();
        assert!(err.to_string().contains("selected slot 42"));
    }

    #[test]
    fn decoding_rejects_oversized_stacks() {
        let json = r#"{
            "slots": [{"block_type": "DIRT", "count": 65}, null, null, null, null, null, null, null, null],
            "selected": 0
        }"#;
        assert!(serde_json::from_str::<Inventory>(json).is_err());
    }

    #[test]
    fn decoding_accepts_valid_inventory() {
        let mut inventory = Inventory::default();
        inventory.add(BlockType::LEAVES, 7);
        inventory.select(4);
        let json = serde_json::to_string(&inventory).unwrap();
        let decoded: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, inventory);
        assert_eq!(decoded.selected_block(), None);
    }
}
