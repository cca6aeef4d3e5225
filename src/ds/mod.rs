pub mod frequency;
pub mod insertion_order;
pub mod intrusive_list;
pub mod key_order;
pub mod recency;
pub mod slot_arena;

pub use frequency::FrequencyTracker;
pub use insertion_order::InsertionOrderTracker;
pub use intrusive_list::IntrusiveList;
pub use key_order::KeyOrder;
pub use recency::RecencyTracker;
pub use slot_arena::{SlotArena, SlotId};
