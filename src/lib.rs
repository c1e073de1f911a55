/*
Segbar - by David Petnick
*/
pub mod bar;
pub mod config;
pub mod events;
pub mod fill;
pub mod follow;
pub mod owner;
pub mod plugin;
pub mod segments;

pub use bar::{FollowTint, Segment, SegmentBar};
pub use config::{SegmentBarConfig, TimeSource};
pub use events::{ChangeEvent, Health, Mana, QuantityEvent, QuantityKind, QuantityMessage, SetEvent};
pub use owner::QuantityOwner;
pub use plugin::{spawn_quantity_bar, QuantityBar, SegmentBarPlugin, SegmentBarSet};
pub use segments::{EdgeType, SegmentMode};
