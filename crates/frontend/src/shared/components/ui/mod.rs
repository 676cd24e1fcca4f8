pub mod badge;
pub mod button;
pub mod checkbox;
pub mod input;
pub mod select;

pub use badge::{Badge, SectionBadge};
pub use button::Button;
pub use checkbox::Checkbox;
pub use input::Input;
pub use select::Select;
