pub mod ladder;
pub mod poll;
pub mod system;
