pub mod check;
pub mod groups;
