pub mod list;
pub mod sections;
