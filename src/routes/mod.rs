pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod pages;
