pub mod header;
pub mod last_run;
pub mod pace;
pub mod statusbar;
pub mod streak;
