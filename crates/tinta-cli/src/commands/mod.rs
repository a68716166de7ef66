pub mod extract;
pub mod history;
pub mod info;
pub mod run;
