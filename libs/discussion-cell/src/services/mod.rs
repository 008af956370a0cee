pub mod discussion;
