pub mod siting;
