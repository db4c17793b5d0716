pub mod cuckoo;

pub use cuckoo::*;
