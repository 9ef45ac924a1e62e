pub mod resolve;
pub mod search;

pub mod util;
