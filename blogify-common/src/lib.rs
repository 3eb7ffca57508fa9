#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate shrinkwraprs;

pub mod request;
pub mod utils;
