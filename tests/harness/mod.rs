#![allow(dead_code)]

pub mod fakes;
pub mod mock_upstream;
pub mod server;
