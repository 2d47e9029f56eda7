#![allow(dead_code)]

pub mod loanform_env;
pub mod prediction_server;
