///! API middleware

pub mod cors;
