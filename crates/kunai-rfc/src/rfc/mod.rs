pub mod interop;
pub mod recur;
pub mod validation;
