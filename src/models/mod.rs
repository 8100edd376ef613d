pub mod achievement;
pub mod member;
pub mod officer;
pub mod term;
