mod format_int;

pub use format_int::NiceInt;
