pub use colored::Colorize;

#[macro_export]
macro_rules! print_red {
    ($($arg:tt)*) => {
        println!("{}", $crate::tree::common::logging::Colorize::red(format!($($arg)*).as_str()));
    };
}

#[macro_export]
macro_rules! print_green {
    ($($arg:tt)*) => {
        println!("{}", $crate::tree::common::logging::Colorize::green(format!($($arg)*).as_str()));
    };
}

#[macro_export]
macro_rules! print_yellow {
    ($($arg:tt)*) => {
        println!("{}", $crate::tree::common::logging::Colorize::yellow(format!($($arg)*).as_str()));
    };
}

#[macro_export]
macro_rules! print_blue {
    ($($arg:tt)*) => {
        println!("{}", $crate::tree::common::logging::Colorize::blue(format!($($arg)*).as_str()));
    };
}
