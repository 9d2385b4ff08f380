//! Logging macros that capture the full call-site
//!
//! Unlike the plain methods, these also record the enclosing function name,
//! which shows up in file output as `file.rs:42 - connect() - message`.

/// Name of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::logging::macros::trim_function_path(__type_name_of(__here))
    }};
}

/// Log at an explicit level: `log_at!(logger, Level::Info, "x = {}", x)`
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.is_enabled_for(__level) {
            __logger.log_at(
                __level,
                &::std::format!($($arg)*),
                $crate::logging::Location::new(
                    ::std::file!(),
                    ::std::line!(),
                    ::std::option::Option::Some($crate::__function_name!()),
                ),
            );
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::Level::Warning, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::Level::Error, $($arg)*)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log_at!($logger, $crate::logging::Level::Critical, $($arg)*)
    };
}

/// Reduce `crate::module::func::__here` to `func`, skipping closures
#[doc(hidden)]
pub fn trim_function_path(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::__here").unwrap_or(path);
    path.rsplit("::")
        .find(|segment| !segment.starts_with('{'))
        .unwrap_or(path)
}
