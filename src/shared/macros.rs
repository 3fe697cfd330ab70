/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result` or logs the error with some context and terminates the
/// process. Only meant for unrecoverable startup failures in `main`.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr, $context:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("{}: {}", $context, e);
                std::process::exit(1);
            }
        }
    };
    ($expr:expr) => {
        $crate::unwrap_or_exit!($expr, "fatal error")
    };
}
