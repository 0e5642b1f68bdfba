// ABOUTME: Version and banner constants for the driver

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const WELCOME_MESSAGE: &str = "schemer - a Scheme-flavored Lisp interpreter";
pub const WELCOME_FOOTER: &str = "Ctrl-D exits. Errors end the session.";
