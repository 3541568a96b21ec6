use crate::utils::config::SCHEMA_VERSION;

/// Display version information
pub fn display_version() {
    println!("Browser Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Result Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Call trees, bottleneck diagnostics and operation timing for browser profiles.");
}
