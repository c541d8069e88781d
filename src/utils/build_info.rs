//! Compile-time build information (written by build.rs).

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `hopper 0.1.0 (2026-10-16, abc1234)`
pub fn version_line() -> String {
    format!(
        "hopper {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
