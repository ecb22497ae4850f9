//! Rust toolchain

use super::Toolchain;

/// Toolchain for Rust
pub fn toolchain() -> Toolchain {
    Toolchain {
        image: crate::constants::container_images::RUST,
        source_file: "solution.rs",
        compile_command: Some("rustc -O -o /workspace/solution /workspace/solution.rs"),
        run_command: "/workspace/solution",
    }
}
