//! Zig toolchain

use super::Toolchain;

/// Toolchain for Zig
pub fn toolchain() -> Toolchain {
    Toolchain {
        image: crate::constants::container_images::ZIG,
        source_file: "solution.zig",
        compile_command: Some(
            "zig build-exe -O ReleaseFast -femit-bin=/workspace/solution /workspace/solution.zig",
        ),
        run_command: "/workspace/solution",
    }
}
