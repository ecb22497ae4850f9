//! C toolchain

use super::Toolchain;

/// Toolchain for C
pub fn toolchain() -> Toolchain {
    Toolchain {
        image: crate::constants::container_images::C,
        source_file: "solution.c",
        compile_command: Some(
            "gcc -O2 -std=c17 -Wall -o /workspace/solution /workspace/solution.c -lm",
        ),
        run_command: "/workspace/solution",
    }
}
