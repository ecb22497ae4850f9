//! Go toolchain

use super::Toolchain;

/// Toolchain for Go
pub fn toolchain() -> Toolchain {
    Toolchain {
        image: crate::constants::container_images::GO,
        source_file: "solution.go",
        compile_command: Some("go build -o /workspace/solution /workspace/solution.go"),
        run_command: "/workspace/solution",
    }
}
