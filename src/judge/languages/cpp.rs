//! C++ toolchain

use super::Toolchain;

/// Toolchain for C++
pub fn toolchain() -> Toolchain {
    Toolchain {
        image: crate::constants::container_images::CPP,
        source_file: "solution.cpp",
        compile_command: Some(
            "g++ -O2 -std=c++20 -Wall -o /workspace/solution /workspace/solution.cpp",
        ),
        run_command: "/workspace/solution",
    }
}
