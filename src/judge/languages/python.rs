//! Python toolchain

use super::Toolchain;

/// Toolchain for Python. Compilation is a syntax pre-check only.
pub fn toolchain() -> Toolchain {
    Toolchain {
        image: crate::constants::container_images::PYTHON,
        source_file: "solution.py",
        compile_command: Some("python3 -m py_compile /workspace/solution.py"),
        run_command: "python3 /workspace/solution.py",
    }
}
