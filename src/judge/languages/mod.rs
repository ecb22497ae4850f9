//! Language toolchains: how to compile and invoke a submission per language
//!
//! The language is resolved into a [`Language`] variant once, at admission;
//! all later dispatch is on the enum, never on the raw string.

pub mod c;
pub mod cpp;
pub mod go;
pub mod python;
pub mod rust;
pub mod zig;

use serde::{Deserialize, Serialize};

use crate::constants::languages;

/// A supported submission language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    C,
    Cpp,
    Rust,
    Go,
    Zig,
    Python,
}

impl Language {
    /// Resolve a wire identifier into a language
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            languages::C => Some(Self::C),
            languages::CPP => Some(Self::Cpp),
            languages::RUST => Some(Self::Rust),
            languages::GO => Some(Self::Go),
            languages::ZIG => Some(Self::Zig),
            languages::PYTHON => Some(Self::Python),
            _ => None,
        }
    }

    /// Wire identifier for this language
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => languages::C,
            Self::Cpp => languages::CPP,
            Self::Rust => languages::RUST,
            Self::Go => languages::GO,
            Self::Zig => languages::ZIG,
            Self::Python => languages::PYTHON,
        }
    }

    /// The toolchain used to compile and run this language
    pub fn toolchain(&self) -> Toolchain {
        match self {
            Self::C => c::toolchain(),
            Self::Cpp => cpp::toolchain(),
            Self::Rust => rust::toolchain(),
            Self::Go => go::toolchain(),
            Self::Zig => zig::toolchain(),
            Self::Python => python::toolchain(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compilation and invocation recipe for one language
///
/// For interpreted languages `compile_command` is a syntax pre-check; the
/// worker's control flow is the same either way.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Container image the submission runs in
    pub image: &'static str,
    /// Source file name inside the sandbox workspace
    pub source_file: &'static str,
    /// Compile command, `None` when the language needs no build step at all
    pub compile_command: Option<&'static str>,
    /// Command invoking the compiled artifact for one execution
    pub run_command: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_language() {
        for id in languages::ALL {
            let lang = Language::parse(id).expect("known language must parse");
            assert_eq!(lang.as_str(), *id);
        }
        assert_eq!(Language::parse("cobol"), None);
    }

    #[test]
    fn compiled_languages_have_compile_commands() {
        for lang in [Language::C, Language::Cpp, Language::Rust, Language::Go] {
            assert!(lang.toolchain().compile_command.is_some(), "{lang}");
        }
    }

    #[test]
    fn python_uses_syntax_precheck() {
        let tc = Language::Python.toolchain();
        assert!(tc.compile_command.unwrap().contains("py_compile"));
        assert!(tc.run_command.contains("python3"));
    }
}
