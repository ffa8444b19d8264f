//! Checker switches.

use bitflags::bitflags;

bitflags! {
    /// Modes the checker can be switched into between passes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CheckMode: u8 {
        /// Every check does nothing
        const DEACTIVATED = 1 << 0;
        /// Checking a module declaration rather than an instance: failures
        /// that only an instantiation can settle are reported as warnings
        const DECLARATION_CHECK = 1 << 1;
        /// Do not descend into elaborated contents
        const LOCAL_ONLY = 1 << 2;
    }
}

/// Statement limit for sequential and parallel blocks
pub const MAX_BLOCK_STATEMENTS: usize = 0xffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerConfig {
    pub mode: CheckMode,
    pub max_block_statements: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            mode: CheckMode::DECLARATION_CHECK | CheckMode::LOCAL_ONLY,
            max_block_statements: MAX_BLOCK_STATEMENTS,
        }
    }
}

impl CheckerConfig {
    /// Configuration for checking an instantiated module: every failure is an
    /// error and elaborated contents are visited
    pub fn instance() -> Self {
        Self {
            mode: CheckMode::empty(),
            ..Self::default()
        }
    }

    pub fn is_deactivated(&self) -> bool {
        self.mode.contains(CheckMode::DEACTIVATED)
    }

    pub fn is_declaration_check(&self) -> bool {
        self.mode.contains(CheckMode::DECLARATION_CHECK)
    }

    pub fn is_local_only(&self) -> bool {
        self.mode.contains(CheckMode::LOCAL_ONLY)
    }
}
