//! Compile-time limits

pub mod compile_time {
    pub mod input {
        /// Most non-whitespace characters a normalized input may hold
        pub const MAX_INPUT_LENGTH: usize = 256;
    }

    pub mod catalog {
        /// Maximum number of special cases a catalog may hold
        /// RESOURCE: the combined detection grammar grows with every entry
        pub const MAX_SPECIAL_CASES: usize = 1_000;

        /// Maximum tokens in a single special-case pattern
        pub const MAX_PATTERN_TOKENS: usize = 8;

        /// Largest special-case definition file read from disk (64KB)
        /// SECURITY: definitions are tiny; anything larger is rejected unread
        pub const MAX_DEFINITION_FILE_SIZE: u64 = 64 * 1024;

        /// File extension of special-case definition files
        pub const DEFINITION_EXTENSION: &str = "json";
    }

    pub mod logging {
        /// Maximum context entries attached to a single log event
        pub const MAX_CONTEXT_ENTRIES: usize = 32;

        /// Maximum log message length before truncation
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 2_048;
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn test_limits_are_sane() {
        assert!(input::MAX_INPUT_LENGTH >= 16);
        assert!(catalog::MAX_PATTERN_TOKENS >= 2);
        assert!(catalog::MAX_SPECIAL_CASES > 0);
        assert!(logging::MAX_LOG_MESSAGE_LENGTH > 0);
    }
}
