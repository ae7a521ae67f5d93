pub mod compile_time {
    pub mod source {
        /// Maximum source size accepted from a path or stream (10MB)
        /// SECURITY: Prevents resource exhaustion via oversized inputs
        pub const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a source "large" (1MB)
        /// PERFORMANCE: Affects acquisition logging only
        pub const LARGE_SOURCE_THRESHOLD: u64 = 1024 * 1024;
    }

    pub mod lexical {
        /// Maximum number of tokens collected by a single tokenize pass
        /// SECURITY: Prevents token explosion on adversarial inputs
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;
    }

    pub mod logging {
        /// In-memory log event buffer size
        /// RESOURCE: Controls memory usage of the memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Limits per-event memory consumption
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 1_024;
    }
}
