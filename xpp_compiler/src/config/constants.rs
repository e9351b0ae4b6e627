pub mod compile_time {
    pub mod file_processing {
        /// Maximum source file size accepted for compilation (10MB)
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a source file "large" (1MB)
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;
    }

    pub mod lexical {
        /// Reserved words of the class grammar, in root-scope seeding order
        pub const XPP_RESERVED_WORDS: [&str; 14] = [
            "class",
            "extends",
            "int",
            "string",
            "break",
            "print",
            "read",
            "return",
            "super",
            "if",
            "else",
            "for",
            "new",
            "constructor",
        ];

        /// Reserved words of the C-like grammar
        pub const MINIC_RESERVED_WORDS: [&str; 8] =
            ["char", "int", "else", "return", "void", "if", "while", "for"];
    }

    pub mod semantic {
        /// Type names that never refer to a declared class
        pub const PRIMITIVE_TYPES: [&str; 2] = ["int", "string"];

        /// Return type accepted for methods without being a class
        pub const VOID_TYPE: &str = "void";

        /// Type recorded on class-name entries
        pub const CLASS_TYPE: &str = "class";
    }

    pub mod logging {
        /// Maximum events retained by an in-memory logger
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum length of a single log message before truncation
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 4096;
    }
}
