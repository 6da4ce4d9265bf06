//! Common constants used throughout scaffo.

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "scaffold.config.json";

/// Template directory used by build-template and generate when none is given.
pub const DEFAULT_TEMPLATE_DIR: &str = "./template-out";

/// Project directory used by generate and run when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "./new-app";

/// Metadata file written at the template root. Reserved: never copied into a project.
pub const METADATA_FILE: &str = ".scaffo-template.json";

/// Project-local ignore file, resolved against the source root.
pub const IGNORE_FILE: &str = ".scaffoldignore";

/// Prefix of environment variables that override variable values.
pub const ENV_PREFIX: &str = "SCAFFO_";

pub const DEFAULT_TOKEN_START: &str = "{{";
pub const DEFAULT_TOKEN_END: &str = "}}";

/// Number of leading bytes inspected by the binary sniff.
pub const BINARY_SNIFF_LEN: usize = 1024;

/// Variables whose value names the generated project's directory, in priority order.
pub const PROJECT_NAME_KEYS: [&str; 3] = ["name", "projectName", "PROJECT_NAME"];

pub const DEFAULT_IGNORE_FOLDERS: &[&str] = &[
    ".git",
    "node_modules",
    ".vscode",
    ".idea",
    ".vs",
    "dist",
    "build",
    "coverage",
    "logs",
    "bin",
    "obj",
    "target",
    "__pycache__",
    ".pytest_cache",
    "venv",
    ".venv",
    "TestResults",
    "tmp",
    "log",
    ".bundle",
    "storage",
    ".gradle",
    ".settings",
];

pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "go.sum",
    "Gemfile.lock",
    "*.log",
    "*.user",
    "*.suo",
    "*.userprefs",
    "*.dll",
    "*.pdb",
    "*.exe",
    "*.sqlite3",
    "master.key",
    ".DS_Store",
    "Thumbs.db",
    ".classpath",
    ".project",
];

pub const DEFAULT_STATIC_GLOBS: &[&str] = &[
    "**/*.png",
    "**/*.jpg",
    "**/*.jpeg",
    "**/*.gif",
    "**/*.ico",
    "**/*.webp",
    "**/*.svg",
    "**/*.ttf",
    "**/*.otf",
    "**/*.woff",
    "**/*.woff2",
    "**/*.pdf",
    "**/*.zip",
    "**/*.tar",
    "**/*.gz",
    "**/*.mp3",
    "**/*.mp4",
];
