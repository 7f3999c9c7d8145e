/*!
 * Shared constants and helpers for projdump
 */

use once_cell::sync::Lazy;

/// Name of the tool, always excluded from its own output
pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Default name of the generated document
pub const DEFAULT_OUTPUT_FILE: &str = "generated_project_overview.md";

/// Top-level source directories whose `.cjs` files survive exact-rule matches
pub const SOURCE_ROOTS: [&str; 3] = ["electron", "backend", "frontend"];

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Default patterns to ignore
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control & Editors
        ".git",
        ".vscode",
        ".idea",
        // Python
        "__pycache__",
        "venv",
        ".venv",
        ".env",
        "*.pyc",
        "*.egg-info",
        "*/.pytest_cache",
        "uv.lock",
        // Dependencies
        "node_modules",
        "package-lock.json",
        "*/package-lock.json",
        // Build & Dist
        "build",
        "dist",
        "dist_electron",
        "dist_electron/*",
        "out/*",
        // Data
        "data",
        "my_chromadb_vector_store",
        "*.log",
        // Images
        "*.png",
        "*.jpg",
        "*.jpeg",
        "*.gif",
        "*.bmp",
        "*.svg",
        "*.ico",
        "*.webp",
        // Audio
        "*.mp3",
        "*.wav",
        "*.ogg",
        "*.flac",
        "*.aac",
        "*.m4a",
        // Video
        "*.mp4",
        "*.mov",
        "*.avi",
        "*.mkv",
        "*.webm",
        "*.flv",
        // Fonts
        "*.ttf",
        "*.otf",
        "*.woff",
        "*.woff2",
        "*.eot",
        // Archives
        "*.zip",
        "*.rar",
        "*.7z",
        "*.tar",
        "*.gz",
        // Documents
        "*.pdf",
        "*.doc",
        "*.docx",
        "*.xls",
        "*.xlsx",
        "*.ppt",
        "*.pptx",
        // Binaries
        "*.exe",
        "*.dll",
        "*.so",
        "*.bin",
    ]
});
