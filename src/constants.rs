//! Global Constants
//!
//! Centralized constants for marker texts, banners and limits.
//! The marker strings form the contract between the resolver and the
//! registry builder, so both sides read them from here.

/// Reference resolution constants
pub mod resolver {
    /// Prefix of the provenance comment placed before every inlined block
    pub const INLINED_FROM: &str = "// Inlined from: ";

    /// Prefix of the comment replacing a directive whose target could not be read
    pub const FAILED_TO_RESOLVE: &str = "// Failed to resolve: ";

    /// Default maximum nesting of reference directives
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

/// Inert replacements used when splicing declaration text
pub mod markers {
    pub const IMPORT_REMOVED: &str = "// Import removed";
    pub const EXPORT_REMOVED: &str = "// Export removed";
    pub const DEFAULT_EXPORT_REMOVED: &str = "// Default export removed";
    pub const EXPORT_FROM_REMOVED: &str = "// Export from removed";
    pub const REFERENCE_REMOVED: &str = "// Reference directive removed";
    pub const MODULE_DECLARATION_REMOVED: &str = "// Module declaration removed";
}

/// Bundled document layout
pub mod bundle {
    /// Width of the `=` rule in banner comments
    pub const BANNER_WIDTH: usize = 76;

    /// Shared literal-union aliases emitted ahead of every other section
    pub const PREAMBLE: &str = "\
type DEGREES = 'degrees';
type RADIANS = 'radians';
type LABEL = 'label';
type FALLBACK = 'fallback';
type ANGLE_MODE = RADIANS | DEGREES;
type DESCRIBE_DISPLAY = LABEL | FALLBACK;
type GRID_DISPLAY = FALLBACK | LABEL;
type TEXT_DISPLAY = FALLBACK | LABEL;
";
}

/// Documentation rendering constants
pub mod docs {
    /// Column width of help-dialect pages
    pub const HELP_WIDTH: usize = 78;

    /// Modeline terminating every help-dialect page
    pub const MODELINE: &str = "vim:tw=78:ts=8:ft=help:norl:";

    /// Module that collects documented declarations seen before any attributed marker
    pub const FALLBACK_MODULE: &str = "general";

    /// Icon used for modules missing from the icon table
    pub const DEFAULT_ICON: &str = "📦";

    /// Version shown when no manifest or override is available
    pub const UNKNOWN_VERSION: &str = "unknown";
}

/// Module-asset fetch constants
pub mod fetch {
    pub const DEFAULT_REPOSITORY: &str = "https://github.com/processing/p5.js.git";

    /// File written next to fetched libraries recording the release tag
    pub const VERSION_FILE: &str = "VERSION";
}
