//! Domain layer constants
//!
//! Markers and reserved names that form the contract between rule authors and
//! Rulebook. Infrastructure-specific constants (file names, defaults) live in
//! `rulebook_infrastructure::constants`.

// ============================================================================
// DOCSTRING DIRECTIVES
// ============================================================================

/// Directive that declares a rule's identifier inside its docstring
pub const KEY_DIRECTIVE: &str = ":key";

/// Prefix shared by every docstring directive line
pub const DIRECTIVE_PREFIX: &str = ":";

// ============================================================================
// RULESET LAYOUT
// ============================================================================

/// Conventional suffix stripped from ruleset directory names
pub const RULESET_SUFFIX: &str = "-ruleset";

/// Extension of rule source files
pub const RULE_FILE_EXTENSION: &str = "py";

// ============================================================================
// PARAMETER RESOLUTION
// ============================================================================

/// Default-value prefix that requests a lookup into project settings
pub const SETTINGS_PREFIX: &str = "settings:";

/// Separator between segments of a settings path
pub const SETTINGS_PATH_SEPARATOR: char = '.';

/// Implicit parameter carrying the project working directory
pub const PROJECT_DIR_PARAM: &str = "project_dir";

/// Implicit parameter carrying the project metadata mapping
pub const META_PARAM: &str = "meta";
