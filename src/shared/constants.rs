// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Global admin; inherits every other role
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Can approve or reject project and event submissions
pub const ROLE_REVIEWER: &str = "reviewer";

// =============================================================================
// SUBMISSION DEFAULTS
// =============================================================================

/// Cost shown for events that do not state one
pub const DEFAULT_EVENT_COST: &str = "Free";
