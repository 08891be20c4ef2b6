/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Investigator role - can view cases, change status, and reply to reporters
pub const ROLE_INVESTIGATOR: &str = "investigator";

/// Admin role - investigator permissions plus rate limit administration
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// AUDIT ACTIONS
// =============================================================================

/// Audit action recorded when a new report is submitted
pub const ACTION_REPORT_SUBMITTED: &str = "Report Submitted";

/// Audit action recorded when the reporter posts a message on their case
pub const ACTION_MESSAGE_FROM_WHISTLEBLOWER: &str = "Message from Whistleblower";

/// Sender name stored for reporter-side messages
pub const ANONYMOUS_SENDER_NAME: &str = "Anonymous";
