// Constants for the Dentistry API

/// Size of a store-assigned document id in bytes
pub const DOCUMENT_ID_LENGTH: usize = 12;

/// Collection holding appointment records
pub const APPOINTMENT_COLLECTION: &str = "appointment";

/// Collection holding consultation records
pub const CONSULTATION_COLLECTION: &str = "consultation";

/// Records returned by a listing when no `limit` is given
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Longest storage error message surfaced in a response body
pub const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Longest error message surfaced by a diagnostic sub-check
pub const MAX_DIAGNOSTIC_ERROR_CHARS: usize = 80;

/// Collection names sampled by the diagnostic endpoint
pub const DIAGNOSTIC_COLLECTION_SAMPLE: usize = 10;

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Returned by store-backed operations when no store is configured
pub const DATABASE_NOT_AVAILABLE: &str =
    "Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.";
