// Standardized error codes for the RehabDesk Engine

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const OUT_OF_RANGE: &str = "VALIDATION_1003";
}

pub mod auth {
    pub const UNAUTHENTICATED: &str = "AUTH_2001";
    pub const INSUFFICIENT_PERMISSIONS: &str = "AUTH_2002";
    pub const ACCOUNT_INACTIVE: &str = "AUTH_2003";
}

pub mod store {
    pub const RECORD_NOT_FOUND: &str = "STORE_4001";
    pub const OPERATION_FAILED: &str = "STORE_4002";
    pub const CONSTRAINT_VIOLATION: &str = "STORE_4003";
}

pub mod system {
    pub const INTERNAL: &str = "SYSTEM_5001";
    pub const CONFIG_INVALID: &str = "SYSTEM_5002";
}
