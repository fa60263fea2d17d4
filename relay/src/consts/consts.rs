use std::time::Duration;

// Submission field names, as sent by the capture forms
pub const FIELD_FULL_NAME: &str = "fullName";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_SPECIALIZATION: &str = "specialization";
pub const FIELD_INDUSTRY: &str = "industry";
pub const FIELD_YEARS_EMPLOYED: &str = "yearsEmployed";
pub const FIELD_DEBT_AMOUNT: &str = "debtAmount";
pub const FIELD_DEBT_TYPES: &str = "debtTypes";
pub const FIELD_SERVICE_INTEREST: &str = "serviceInterest";
pub const FIELD_LOAN_AMOUNT: &str = "loanAmount";

// User facing messages
pub const SUCCESS_MESSAGE: &str =
    "Thank you for your inquiry! We will contact you within 24 hours to discuss your mortgage needs.";
pub const INVALID_FORM_DATA: &str = "Invalid form data received";
pub const NAME_REQUIRED: &str = "Name is required";
pub const CONTACT_REQUIRED: &str = "Phone number or email is required";
pub const PERSON_CREATION_FAILED: &str = "Failed to create contact record in CRM";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

// Opportunity values that never change between submissions
pub const TRANSACTION_TYPE: &str = "Purchase";
pub const LEAD_STATUS: &str = "New Lead";
pub const NOT_SPECIFIED: &str = "Not specified";

// Values
pub const DEFAULT_CRM_BASE_URL: &str = "https://apis.connective.com.au/mercury/v1/";
pub const DEFAULT_BRAND: &str = "Navigator Broking";
pub const DEFAULT_CRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Format used for the human readable dates written into CRM notes
pub const NOTE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
