//! Canonical Column Table
//! Source column names in the attendance export and the display names used
//! everywhere after normalization.

pub const PERSON_CODE: &str = "Person Code";
pub const MODULE_CODE: &str = "Module Code";
pub const YEAR: &str = "Year";
pub const SURNAME: &str = "Surname";
pub const FORENAME: &str = "Forename";
pub const MODULE_NAME: &str = "Module Name";
pub const EVENT_ID: &str = "Event ID";
pub const OBJECT_ID: &str = "Object ID";
pub const EVENT_SLOT_ID: &str = "Event Slot ID";
pub const DATE: &str = "Date";
pub const HAS_ATTENDED: &str = "Has Attended";
pub const ATTENDED: &str = "Attended";
pub const NOT_ATTENDED: &str = "Not Attended";
pub const ATTENDANCE_CODE: &str = "Attendance Code";

/// Columns removed before renaming.
pub const DROPPED_COLUMNS: [&str; 1] = ["Planned End Date"];

/// `(source name, display name)` pairs, in output order.
/// Anything not listed here is dropped by the normalizer.
pub const COLUMN_MAP: [(&str, &str); 14] = [
    ("Person Code", PERSON_CODE),
    ("Unit Instance Code", MODULE_CODE),
    ("Calocc Code", YEAR),
    ("Surname", SURNAME),
    ("Forename", FORENAME),
    ("Long Description", MODULE_NAME),
    ("Register Event ID", EVENT_ID),
    ("Object ID", OBJECT_ID),
    ("Register Event Slot ID", EVENT_SLOT_ID),
    ("Planned Start Date", DATE),
    ("is Positive", HAS_ATTENDED),
    ("Postive Marks", ATTENDED),
    ("Negative Marks", NOT_ATTENDED),
    ("Usage Code", ATTENDANCE_CODE),
];
