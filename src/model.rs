// Core structs: AttributeRecord, ReferenceTable, Notification
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const UNKNOWN: &str = "Unknown";

/// One of the eight attributes deduced for a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeField {
    Colour,
    Make,
    Model,
    BodyType,
    Fuel,
    RegYear,
    Transmission,
    EngineSize,
}

impl AttributeField {
    /// Fields in display order.
    pub const ALL: [AttributeField; 8] = [
        AttributeField::Colour,
        AttributeField::Make,
        AttributeField::Model,
        AttributeField::BodyType,
        AttributeField::Fuel,
        AttributeField::RegYear,
        AttributeField::Transmission,
        AttributeField::EngineSize,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            AttributeField::Colour => "colour",
            AttributeField::Make => "make",
            AttributeField::Model => "model",
            AttributeField::BodyType => "bodyType",
            AttributeField::Fuel => "fuel",
            AttributeField::RegYear => "regYear",
            AttributeField::Transmission => "transmission",
            AttributeField::EngineSize => "engineSize",
        }
    }

    /// Human-readable label, e.g. `bodyType` -> "Body Type".
    pub fn display_name(self) -> String {
        crate::utils::format_attribute_name(self.identifier())
    }

    /// Make and model must never be blanked out by an edit.
    pub fn is_required(self) -> bool {
        matches!(self, AttributeField::Make | AttributeField::Model)
    }
}

impl fmt::Display for AttributeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field '{0}'")]
pub struct ParseFieldError(pub String);

impl FromStr for AttributeField {
    type Err = ParseFieldError;

    /// Accepts `bodyType`, `body_type`, `body-type` or `BodyType`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        AttributeField::ALL
            .into_iter()
            .find(|field| field.identifier().to_lowercase() == wanted)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRecord {
    pub colour: String,
    pub make: String,
    pub model: String,
    pub body_type: String,
    pub fuel: String,
    pub reg_year: String,
    pub transmission: String,
    pub engine_size: String,
}

impl Default for AttributeRecord {
    fn default() -> Self {
        Self {
            colour: UNKNOWN.into(),
            make: UNKNOWN.into(),
            model: UNKNOWN.into(),
            body_type: UNKNOWN.into(),
            fuel: UNKNOWN.into(),
            reg_year: UNKNOWN.into(),
            transmission: UNKNOWN.into(),
            engine_size: UNKNOWN.into(),
        }
    }
}

impl AttributeRecord {
    pub fn get(&self, field: AttributeField) -> &str {
        match field {
            AttributeField::Colour => &self.colour,
            AttributeField::Make => &self.make,
            AttributeField::Model => &self.model,
            AttributeField::BodyType => &self.body_type,
            AttributeField::Fuel => &self.fuel,
            AttributeField::RegYear => &self.reg_year,
            AttributeField::Transmission => &self.transmission,
            AttributeField::EngineSize => &self.engine_size,
        }
    }

    pub fn set(&mut self, field: AttributeField, value: impl Into<String>) {
        let slot = match field {
            AttributeField::Colour => &mut self.colour,
            AttributeField::Make => &mut self.make,
            AttributeField::Model => &mut self.model,
            AttributeField::BodyType => &mut self.body_type,
            AttributeField::Fuel => &mut self.fuel,
            AttributeField::RegYear => &mut self.reg_year,
            AttributeField::Transmission => &mut self.transmission,
            AttributeField::EngineSize => &mut self.engine_size,
        };
        *slot = value.into();
    }

    pub fn entries(&self) -> impl Iterator<Item = (AttributeField, &str)> {
        AttributeField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn has_make(&self) -> bool {
        self.make != UNKNOWN
    }

    pub fn has_model(&self) -> bool {
        self.model != UNKNOWN
    }
}

/// Models known for a make. Some table entries only carry a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelList {
    Listed(Vec<String>),
    Unlisted(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeEntry {
    pub name: String,
    pub models: ModelList,
}

/// Make -> models lookup, kept in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    makes: Vec<MakeEntry>,
}

impl ReferenceTable {
    pub fn new(makes: Vec<MakeEntry>) -> Self {
        Self { makes }
    }

    pub fn with_models<S: Into<String>>(
        mut self,
        make: impl Into<String>,
        models: impl IntoIterator<Item = S>,
    ) -> Self {
        self.makes.push(MakeEntry {
            name: make.into(),
            models: ModelList::Listed(models.into_iter().map(Into::into).collect()),
        });
        self
    }

    pub fn with_unlisted(mut self, make: impl Into<String>, count: u64) -> Self {
        self.makes.push(MakeEntry {
            name: make.into(),
            models: ModelList::Unlisted(count),
        });
        self
    }

    pub fn makes(&self) -> &[MakeEntry] {
        &self.makes
    }

    pub fn len(&self) -> usize {
        self.makes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.makes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Success => f.write_str("success"),
        }
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Rejected user intents. The display text is what the user is shown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter a valid car description.")]
    EmptyInput,
    #[error("Unable to identify the car make and model. Please provide more details.")]
    UnresolvedBoth,
    #[error("Unable to identify the car make. Please check your input.")]
    UnresolvedMake,
    #[error("Unable to identify the car model. Please provide more details.")]
    UnresolvedModel,
    #[error("No car details to add. Please submit car information first.")]
    NoDraft,
    #[error("Cannot add car with unknown make or model. Please provide valid information.")]
    IncompleteRecord,
    #[error("{} cannot be empty or unknown.", .0.display_name())]
    InvalidFieldEdit(AttributeField),
    #[error("No saved car at position {0}.")]
    InvalidIndex(usize),
}

impl SessionError {
    /// Deduction gaps still leave a usable draft behind.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            SessionError::UnresolvedBoth | SessionError::UnresolvedMake | SessionError::UnresolvedModel
        )
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("index {index} out of range for {len} saved cars")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read reference table: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed reference table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("make '{make}' has an invalid model list: {reason}")]
    InvalidMake { make: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_defaults_to_unknown() {
        let record = AttributeRecord::default();
        assert!(record.entries().all(|(_, v)| v == UNKNOWN));
        assert!(!record.has_make());
        assert!(!record.has_model());
    }

    #[test]
    fn set_overwrites_single_field() {
        let mut record = AttributeRecord::default();
        record.set(AttributeField::BodyType, "Coupe");
        assert_eq!(record.body_type, "Coupe");
        assert_eq!(record.get(AttributeField::BodyType), "Coupe");
        assert_eq!(record.fuel, UNKNOWN);
    }

    #[test]
    fn field_parses_loose_spellings() {
        assert_eq!("bodyType".parse::<AttributeField>(), Ok(AttributeField::BodyType));
        assert_eq!("body_type".parse::<AttributeField>(), Ok(AttributeField::BodyType));
        assert_eq!("ENGINE-SIZE".parse::<AttributeField>(), Ok(AttributeField::EngineSize));
        assert_eq!("make".parse::<AttributeField>(), Ok(AttributeField::Make));
        assert!("wheels".parse::<AttributeField>().is_err());
    }

    #[test]
    fn invalid_edit_message_names_field() {
        assert_eq!(
            SessionError::InvalidFieldEdit(AttributeField::Make).to_string(),
            "Make cannot be empty or unknown."
        );
    }

    #[test]
    fn only_unresolved_errors_are_advisory() {
        assert!(SessionError::UnresolvedMake.is_advisory());
        assert!(!SessionError::EmptyInput.is_advisory());
        assert!(!SessionError::IncompleteRecord.is_advisory());
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(AttributeRecord::default()).unwrap();
        assert_eq!(json["bodyType"], "Unknown");
        assert_eq!(json["engineSize"], "Unknown");
    }
}
