// Reference table (car-info.json) parsing
use crate::model::{MakeEntry, ModelList, ParserError, ReferenceTable};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::info;

pub trait Parser {
    fn parse(&self, json: &str) -> Result<ReferenceTable, ParserError>;
}

/// Reads `{ "Make": ["Model", ...] | count }` objects, keeping key order.
pub struct CarInfoParser;

impl CarInfoParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for CarInfoParser {
    fn parse(&self, json: &str) -> Result<ReferenceTable, ParserError> {
        let raw: Map<String, Value> = serde_json::from_str(json)?;

        let mut makes = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let models = match value {
                Value::Array(items) => {
                    let mut models = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(model) => models.push(model),
                            other => {
                                return Err(ParserError::InvalidMake {
                                    make: name,
                                    reason: format!("model entry is not a string: {}", other),
                                });
                            }
                        }
                    }
                    ModelList::Listed(models)
                }
                Value::Number(n) => match n.as_u64() {
                    Some(count) => ModelList::Unlisted(count),
                    None => {
                        return Err(ParserError::InvalidMake {
                            make: name,
                            reason: format!("model count is not a whole number: {}", n),
                        });
                    }
                },
                other => {
                    return Err(ParserError::InvalidMake {
                        make: name,
                        reason: format!("expected a list or a count, got {}", other),
                    });
                }
            };
            makes.push(MakeEntry { name, models });
        }

        Ok(ReferenceTable::new(makes))
    }
}

/// Loads the reference table once at startup.
pub fn load_reference_table(path: impl AsRef<Path>) -> Result<ReferenceTable, ParserError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let table = CarInfoParser::new().parse(&content)?;
    info!("Loaded {} makes from {}", table.len(), path.display());
    Ok(table)
}
