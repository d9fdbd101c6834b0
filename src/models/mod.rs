//! Entity registry and instance model.
//!
//! The set of known classes is fixed at compile time. Each class maps to a
//! constructor and to a schema of declared attributes used to coerce textual
//! update values.

mod render;

pub use render::{quote, value_repr};

use crate::error::{ConsoleError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::fmt;

/// Timestamp layout used in representations and in the store file.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Key carrying the class name inside a persisted record.
pub const CLASS_KEY: &str = "__class__";

/// Attributes every instance owns and `update` never touches.
pub const PROTECTED_ATTRIBUTES: &[&str] = &["id", "created_at", "updated_at"];

/// Declared kind of a class-level attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Text value.
    Str,
    /// Whole number.
    Int,
    /// Floating point number.
    Float,
    /// List of ids. Not a scalar, values are never coerced.
    List,
}

impl AttrKind {
    /// Returns true for kinds that update values are coerced to.
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Str | Self::Int | Self::Float)
    }

    /// Converts a value to this kind.
    ///
    /// Returns `None` when the value has no sensible conversion (for example
    /// `"abc"` as an integer) or when the kind is not a scalar.
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match self {
            Self::Str => Some(Value::String(match value {
                Value::String(s) => s.clone(),
                other => value_repr(other),
            })),
            Self::Int => match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                    .map(Value::from),
                Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
                Value::Bool(b) => Some(Value::from(i64::from(*b))),
                _ => None,
            },
            Self::Float => {
                let f = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                    _ => None,
                }?;
                serde_json::Number::from_f64(f).map(Value::Number)
            }
            Self::List => None,
        }
    }
}

/// A class known to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityClass {
    BaseModel,
    User,
    State,
    City,
    Place,
    Amenity,
    Review,
}

impl EntityClass {
    /// Every registered class, in registry order.
    pub const ALL: [EntityClass; 7] = [
        Self::BaseModel,
        Self::User,
        Self::State,
        Self::City,
        Self::Place,
        Self::Amenity,
        Self::Review,
    ];

    /// Returns the class name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Place => "Place",
            Self::Amenity => "Amenity",
            Self::Review => "Review",
        }
    }

    /// Looks up a class by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }

    /// Declared attributes for this class.
    pub fn schema(self) -> &'static [(&'static str, AttrKind)] {
        use AttrKind::*;
        match self {
            Self::BaseModel => &[],
            Self::User => &[
                ("email", Str),
                ("password", Str),
                ("first_name", Str),
                ("last_name", Str),
            ],
            Self::State => &[("name", Str)],
            Self::City => &[("state_id", Str), ("name", Str)],
            Self::Place => &[
                ("city_id", Str),
                ("user_id", Str),
                ("name", Str),
                ("description", Str),
                ("number_rooms", Int),
                ("number_bathrooms", Int),
                ("max_guest", Int),
                ("price_by_night", Int),
                ("latitude", Float),
                ("longitude", Float),
                ("amenity_ids", List),
            ],
            Self::Amenity => &[("name", Str)],
            Self::Review => &[("place_id", Str), ("user_id", Str), ("text", Str)],
        }
    }

    /// Returns the declared kind of an attribute, if the class declares it.
    pub fn attribute_kind(self, attribute: &str) -> Option<AttrKind> {
        self.schema()
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, kind)| *kind)
    }

    /// Applies the schema to an incoming value.
    ///
    /// Declared scalar attributes are converted to their kind; everything else,
    /// including values that fail to convert, is returned unchanged.
    pub fn coerce(self, attribute: &str, value: Value) -> Value {
        match self.attribute_kind(attribute) {
            Some(kind) if kind.is_scalar() => kind.coerce(&value).unwrap_or(value),
            _ => value,
        }
    }

    /// Constructs a fresh instance of this class with a new id.
    pub fn construct(self) -> Instance {
        Instance::new(self)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single stored object.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    class: EntityClass,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: Map<String, Value>,
}

impl Instance {
    /// Creates an instance with a fresh UUID and both timestamps set to now.
    pub fn new(class: EntityClass) -> Self {
        let now = Utc::now();
        Self {
            class,
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: Map::new(),
        }
    }

    pub fn class(&self) -> EntityClass {
        self.class
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the store key `"<Class>.<id>"`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.class.name(), self.id)
    }

    /// Returns an attribute value if set.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Returns the attribute dictionary.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Sets or overwrites an attribute.
    ///
    /// Returns false without changing anything for protected attributes.
    pub fn set(&mut self, attribute: impl Into<String>, value: Value) -> bool {
        let attribute = attribute.into();
        if PROTECTED_ATTRIBUTES.contains(&attribute.as_str()) {
            return false;
        }
        self.attributes.insert(attribute, value);
        true
    }

    /// Marks the instance as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Builds the full dictionary: common fields first, then attributes.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("id".to_string(), Value::String(self.id.clone()));
        dict.insert(
            "created_at".to_string(),
            Value::String(format_timestamp(self.created_at)),
        );
        dict.insert(
            "updated_at".to_string(),
            Value::String(format_timestamp(self.updated_at)),
        );
        for (name, value) in &self.attributes {
            dict.insert(name.clone(), value.clone());
        }
        dict
    }

    /// Serializes the instance for the store file.
    pub fn to_record(&self) -> Value {
        let mut record = self.to_dict();
        record.insert(
            CLASS_KEY.to_string(),
            Value::String(self.class.name().to_string()),
        );
        Value::Object(record)
    }

    /// Rebuilds an instance from a store file record.
    pub fn from_record(record: &Value) -> Result<Self> {
        let fields = record
            .as_object()
            .ok_or_else(|| ConsoleError::storage("record is not a JSON object"))?;

        let class_name = string_field(fields, CLASS_KEY)?;
        let class = EntityClass::from_name(class_name)
            .ok_or_else(|| ConsoleError::storage(format!("unknown class '{class_name}'")))?;
        let id = string_field(fields, "id")?.to_string();
        let created_at = parse_timestamp(string_field(fields, "created_at")?)?;
        let updated_at = parse_timestamp(string_field(fields, "updated_at")?)?;

        let attributes = fields
            .iter()
            .filter(|(name, _)| {
                name.as_str() != CLASS_KEY && !PROTECTED_ATTRIBUTES.contains(&name.as_str())
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Self {
            class,
            id,
            created_at,
            updated_at,
            attributes,
        })
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {}",
            self.class,
            self.id,
            value_repr(&Value::Object(self.to_dict()))
        )
    }
}

fn string_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ConsoleError::storage(format!("missing or non-string field '{name}'")))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| ConsoleError::storage(format!("invalid timestamp '{text}': {e}")))
}
