//! Configuration schema
//!
//! Every key a cutting job file may contain, with its kind, whether it is
//! required and its default. Raw TOML values are coerced into a
//! [`ConfigValue`] once, when the file is loaded.

use serde::Serialize;
use std::fmt;

/// The sections of a job file, in file order
pub const SECTIONS: &[&str] = &[
    "Project", "RootChord", "TipChord", "Panel", "Wing", "Machine", "Gcode",
];

/// Kind of value a key accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Int,
    Text,
    /// `true`/`false`, or one of yes/no, on/off, 1/0 as text
    Bool,
    /// Text restricted to a fixed domain, stored lowercase
    Choice(&'static [&'static str]),
    /// One or two comma separated kerf values (left, right)
    Kerf,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Int => "integer",
            ValueKind::Text => "text",
            ValueKind::Bool => "boolean",
            ValueKind::Choice(_) => "choice",
            ValueKind::Kerf => "kerf",
        }
    }
}

/// Default used when an optional key is absent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// The key stays unset
    None,
    Float(f64),
    Int(i64),
    Text(&'static str),
    Bool(bool),
}

impl DefaultValue {
    fn to_value(self) -> Option<ConfigValue> {
        match self {
            DefaultValue::None => None,
            DefaultValue::Float(v) => Some(ConfigValue::Float(v)),
            DefaultValue::Int(v) => Some(ConfigValue::Int(v)),
            DefaultValue::Text(v) => Some(ConfigValue::Text(v.to_string())),
            DefaultValue::Bool(v) => Some(ConfigValue::Bool(v)),
        }
    }
}

/// One entry of the schema
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigKey {
    pub section: &'static str,
    pub key: &'static str,
    pub kind: ValueKind,
    pub required: bool,
    pub default: DefaultValue,
}

impl ConfigKey {
    const fn required(section: &'static str, key: &'static str, kind: ValueKind) -> Self {
        Self {
            section,
            key,
            kind,
            required: true,
            default: DefaultValue::None,
        }
    }

    const fn optional(
        section: &'static str,
        key: &'static str,
        kind: ValueKind,
        default: DefaultValue,
    ) -> Self {
        Self {
            section,
            key,
            kind,
            required: false,
            default,
        }
    }

    /// Value the key takes when it is absent from the file
    pub fn default_value(&self) -> Option<ConfigValue> {
        self.default.to_value()
    }

    /// Coerce a raw TOML value into this key's kind
    pub fn coerce(&self, raw: &toml::Value) -> Result<ConfigValue, String> {
        match self.kind {
            ValueKind::Float => as_float(raw).map(ConfigValue::Float),
            ValueKind::Int => match raw {
                toml::Value::Integer(i) => Ok(ConfigValue::Int(*i)),
                toml::Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(ConfigValue::Int)
                    .map_err(|_| format!("expected an integer, found '{}'", s)),
                other => Err(format!("expected an integer, found {}", other.type_str())),
            },
            ValueKind::Text => match raw {
                toml::Value::String(s) => Ok(ConfigValue::Text(s.clone())),
                other => Err(format!("expected text, found {}", other.type_str())),
            },
            ValueKind::Bool => match raw {
                toml::Value::Boolean(b) => Ok(ConfigValue::Bool(*b)),
                toml::Value::String(s) => parse_flag(s)
                    .map(ConfigValue::Bool)
                    .ok_or_else(|| format!("expected yes or no, found '{}'", s)),
                other => Err(format!("expected a boolean, found {}", other.type_str())),
            },
            ValueKind::Choice(domain) => {
                let toml::Value::String(s) = raw else {
                    return Err(format!("expected one of {}", domain.join(", ")));
                };
                let value = s.trim().to_lowercase();
                if domain.contains(&value.as_str()) {
                    Ok(ConfigValue::Text(value))
                } else {
                    Err(format!(
                        "'{}' is not one of {}",
                        s.trim(),
                        domain.join(", ")
                    ))
                }
            }
            ValueKind::Kerf => parse_kerf(raw).map(|(l, r)| ConfigValue::Kerf(l, r)),
        }
    }
}

/// A validated configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Float(f64),
    Int(i64),
    Text(String),
    Bool(bool),
    Kerf(f64, f64),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Text(v) => write!(f, "{}", v),
            ConfigValue::Bool(v) => write!(f, "{}", if *v { "yes" } else { "no" }),
            ConfigValue::Kerf(l, r) => write!(f, "{},{}", l, r),
        }
    }
}

fn as_float(raw: &toml::Value) -> Result<f64, String> {
    let value = match raw {
        toml::Value::Float(v) => Ok(*v),
        toml::Value::Integer(i) => Ok(*i as f64),
        toml::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("expected a number, found '{}'", s)),
        other => Err(format!("expected a number, found {}", other.type_str())),
    }?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} is not a finite number", value))
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Some(true),
        "no" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_kerf(raw: &toml::Value) -> Result<(f64, f64), String> {
    let values: Vec<f64> = match raw {
        toml::Value::String(s) => s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("'{}' is not a kerf value", part.trim()))
            })
            .collect::<Result<_, _>>()?,
        toml::Value::Array(items) => items.iter().map(as_float).collect::<Result<_, _>>()?,
        other => vec![as_float(other)?],
    };

    let (left, right) = match values.as_slice() {
        [both] => (*both, *both),
        [left, right] => (*left, *right),
        _ => {
            return Err(format!(
                "expected one or two kerf values, found {}",
                values.len()
            ))
        }
    };
    if !left.is_finite() || !right.is_finite() || left < 0.0 || right < 0.0 {
        return Err(format!("kerf values must be non-negative, found {},{}", left, right));
    }
    Ok((left, right))
}

const UNITS: &[&str] = &["inches", "millimeters"];
const SIDES: &[&str] = &["left", "right"];
const ALIGNMENTS: &[&str] = &["default", "bottom", "dihedral"];
const ANCHORS: &[&str] = &["leading", "trailing"];

use DefaultValue as D;
use ValueKind as K;

/// The full job file schema
pub static SCHEMA: &[ConfigKey] = &[
    ConfigKey::optional("Project", "Units", K::Choice(UNITS), D::Text("inches")),
    // RootChord
    ConfigKey::required("RootChord", "Profile", K::Text),
    ConfigKey::required("RootChord", "Width", K::Float),
    ConfigKey::optional("RootChord", "LeadingEdgeOffset", K::Float, D::Float(0.0)),
    ConfigKey::optional("RootChord", "Rotation", K::Float, D::Float(0.0)),
    ConfigKey::optional("RootChord", "RotationPosition", K::Float, D::Float(0.0)),
    // TipChord
    ConfigKey::required("TipChord", "Profile", K::Text),
    ConfigKey::required("TipChord", "Width", K::Float),
    ConfigKey::optional("TipChord", "LeadingEdgeOffset", K::Float, D::Float(0.0)),
    ConfigKey::optional("TipChord", "Rotation", K::Float, D::Float(0.0)),
    ConfigKey::optional("TipChord", "RotationPosition", K::Float, D::Float(0.0)),
    // Panel
    ConfigKey::required("Panel", "RootChordOffset", K::Float),
    ConfigKey::optional("Panel", "TipChordSide", K::Choice(SIDES), D::Text("right")),
    ConfigKey::required("Panel", "Width", K::Float),
    ConfigKey::optional("Panel", "Bottom", K::Float, D::Float(0.0)),
    ConfigKey::required("Panel", "Height", K::Float),
    ConfigKey::optional("Panel", "Depth", K::Float, D::Float(600.0)),
    ConfigKey::optional("Panel", "Inset", K::Float, D::Float(0.0)),
    ConfigKey::optional("Panel", "SafeHeight", K::Float, D::Float(0.0)),
    // Wing
    ConfigKey::optional("Wing", "HorizontalOffset", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "VerticalOffsetRoot", K::Float, D::Float(25.0)),
    ConfigKey::optional("Wing", "VerticalOffsetTip", K::Float, D::None),
    ConfigKey::optional(
        "Wing",
        "VerticalAlignProfiles",
        K::Choice(ALIGNMENTS),
        D::Text("default"),
    ),
    ConfigKey::optional("Wing", "Dihedral", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "Inverted", K::Bool, D::Bool(false)),
    ConfigKey::optional("Wing", "RotateWing", K::Bool, D::Bool(false)),
    ConfigKey::optional("Wing", "RotationAnchor", K::Choice(ANCHORS), D::Text("trailing")),
    ConfigKey::optional("Wing", "StockLeadingEdge", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "StockTrailingEdge", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "TrailingEdgeStockAngle", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "TrailingEdgeOffset", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "SheetingTop", K::Float, D::Float(0.0)),
    ConfigKey::optional("Wing", "SheetingBottom", K::Float, D::Float(0.0)),
    // Machine
    ConfigKey::required("Machine", "Width", K::Float),
    ConfigKey::optional("Machine", "Height", K::Float, D::Float(600.0)),
    ConfigKey::required("Machine", "Depth", K::Float),
    ConfigKey::required("Machine", "Feedrate", K::Float),
    ConfigKey::required("Machine", "Kerf", K::Kerf),
    // Gcode
    ConfigKey::optional("Gcode", "GcodeWireOn", K::Text, D::Text("")),
    ConfigKey::optional("Gcode", "GcodeWireOff", K::Text, D::Text("")),
    ConfigKey::optional("Gcode", "Axes", K::Text, D::Text("X,Y,Z,A")),
    ConfigKey::optional("Gcode", "ConfigAsComment", K::Bool, D::Bool(true)),
    ConfigKey::optional("Gcode", "InterpolationPoints", K::Int, D::Int(200)),
];

/// Canonical section name, matched case-insensitively
pub fn find_section(name: &str) -> Option<&'static str> {
    SECTIONS
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(name.trim()))
}

/// Schema entry for a key, matched case-insensitively
pub fn find_key(section: &str, key: &str) -> Option<&'static ConfigKey> {
    SCHEMA.iter().find(|k| {
        k.section.eq_ignore_ascii_case(section.trim()) && k.key.eq_ignore_ascii_case(key.trim())
    })
}
