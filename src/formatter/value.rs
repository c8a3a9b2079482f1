//! Plain-text rendering of BSON field values
//!
//! Every field in the export output occupies exactly one line, so nested
//! documents and arrays are rendered inline (`{key: value, ...}` and
//! `[value, ...]`), recursively. Scalars render without type wrappers.

use bson::{Binary, Bson, DateTime, Document};

/// Converts BSON values to single-line text for the export output.
pub struct TextValueFormatter;

impl TextValueFormatter {
    /// Create a new text value formatter
    pub fn new() -> Self {
        Self
    }

    /// Render a BSON value as a single line of text.
    pub fn format(&self, value: &Bson) -> String {
        match value {
            Bson::String(s) => s.clone(),
            Bson::Int32(n) => n.to_string(),
            Bson::Int64(n) => n.to_string(),
            Bson::Double(f) => format_double_smart(*f),
            Bson::Boolean(b) => b.to_string(),
            Bson::Null => String::from("null"),
            Bson::ObjectId(oid) => oid.to_string(),
            Bson::DateTime(dt) => datetime_to_iso_string(dt),
            Bson::Decimal128(d) => d.to_string(),
            Bson::Array(arr) => self.format_array(arr),
            Bson::Document(doc) => self.format_document(doc),
            Bson::Binary(bin) => binary_to_hex(bin),
            Bson::RegularExpression(regex) => {
                format!("/{}/{}", regex.pattern, regex.options)
            }
            Bson::Timestamp(ts) => format!("Timestamp({}, {})", ts.time, ts.increment),
            Bson::Undefined => String::from("undefined"),
            Bson::MinKey => String::from("MinKey"),
            Bson::MaxKey => String::from("MaxKey"),
            other => format!("{other:?}"),
        }
    }

    /// Render an array inline: `[a, b, c]`.
    fn format_array(&self, arr: &[Bson]) -> String {
        if arr.is_empty() {
            return String::from("[]");
        }

        let items: Vec<String> = arr.iter().map(|v| self.format(v)).collect();
        format!("[{}]", items.join(", "))
    }

    /// Render a nested document inline: `{a: 1, b: x}`.
    fn format_document(&self, doc: &Document) -> String {
        if doc.is_empty() {
            return String::from("{}");
        }

        let fields: Vec<String> = doc
            .iter()
            .map(|(k, v)| format!("{}: {}", k, self.format(v)))
            .collect();
        format!("{{{}}}", fields.join(", "))
    }
}

impl Default for TextValueFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert DateTime to ISO 8601 string
///
/// Falls back to the millisecond timestamp for dates outside the
/// representable RFC 3339 range.
pub fn datetime_to_iso_string(dt: &DateTime) -> String {
    dt.try_to_rfc3339_string()
        .unwrap_or_else(|_| format!("{}", dt.timestamp_millis()))
}

/// Convert Binary data to hexadecimal string
pub fn binary_to_hex(bin: &Binary) -> String {
    hex::encode(&bin.bytes)
}

/// Format double with reasonable precision
///
/// Whole-valued doubles render without the trailing `.0` unless they are
/// too large to distinguish from integers anyway.
pub fn format_double_smart(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e10 {
        format!("{f:.0}")
    } else {
        format!("{f}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId, spec::BinarySubtype};

    #[test]
    fn test_scalar_rendering() {
        let formatter = TextValueFormatter::new();
        assert_eq!(formatter.format(&Bson::String("hola".to_string())), "hola");
        assert_eq!(formatter.format(&Bson::Int32(42)), "42");
        assert_eq!(formatter.format(&Bson::Int64(-7)), "-7");
        assert_eq!(formatter.format(&Bson::Boolean(true)), "true");
        assert_eq!(formatter.format(&Bson::Null), "null");
    }

    #[test]
    fn test_double_rendering() {
        let formatter = TextValueFormatter::new();
        assert_eq!(formatter.format(&Bson::Double(42.0)), "42");
        assert_eq!(formatter.format(&Bson::Double(42.5)), "42.5");
    }

    #[test]
    fn test_object_id_renders_as_hex_string() {
        let formatter = TextValueFormatter::new();
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            formatter.format(&Bson::ObjectId(oid)),
            "507f1f77bcf86cd799439011"
        );
    }

    #[test]
    fn test_array_inline() {
        let formatter = TextValueFormatter::new();
        let arr = Bson::Array(vec![Bson::Int32(1), Bson::String("a".to_string())]);
        assert_eq!(formatter.format(&arr), "[1, a]");
        assert_eq!(formatter.format(&Bson::Array(vec![])), "[]");
    }

    #[test]
    fn test_nested_document_inline() {
        let formatter = TextValueFormatter::new();
        let value = Bson::Document(doc! { "ciudad": "Lima", "codigo": 51 });
        assert_eq!(formatter.format(&value), "{ciudad: Lima, codigo: 51}");
    }

    #[test]
    fn test_deeply_nested_stays_single_line() {
        let formatter = TextValueFormatter::new();
        let value = Bson::Document(doc! {
            "a": { "b": [1, { "c": "d" }] },
        });
        let rendered = formatter.format(&value);
        assert_eq!(rendered, "{a: {b: [1, {c: d}]}}");
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_binary_to_hex() {
        let bin = Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![0x01, 0x02, 0x03, 0xff],
        };
        assert_eq!(binary_to_hex(&bin), "010203ff");
    }

    #[test]
    fn test_datetime_to_iso_string() {
        let dt = DateTime::from_millis(0);
        assert_eq!(datetime_to_iso_string(&dt), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_format_double_smart() {
        assert_eq!(format_double_smart(3.0), "3");
        assert!(format_double_smart(3.14159).starts_with("3.14"));
    }
}
