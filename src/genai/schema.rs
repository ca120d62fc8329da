//! Response schema sent with a generation request.
//!
//! Mirrors the OpenAPI subset the generative language API accepts in
//! `generationConfig.responseSchema`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    Number,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Object fields in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "ser_properties")]
    pub properties: Vec<(String, Schema)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: Vec::new(),
            items: None,
            required: Vec::new(),
        }
    }

    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// Object whose listed fields are all required.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let properties: Vec<(String, Schema)> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let required = properties.iter().map(|(k, _)| k.clone()).collect();
        Self {
            properties,
            required,
            ..Self::leaf(SchemaType::Object)
        }
    }

    pub fn is_array(&self) -> bool {
        self.schema_type == SchemaType::Array
    }
}

#[allow(clippy::ptr_arg)]
fn ser_properties<S>(props: &Vec<(String, Schema)>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = s.serialize_map(Some(props.len()))?;
    for (k, v) in props {
        map.serialize_entry(k, v)?;
    }
    map.end()
}
