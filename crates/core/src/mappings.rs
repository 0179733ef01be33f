//! Resource-mapper metadata
//!
//! Declares which fields a create/update operation accepts through its
//! `fields` mapper. Handlers read mapper values only through
//! [`MappedFields`], which refuses undeclared ids, so the declared set and the
//! fields a handler can send are the same set.

use std::str::FromStr;

use obscreen_domain::{
    ContentOperation, ObscreenError, PlaylistOperation, Resource, ResourceOperation, Result,
    SlideOperation,
};
use serde::Serialize;

use crate::params::ParameterBag;

/// Parameter holding the mapper values.
pub const FIELDS_PARAM: &str = "fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Options,
}

/// One mapper field and the body/query key it lands under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingField {
    pub id: &'static str,
    pub display_name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    /// `(label, value)` pairs for [`FieldType::Options`].
    pub options: &'static [(&'static str, &'static str)],
    pub wire_key: &'static str,
}

const CONTENT_NAME: MappingField = MappingField {
    id: "name",
    display_name: "Name",
    field_type: FieldType::String,
    required: false,
    options: &[],
    wire_key: "name",
};

const PLAYLIST_NAME: MappingField = CONTENT_NAME;

const LOOP_MODE: MappingField = MappingField {
    id: "loopMode",
    display_name: "Loop Mode",
    field_type: FieldType::Options,
    required: false,
    options: &[("Sequential", "sequential"), ("Time Sync", "timesync"), ("Random", "random")],
    wire_key: "loop_mode",
};

const ENABLED: MappingField = MappingField {
    id: "enabled",
    display_name: "Enabled",
    field_type: FieldType::Boolean,
    required: false,
    options: &[],
    wire_key: "enabled",
};

const DURATION: MappingField = MappingField {
    id: "duration",
    display_name: "Duration",
    field_type: FieldType::Number,
    required: false,
    options: &[],
    wire_key: "duration",
};

const DELEGATE_DURATION: MappingField = MappingField {
    id: "delegateDuration",
    display_name: "Use video's length (if applicable)",
    field_type: FieldType::Boolean,
    required: false,
    options: &[],
    wire_key: "delegate_duration",
};

const POSITION: MappingField = MappingField {
    id: "position",
    display_name: "Position",
    field_type: FieldType::Number,
    required: false,
    options: &[],
    wire_key: "position",
};

/// Declared mapper fields for an operation; empty when it has no mapper.
pub fn mapping_fields(operation: ResourceOperation) -> &'static [MappingField] {
    match operation {
        ResourceOperation::Content(ContentOperation::Update) => &[CONTENT_NAME],
        ResourceOperation::Playlist(PlaylistOperation::Create) => &[LOOP_MODE, ENABLED],
        ResourceOperation::Playlist(PlaylistOperation::Update) => {
            &[PLAYLIST_NAME, LOOP_MODE, ENABLED]
        }
        ResourceOperation::Slide(SlideOperation::Create) => {
            &[DURATION, DELEGATE_DURATION, POSITION, ENABLED]
        }
        ResourceOperation::Slide(SlideOperation::Update) => &[DURATION, DELEGATE_DURATION, ENABLED],
        _ => &[],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingOption {
    pub name: &'static str,
    pub value: &'static str,
}

/// Host-facing column description of a mapper field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingColumn {
    pub id: &'static str,
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub display: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<MappingOption>,
}

impl From<&MappingField> for MappingColumn {
    fn from(field: &MappingField) -> Self {
        Self {
            id: field.id,
            display_name: field.display_name,
            field_type: field.field_type,
            required: field.required,
            display: true,
            options: field
                .options
                .iter()
                .map(|&(name, value)| MappingOption { name, value })
                .collect(),
        }
    }
}

/// Mapper columns for `resource`/`operation` as the host's field picker shows them.
pub fn mapping_columns(resource: Resource, operation: &str) -> Result<Vec<MappingColumn>> {
    let operation = ResourceOperation::parse(resource, operation)?;
    Ok(mapping_fields(operation).iter().map(MappingColumn::from).collect())
}

/// Mapper values restricted to one operation's declared fields
#[derive(Debug, Clone, Copy)]
pub struct MappedFields<'a> {
    operation: ResourceOperation,
    declared: &'static [MappingField],
    values: ParameterBag<'a>,
}

impl<'a> MappedFields<'a> {
    pub fn read(params: &ParameterBag<'a>, operation: ResourceOperation) -> Result<Self> {
        Ok(Self {
            operation,
            declared: mapping_fields(operation),
            values: params.fields(FIELDS_PARAM)?,
        })
    }

    /// Declared field for `id`. Asking for an undeclared id is a bug in the caller.
    pub fn field(&self, id: &str) -> Result<&'static MappingField> {
        self.declared.iter().find(|field| field.id == id).ok_or_else(|| {
            ObscreenError::internal(format!(
                "field `{id}` is not declared for {}",
                self.operation
            ))
        })
    }

    pub fn string(&self, id: &str) -> Result<Option<String>> {
        let field = self.field(id)?;
        self.values.string(field.id)
    }

    pub fn non_empty_string(&self, id: &str) -> Result<Option<String>> {
        let field = self.field(id)?;
        self.values.non_empty_string(field.id)
    }

    pub fn integer(&self, id: &str) -> Result<Option<i64>> {
        let field = self.field(id)?;
        self.values.integer(field.id)
    }

    pub fn boolean(&self, id: &str) -> Result<Option<bool>> {
        let field = self.field(id)?;
        self.values.boolean(field.id)
    }

    pub fn parsed<T: FromStr<Err = String>>(&self, id: &str) -> Result<Option<T>> {
        let field = self.field(id)?;
        self.values.parsed(field.id)
    }
}
