//! Hand-written models shaped like generated client code.

use modelbind_json::{
    AdditionalData, ComposedTypeWrapper, FieldDeserializers, JsonParseNode, JsonSerializationWriter,
    JsonValue, Parsable, ParsableEnum, Result, UntypedNode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestSensitivity {
    Normal,
    Personal,
    Private,
    Confidential,
}

impl ParsableEnum for TestSensitivity {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "normal" => Some(TestSensitivity::Normal),
            "personal" => Some(TestSensitivity::Personal),
            "private" => Some(TestSensitivity::Private),
            "confidential" => Some(TestSensitivity::Confidential),
            _ => None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TestSensitivity::Normal => "normal",
            TestSensitivity::Personal => "personal",
            TestSensitivity::Private => "private",
            TestSensitivity::Confidential => "confidential",
        }
    }
}

#[derive(Debug, Default)]
pub struct TestEntity {
    pub id: Option<String>,
    pub office_location: Option<String>,
    pub sensitivity: Option<TestSensitivity>,
    pub additional_data: AdditionalData,
}

impl TestEntity {
    pub fn create_from_discriminator_value(_node: &JsonParseNode) -> Result<Self> {
        Ok(Self::default())
    }
}

impl Parsable for TestEntity {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        let Self {
            id,
            office_location,
            sensitivity,
            ..
        } = self;
        let mut fields = FieldDeserializers::new();
        fields.insert(
            "id",
            Box::new(move |n: &JsonParseNode| {
                *id = n.string_value()?;
                Ok(())
            }),
        );
        fields.insert(
            "officeLocation",
            Box::new(move |n: &JsonParseNode| {
                *office_location = n.string_value()?;
                Ok(())
            }),
        );
        fields.insert(
            "sensitivity",
            Box::new(move |n: &JsonParseNode| {
                *sensitivity = n.enum_value()?;
                Ok(())
            }),
        );
        fields
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        writer.write_string_value("id", self.id.as_deref());
        writer.write_string_value("officeLocation", self.office_location.as_deref());
        writer.write_enum_value("sensitivity", self.sensitivity.as_ref());
        writer.write_additional_data(Some(&self.additional_data))
    }

    fn additional_data(&self) -> Option<&AdditionalData> {
        Some(&self.additional_data)
    }

    fn additional_data_mut(&mut self) -> Option<&mut AdditionalData> {
        Some(&mut self.additional_data)
    }
}

#[derive(Debug, Default)]
pub struct SecondTestEntity {
    pub display_name: Option<String>,
    pub id: Option<i64>,
    pub office_location: Option<String>,
}

impl SecondTestEntity {
    pub fn create_from_discriminator_value(_node: &JsonParseNode) -> Result<Self> {
        Ok(Self::default())
    }
}

impl Parsable for SecondTestEntity {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        let Self {
            display_name,
            id,
            office_location,
        } = self;
        let mut fields = FieldDeserializers::new();
        fields.insert(
            "displayName",
            Box::new(move |n: &JsonParseNode| {
                *display_name = n.string_value()?;
                Ok(())
            }),
        );
        fields.insert(
            "id",
            Box::new(move |n: &JsonParseNode| {
                *id = n.int64_value()?;
                Ok(())
            }),
        );
        fields.insert(
            "officeLocation",
            Box::new(move |n: &JsonParseNode| {
                *office_location = n.string_value()?;
                Ok(())
            }),
        );
        fields
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        writer.write_int64_value("id", self.id);
        writer.write_string_value("displayName", self.display_name.as_deref());
        writer.write_string_value("officeLocation", self.office_location.as_deref());
        Ok(())
    }
}

/// Writes whichever slot is set; objects merge both candidates.
fn serialize_composed(
    writer: &mut JsonSerializationWriter,
    string_value: Option<&str>,
    first: Option<&TestEntity>,
    second: Option<&SecondTestEntity>,
    collection: Option<&[Option<TestEntity>]>,
) -> Result<()> {
    if let Some(text) = string_value {
        writer.write_string_value("", Some(text));
        return Ok(());
    }
    if let Some(items) = collection {
        return writer.write_collection_of_object_values("", Some(items));
    }
    let first = first.map(|v| v as &dyn Parsable);
    let rest: Vec<&dyn Parsable> = second.into_iter().map(|v| v as &dyn Parsable).collect();
    writer.write_dyn_object_value("", first, &rest)
}

#[derive(Debug, Default)]
pub struct IntersectionTypeMock {
    pub string_value: Option<String>,
    pub composed_type1: Option<TestEntity>,
    pub composed_type2: Option<SecondTestEntity>,
    pub composed_type3: Option<Vec<Option<TestEntity>>>,
}

impl IntersectionTypeMock {
    /// Object payloads get both candidates; anything else starts empty.
    pub fn create_from_discriminator_value(node: &JsonParseNode) -> Result<Self> {
        let mut mock = Self::default();
        if let JsonValue::Object(_) = node.value() {
            mock.composed_type1 = Some(TestEntity::default());
            mock.composed_type2 = Some(SecondTestEntity::default());
        }
        Ok(mock)
    }
}

impl Parsable for IntersectionTypeMock {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        FieldDeserializers::new()
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        serialize_composed(
            writer,
            self.string_value.as_deref(),
            self.composed_type1.as_ref(),
            self.composed_type2.as_ref(),
            self.composed_type3.as_deref(),
        )
    }

    fn composed_type_mut(&mut self) -> Option<&mut dyn ComposedTypeWrapper> {
        Some(self)
    }

    fn is_composed_type(&self) -> bool {
        true
    }
}

impl ComposedTypeWrapper for IntersectionTypeMock {
    fn string_slot(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.string_value)
    }

    fn bind_collection(&mut self, node: &JsonParseNode) -> Result<bool> {
        self.composed_type3 =
            node.collection_of_object_values(TestEntity::create_from_discriminator_value)?;
        Ok(true)
    }

    fn object_candidates(&mut self) -> Vec<&mut dyn Parsable> {
        let mut candidates: Vec<&mut dyn Parsable> = Vec::new();
        if let Some(first) = self.composed_type1.as_mut() {
            candidates.push(first);
        }
        if let Some(second) = self.composed_type2.as_mut() {
            candidates.push(second);
        }
        candidates
    }
}

#[derive(Debug, Default)]
pub struct UnionTypeMock {
    pub string_value: Option<String>,
    pub composed_type1: Option<TestEntity>,
    pub composed_type2: Option<SecondTestEntity>,
    pub composed_type3: Option<Vec<Option<TestEntity>>>,
}

impl UnionTypeMock {
    pub fn create_from_discriminator_value(_node: &JsonParseNode) -> Result<Self> {
        Ok(Self::default())
    }
}

impl Parsable for UnionTypeMock {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        FieldDeserializers::new()
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        serialize_composed(
            writer,
            self.string_value.as_deref(),
            self.composed_type1.as_ref(),
            self.composed_type2.as_ref(),
            self.composed_type3.as_deref(),
        )
    }

    fn composed_type_mut(&mut self) -> Option<&mut dyn ComposedTypeWrapper> {
        Some(self)
    }

    fn is_composed_type(&self) -> bool {
        true
    }
}

impl ComposedTypeWrapper for UnionTypeMock {
    fn string_slot(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.string_value)
    }

    fn bind_collection(&mut self, node: &JsonParseNode) -> Result<bool> {
        self.composed_type3 =
            node.collection_of_object_values(TestEntity::create_from_discriminator_value)?;
        Ok(true)
    }

    fn discriminator_property(&self) -> Option<&'static str> {
        Some("@odata.type")
    }

    fn select_candidate(&mut self, discriminator: &str) -> Option<&mut dyn Parsable> {
        if discriminator.eq_ignore_ascii_case("#microsoft.graph.testEntity") {
            let candidate: &mut dyn Parsable = self.composed_type1.insert(TestEntity::default());
            Some(candidate)
        } else if discriminator.eq_ignore_ascii_case("#microsoft.graph.secondTestEntity") {
            let candidate: &mut dyn Parsable =
                self.composed_type2.insert(SecondTestEntity::default());
            Some(candidate)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct UntypedTestEntity {
    pub id: Option<String>,
    pub title: Option<String>,
    pub location: Option<UntypedNode>,
    pub keywords: Option<UntypedNode>,
    pub detail: Option<UntypedNode>,
    pub table: Option<UntypedNode>,
    pub additional_data: AdditionalData,
}

impl UntypedTestEntity {
    pub fn create_from_discriminator_value(_node: &JsonParseNode) -> Result<Self> {
        Ok(Self::default())
    }
}

fn untyped_field<'a>(slot: &'a mut Option<UntypedNode>) -> modelbind_json::FieldDeserializer<'a> {
    Box::new(move |n: &JsonParseNode| {
        *slot = n.object_value(UntypedNode::create_from_discriminator_value)?;
        Ok(())
    })
}

impl Parsable for UntypedTestEntity {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        let Self {
            id,
            title,
            location,
            keywords,
            detail,
            table,
            ..
        } = self;
        let mut fields = FieldDeserializers::new();
        fields.insert(
            "id",
            Box::new(move |n: &JsonParseNode| {
                *id = n.string_value()?;
                Ok(())
            }),
        );
        fields.insert(
            "title",
            Box::new(move |n: &JsonParseNode| {
                *title = n.string_value()?;
                Ok(())
            }),
        );
        fields.insert("location", untyped_field(location));
        fields.insert("keywords", untyped_field(keywords));
        fields.insert("detail", untyped_field(detail));
        fields.insert("table", untyped_field(table));
        fields
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        writer.write_string_value("id", self.id.as_deref());
        writer.write_string_value("title", self.title.as_deref());
        writer.write_object_value("location", self.location.as_ref(), &[])?;
        writer.write_object_value("keywords", self.keywords.as_ref(), &[])?;
        writer.write_object_value("detail", self.detail.as_ref(), &[])?;
        writer.write_object_value("table", self.table.as_ref(), &[])?;
        writer.write_additional_data(Some(&self.additional_data))
    }

    fn additional_data(&self) -> Option<&AdditionalData> {
        Some(&self.additional_data)
    }

    fn additional_data_mut(&mut self) -> Option<&mut AdditionalData> {
        Some(&mut self.additional_data)
    }
}
