//! Binding a parse node into a model, including untyped and composed models.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::additional_data::AdditionalValue;
use crate::error::Result;
use crate::parsable::{FieldDeserializers, Parsable};
use crate::parse_node::JsonParseNode;
use crate::untyped::UntypedNode;
use crate::value::JsonValue;

type Undeclared<'n> = Vec<(&'n String, &'n JsonValue)>;

/// Binds `node` into `model`, running the node's assignment hooks around the
/// field binding.
pub(crate) fn assign(node: &JsonParseNode, model: &mut dyn Parsable) -> Result<()> {
    if let Some(untyped) = model.as_untyped_mut() {
        *untyped = UntypedNode::from_value(node.value());
        return Ok(());
    }
    if let Some(hook) = node.on_before_assign() {
        hook(&*model)?;
    }
    if model.is_composed_type() {
        resolve_composed(node, model)?;
    } else {
        bind_fields(node, model)?;
    }
    if let Some(hook) = node.on_after_assign() {
        hook(&*model)?;
    }
    Ok(())
}

fn bind_fields(node: &JsonParseNode, model: &mut dyn Parsable) -> Result<()> {
    let JsonValue::Object(entries) = node.value() else {
        trace!(kind = node.value().kind(), "non-object payload, no fields to bind");
        return Ok(());
    };
    let mut undeclared = Undeclared::new();
    {
        let mut fields = model.field_deserializers();
        for (name, value) in entries {
            match fields.get_mut(name.as_str()) {
                Some(deserialize) => deserialize(&node.child(value.clone()))?,
                None => undeclared.push((name, value)),
            }
        }
    }
    store_undeclared(model, undeclared);
    Ok(())
}

fn resolve_composed(node: &JsonParseNode, model: &mut dyn Parsable) -> Result<()> {
    let undeclared = {
        let Some(wrapper) = model.composed_type_mut() else {
            return bind_fields(node, model);
        };
        match node.value() {
            JsonValue::String(text) => {
                match wrapper.string_slot() {
                    Some(slot) => *slot = Some(text.clone()),
                    None => trace!("composed type has no string slot"),
                }
                return Ok(());
            }
            JsonValue::Array(_) => {
                if !wrapper.bind_collection(node)? {
                    trace!("composed type has no collection slot");
                }
                return Ok(());
            }
            JsonValue::Object(entries) => {
                if let Some(property) = wrapper.discriminator_property() {
                    if let Some(discriminator) = node.discriminator_value(property) {
                        if let Some(candidate) = wrapper.select_candidate(&discriminator) {
                            return assign(node, candidate);
                        }
                        trace!(%discriminator, "no candidate for discriminator");
                    }
                }
                bind_candidates(node, entries, wrapper.object_candidates())?
            }
            JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => {
                trace!(kind = node.value().kind(), "no composed slot for scalar payload");
                return Ok(());
            }
        }
    };
    store_undeclared(model, undeclared);
    Ok(())
}

/// Offers every property to the first candidate declaring it. A value the
/// candidate rejects leaves the property unset everywhere. Each candidate is
/// wrapped in the node's assignment hooks.
fn bind_candidates<'n>(
    node: &JsonParseNode,
    entries: &'n IndexMap<String, JsonValue>,
    mut candidates: Vec<&mut dyn Parsable>,
) -> Result<Undeclared<'n>> {
    if let Some(hook) = node.on_before_assign() {
        for candidate in &candidates {
            hook(&**candidate)?;
        }
    }
    let mut undeclared = Undeclared::new();
    {
        let mut fields: Vec<FieldDeserializers<'_>> = candidates
            .iter_mut()
            .map(|candidate| candidate.field_deserializers())
            .collect();
        for (name, value) in entries {
            let Some(deserialize) = fields.iter_mut().find_map(|f| f.get_mut(name.as_str())) else {
                undeclared.push((name, value));
                continue;
            };
            if let Err(err) = deserialize(&node.child(value.clone())) {
                debug!(property = %name, error = %err, "candidate rejected property, leaving it unset");
            }
        }
    }
    if let Some(hook) = node.on_after_assign() {
        for candidate in &candidates {
            hook(&**candidate)?;
        }
    }
    Ok(undeclared)
}

fn store_undeclared(model: &mut dyn Parsable, undeclared: Undeclared<'_>) {
    if undeclared.is_empty() {
        return;
    }
    match model.additional_data_mut() {
        Some(data) => {
            for (name, value) in undeclared {
                let value = AdditionalValue::from_value(value).unwrap_or(AdditionalValue::Null);
                data.insert(name.clone(), value);
            }
        }
        None => {
            for (name, _) in undeclared {
                trace!(property = %name, "no field or additional data holder, skipping");
            }
        }
    }
}
