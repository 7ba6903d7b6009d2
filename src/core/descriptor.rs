use crate::core::{EvalError, JSObjectDataPtr, MutationContext, RealmPtr, Value, new_gc_cell_ptr};
use crate::core::{JSObjectData, PropertyKey, PropertySlot, get_own_property};
use crate::js_object::{get, has_property};
use crate::raise_type_error;

/// A Rust representation of a property descriptor used by the engine.
/// Supports both data descriptors (`value` + `writable`) and accessor descriptors (`get`/`set`).
/// Fields are optional to support "partial" descriptors (as accepted by DefineProperty).
#[derive(Clone, Debug, Default)]
pub struct PropertyDescriptor<'gc> {
    // Data fields
    pub value: Option<Value<'gc>>,
    pub writable: Option<bool>,
    // Accessor fields
    pub get: Option<Value<'gc>>,
    pub set: Option<Value<'gc>>,
    // Common flags
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl<'gc> PropertyDescriptor<'gc> {
    /// Construct a full data descriptor from explicit values
    pub fn new_data(value: &Value<'gc>, writable: bool, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor {
            value: Some(value.clone()),
            writable: Some(writable),
            get: None,
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// Construct an accessor descriptor
    pub fn new_accessor(get: Option<Value<'gc>>, set: Option<Value<'gc>>, enumerable: bool, configurable: bool) -> Self {
        PropertyDescriptor {
            value: None,
            writable: None,
            get,
            set,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn is_data(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    /// ToPropertyDescriptor: read the descriptor fields of a script object. A field counts as
    /// present when the object has it, own or inherited.
    pub fn from_object(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, obj: &JSObjectDataPtr<'gc>) -> Result<Self, EvalError<'gc>> {
        let read = |name: &str| -> Result<Option<Value<'gc>>, EvalError<'gc>> {
            if has_property(obj, name) {
                Ok(Some(get(mc, realm, obj, name)?))
            } else {
                Ok(None)
            }
        };

        let desc = PropertyDescriptor {
            enumerable: read("enumerable")?.map(|v| v.to_truthy()),
            configurable: read("configurable")?.map(|v| v.to_truthy()),
            value: read("value")?,
            writable: read("writable")?.map(|v| v.to_truthy()),
            get: read("get")?,
            set: read("set")?,
        };

        for accessor in [&desc.get, &desc.set].into_iter().flatten() {
            if !matches!(accessor, Value::Undefined) && !accessor.is_callable() {
                return Err(raise_type_error!("Getter/setter must be a function").into());
            }
        }
        if desc.is_accessor() && desc.is_data() {
            return Err(raise_type_error!("Invalid property descriptor. Cannot both specify accessors and a value or writable attribute").into());
        }
        Ok(desc)
    }

    /// Produce a JS object representing this descriptor. Missing fields are
    /// materialized using defaults so the returned object is a complete descriptor.
    pub fn to_object(&self, mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> JSObjectDataPtr<'gc> {
        let desc = new_gc_cell_ptr(mc, JSObjectData::with_prototype(Some(realm.intrinsics.object_prototype)));
        let mut fields: Vec<(&str, Value<'gc>)> = Vec::new();
        if self.is_accessor() {
            fields.push(("get", self.get.clone().unwrap_or(Value::Undefined)));
            fields.push(("set", self.set.clone().unwrap_or(Value::Undefined)));
        } else {
            fields.push(("value", self.value.clone().unwrap_or(Value::Undefined)));
            fields.push(("writable", Value::Boolean(self.writable.unwrap_or(false))));
        }
        fields.push(("enumerable", Value::Boolean(self.enumerable.unwrap_or(false))));
        fields.push(("configurable", Value::Boolean(self.configurable.unwrap_or(false))));
        let mut borrowed = desc.borrow_mut(mc);
        for (name, value) in fields {
            borrowed.properties.insert(name.into(), PropertySlot::Data(value));
        }
        drop(borrowed);
        desc
    }
}

/// Build a complete `PropertyDescriptor` for an own property of `obj`, if present.
pub fn build_property_descriptor<'gc>(obj: &JSObjectDataPtr<'gc>, key: &PropertyKey<'gc>) -> Option<PropertyDescriptor<'gc>> {
    let slot = get_own_property(obj, key)?;
    let borrowed = obj.borrow();
    let enumerable = borrowed.is_enumerable(key);
    let configurable = borrowed.is_configurable(key);
    Some(match slot {
        PropertySlot::Data(value) => PropertyDescriptor::new_data(&value, borrowed.is_writable(key), enumerable, configurable),
        PropertySlot::Accessor { getter, setter } => PropertyDescriptor::new_accessor(
            Some(getter.unwrap_or(Value::Undefined)),
            Some(setter.unwrap_or(Value::Undefined)),
            enumerable,
            configurable,
        ),
    })
}
