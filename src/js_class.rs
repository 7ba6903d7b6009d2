//! Runtime helpers behind downleveled `class` declarations.
//!
//! Generated code calls these in a fixed pattern:
//!
//! - `link_prototype_chain(Derived, Base)` and `make_super_caller(Derived)` once per class
//!   declaration, then `install_members` once per member group;
//! - `check_constructed_as_instance(this, Type)` as the first statement of every constructor;
//! - the super caller at every `super(...)` site, its result becoming the constructor's `this`.

use crate::core::{
    EvalError, FunctionKind, JSObjectDataPtr, MutationContext, PropertyDescriptor, PropertyKey, PropertySlot, RealmPtr, Value,
    get_own_property, value_to_string,
};
use crate::js_array::create_array;
use crate::js_function::{CallFrame, call_function, create_function};
use crate::js_object::{create_object, define_property, get, get_value, has_own_property, has_property, instance_of, set};
use crate::js_prototype::{get_prototype_of, set_prototype_of};
use crate::{JSError, raise_type_error};

pub use crate::core::type_of;

/// One class member as emitted by the compiler: a method (`value`) or an accessor pair.
#[derive(Clone, Debug)]
pub struct MemberDescriptor<'gc> {
    pub key: PropertyKey<'gc>,
    pub value: Option<Value<'gc>>,
    pub get: Option<Value<'gc>>,
    pub set: Option<Value<'gc>>,
    pub enumerable: bool,
}

impl<'gc> MemberDescriptor<'gc> {
    pub fn method(key: impl Into<PropertyKey<'gc>>, value: Value<'gc>) -> Self {
        MemberDescriptor {
            key: key.into(),
            value: Some(value),
            get: None,
            set: None,
            enumerable: false,
        }
    }

    pub fn accessor(key: impl Into<PropertyKey<'gc>>, get: Option<Value<'gc>>, set: Option<Value<'gc>>) -> Self {
        MemberDescriptor {
            key: key.into(),
            value: None,
            get,
            set,
            enumerable: false,
        }
    }

    /// Read a script-side member record `{ key, value | get, set, enumerable }`.
    pub fn from_object(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, obj: &JSObjectDataPtr<'gc>) -> Result<Self, EvalError<'gc>> {
        let key = PropertyKey::from_value(&get(mc, realm, obj, "key")?);
        let field = |name: &str| -> Result<Option<Value<'gc>>, EvalError<'gc>> {
            if has_property(obj, name) { Ok(Some(get(mc, realm, obj, name)?)) } else { Ok(None) }
        };
        let member = MemberDescriptor {
            key,
            value: field("value")?,
            get: field("get")?,
            set: field("set")?,
            enumerable: get(mc, realm, obj, "enumerable")?.to_truthy(),
        };
        if member.value.is_some() && (member.get.is_some() || member.set.is_some()) {
            return Err(raise_type_error!(format!(
                "Invalid property descriptor for '{}'. Cannot both specify accessors and a value",
                member.key
            ))
            .into());
        }
        Ok(member)
    }

    fn to_property_descriptor(&self) -> PropertyDescriptor<'gc> {
        PropertyDescriptor {
            writable: self.value.as_ref().map(|_| true),
            value: self.value.clone(),
            get: self.get.clone(),
            set: self.set.clone(),
            enumerable: Some(self.enumerable),
            configurable: Some(true),
        }
    }
}

/// InstanceGuard: `instance` must have been produced by constructing `constructor`.
pub fn check_constructed_as_instance<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    instance: &Value<'gc>,
    constructor: &Value<'gc>,
) -> Result<(), EvalError<'gc>> {
    if !instance_of(mc, realm, instance, constructor)? {
        return Err(JSError::InvalidInvocation {
            message: "Cannot call a class as a function".to_string(),
        }
        .into());
    }
    Ok(())
}

/// PrototypeChainLinker. Gives `sub_class` a fresh prototype object inheriting from
/// `super_class.prototype` (or from nothing for `null`), with a non-enumerable `constructor`
/// back-reference, and links `sub_class` itself to `super_class` so statics are inherited.
pub fn link_prototype_chain<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    sub_class: &Value<'gc>,
    super_class: &Value<'gc>,
) -> Result<(), EvalError<'gc>> {
    if !super_class.is_callable() && !matches!(super_class, Value::Null) {
        return Err(JSError::InvalidBaseType {
            message: "Super expression must either be null or a function".to_string(),
        }
        .into());
    }
    let Value::Object(sub) = sub_class else {
        return Err(raise_type_error!(format!("{} is not a constructor", value_to_string(sub_class))).into());
    };

    let parent_proto = match super_class {
        Value::Object(sup) => match get(mc, realm, sup, "prototype")? {
            Value::Object(p) => Some(p),
            Value::Null => None,
            other => {
                return Err(raise_type_error!(format!(
                    "Object prototype may only be an Object or null: {}",
                    value_to_string(&other)
                ))
                .into());
            }
        },
        _ => None,
    };

    let proto = create_object(mc, parent_proto);
    define_property(
        mc,
        &proto,
        "constructor",
        &PropertyDescriptor {
            value: Some(sub_class.clone()),
            writable: Some(true),
            configurable: Some(true),
            ..PropertyDescriptor::default()
        },
    )?;
    if !set(mc, realm, sub, "prototype", Value::Object(proto))? {
        return Err(raise_type_error!("Cannot assign to read only property 'prototype' of function").into());
    }

    if matches!(super_class, Value::Object(_)) {
        set_prototype_of(mc, realm, sub_class, super_class)?;
    }
    log::trace!("link_prototype_chain: linked {} to {}", value_to_string(sub_class), value_to_string(super_class));
    Ok(())
}

/// PropertyInstaller: define `members` on `target` in order, non-enumerable unless a member
/// asks otherwise, always configurable, writable when value-bearing. Later members replace
/// earlier ones with the same key.
pub fn install_members<'gc>(mc: &MutationContext<'gc>, target: &JSObjectDataPtr<'gc>, members: &[MemberDescriptor<'gc>]) -> Result<(), EvalError<'gc>> {
    for member in members {
        define_property(mc, target, member.key.clone(), &member.to_property_descriptor())?;
    }
    Ok(())
}

/// Install instance members on `constructor.prototype` and static members on `constructor`.
pub fn create_class<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    constructor: &Value<'gc>,
    proto_members: &[MemberDescriptor<'gc>],
    static_members: &[MemberDescriptor<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let Value::Object(ctor) = constructor else {
        return Err(raise_type_error!(format!("{} is not a constructor", value_to_string(constructor))).into());
    };
    let Value::Object(proto) = get(mc, realm, ctor, "prototype")? else {
        return Err(raise_type_error!("Class constructor has no prototype object").into());
    };
    install_members(mc, &proto, proto_members)?;
    install_members(mc, ctor, static_members)?;
    Ok(constructor.clone())
}

/// Class field definition: redefine when the key already resolves (own or inherited),
/// otherwise plain assignment.
pub fn define_field<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    obj: &Value<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    value: Value<'gc>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let Value::Object(o) = obj else {
        return Err(raise_type_error!(format!("Cannot define property on {}", value_to_string(obj))).into());
    };
    let key = key.into();
    if has_property(o, key.clone()) {
        define_property(mc, o, key, &PropertyDescriptor::new_data(&value, true, true, true))?;
    } else {
        set(mc, realm, o, key, value)?;
    }
    Ok(obj.clone())
}

/// Whether a constructor's return value replaces `this`: objects and functions do,
/// primitives (symbols included), `null` and `undefined` do not.
fn is_reference_value(value: &Value<'_>) -> bool {
    matches!(value, Value::Object(_))
}

pub fn assert_this_initialized<'gc>(self_: Value<'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    if matches!(self_, Value::Undefined) {
        return Err(JSError::UninitializedThis {
            message: "this hasn't been initialised - super() hasn't been called".to_string(),
        }
        .into());
    }
    Ok(self_)
}

pub fn possible_constructor_return<'gc>(self_: Value<'gc>, call: Value<'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    if is_reference_value(&call) {
        return Ok(call);
    }
    assert_this_initialized(self_)
}

/// `super.key` read: start at `target`, stop at the first object owning `key`, and read it with
/// getters bound to `receiver`.
pub fn super_get<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    target: &Value<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    receiver: &Value<'gc>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let key = key.into();
    let mut object = target.clone();
    let base = loop {
        let Value::Object(o) = &object else {
            return Ok(Value::Undefined);
        };
        if has_own_property(o, key.clone()) {
            break *o;
        }
        object = get_prototype_of(mc, realm, &object)?;
    };
    match get_own_property(&base, &key) {
        Some(PropertySlot::Data(v)) => Ok(v),
        Some(PropertySlot::Accessor { getter: Some(g), .. }) => call_function(mc, realm, &g, receiver.clone(), &[]),
        _ => Ok(Value::Undefined),
    }
}

/// Capability check for native reflective construction, evaluated once per realm.
pub fn is_native_reflect_construct<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> bool {
    *realm
        .caches
        .native_reflect_construct
        .get_or_init(|| match detect_native_reflect_construct(mc, realm) {
            Ok(supported) => {
                log::debug!("native Reflect.construct: {supported}");
                supported
            }
            Err(e) => {
                log::debug!("native Reflect.construct detection failed, treating as unsupported: {}", e.message());
                false
            }
        })
}

fn noop<'gc>(_mc: &MutationContext<'gc>, _frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::Undefined)
}

fn detect_native_reflect_construct<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<bool, EvalError<'gc>> {
    let global = realm.global;
    let Value::Object(reflect) = get(mc, realm, &global, "Reflect")? else {
        return Ok(false);
    };
    let construct_fn = get(mc, realm, &reflect, "construct")?;
    if !construct_fn.to_truthy() {
        return Ok(false);
    }
    if get_value(mc, realm, &construct_fn, "sham")?.to_truthy() {
        return Ok(false);
    }
    if type_of(&get(mc, realm, &global, "Proxy")?) == "function" {
        return Ok(true);
    }

    // Boolean.prototype.valueOf.call(Reflect.construct(Boolean, [], function () {}))
    let boolean = get(mc, realm, &global, "Boolean")?;
    let new_target = create_function(mc, realm, "", 0, FunctionKind::Normal, noop, Vec::new());
    let no_args = create_array(mc, realm, &[]);
    let boxed = call_function(
        mc,
        realm,
        &construct_fn,
        Value::Object(reflect),
        &[boolean.clone(), Value::Object(no_args), Value::Object(new_target)],
    )?;
    let boolean_proto = get_value(mc, realm, &boolean, "prototype")?;
    let value_of = get_value(mc, realm, &boolean_proto, "valueOf")?;
    call_function(mc, realm, &value_of, boxed, &[])?;
    Ok(true)
}

/// SuperCallTrampoline: a callable that runs the base constructor for `derived` against the
/// `this` it is invoked with, and returns the `this` the derived constructor must continue with.
pub fn make_super_caller<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, derived: &Value<'gc>) -> JSObjectDataPtr<'gc> {
    create_function(mc, realm, "_createSuperInternal", 0, FunctionKind::Method, super_call_trampoline, vec![derived.clone()])
}

fn super_call_trampoline<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let realm = frame.realm;
    let derived = frame.capture(0);
    // resolved per call so a re-linked base is honoured
    let super_ctor = get_prototype_of(mc, realm, &derived)?;

    let result = if is_native_reflect_construct(mc, realm) {
        // most-derived constructor of the instance under construction, read now rather than
        // at trampoline creation
        let instance_proto = get_prototype_of(mc, realm, &frame.this)?;
        let new_target = get_value(mc, realm, &instance_proto, "constructor")?;
        let reflect = get(mc, realm, &realm.global, "Reflect")?;
        let construct_fn = get_value(mc, realm, &reflect, "construct")?;
        let args = create_array(mc, realm, frame.args);
        log::trace!("super call via Reflect.construct, new target {}", value_to_string(&new_target));
        call_function(mc, realm, &construct_fn, reflect, &[super_ctor, Value::Object(args), new_target])?
    } else {
        log::trace!("super call via plain call of {}", value_to_string(&super_ctor));
        call_function(mc, realm, &super_ctor, frame.this.clone(), frame.args)?
    };

    possible_constructor_return(frame.this.clone(), result)
}
