use crate::core::{
    EvalError, Gc, JSObjectData, JSObjectDataPtr, MutationContext, PropertyDescriptor, PropertyKey, PropertySlot, RealmPtr, Value,
    build_property_descriptor, new_gc_cell_ptr, same_value, value_to_string,
};
use crate::js_function::{CallFrame, call_function, create_builtin_constructor, create_native_method, define_native_method};
use crate::{JSError, raise_type_error};
use std::collections::HashSet;

/// Raw own data property definition with explicit attributes. Only for objects the engine
/// itself is building; script-visible definitions go through `define_property`.
pub fn define_property_internal<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    value: Value<'gc>,
    writable: bool,
    enumerable: bool,
    configurable: bool,
) {
    let key = key.into();
    let mut o = obj.borrow_mut(mc);
    o.properties.insert(key.clone(), PropertySlot::Data(value));
    if writable {
        o.set_writable(key.clone());
    } else {
        o.set_non_writable(key.clone());
    }
    if enumerable {
        o.set_enumerable(key.clone());
    } else {
        o.set_non_enumerable(key.clone());
    }
    if configurable {
        o.set_configurable(key);
    } else {
        o.set_non_configurable(key);
    }
}

pub fn define_global<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, name: &str, value: Value<'gc>) {
    define_property_internal(mc, &realm.global, name, value, true, false, true);
}

pub fn create_object<'gc>(mc: &MutationContext<'gc>, prototype: Option<JSObjectDataPtr<'gc>>) -> JSObjectDataPtr<'gc> {
    new_gc_cell_ptr(mc, JSObjectData::with_prototype(prototype))
}

/// [[Get]] with the object itself as receiver.
pub fn get<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let key = key.into();
    get_with_receiver(mc, realm, obj, &key, &Value::Object(*obj))
}

/// [[Get]]: walk the prototype chain, invoking getters with `receiver`.
pub fn get_with_receiver<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: &PropertyKey<'gc>,
    receiver: &Value<'gc>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let mut current = *obj;
    loop {
        let (slot, proto, is_proxy) = {
            let b = current.borrow();
            (b.properties.get(key).cloned(), b.prototype, b.proxy.is_some())
        };
        if is_proxy {
            return crate::js_proxy::proxy_get(mc, realm, &current, key, receiver);
        }
        match slot {
            Some(PropertySlot::Data(v)) => return Ok(v),
            Some(PropertySlot::Accessor { getter, .. }) => {
                return match getter {
                    Some(g) => call_function(mc, realm, &g, receiver.clone(), &[]),
                    None => Ok(Value::Undefined),
                };
            }
            None => match proto {
                Some(p) => current = p,
                None => return Ok(Value::Undefined),
            },
        }
    }
}

/// Property read on any value; primitives read through their wrapper prototype.
pub fn get_value<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    value: &Value<'gc>,
    key: impl Into<PropertyKey<'gc>>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let key = key.into();
    match value {
        Value::Object(obj) => get_with_receiver(mc, realm, obj, &key, value),
        Value::Undefined | Value::Null => Err(raise_type_error!(format!(
            "Cannot read properties of {} (reading '{}')",
            value_to_string(value),
            key
        ))
        .into()),
        Value::Boolean(_) => get_with_receiver(mc, realm, &realm.intrinsics.boolean_prototype, &key, value),
        _ => get_with_receiver(mc, realm, &realm.intrinsics.object_prototype, &key, value),
    }
}

/// [[Set]] with the object as receiver. Returns `Ok(false)` when the assignment is rejected
/// (read-only property, missing setter, non-extensible receiver).
pub fn set<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    value: Value<'gc>,
) -> Result<bool, EvalError<'gc>> {
    let key = key.into();
    let proxy = obj.borrow().proxy.clone();
    if let Some(p) = proxy {
        return set(mc, realm, &p.target, key, value);
    }

    let mut current = *obj;
    loop {
        let (slot, writable, proto, proxy) = {
            let b = current.borrow();
            (b.properties.get(&key).cloned(), b.is_writable(&key), b.prototype, b.proxy.clone())
        };
        if let Some(p) = proxy {
            current = p.target;
            continue;
        }
        match slot {
            Some(PropertySlot::Accessor { setter, .. }) => {
                return match setter {
                    Some(s) => {
                        call_function(mc, realm, &s, Value::Object(*obj), &[value])?;
                        Ok(true)
                    }
                    None => Ok(false),
                };
            }
            Some(PropertySlot::Data(_)) if !writable => return Ok(false),
            Some(PropertySlot::Data(_)) => break,
            None => match proto {
                Some(p) => current = p,
                None => break,
            },
        }
    }

    let mut receiver = obj.borrow_mut(mc);
    if !receiver.properties.contains_key(&key) && !receiver.is_extensible() {
        return Ok(false);
    }
    log::trace!("set: key={} on obj={:p}", key, Gc::as_ptr(*obj));
    receiver.properties.insert(key, PropertySlot::Data(value));
    Ok(true)
}

/// HasProperty, own or inherited.
pub fn has_property<'gc>(obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>) -> bool {
    let key = key.into();
    let mut current = Some(*obj);
    while let Some(o) = current {
        let b = o.borrow();
        if let Some(p) = &b.proxy {
            current = Some(p.target);
            continue;
        }
        if b.properties.contains_key(&key) {
            return true;
        }
        current = b.prototype;
    }
    false
}

pub fn has_own_property<'gc>(obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>) -> bool {
    obj.borrow().properties.contains_key(&key.into())
}

/// ValidateAndApplyPropertyDescriptor. Absent fields of `desc` keep the current attribute of
/// an existing property and default to `false` for a new one.
pub fn define_property<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    desc: &PropertyDescriptor<'gc>,
) -> Result<(), JSError> {
    let key = key.into();
    let defined = |v: &Option<Value<'gc>>| v.clone().filter(|v| !matches!(v, Value::Undefined));
    let mut o = obj.borrow_mut(mc);

    let Some(current) = o.properties.get(&key).cloned() else {
        if !o.is_extensible() {
            return Err(raise_type_error!(format!("Cannot define property {key}, object is not extensible")));
        }
        let slot = if desc.is_accessor() {
            PropertySlot::Accessor {
                getter: defined(&desc.get),
                setter: defined(&desc.set),
            }
        } else {
            PropertySlot::Data(desc.value.clone().unwrap_or(Value::Undefined))
        };
        o.properties.insert(key.clone(), slot);
        if desc.is_accessor() || !desc.writable.unwrap_or(false) {
            o.set_non_writable(key.clone());
        } else {
            o.set_writable(key.clone());
        }
        if desc.enumerable.unwrap_or(false) {
            o.set_enumerable(key.clone());
        } else {
            o.set_non_enumerable(key.clone());
        }
        if desc.configurable.unwrap_or(false) {
            o.set_configurable(key);
        } else {
            o.set_non_configurable(key);
        }
        return Ok(());
    };

    if !o.is_configurable(&key) {
        let redefine = || raise_type_error!(format!("Cannot redefine property: {key}"));
        if desc.configurable == Some(true) {
            return Err(redefine());
        }
        if let Some(e) = desc.enumerable
            && e != o.is_enumerable(&key)
        {
            return Err(redefine());
        }
        match &current {
            PropertySlot::Data(old) => {
                if desc.is_accessor() {
                    return Err(redefine());
                }
                if !o.is_writable(&key) {
                    if desc.writable == Some(true) {
                        return Err(redefine());
                    }
                    if let Some(v) = &desc.value
                        && !same_value(v, old)
                    {
                        return Err(redefine());
                    }
                }
            }
            PropertySlot::Accessor { getter, setter } => {
                if desc.is_data() {
                    return Err(redefine());
                }
                let changed = |new: &Option<Value<'gc>>, old: &Option<Value<'gc>>| {
                    new.is_some() && !same_value(&defined(new).unwrap_or(Value::Undefined), &old.clone().unwrap_or(Value::Undefined))
                };
                if changed(&desc.get, getter) || changed(&desc.set, setter) {
                    return Err(redefine());
                }
            }
        }
    }

    let slot = match current {
        PropertySlot::Data(_) if desc.is_accessor() => {
            o.set_writable(key.clone());
            PropertySlot::Accessor {
                getter: defined(&desc.get),
                setter: defined(&desc.set),
            }
        }
        PropertySlot::Accessor { .. } if desc.is_data() => {
            if desc.writable != Some(true) {
                o.set_non_writable(key.clone());
            }
            PropertySlot::Data(desc.value.clone().unwrap_or(Value::Undefined))
        }
        PropertySlot::Data(old) => PropertySlot::Data(desc.value.clone().unwrap_or(old)),
        PropertySlot::Accessor { getter, setter } => PropertySlot::Accessor {
            getter: if desc.get.is_some() { defined(&desc.get) } else { getter },
            setter: if desc.set.is_some() { defined(&desc.set) } else { setter },
        },
    };
    // insert on an existing key keeps its position in the property order
    o.properties.insert(key.clone(), slot);
    match desc.writable {
        Some(true) => o.set_writable(key.clone()),
        Some(false) => o.set_non_writable(key.clone()),
        None => {}
    }
    match desc.enumerable {
        Some(true) => o.set_enumerable(key.clone()),
        Some(false) => o.set_non_enumerable(key.clone()),
        None => {}
    }
    match desc.configurable {
        Some(true) => o.set_configurable(key),
        Some(false) => o.set_non_configurable(key),
        None => {}
    }
    Ok(())
}

fn array_index(key: &PropertyKey<'_>) -> Option<u32> {
    match key {
        PropertyKey::String(s) if s == "0" || (!s.starts_with('0') && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())) => {
            s.parse::<u32>().ok().filter(|n| *n != u32::MAX)
        }
        _ => None,
    }
}

/// [[OwnPropertyKeys]]: integer indices ascending, then strings and then symbols in creation order.
pub fn own_property_keys<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<PropertyKey<'gc>> {
    let b = obj.borrow();
    let mut indices: Vec<(u32, PropertyKey<'gc>)> = Vec::new();
    let mut strings = Vec::new();
    let mut symbols = Vec::new();
    for key in b.properties.keys() {
        match key {
            PropertyKey::Symbol(_) => symbols.push(key.clone()),
            _ => match array_index(key) {
                Some(i) => indices.push((i, key.clone())),
                None => strings.push(key.clone()),
            },
        }
    }
    indices.sort_by_key(|(i, _)| *i);
    indices.into_iter().map(|(_, k)| k).chain(strings).chain(symbols).collect()
}

/// String keys of own enumerable properties, as `Object.keys` lists them.
pub fn own_enumerable_keys<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<String> {
    let keys = own_property_keys(obj);
    let b = obj.borrow();
    keys.into_iter()
        .filter(|k| b.is_enumerable(k))
        .filter_map(|k| match k {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        })
        .collect()
}

/// Keys visited by `for..in`: enumerable string keys along the prototype chain, each once,
/// skipping keys shadowed by a closer property (enumerable or not).
pub fn for_in_keys<'gc>(obj: &JSObjectDataPtr<'gc>) -> Vec<String> {
    let mut seen: HashSet<PropertyKey<'gc>> = HashSet::new();
    let mut result = Vec::new();
    let mut current = Some(*obj);
    while let Some(o) = current {
        for key in own_property_keys(&o) {
            if !seen.insert(key.clone()) {
                continue;
            }
            if let PropertyKey::String(s) = &key
                && o.borrow().is_enumerable(&key)
            {
                result.push(s.clone());
            }
        }
        current = get_prototype_raw(&o);
    }
    result
}

/// [[GetPrototypeOf]] of an object; proxies report their target's prototype.
pub fn get_prototype_raw<'gc>(obj: &JSObjectDataPtr<'gc>) -> Option<JSObjectDataPtr<'gc>> {
    let b = obj.borrow();
    match &b.proxy {
        Some(p) => get_prototype_raw(&p.target),
        None => b.prototype,
    }
}

/// [[SetPrototypeOf]]. Fails for non-extensible objects and for links that would create a cycle.
pub fn set_prototype_raw<'gc>(mc: &MutationContext<'gc>, obj: &JSObjectDataPtr<'gc>, proto: Option<JSObjectDataPtr<'gc>>) -> bool {
    let proxy = obj.borrow().proxy.clone();
    if let Some(p) = proxy {
        return set_prototype_raw(mc, &p.target, proto);
    }
    let current = obj.borrow().prototype;
    let unchanged = match (current, proto) {
        (Some(a), Some(b)) => Gc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    };
    if unchanged {
        return true;
    }
    if !obj.borrow().is_extensible() {
        return false;
    }
    let mut p = proto;
    while let Some(cur) = p {
        if Gc::ptr_eq(cur, *obj) {
            log::debug!("set_prototype_raw: rejected cyclic link on {:p}", Gc::as_ptr(*obj));
            return false;
        }
        let b = cur.borrow();
        if b.proxy.is_some() {
            break;
        }
        p = b.prototype;
    }
    obj.borrow_mut(mc).prototype = proto;
    true
}

/// OrdinaryHasInstance: `value instanceof target`.
pub fn instance_of<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    value: &Value<'gc>,
    target: &Value<'gc>,
) -> Result<bool, EvalError<'gc>> {
    let Some(target_obj) = target.as_object().filter(|_| target.is_callable()) else {
        return Err(raise_type_error!("Right-hand side of 'instanceof' is not callable").into());
    };
    let Value::Object(obj) = value else {
        return Ok(false);
    };
    let proto = match get(mc, realm, &target_obj, "prototype")? {
        Value::Object(p) => p,
        other => {
            return Err(raise_type_error!(format!(
                "Function has non-object prototype '{}' in instanceof check",
                value_to_string(&other)
            ))
            .into());
        }
    };
    let mut current = get_prototype_raw(obj);
    while let Some(p) = current {
        if Gc::ptr_eq(p, proto) {
            return Ok(true);
        }
        current = get_prototype_raw(&p);
    }
    Ok(false)
}

fn prototype_argument<'gc>(value: &Value<'gc>) -> Result<Option<JSObjectDataPtr<'gc>>, EvalError<'gc>> {
    match value {
        Value::Object(p) => Ok(Some(*p)),
        Value::Null => Ok(None),
        other => Err(raise_type_error!(format!("Object prototype may only be an Object or null: {}", value_to_string(other))).into()),
    }
}

fn to_prototype_value<'gc>(proto: Option<JSObjectDataPtr<'gc>>) -> Value<'gc> {
    proto.map(Value::Object).unwrap_or(Value::Null)
}

/// Prototype of any value as `Object.getPrototypeOf` sees it (primitives are boxed first).
pub fn prototype_of_value<'gc>(realm: RealmPtr<'gc>, value: &Value<'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    match value {
        Value::Object(obj) => Ok(to_prototype_value(get_prototype_raw(obj))),
        Value::Undefined | Value::Null => Err(raise_type_error!("Cannot convert undefined or null to object").into()),
        Value::Boolean(_) => Ok(Value::Object(realm.intrinsics.boolean_prototype)),
        _ => Ok(Value::Object(realm.intrinsics.object_prototype)),
    }
}

/// ObjectDefineProperties: apply every own enumerable descriptor of `props` to `target`.
pub fn object_define_properties<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    target: &JSObjectDataPtr<'gc>,
    props: &JSObjectDataPtr<'gc>,
) -> Result<(), EvalError<'gc>> {
    let mut descriptors = Vec::new();
    for key in own_property_keys(props) {
        if !props.borrow().is_enumerable(&key) {
            continue;
        }
        let Value::Object(desc_obj) = get(mc, realm, props, &key)? else {
            return Err(raise_type_error!(format!("Property description must be an object: {key}")).into());
        };
        descriptors.push((key, PropertyDescriptor::from_object(mc, realm, &desc_obj)?));
    }
    for (key, desc) in descriptors {
        define_property(mc, target, key, &desc)?;
    }
    Ok(())
}

pub fn initialize_object_module<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    let object_proto = realm.intrinsics.object_prototype;
    let object_ctor = create_builtin_constructor(mc, realm, "Object", 1, object_constructor, object_proto);

    let profile = &realm.profile;
    if profile.object_get_prototype_of {
        define_native_method(mc, realm, &object_ctor, "getPrototypeOf", 1, object_get_prototype_of);
    }
    if profile.object_set_prototype_of {
        define_native_method(mc, realm, &object_ctor, "setPrototypeOf", 2, object_set_prototype_of);
    }
    define_native_method(mc, realm, &object_ctor, "create", 2, object_create);
    define_native_method(mc, realm, &object_ctor, "defineProperty", 3, object_define_property);
    define_native_method(mc, realm, &object_ctor, "getOwnPropertyDescriptor", 2, object_get_own_property_descriptor);
    define_native_method(mc, realm, &object_ctor, "keys", 1, object_keys);
    define_native_method(mc, realm, &object_ctor, "getOwnPropertyNames", 1, object_get_own_property_names);
    define_native_method(mc, realm, &object_proto, "hasOwnProperty", 1, object_prototype_has_own_property);

    if profile.legacy_proto_accessor {
        let getter = create_native_method(mc, realm, "get __proto__", 0, proto_accessor_get);
        let setter = create_native_method(mc, realm, "set __proto__", 1, proto_accessor_set);
        let desc = PropertyDescriptor::new_accessor(Some(Value::Object(getter)), Some(Value::Object(setter)), false, true);
        define_property(mc, &object_proto, "__proto__", &desc)?;
    }

    define_global(mc, realm, "Object", Value::Object(object_ctor));
    Ok(())
}

fn object_constructor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let realm = frame.realm;
    if let Some(nt) = frame.new_target
        && !Gc::ptr_eq(nt, frame.callee)
    {
        let obj = crate::js_function::ordinary_create_from_constructor(mc, realm, nt, realm.intrinsics.object_prototype)?;
        return Ok(Value::Object(obj));
    }
    Ok(match frame.arg(0) {
        v @ Value::Object(_) => v,
        Value::Boolean(b) => {
            let wrapper = create_object(mc, Some(realm.intrinsics.boolean_prototype));
            wrapper.borrow_mut(mc).boolean_data = Some(b);
            Value::Object(wrapper)
        }
        _ => Value::Object(create_object(mc, Some(realm.intrinsics.object_prototype))),
    })
}

fn object_get_prototype_of<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    prototype_of_value(frame.realm, &frame.arg(0))
}

fn object_set_prototype_of<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let target = frame.arg(0);
    if target.is_null_or_undefined() {
        return Err(raise_type_error!("Object.setPrototypeOf called on null or undefined").into());
    }
    let proto = prototype_argument(&frame.arg(1))?;
    if let Value::Object(obj) = &target
        && !set_prototype_raw(mc, obj, proto)
    {
        return Err(raise_type_error!("Object.setPrototypeOf: cyclic prototype chain or non-extensible object").into());
    }
    Ok(target)
}

fn object_create<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let proto = prototype_argument(&frame.arg(0))?;
    let obj = create_object(mc, proto);
    match frame.arg(1) {
        Value::Undefined => {}
        Value::Object(props) => object_define_properties(mc, frame.realm, &obj, &props)?,
        _ => return Err(raise_type_error!("Property description must be an object").into()),
    }
    Ok(Value::Object(obj))
}

fn object_define_property<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let Value::Object(obj) = frame.arg(0) else {
        return Err(raise_type_error!("Object.defineProperty called on non-object").into());
    };
    let key = PropertyKey::from_value(&frame.arg(1));
    let Value::Object(desc_obj) = frame.arg(2) else {
        return Err(raise_type_error!(format!("Property description must be an object: {}", value_to_string(&frame.arg(2)))).into());
    };
    let desc = PropertyDescriptor::from_object(mc, frame.realm, &desc_obj)?;
    define_property(mc, &obj, key, &desc)?;
    Ok(Value::Object(obj))
}

fn object_get_own_property_descriptor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let Value::Object(obj) = frame.arg(0) else {
        return Ok(Value::Undefined);
    };
    let key = PropertyKey::from_value(&frame.arg(1));
    Ok(match build_property_descriptor(&obj, &key) {
        Some(desc) => Value::Object(desc.to_object(mc, frame.realm)),
        None => Value::Undefined,
    })
}

fn object_keys<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let keys = match frame.arg(0) {
        Value::Object(obj) => own_enumerable_keys(&obj),
        v if v.is_null_or_undefined() => return Err(raise_type_error!("Cannot convert undefined or null to object").into()),
        _ => Vec::new(),
    };
    let values: Vec<Value<'gc>> = keys.into_iter().map(Value::String).collect();
    Ok(Value::Object(crate::js_array::create_array(mc, frame.realm, &values)))
}

fn object_get_own_property_names<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let names = match frame.arg(0) {
        Value::Object(obj) => own_property_keys(&obj)
            .into_iter()
            .filter_map(|k| match k {
                PropertyKey::String(s) => Some(Value::String(s)),
                PropertyKey::Symbol(_) => None,
            })
            .collect(),
        v if v.is_null_or_undefined() => return Err(raise_type_error!("Cannot convert undefined or null to object").into()),
        _ => Vec::new(),
    };
    Ok(Value::Object(crate::js_array::create_array(mc, frame.realm, &names)))
}

fn object_prototype_has_own_property<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let key = PropertyKey::from_value(&frame.arg(0));
    match &frame.this {
        Value::Object(obj) => Ok(Value::Boolean(has_own_property(obj, key))),
        v if v.is_null_or_undefined() => Err(raise_type_error!("Cannot convert undefined or null to object").into()),
        _ => Ok(Value::Boolean(false)),
    }
}

fn proto_accessor_get<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    prototype_of_value(frame.realm, &frame.this)
}

fn proto_accessor_set<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    if frame.this.is_null_or_undefined() {
        return Err(raise_type_error!("Object.prototype.__proto__ called on null or undefined").into());
    }
    // non-object, non-null values are ignored, as are primitive receivers
    let proto = match frame.arg(0) {
        Value::Object(p) => Some(p),
        Value::Null => None,
        _ => return Ok(Value::Undefined),
    };
    if let Value::Object(obj) = &frame.this
        && !set_prototype_raw(mc, obj, proto)
    {
        return Err(raise_type_error!("Object.prototype.__proto__: cyclic prototype chain or non-extensible object").into());
    }
    Ok(Value::Undefined)
}
