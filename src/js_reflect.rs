use crate::core::{EvalError, JSObjectDataPtr, MutationContext, RealmPtr, Value, value_to_string};
use crate::error::JSError;
use crate::host_profile::ReflectSupport;
use crate::js_array::{array_like_to_vec, create_array};
use crate::js_function::{CallFrame, call_function, construct, define_native_method, is_constructor};
use crate::js_object::{create_object, define_global, define_property_internal, get, get_prototype_raw, own_property_keys, set_prototype_raw};
use crate::raise_type_error;

/// Install `Reflect` according to the host profile. A `Sham` host gets the polyfilled
/// `construct` with a truthy `sham` flag on it.
pub fn initialize_reflect<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    let support = realm.profile.reflect;
    if support == ReflectSupport::Absent {
        return Ok(());
    }
    let reflect_obj = create_object(mc, Some(realm.intrinsics.object_prototype));

    let construct_fn = match support {
        ReflectSupport::Native => define_native_method(mc, realm, &reflect_obj, "construct", 2, reflect_construct),
        _ => define_native_method(mc, realm, &reflect_obj, "construct", 2, reflect_construct_polyfill),
    };
    if support == ReflectSupport::Sham {
        define_property_internal(mc, &construct_fn, "sham", Value::Boolean(true), true, true, true);
    }
    define_native_method(mc, realm, &reflect_obj, "apply", 3, reflect_apply);
    define_native_method(mc, realm, &reflect_obj, "getPrototypeOf", 1, reflect_get_prototype_of);
    define_native_method(mc, realm, &reflect_obj, "setPrototypeOf", 2, reflect_set_prototype_of);
    define_native_method(mc, realm, &reflect_obj, "ownKeys", 1, reflect_own_keys);

    define_global(mc, realm, "Reflect", Value::Object(reflect_obj));
    Ok(())
}

fn target_object<'gc>(value: &Value<'gc>, method: &str) -> Result<JSObjectDataPtr<'gc>, EvalError<'gc>> {
    value
        .as_object()
        .ok_or_else(|| raise_type_error!(format!("Reflect.{method} called on non-object")).into())
}

/// `(target, argumentsList, newTarget = target)` as both `construct` variants read them.
fn construct_operands<'gc>(
    mc: &MutationContext<'gc>,
    frame: &CallFrame<'_, 'gc>,
) -> Result<(Value<'gc>, Vec<Value<'gc>>, Value<'gc>), EvalError<'gc>> {
    let target = frame.arg(0);
    if !is_constructor(&target) {
        return Err(raise_type_error!(format!("{} is not a constructor", value_to_string(&target))).into());
    }
    let new_target = if frame.args.len() > 2 { frame.arg(2) } else { target.clone() };
    if !is_constructor(&new_target) {
        return Err(raise_type_error!(format!("{} is not a constructor", value_to_string(&new_target))).into());
    }
    let args = array_like_to_vec(mc, frame.realm, &frame.arg(1))?;
    Ok((target, args, new_target))
}

fn reflect_construct<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let (target, args, new_target) = construct_operands(mc, frame)?;
    construct(mc, frame.realm, &target, &args, Some(&new_target))
}

/// What a library fallback can do without engine support: it cannot run the target's
/// [[Construct]] with a foreign new-target, so it calls the target on a fresh object instead.
/// Builtins with internal slots come out uninitialized.
fn reflect_construct_polyfill<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let (target, args, new_target) = construct_operands(mc, frame)?;
    let realm = frame.realm;
    let proto = match &new_target {
        Value::Object(nt) => match get(mc, realm, nt, "prototype")? {
            Value::Object(p) => p,
            _ => realm.intrinsics.object_prototype,
        },
        _ => realm.intrinsics.object_prototype,
    };
    let instance = create_object(mc, Some(proto));
    let result = call_function(mc, realm, &target, Value::Object(instance), &args)?;
    Ok(match result {
        Value::Object(_) => result,
        _ => Value::Object(instance),
    })
}

fn reflect_apply<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let target = frame.arg(0);
    if !target.is_callable() {
        return Err(raise_type_error!("Reflect.apply target is not callable").into());
    }
    let args = array_like_to_vec(mc, frame.realm, &frame.arg(2))?;
    call_function(mc, frame.realm, &target, frame.arg(1), &args)
}

fn reflect_get_prototype_of<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let obj = target_object(&frame.arg(0), "getPrototypeOf")?;
    Ok(get_prototype_raw(&obj).map(Value::Object).unwrap_or(Value::Null))
}

fn reflect_set_prototype_of<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let obj = target_object(&frame.arg(0), "setPrototypeOf")?;
    let proto = match frame.arg(1) {
        Value::Object(p) => Some(p),
        Value::Null => None,
        other => {
            return Err(raise_type_error!(format!("Object prototype may only be an Object or null: {}", value_to_string(&other))).into());
        }
    };
    Ok(Value::Boolean(set_prototype_raw(mc, &obj, proto)))
}

fn reflect_own_keys<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let obj = target_object(&frame.arg(0), "ownKeys")?;
    let keys: Vec<Value<'gc>> = own_property_keys(&obj).iter().map(|k| k.to_value()).collect();
    Ok(Value::Object(create_array(mc, frame.realm, &keys)))
}
