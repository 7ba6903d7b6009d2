use crate::core::{EvalError, MutationContext, RealmPtr, Value};
use crate::error::JSError;
use crate::js_function::{CallFrame, create_builtin_constructor, define_native_method, ordinary_create_from_constructor};
use crate::js_object::define_global;
use crate::raise_type_error;

pub fn initialize_boolean<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    let boolean_proto = realm.intrinsics.boolean_prototype;
    // Boolean.prototype is itself a Boolean object whose value is false
    boolean_proto.borrow_mut(mc).boolean_data = Some(false);

    let boolean_ctor = create_builtin_constructor(mc, realm, "Boolean", 1, boolean_constructor, boolean_proto);
    define_native_method(mc, realm, &boolean_proto, "toString", 0, boolean_prototype_to_string);
    define_native_method(mc, realm, &boolean_proto, "valueOf", 0, boolean_prototype_value_of);

    define_global(mc, realm, "Boolean", Value::Object(boolean_ctor));
    Ok(())
}

fn boolean_constructor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let b = frame.arg(0).to_truthy();
    match frame.new_target {
        None => Ok(Value::Boolean(b)),
        Some(nt) => {
            let obj = ordinary_create_from_constructor(mc, frame.realm, nt, frame.realm.intrinsics.boolean_prototype)?;
            obj.borrow_mut(mc).boolean_data = Some(b);
            Ok(Value::Object(obj))
        }
    }
}

/// thisBooleanValue: a primitive boolean or an object carrying `[[BooleanData]]`.
fn this_boolean_value<'gc>(this_val: &Value<'gc>, method: &str) -> Result<bool, EvalError<'gc>> {
    match this_val {
        Value::Boolean(b) => Ok(*b),
        Value::Object(obj) => obj
            .borrow()
            .boolean_data
            .ok_or_else(|| raise_type_error!(format!("Boolean.prototype.{method} requires that 'this' be a Boolean")).into()),
        _ => Err(raise_type_error!(format!("Boolean.prototype.{method} requires that 'this' be a Boolean")).into()),
    }
}

fn boolean_prototype_value_of<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::Boolean(this_boolean_value(&frame.this, "valueOf")?))
}

fn boolean_prototype_to_string<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::String(this_boolean_value(&frame.this, "toString")?.to_string()))
}
