use crate::core::{
    JSObjectData, JSObjectDataPtr, MutationContext, RealmPtr, Value, new_gc_cell_ptr, object_get_key_value, object_set_key_value,
    value_to_string,
};
use crate::js_function::{CallFrame, create_builtin_constructor, ordinary_create_from_constructor};
use crate::{JSError, eval_error_here};

#[derive(Debug)]
pub enum EvalError<'gc> {
    Js(JSError),
    Throw(Value<'gc>),
}

impl<'gc> From<JSError> for EvalError<'gc> {
    fn from(e: JSError) -> Self {
        EvalError::Js(e)
    }
}

impl<'gc> From<EvalError<'gc>> for JSError {
    fn from(e: EvalError<'gc>) -> Self {
        match e {
            EvalError::Js(j) => j,
            EvalError::Throw(v) => JSError::Throw { message: describe_thrown(&v) },
        }
    }
}

impl<'gc> EvalError<'gc> {
    pub fn message(&self) -> String {
        match self {
            EvalError::Js(e) => e.message(),
            EvalError::Throw(v) => describe_thrown(v),
        }
    }

    /// The value script code would observe in a `catch` clause.
    pub fn into_value(self, mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Value<'gc> {
        match self {
            EvalError::Js(e) => create_error(mc, realm, e.name(), &e.message()),
            EvalError::Throw(v) => v,
        }
    }
}

fn describe_thrown(v: &Value<'_>) -> String {
    if let Value::Object(obj) = v
        && is_error(v)
    {
        let name = object_get_key_value(obj, "name").map(|n| value_to_string(&n)).unwrap_or_else(|| "Error".to_string());
        let message = object_get_key_value(obj, "message").map(|m| value_to_string(&m)).unwrap_or_default();
        return if message.is_empty() { name } else { format!("{name}: {message}") };
    }
    value_to_string(v)
}

/// Initialize `Error` and the native error constructors on the realm's intrinsic prototypes.
pub fn initialize_error_constructors<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    let i = realm.intrinsics;
    let mut parent = None;
    for (name, proto) in [
        ("Error", i.error_prototype),
        ("TypeError", i.type_error_prototype),
        ("ReferenceError", i.reference_error_prototype),
        ("RangeError", i.range_error_prototype),
    ] {
        let ctor = create_builtin_constructor(mc, realm, name, 1, error_constructor, proto);
        if let Some(parent_ctor) = parent {
            // native errors inherit statics from Error
            ctor.borrow_mut(mc).prototype = Some(parent_ctor);
        } else {
            parent = Some(ctor);
        }
        object_set_key_value(mc, &proto, "name", Value::from(name));
        object_set_key_value(mc, &proto, "message", Value::from(""));
        let mut p = proto.borrow_mut(mc);
        p.set_non_enumerable("name".into());
        p.set_non_enumerable("message".into());
        drop(p);
        crate::js_object::define_global(mc, realm, name, Value::Object(ctor));
    }
    Ok(())
}

fn error_constructor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    // Error(...) called as a function behaves like new Error(...)
    let new_target = frame.new_target.unwrap_or(frame.callee);
    let fallback = match crate::js_object::get(mc, frame.realm, &frame.callee, "prototype")? {
        Value::Object(p) => p,
        _ => return Err(eval_error_here!("error constructor without prototype").into()),
    };
    let obj = ordinary_create_from_constructor(mc, frame.realm, new_target, fallback)?;
    obj.borrow_mut(mc).is_error = true;
    let message = frame.arg(0);
    if !matches!(message, Value::Undefined) {
        object_set_key_value(mc, &obj, "message", Value::String(value_to_string(&message)));
        obj.borrow_mut(mc).set_non_enumerable("message".into());
    }
    Ok(Value::Object(obj))
}

/// Create an error object of the named kind with the given message.
pub fn create_error<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, kind: &str, message: &str) -> Value<'gc> {
    let i = realm.intrinsics;
    let prototype = match kind {
        "TypeError" => i.type_error_prototype,
        "ReferenceError" => i.reference_error_prototype,
        "RangeError" => i.range_error_prototype,
        _ => i.error_prototype,
    };
    let error_obj: JSObjectDataPtr<'gc> = new_gc_cell_ptr(mc, JSObjectData::with_prototype(Some(prototype)));
    object_set_key_value(mc, &error_obj, "message", Value::from(message));
    let mut e = error_obj.borrow_mut(mc);
    e.set_non_enumerable("message".into());
    e.is_error = true;
    drop(e);
    Value::Object(error_obj)
}

/// Check if a value is an Error object.
pub fn is_error(val: &Value<'_>) -> bool {
    if let Value::Object(obj) = val
        && let Ok(borrowed) = obj.try_borrow()
    {
        return borrowed.is_error;
    }
    false
}
