use crate::core::{
    EvalError, FunctionData, FunctionKind, Gc, JSObjectData, JSObjectDataPtr, MutationContext, NativeFn, RealmPtr, Value,
    new_gc_cell_ptr, value_to_string,
};
use crate::js_object::{define_property_internal, get};
use crate::{JSError, raise_type_error};

/// Invocation state of one native function call.
pub struct CallFrame<'a, 'gc> {
    pub realm: RealmPtr<'gc>,
    pub callee: JSObjectDataPtr<'gc>,
    pub this: Value<'gc>,
    pub args: &'a [Value<'gc>],
    /// `Some` when invoked through [[Construct]].
    pub new_target: Option<JSObjectDataPtr<'gc>>,
}

impl<'a, 'gc> CallFrame<'a, 'gc> {
    /// Positional argument; missing arguments read as `undefined` and extras are never an error.
    pub fn arg(&self, index: usize) -> Value<'gc> {
        self.args.get(index).cloned().unwrap_or(Value::Undefined)
    }

    pub fn capture(&self, index: usize) -> Value<'gc> {
        self.callee
            .borrow()
            .get_function()
            .and_then(|f| f.captures.get(index).cloned())
            .unwrap_or(Value::Undefined)
    }
}

/// Create a function object. `Normal` functions also get an own `prototype` object whose
/// `constructor` points back at the function, as a `function` declaration would.
pub fn create_function<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    name: &str,
    length: usize,
    kind: FunctionKind,
    body: NativeFn,
    captures: Vec<Value<'gc>>,
) -> JSObjectDataPtr<'gc> {
    let func = new_gc_cell_ptr(mc, JSObjectData::with_prototype(Some(realm.intrinsics.function_prototype)));
    let data = Gc::new(
        mc,
        FunctionData {
            name: name.to_string(),
            kind,
            body,
            captures,
        },
    );
    func.borrow_mut(mc).set_function(Some(data));
    define_property_internal(mc, &func, "length", Value::Number(length as f64), false, false, true);
    define_property_internal(mc, &func, "name", Value::from(name), false, false, true);

    if kind == FunctionKind::Normal {
        let proto = new_gc_cell_ptr(mc, JSObjectData::with_prototype(Some(realm.intrinsics.object_prototype)));
        define_property_internal(mc, &proto, "constructor", Value::Object(func), true, false, true);
        define_property_internal(mc, &func, "prototype", Value::Object(proto), true, false, false);
    }
    func
}

/// Shorthand for a callable-only builtin.
pub fn create_native_method<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    name: &str,
    length: usize,
    body: NativeFn,
) -> JSObjectDataPtr<'gc> {
    create_function(mc, realm, name, length, FunctionKind::Method, body, Vec::new())
}

/// Install a builtin method the way the standard library does: writable, configurable, not
/// enumerable.
pub fn define_native_method<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    target: &JSObjectDataPtr<'gc>,
    name: &str,
    length: usize,
    body: NativeFn,
) -> JSObjectDataPtr<'gc> {
    let method = create_native_method(mc, realm, name, length, body);
    define_property_internal(mc, target, name, Value::Object(method), true, false, true);
    method
}

/// A builtin constructor wired to an existing prototype object.
pub fn create_builtin_constructor<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    name: &str,
    length: usize,
    body: NativeFn,
    prototype: JSObjectDataPtr<'gc>,
) -> JSObjectDataPtr<'gc> {
    let ctor = create_function(mc, realm, name, length, FunctionKind::BuiltinConstructor, body, Vec::new());
    define_property_internal(mc, &ctor, "prototype", Value::Object(prototype), false, false, false);
    define_property_internal(mc, &prototype, "constructor", Value::Object(ctor), true, false, true);
    ctor
}

fn function_parts<'gc>(value: &Value<'gc>) -> Option<(JSObjectDataPtr<'gc>, Gc<'gc, FunctionData<'gc>>)> {
    let obj = value.as_object()?;
    let data = obj.borrow().get_function()?;
    Some((obj, data))
}

pub fn is_constructor(value: &Value<'_>) -> bool {
    function_parts(value).is_some_and(|(_, data)| data.kind != FunctionKind::Method)
}

/// [[Call]]
pub fn call_function<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    callee: &Value<'gc>,
    this: Value<'gc>,
    args: &[Value<'gc>],
) -> Result<Value<'gc>, EvalError<'gc>> {
    let Some((func_obj, data)) = function_parts(callee) else {
        return Err(raise_type_error!(format!("{} is not a function", value_to_string(callee))).into());
    };
    log::trace!("call_function: {} argc={}", data.name, args.len());
    let frame = CallFrame {
        realm,
        callee: func_obj,
        this,
        args,
        new_target: None,
    };
    (data.body)(mc, &frame)
}

/// [[Construct]]. `new_target` defaults to the callee; its `prototype` becomes the prototype of
/// the created instance. A constructor body returning an object overrides the instance.
pub fn construct<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    callee: &Value<'gc>,
    args: &[Value<'gc>],
    new_target: Option<&Value<'gc>>,
) -> Result<Value<'gc>, EvalError<'gc>> {
    let not_a_constructor = |v: &Value<'gc>| -> EvalError<'gc> { raise_type_error!(format!("{} is not a constructor", value_to_string(v))).into() };

    let (func_obj, data) = match function_parts(callee) {
        Some(parts) if parts.1.kind != FunctionKind::Method => parts,
        _ => return Err(not_a_constructor(callee)),
    };
    let new_target = match new_target {
        None => func_obj,
        Some(nt) if is_constructor(nt) => nt.as_object().ok_or_else(|| not_a_constructor(nt))?,
        Some(nt) => return Err(not_a_constructor(nt)),
    };
    log::trace!("construct: {} argc={}", data.name, args.len());

    if data.kind == FunctionKind::BuiltinConstructor {
        let frame = CallFrame {
            realm,
            callee: func_obj,
            this: Value::Undefined,
            args,
            new_target: Some(new_target),
        };
        return (data.body)(mc, &frame);
    }

    let instance = ordinary_create_from_constructor(mc, realm, new_target, realm.intrinsics.object_prototype)?;
    let frame = CallFrame {
        realm,
        callee: func_obj,
        this: Value::Object(instance),
        args,
        new_target: Some(new_target),
    };
    let result = (data.body)(mc, &frame)?;
    Ok(match result {
        Value::Object(_) => result,
        _ => Value::Object(instance),
    })
}

/// Allocate an object whose prototype is `constructor.prototype`, or `fallback` when that is
/// not an object.
pub fn ordinary_create_from_constructor<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    constructor: JSObjectDataPtr<'gc>,
    fallback: JSObjectDataPtr<'gc>,
) -> Result<JSObjectDataPtr<'gc>, EvalError<'gc>> {
    let proto = match get(mc, realm, &constructor, "prototype")? {
        Value::Object(p) => p,
        _ => fallback,
    };
    Ok(new_gc_cell_ptr(mc, JSObjectData::with_prototype(Some(proto))))
}

pub fn initialize_function<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>) -> Result<(), JSError> {
    let proto = realm.intrinsics.function_prototype;
    define_native_method(mc, realm, &proto, "call", 1, function_prototype_call);
    define_native_method(mc, realm, &proto, "apply", 2, function_prototype_apply);
    Ok(())
}

fn function_prototype_call<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let rest = frame.args.get(1..).unwrap_or(&[]);
    call_function(mc, frame.realm, &frame.this, frame.arg(0), rest)
}

fn function_prototype_apply<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let list = frame.arg(1);
    let args = if list.is_null_or_undefined() {
        Vec::new()
    } else {
        crate::js_array::array_like_to_vec(mc, frame.realm, &list)?
    };
    call_function(mc, frame.realm, &frame.this, frame.arg(0), &args)
}
