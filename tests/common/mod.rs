#![allow(dead_code)]

use downlevel::core::{FunctionKind, JSObjectDataPtr, MutationContext, NativeFn, PropertySlot, RealmPtr, get_own_property};
use downlevel::js_object::{define_property_internal, get, set};
use downlevel::{
    CallFrame, EvalError, Value, call_function, check_constructed_as_instance, create_function, link_prototype_chain, make_super_caller,
    possible_constructor_return,
};

/// Own slot where a lowered derived constructor keeps its super caller.
pub const SUPER_SLOT: &str = "__super";

pub fn super_caller_of<'gc>(ctor: &JSObjectDataPtr<'gc>) -> Value<'gc> {
    match get_own_property(ctor, SUPER_SLOT) {
        Some(PropertySlot::Data(v)) => v,
        _ => Value::Undefined,
    }
}

/// `function Base(name) { _classCallCheck(this, Base); this.name = name; this.level = 1; }`
pub fn base_ctor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    check_constructed_as_instance(mc, frame.realm, &frame.this, &Value::Object(frame.callee))?;
    if let Value::Object(this) = &frame.this {
        set(mc, frame.realm, this, "name", frame.arg(0))?;
        set(mc, frame.realm, this, "level", Value::Number(1.0))?;
    }
    Ok(Value::Undefined)
}

/// A base that ignores `this` and hands back its own object.
pub fn object_returning_base<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let replacement = downlevel::js_object::create_object(mc, Some(frame.realm.intrinsics.object_prototype));
    set(mc, frame.realm, &replacement, "replaced", Value::Boolean(true))?;
    set(mc, frame.realm, &replacement, "level", Value::Number(1.0))?;
    Ok(Value::Object(replacement))
}

/// A base that neither touches `this` nor returns anything.
pub fn empty_base<'gc>(_mc: &MutationContext<'gc>, _frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::Undefined)
}

/// ```js
/// function Derived() {
///   _classCallCheck(this, Derived);
///   var _this = _super.apply(this, arguments);
///   _this.level += 1;
///   return _possibleConstructorReturn(this, _this);
/// }
/// ```
pub fn derived_ctor<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let realm = frame.realm;
    check_constructed_as_instance(mc, realm, &frame.this, &Value::Object(frame.callee))?;
    let this_val = call_function(mc, realm, &super_caller_of(&frame.callee), frame.this.clone(), frame.args)?;
    if let Value::Object(this) = &this_val {
        let level = match get(mc, realm, this, "level")? {
            Value::Number(n) => n,
            _ => 0.0,
        };
        set(mc, realm, this, "level", Value::Number(level + 1.0))?;
    }
    possible_constructor_return(frame.this.clone(), this_val)
}

/// Declare a lowered class: the constructor function, and when `base` is given, the prototype
/// link plus a super caller stored under `SUPER_SLOT`.
pub fn declare_class<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
    name: &str,
    body: NativeFn,
    base: Option<&Value<'gc>>,
) -> Result<JSObjectDataPtr<'gc>, EvalError<'gc>> {
    let ctor = create_function(mc, realm, name, 1, FunctionKind::Normal, body, Vec::new());
    if let Some(base) = base {
        link_prototype_chain(mc, realm, &Value::Object(ctor), base)?;
        let caller = make_super_caller(mc, realm, &Value::Object(ctor));
        define_property_internal(mc, &ctor, SUPER_SLOT, Value::Object(caller), false, false, false);
    }
    Ok(ctor)
}

/// `class Base {}`, `class Mid extends Base {}`, `class Leaf extends Mid {}`.
pub fn three_level_chain<'gc>(
    mc: &MutationContext<'gc>,
    realm: RealmPtr<'gc>,
) -> Result<(JSObjectDataPtr<'gc>, JSObjectDataPtr<'gc>, JSObjectDataPtr<'gc>), EvalError<'gc>> {
    let base = declare_class(mc, realm, "Base", base_ctor, None)?;
    let mid = declare_class(mc, realm, "Mid", derived_ctor, Some(&Value::Object(base)))?;
    let leaf = declare_class(mc, realm, "Leaf", derived_ctor, Some(&Value::Object(mid)))?;
    Ok((base, mid, leaf))
}

pub fn global<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, name: &str) -> Result<Value<'gc>, EvalError<'gc>> {
    get(mc, realm, &realm.global, name)
}

pub fn number(v: &Value<'_>) -> Option<f64> {
    match v {
        Value::Number(n) => Some(*n),
        _ => None,
    }
}

pub fn string(v: &Value<'_>) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
