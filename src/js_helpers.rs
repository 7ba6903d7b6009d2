//! Exposing the class helpers to generated code as global functions.
//!
//! A compiler frontend marks the helpers a program references while lowering it, and
//! `inject_helpers` installs exactly those into the realm before the program runs.

use crate::core::{EvalError, JSObjectDataPtr, MutationContext, PropertyKey, RealmPtr, Value, type_of, value_to_string};
use crate::js_array::array_like_to_vec;
use crate::js_class::{
    MemberDescriptor, assert_this_initialized, check_constructed_as_instance, create_class, define_field, is_native_reflect_construct,
    link_prototype_chain, make_super_caller, possible_constructor_return, super_get,
};
use crate::js_function::{CallFrame, create_native_method};
use crate::js_object::define_global;
use crate::js_prototype::{get_prototype_of, set_prototype_of};
use crate::{JSError, raise_type_error};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Helper {
    ClassCallCheck,
    Inherits,
    CreateClass,
    DefineProperty,
    GetPrototypeOf,
    SetPrototypeOf,
    CreateSuper,
    PossibleConstructorReturn,
    AssertThisInitialized,
    Get,
    TypeOf,
    IsNativeReflectConstruct,
}

impl Helper {
    pub const ALL: [Helper; 12] = [
        Helper::ClassCallCheck,
        Helper::Inherits,
        Helper::CreateClass,
        Helper::DefineProperty,
        Helper::GetPrototypeOf,
        Helper::SetPrototypeOf,
        Helper::CreateSuper,
        Helper::PossibleConstructorReturn,
        Helper::AssertThisInitialized,
        Helper::Get,
        Helper::TypeOf,
        Helper::IsNativeReflectConstruct,
    ];

    /// The global binding generated code calls.
    pub fn global_name(self) -> &'static str {
        match self {
            Helper::ClassCallCheck => "_classCallCheck",
            Helper::Inherits => "_inherits",
            Helper::CreateClass => "_createClass",
            Helper::DefineProperty => "_defineProperty",
            Helper::GetPrototypeOf => "_getPrototypeOf",
            Helper::SetPrototypeOf => "_setPrototypeOf",
            Helper::CreateSuper => "_createSuper",
            Helper::PossibleConstructorReturn => "_possibleConstructorReturn",
            Helper::AssertThisInitialized => "_assertThisInitialized",
            Helper::Get => "_get",
            Helper::TypeOf => "_typeof",
            Helper::IsNativeReflectConstruct => "_isNativeReflectConstruct",
        }
    }

    fn length(self) -> usize {
        match self {
            Helper::IsNativeReflectConstruct => 0,
            Helper::GetPrototypeOf
            | Helper::CreateSuper
            | Helper::AssertThisInitialized
            | Helper::TypeOf => 1,
            Helper::ClassCallCheck | Helper::Inherits | Helper::SetPrototypeOf | Helper::PossibleConstructorReturn => 2,
            Helper::CreateClass | Helper::DefineProperty | Helper::Get => 3,
        }
    }

    fn body(self) -> crate::core::NativeFn {
        match self {
            Helper::ClassCallCheck => helper_class_call_check,
            Helper::Inherits => helper_inherits,
            Helper::CreateClass => helper_create_class,
            Helper::DefineProperty => helper_define_property,
            Helper::GetPrototypeOf => helper_get_prototype_of,
            Helper::SetPrototypeOf => helper_set_prototype_of,
            Helper::CreateSuper => helper_create_super,
            Helper::PossibleConstructorReturn => helper_possible_constructor_return,
            Helper::AssertThisInitialized => helper_assert_this_initialized,
            Helper::Get => helper_get,
            Helper::TypeOf => helper_typeof,
            Helper::IsNativeReflectConstruct => helper_is_native_reflect_construct,
        }
    }
}

/// Set of helpers a lowered program references. Marking is safe from several frontend threads.
#[derive(Debug, Default)]
pub struct Helpers {
    used: [AtomicBool; 12],
}

impl Helpers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        let helpers = Self::default();
        for h in Helper::ALL {
            helpers.mark(h);
        }
        helpers
    }

    pub fn mark(&self, helper: Helper) {
        self.used[helper as usize].store(true, Ordering::Relaxed);
    }

    pub fn is_used(&self, helper: Helper) -> bool {
        self.used[helper as usize].load(Ordering::Relaxed)
    }

    pub fn used(&self) -> impl Iterator<Item = Helper> + '_ {
        Helper::ALL.into_iter().filter(|h| self.is_used(*h))
    }
}

/// Install every marked helper as a non-enumerable global function.
pub fn inject_helpers<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, helpers: &Helpers) -> Result<(), JSError> {
    for helper in helpers.used() {
        let func = create_native_method(mc, realm, helper.global_name(), helper.length(), helper.body());
        define_global(mc, realm, helper.global_name(), Value::Object(func));
        log::trace!("inject_helpers: installed {}", helper.global_name());
    }
    Ok(())
}

fn helper_class_call_check<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    check_constructed_as_instance(mc, frame.realm, &frame.arg(0), &frame.arg(1))?;
    Ok(Value::Undefined)
}

fn helper_inherits<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    link_prototype_chain(mc, frame.realm, &frame.arg(0), &frame.arg(1))?;
    Ok(Value::Undefined)
}

fn member_list<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, list: &Value<'gc>) -> Result<Vec<MemberDescriptor<'gc>>, EvalError<'gc>> {
    if list.is_null_or_undefined() {
        return Ok(Vec::new());
    }
    array_like_to_vec(mc, realm, list)?
        .iter()
        .map(|item| match item {
            Value::Object(obj) => MemberDescriptor::from_object(mc, realm, obj),
            other => Err(raise_type_error!(format!("Property description must be an object: {}", value_to_string(other))).into()),
        })
        .collect()
}

fn helper_create_class<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let proto_members = member_list(mc, frame.realm, &frame.arg(1))?;
    let static_members = member_list(mc, frame.realm, &frame.arg(2))?;
    create_class(mc, frame.realm, &frame.arg(0), &proto_members, &static_members)
}

fn helper_define_property<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let key = PropertyKey::from_value(&frame.arg(1));
    define_field(mc, frame.realm, &frame.arg(0), key, frame.arg(2))
}

fn helper_get_prototype_of<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    get_prototype_of(mc, frame.realm, &frame.arg(0))
}

fn helper_set_prototype_of<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    set_prototype_of(mc, frame.realm, &frame.arg(0), &frame.arg(1))
}

fn helper_create_super<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let caller: JSObjectDataPtr<'gc> = make_super_caller(mc, frame.realm, &frame.arg(0));
    Ok(Value::Object(caller))
}

fn helper_possible_constructor_return<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    possible_constructor_return(frame.arg(0), frame.arg(1))
}

fn helper_assert_this_initialized<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    assert_this_initialized(frame.arg(0))
}

fn helper_get<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    let target = frame.arg(0);
    let receiver = if frame.args.len() > 2 { frame.arg(2) } else { target.clone() };
    super_get(mc, frame.realm, &target, PropertyKey::from_value(&frame.arg(1)), &receiver)
}

fn helper_typeof<'gc>(_mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::from(type_of(&frame.arg(0))))
}

fn helper_is_native_reflect_construct<'gc>(mc: &MutationContext<'gc>, frame: &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>> {
    Ok(Value::Boolean(is_native_reflect_construct(mc, frame.realm)))
}
