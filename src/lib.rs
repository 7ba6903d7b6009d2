pub mod core;
pub(crate) mod error;
pub mod host_profile;
pub mod js_array;
pub(crate) mod js_boolean;
pub mod js_class;
pub mod js_function;
pub mod js_helpers;
pub mod js_object;
pub mod js_prototype;
pub(crate) mod js_proxy;
pub(crate) mod js_reflect;

pub use core::{
    EvalError, JSObjectDataPtr, MutationContext, PropertyDescriptor, PropertyKey, RealmPtr, Runtime, Value, create_error, is_error,
    type_of, value_to_string,
};
pub use error::JSError;
pub use host_profile::{HostProfile, ReflectSupport};
pub use js_class::{
    MemberDescriptor, assert_this_initialized, check_constructed_as_instance, create_class, define_field, install_members,
    is_native_reflect_construct, link_prototype_chain, make_super_caller, possible_constructor_return, super_get,
};
pub use js_function::{CallFrame, call_function, construct, create_function};
pub use js_helpers::{Helper, Helpers, inject_helpers};
pub use js_prototype::{PrototypeStrategy, get_prototype_of, set_prototype_of};
