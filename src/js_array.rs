use crate::core::{EvalError, JSObjectDataPtr, MutationContext, PropertySlot, RealmPtr, Value, value_to_string};
use crate::js_object::{create_object, define_property_internal, get_value};
use crate::{raise_range_error, raise_type_error};

/// Longest argument list `array_like_to_vec` will materialize.
pub const MAX_ARGUMENTS: usize = 65_535;

/// Dense array object holding `values`, with a non-enumerable `length`.
pub fn create_array<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, values: &[Value<'gc>]) -> JSObjectDataPtr<'gc> {
    let arr = create_object(mc, Some(realm.intrinsics.array_prototype));
    {
        let mut a = arr.borrow_mut(mc);
        for (i, v) in values.iter().enumerate() {
            a.properties.insert(i.to_string().into(), PropertySlot::Data(v.clone()));
        }
    }
    define_property_internal(mc, &arr, "length", Value::Number(values.len() as f64), true, false, false);
    arr
}

/// CreateListFromArrayLike. Lists longer than `MAX_ARGUMENTS` are a RangeError, checked before
/// anything is allocated.
pub fn array_like_to_vec<'gc>(mc: &MutationContext<'gc>, realm: RealmPtr<'gc>, list: &Value<'gc>) -> Result<Vec<Value<'gc>>, EvalError<'gc>> {
    if !matches!(list, Value::Object(_)) {
        return Err(raise_type_error!(format!("CreateListFromArrayLike called on non-object: {}", value_to_string(list))).into());
    }
    let len = match get_value(mc, realm, list, "length")? {
        Value::Number(n) if n > MAX_ARGUMENTS as f64 => {
            return Err(raise_range_error!(format!("Too many arguments in function call (only {MAX_ARGUMENTS} allowed)")).into());
        }
        Value::Number(n) if n > 0.0 => n.trunc() as usize,
        _ => 0,
    };
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(get_value(mc, realm, list, i.to_string())?);
    }
    Ok(out)
}
