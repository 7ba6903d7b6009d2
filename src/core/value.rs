use crate::core::{Collect, EvalError, Gc, GcPtr, GcTrace, MutationContext, PropertyKey};
use crate::js_function::CallFrame;
use std::collections::HashSet;

pub type JSObjectDataPtr<'gc> = GcPtr<'gc, JSObjectData<'gc>>;

/// Body of a native function. Captured values are read back through `CallFrame::capture`.
pub type NativeFn = for<'gc> fn(&MutationContext<'gc>, &CallFrame<'_, 'gc>) -> Result<Value<'gc>, EvalError<'gc>>;

#[derive(Clone, Debug, Collect)]
#[collect(require_static)]
pub struct SymbolData {
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    /// `function` declarations: callable, constructible, own `prototype` object.
    Normal,
    /// Methods and helpers: callable only.
    Method,
    /// Builtins that create their own result object when constructed.
    BuiltinConstructor,
}

pub struct FunctionData<'gc> {
    pub name: String,
    pub kind: FunctionKind,
    pub body: NativeFn,
    pub captures: Vec<Value<'gc>>,
}

unsafe impl<'gc> Collect<'gc> for FunctionData<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        for v in &self.captures {
            v.trace(cc);
        }
    }
}

#[derive(Clone, Collect)]
#[collect(no_drop)]
pub struct JSProxy<'gc> {
    pub target: JSObjectDataPtr<'gc>,
    pub handler: JSObjectDataPtr<'gc>,
}

#[derive(Clone, Collect)]
#[collect(no_drop)]
pub enum PropertySlot<'gc> {
    Data(Value<'gc>),
    Accessor { getter: Option<Value<'gc>>, setter: Option<Value<'gc>> },
}

#[derive(Clone, Default)]
pub struct JSObjectData<'gc> {
    pub properties: indexmap::IndexMap<PropertyKey<'gc>, PropertySlot<'gc>>,
    pub non_enumerable: HashSet<PropertyKey<'gc>>,
    pub non_writable: HashSet<PropertyKey<'gc>>,
    pub non_configurable: HashSet<PropertyKey<'gc>>,
    pub prototype: Option<JSObjectDataPtr<'gc>>,
    // Whether new own properties can be added to this object. Default true.
    pub extensible: bool,
    /// `[[BooleanData]]` of Boolean wrapper objects.
    pub boolean_data: Option<bool>,
    /// `[[ErrorData]]` marker.
    pub is_error: bool,
    pub proxy: Option<JSProxy<'gc>>,
    function: Option<Gc<'gc, FunctionData<'gc>>>,
}

unsafe impl<'gc> Collect<'gc> for JSObjectData<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        for (k, v) in &self.properties {
            k.trace(cc);
            v.trace(cc);
        }
        for k in &self.non_enumerable {
            k.trace(cc);
        }
        for k in &self.non_writable {
            k.trace(cc);
        }
        for k in &self.non_configurable {
            k.trace(cc);
        }
        if let Some(p) = &self.prototype {
            p.trace(cc);
        }
        if let Some(p) = &self.proxy {
            p.trace(cc);
        }
        if let Some(f) = &self.function {
            f.trace(cc);
        }
    }
}

impl<'gc> JSObjectData<'gc> {
    pub fn new() -> Self {
        // JSObjectData::default() would initialize `extensible` to false, so ensure it's true by default
        JSObjectData::<'_> {
            extensible: true,
            ..JSObjectData::default()
        }
    }

    pub fn with_prototype(prototype: Option<JSObjectDataPtr<'gc>>) -> Self {
        JSObjectData {
            prototype,
            ..JSObjectData::new()
        }
    }

    pub fn set_non_configurable(&mut self, key: PropertyKey<'gc>) {
        self.non_configurable.insert(key);
    }

    pub fn set_configurable(&mut self, key: PropertyKey<'gc>) {
        self.non_configurable.remove(&key);
    }

    pub fn set_non_writable(&mut self, key: PropertyKey<'gc>) {
        log::trace!("set_non_writable: obj_ptr={:p} key={}", self as *const _, key);
        self.non_writable.insert(key);
    }

    pub fn set_writable(&mut self, key: PropertyKey<'gc>) {
        log::trace!("set_writable: obj_ptr={:p} key={}", self as *const _, key);
        self.non_writable.remove(&key);
    }

    pub fn set_non_enumerable(&mut self, key: PropertyKey<'gc>) {
        log::trace!("set_non_enumerable: obj_ptr={:p} key={}", self as *const _, key);
        self.non_enumerable.insert(key);
    }

    pub fn set_enumerable(&mut self, key: PropertyKey<'gc>) {
        log::trace!("set_enumerable: obj_ptr={:p} key={}", self as *const _, key);
        self.non_enumerable.remove(&key);
    }

    pub fn is_configurable(&self, key: &PropertyKey<'gc>) -> bool {
        !self.non_configurable.contains(key)
    }

    pub fn is_writable(&self, key: &PropertyKey<'gc>) -> bool {
        !self.non_writable.contains(key)
    }

    pub fn is_enumerable(&self, key: &PropertyKey<'gc>) -> bool {
        !self.non_enumerable.contains(key)
    }

    // Extensibility helpers
    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    pub fn prevent_extensions(&mut self) {
        self.extensible = false;
    }

    pub fn get_function(&self) -> Option<Gc<'gc, FunctionData<'gc>>> {
        self.function
    }

    pub fn set_function(&mut self, function: Option<Gc<'gc, FunctionData<'gc>>>) {
        self.function = function;
    }
}

/// Own property slot of `obj`, without consulting the prototype chain.
pub fn get_own_property<'gc>(obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>) -> Option<PropertySlot<'gc>> {
    obj.borrow().properties.get(&key.into()).cloned()
}

/// Raw data lookup along the prototype chain. Accessors are not invoked and read as `None`;
/// use `js_object::get` for script-visible reads.
pub fn object_get_key_value<'gc>(obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>) -> Option<Value<'gc>> {
    let key = key.into();
    let mut current = Some(*obj);
    while let Some(o) = current {
        let borrowed = o.borrow();
        match borrowed.properties.get(&key) {
            Some(PropertySlot::Data(v)) => return Some(v.clone()),
            Some(PropertySlot::Accessor { .. }) => return None,
            None => current = borrowed.prototype,
        }
    }
    None
}

/// Raw own data write. Existing attributes are kept; new properties are enumerable,
/// writable and configurable.
pub fn object_set_key_value<'gc>(mc: &MutationContext<'gc>, obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>, val: Value<'gc>) {
    obj.borrow_mut(mc).properties.insert(key.into(), PropertySlot::Data(val));
}

#[derive(Clone, Collect)]
#[collect(no_drop)]
pub enum Value<'gc> {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Symbol(Gc<'gc, SymbolData>),
    Object(JSObjectDataPtr<'gc>),
}

impl<'gc> Value<'gc> {
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn as_object(&self) -> Option<JSObjectDataPtr<'gc>> {
        match self {
            Value::Object(obj) => Some(*obj),
            _ => None,
        }
    }

    pub fn to_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Object(_) => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        match self {
            Value::Object(obj) => obj.borrow().get_function().is_some(),
            _ => false,
        }
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<'gc> From<JSObjectDataPtr<'gc>> for Value<'gc> {
    fn from(obj: JSObjectDataPtr<'gc>) -> Self {
        Value::Object(obj)
    }
}

impl<'gc> std::fmt::Debug for Value<'gc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Null => write!(f, "Null"),
            Value::Undefined => write!(f, "Undefined"),
            Value::Symbol(sym) => write!(f, "Symbol({:?})", sym.description),
            Value::Object(obj) => match obj.borrow().get_function() {
                Some(func) => write!(f, "Function({})", func.name),
                None => write!(f, "Object({:p})", Gc::as_ptr(*obj)),
            },
        }
    }
}

/// The `typeof` operator.
pub fn type_of(val: &Value<'_>) -> &'static str {
    match val {
        Value::Undefined => "undefined",
        Value::Null => "object",
        Value::Boolean(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Object(_) if val.is_callable() => "function",
        Value::Object(_) => "object",
    }
}

/// SameValue: like `===` except NaN equals NaN and +0 differs from -0.
pub fn same_value<'gc>(a: &Value<'gc>, b: &Value<'gc>) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            if x.is_nan() && y.is_nan() {
                true
            } else {
                x == y && x.is_sign_negative() == y.is_sign_negative()
            }
        }
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => Gc::ptr_eq(*x, *y),
        (Value::Object(x), Value::Object(y)) => Gc::ptr_eq(*x, *y),
        _ => false,
    }
}

pub fn value_to_string(val: &Value<'_>) -> String {
    match val {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => format_js_number(*n),
        Value::String(s) => s.clone(),
        Value::Symbol(sym) => format!("Symbol({})", sym.description.as_deref().unwrap_or("")),
        Value::Object(obj) => match obj.borrow().get_function() {
            Some(func) => format!("function {}() {{ [native code] }}", func.name),
            None => "[object Object]".to_string(),
        },
    }
}

pub fn format_js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n.is_sign_negative() { "-Infinity" } else { "Infinity" };
        s.to_string()
    } else if n == n.trunc() && n.abs() < 1e21 {
        // also maps -0 to "0"
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
