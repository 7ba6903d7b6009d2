use crate::core::{Collect, Gc, SymbolData, Value};

#[derive(Clone, Debug, Collect)]
#[collect(no_drop)]
pub enum PropertyKey<'gc> {
    String(String),
    Symbol(Gc<'gc, SymbolData>),
}

impl<'gc> From<&str> for PropertyKey<'gc> {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_string())
    }
}

impl<'gc> From<String> for PropertyKey<'gc> {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl<'gc> From<&String> for PropertyKey<'gc> {
    fn from(s: &String) -> Self {
        PropertyKey::String(s.clone())
    }
}

impl<'gc> From<&PropertyKey<'gc>> for PropertyKey<'gc> {
    fn from(key: &PropertyKey<'gc>) -> Self {
        key.clone()
    }
}

impl<'gc> PropertyKey<'gc> {
    /// ToPropertyKey for the primitive values the runtime deals with.
    pub fn from_value(value: &Value<'gc>) -> Self {
        match value {
            Value::Symbol(sym) => PropertyKey::Symbol(*sym),
            other => PropertyKey::String(crate::core::value_to_string(other)),
        }
    }

    pub fn to_value(&self) -> Value<'gc> {
        match self {
            PropertyKey::String(s) => Value::String(s.clone()),
            PropertyKey::Symbol(sym) => Value::Symbol(*sym),
        }
    }
}

impl<'gc> PartialEq for PropertyKey<'gc> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyKey::String(s1), PropertyKey::String(s2)) => s1 == s2,
            (PropertyKey::Symbol(sym1), PropertyKey::Symbol(sym2)) => Gc::ptr_eq(*sym1, *sym2),
            _ => false,
        }
    }
}

impl<'gc> Eq for PropertyKey<'gc> {}

impl<'gc> std::hash::Hash for PropertyKey<'gc> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            PropertyKey::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            PropertyKey::Symbol(sym) => {
                1u8.hash(state);
                Gc::as_ptr(*sym).hash(state);
            }
        }
    }
}

impl<'gc> std::fmt::Display for PropertyKey<'gc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", s),
            PropertyKey::Symbol(sym) => match &sym.description {
                Some(desc) => write!(f, "Symbol({})", desc),
                None => write!(f, "Symbol()"),
            },
        }
    }
}
