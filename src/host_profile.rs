//! Which reflective facilities an emulated host engine exposes.
//!
//! The class helpers never assume a facility exists; they inspect the realm's globals. A profile
//! decides what those globals are, so one binary can reproduce an ES5 engine, a modern engine
//! or an engine running a `Reflect.construct` polyfill.

use crate::JSError;
use serde_json::Value as JsonValue;

/// How `Reflect.construct` is provided, if at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReflectSupport {
    /// No global `Reflect`.
    Absent,
    /// Engine-level implementation honouring new-target.
    Native,
    /// Library fallback: allocates from new-target's prototype and calls the target as a
    /// plain function.
    Polyfill,
    /// Same as `Polyfill`, and flags itself with `Reflect.construct.sham = true`.
    Sham,
}

impl ReflectSupport {
    fn parse(s: &str) -> Result<Self, JSError> {
        Ok(match s {
            "absent" => ReflectSupport::Absent,
            "native" => ReflectSupport::Native,
            "polyfill" => ReflectSupport::Polyfill,
            "sham" => ReflectSupport::Sham,
            other => {
                return Err(JSError::Config {
                    message: format!("unknown reflect support '{other}' (expected absent, native, polyfill or sham)"),
                });
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostProfile {
    pub object_get_prototype_of: bool,
    pub object_set_prototype_of: bool,
    pub legacy_proto_accessor: bool,
    pub reflect: ReflectSupport,
    pub proxy: bool,
}

impl Default for HostProfile {
    fn default() -> Self {
        HostProfile::modern()
    }
}

impl HostProfile {
    pub fn modern() -> Self {
        HostProfile {
            object_get_prototype_of: true,
            object_set_prototype_of: true,
            legacy_proto_accessor: true,
            reflect: ReflectSupport::Native,
            proxy: true,
        }
    }

    /// ES5.1 engine: `Object.getPrototypeOf` and `__proto__`, nothing newer.
    pub fn es5() -> Self {
        HostProfile {
            object_get_prototype_of: true,
            object_set_prototype_of: false,
            legacy_proto_accessor: true,
            reflect: ReflectSupport::Absent,
            proxy: false,
        }
    }

    /// Pre-ES5 engine where `__proto__` is the only way to reach the prototype link.
    pub fn proto_accessor_only() -> Self {
        HostProfile {
            object_get_prototype_of: false,
            ..HostProfile::es5()
        }
    }

    /// ES5 engine with a non-sham `Reflect.construct` polyfill and no `Proxy`.
    pub fn reflect_polyfill() -> Self {
        HostProfile {
            reflect: ReflectSupport::Polyfill,
            ..HostProfile::es5()
        }
    }

    /// ES2015 engine whose `Reflect.construct` is a flagged sham, with `Proxy` available.
    pub fn reflect_sham() -> Self {
        HostProfile {
            object_set_prototype_of: true,
            reflect: ReflectSupport::Sham,
            proxy: true,
            ..HostProfile::es5()
        }
    }

    pub fn preset(name: &str) -> Result<Self, JSError> {
        Ok(match name {
            "modern" => HostProfile::modern(),
            "es5" => HostProfile::es5(),
            "proto-accessor-only" => HostProfile::proto_accessor_only(),
            "reflect-polyfill" => HostProfile::reflect_polyfill(),
            "reflect-sham" => HostProfile::reflect_sham(),
            other => return Err(JSError::Config { message: format!("unknown host preset '{other}'") }),
        })
    }

    /// Parse a JSON profile. An optional `"preset"` key selects the base profile (default
    /// `modern`); the remaining keys override single facilities.
    ///
    /// ```json
    /// { "preset": "es5", "reflect": "sham", "proxy": true }
    /// ```
    pub fn from_json(text: &str) -> Result<Self, JSError> {
        let json: JsonValue = serde_json::from_str(text)?;
        let JsonValue::Object(map) = json else {
            return Err(JSError::Config {
                message: "host profile must be a JSON object".to_string(),
            });
        };

        let mut profile = match map.get("preset") {
            Some(JsonValue::String(name)) => HostProfile::preset(name)?,
            Some(_) => {
                return Err(JSError::Config {
                    message: "'preset' must be a string".to_string(),
                });
            }
            None => HostProfile::modern(),
        };

        for (key, value) in &map {
            let flag = || {
                value.as_bool().ok_or_else(|| JSError::Config {
                    message: format!("'{key}' must be a boolean"),
                })
            };
            match key.as_str() {
                "preset" => {}
                "objectGetPrototypeOf" => profile.object_get_prototype_of = flag()?,
                "objectSetPrototypeOf" => profile.object_set_prototype_of = flag()?,
                "legacyProtoAccessor" => profile.legacy_proto_accessor = flag()?,
                "proxy" => profile.proxy = flag()?,
                "reflect" => {
                    let s = value.as_str().ok_or_else(|| JSError::Config {
                        message: "'reflect' must be a string".to_string(),
                    })?;
                    profile.reflect = ReflectSupport::parse(s)?;
                }
                other => {
                    return Err(JSError::Config {
                        message: format!("unknown host profile key '{other}'"),
                    });
                }
            }
        }
        log::debug!("host profile loaded: {:?}", profile);
        Ok(profile)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, JSError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| JSError::Config {
            message: format!("{}: {e}", path.as_ref().display()),
        })?;
        HostProfile::from_json(&text)
    }
}
