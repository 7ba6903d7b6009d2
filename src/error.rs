#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum JSError {
    #[error("TypeError: {message}")]
    InvalidInvocation { message: String },

    #[error("TypeError: {message}")]
    InvalidBaseType { message: String },

    #[error("ReferenceError: {message}")]
    UninitializedThis { message: String },

    #[error("TypeError: {message}")]
    TypeError { message: String },

    #[error("RangeError: {message}")]
    RangeError { message: String },

    #[error("Uncaught {message}")]
    Throw { message: String },

    #[error("Invalid host profile: {message}")]
    Config { message: String },

    #[error("Evaluation failed at {method} {file}:{line}: {message}")]
    EvaluationError {
        message: String,
        file: String,
        line: usize,
        method: String,
    },
}

impl JSError {
    /// Name of the script-visible error constructor this error surfaces as.
    pub fn name(&self) -> &'static str {
        match self {
            JSError::InvalidInvocation { .. } | JSError::InvalidBaseType { .. } | JSError::TypeError { .. } => "TypeError",
            JSError::UninitializedThis { .. } => "ReferenceError",
            JSError::RangeError { .. } => "RangeError",
            _ => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            JSError::InvalidInvocation { message }
            | JSError::InvalidBaseType { message }
            | JSError::UninitializedThis { message }
            | JSError::TypeError { message }
            | JSError::RangeError { message }
            | JSError::Throw { message }
            | JSError::Config { message }
            | JSError::EvaluationError { message, .. } => message.clone(),
        }
    }
}

impl From<serde_json::Error> for JSError {
    fn from(err: serde_json::Error) -> Self {
        JSError::Config { message: err.to_string() }
    }
}

impl From<JSError> for std::io::Error {
    fn from(err: JSError) -> std::io::Error {
        std::io::Error::other(err.to_string())
    }
}

#[macro_export]
macro_rules! raise_type_error {
    ($msg:expr) => {
        $crate::JSError::TypeError { message: $msg.to_string() }
    };
}

#[macro_export]
macro_rules! raise_range_error {
    ($msg:expr) => {
        $crate::JSError::RangeError { message: $msg.to_string() }
    };
}

// Macro that constructs an EvaluationError using the compile-time caller
// location and the provided message. Using a macro (rather than a
// function) ensures `file!()` and `line!()` expand to the site where the
// macro is invoked.
#[macro_export]
macro_rules! eval_error_here {
    ($msg:expr) => {
        $crate::JSError::EvaluationError {
            message: $msg.to_string(),
            file: file!().to_string(),
            line: line!() as usize,
            method: $crate::function_name!().to_string(),
        }
    };
}

#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // remove the trailing "::f"
        &name[..name.len() - 3]
    }};
}
