use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no global window")]
    MissingWindow,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("invalid value {value:?} for data-{key}")]
    InvalidConfig { key: &'static str, value: String },
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
