use crux_core::capability::{CapabilityContext, Operation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

pub const MAX_KEY_LENGTH: usize = 128;
pub const MAX_VALUE_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KvKey {
    namespace: KeyNamespace,
    key: String,
}

impl KvKey {
    pub fn new(namespace: KeyNamespace, key: impl Into<String>) -> Result<Self, KvError> {
        let key = key.into();
        Self::validate_key(&key)?;
        Ok(Self { namespace, key })
    }

    /// The storage key the shell sees, e.g. `settings:language`.
    #[must_use]
    pub fn raw(&self) -> String {
        format!("{}:{}", self.namespace.prefix(), self.key)
    }

    fn validate_key(key: &str) -> Result<(), KvError> {
        let invalid = |reason: &str| KvError::InvalidKey {
            key: key.chars().take(50).collect(),
            reason: reason.to_string(),
        };

        if key.trim().is_empty() {
            return Err(invalid("key cannot be empty"));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(invalid("key is too long"));
        }
        if key.contains(':') {
            return Err(invalid("key cannot contain the namespace separator"));
        }
        if key.chars().any(char::is_control) {
            return Err(invalid("key contains control characters"));
        }
        Ok(())
    }
}

impl fmt::Display for KvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyNamespace {
    Settings,
}

impl KeyNamespace {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum KvOperation {
    Get { key: KvKey },
    Set { key: KvKey, value: Vec<u8> },
}

impl KvOperation {
    pub fn get(namespace: KeyNamespace, key: impl Into<String>) -> Result<Self, KvError> {
        Ok(Self::Get {
            key: KvKey::new(namespace, key)?,
        })
    }

    pub fn set(namespace: KeyNamespace, key: impl Into<String>, value: Vec<u8>) -> Result<Self, KvError> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(KvError::ValueTooLarge {
                size: value.len(),
                max: MAX_VALUE_SIZE,
            });
        }
        Ok(Self::Set {
            key: KvKey::new(namespace, key)?,
            value,
        })
    }

    #[must_use]
    pub const fn key(&self) -> &KvKey {
        match self {
            Self::Get { key } | Self::Set { key, .. } => key,
        }
    }
}

impl Operation for KvOperation {
    type Output = KvResult;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum KvOutput {
    /// `None` when nothing is stored under the key.
    Value(Option<Vec<u8>>),
    Written,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum KvError {
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("value too large: {size} bytes exceeds maximum of {max} bytes")]
    ValueTooLarge { size: usize, max: usize },

    #[error("storage error: {message} (code: {code:?})")]
    Storage {
        code: StorageErrorCode,
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization { message: String, key: Option<String> },

    #[error("unexpected storage output for {operation}")]
    UnexpectedOutput { operation: String },
}

impl KvError {
    pub fn storage(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageErrorCode {
    Unknown,
    Unavailable,
    Corrupted,
    DiskFull,
    PermissionDenied,
}

pub type KvResult = Result<KvOutput, KvError>;

/// JSON-encodes values of one type under a fixed namespace.
pub struct TypedKvStore<T> {
    namespace: KeyNamespace,
    _phantom: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> TypedKvStore<T> {
    #[must_use]
    pub const fn new(namespace: KeyNamespace) -> Self {
        Self {
            namespace,
            _phantom: PhantomData,
        }
    }

    pub fn get_op(&self, key: impl Into<String>) -> Result<KvOperation, KvError> {
        KvOperation::get(self.namespace, key)
    }

    pub fn set_op(&self, key: impl Into<String>, value: &T) -> Result<KvOperation, KvError> {
        let key = key.into();
        let data = serde_json::to_vec(value).map_err(|e| KvError::Serialization {
            message: e.to_string(),
            key: Some(key.clone()),
        })?;
        KvOperation::set(self.namespace, key, data)
    }

    pub fn parse_value(&self, output: KvOutput) -> Result<Option<T>, KvError> {
        match output {
            KvOutput::Value(Some(bytes)) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| KvError::Serialization {
                    message: e.to_string(),
                    key: None,
                }),
            KvOutput::Value(None) => Ok(None),
            KvOutput::Written => Err(KvError::UnexpectedOutput {
                operation: "get".to_string(),
            }),
        }
    }
}

/// Namespaced key-value storage implemented by the shell.
#[derive(crux_core::macros::Capability)]
pub struct KeyValue<Ev> {
    context: CapabilityContext<KvOperation, Ev>,
}

impl<Ev> KeyValue<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<KvOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn execute<F>(&self, operation: KvOperation, make_event: F)
    where
        F: FnOnce(KvResult) -> Ev + Send + 'static,
    {
        tracing::debug!(key = %operation.key(), "kv request");
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_renders_with_namespace_prefix() {
        let key = KvKey::new(KeyNamespace::Settings, "language").unwrap();
        assert_eq!(key.raw(), "settings:language");
        assert_eq!(key.to_string(), key.raw());
    }

    #[test]
    fn bad_keys_are_rejected() {
        for bad in ["", "   ", "a:b", "lang\u{1}"] {
            assert!(
                matches!(
                    KvKey::new(KeyNamespace::Settings, bad),
                    Err(KvError::InvalidKey { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        let long = "k".repeat(MAX_KEY_LENGTH + 1);
        assert!(KvKey::new(KeyNamespace::Settings, long).is_err());
    }

    #[test]
    fn oversized_value_is_rejected() {
        let result = KvOperation::set(KeyNamespace::Settings, "blob", vec![0; MAX_VALUE_SIZE + 1]);
        assert!(matches!(result, Err(KvError::ValueTooLarge { .. })));
    }

    #[test]
    fn typed_store_encodes_json() {
        let store: TypedKvStore<Vec<u32>> = TypedKvStore::new(KeyNamespace::Settings);
        match store.set_op("numbers", &vec![1, 2]).unwrap() {
            KvOperation::Set { key, value } => {
                assert_eq!(key.raw(), "settings:numbers");
                assert_eq!(value, b"[1,2]");
            }
            other => panic!("expected Set, got {other:?}"),
        }
    }

    #[test]
    fn typed_store_parses_outputs() {
        let store: TypedKvStore<String> = TypedKvStore::new(KeyNamespace::Settings);

        assert_eq!(
            store.parse_value(KvOutput::Value(Some(b"\"hi\"".to_vec()))),
            Ok(Some("hi".to_string()))
        );
        assert_eq!(store.parse_value(KvOutput::Value(None)), Ok(None));
        assert!(matches!(
            store.parse_value(KvOutput::Value(Some(b"not json".to_vec()))),
            Err(KvError::Serialization { .. })
        ));
        assert!(matches!(
            store.parse_value(KvOutput::Written),
            Err(KvError::UnexpectedOutput { .. })
        ));
    }
}
