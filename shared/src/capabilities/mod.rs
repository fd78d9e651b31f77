mod delay;
mod kv;
mod linking;

pub use self::delay::{Delay, DelayOperation, DelayOutput};
pub use self::kv::{
    KeyNamespace, KeyValue, KvError, KvKey, KvOperation, KvOutput, KvResult, StorageErrorCode,
    TypedKvStore,
};
pub use self::linking::{Linking, LinkingOperation, Route};
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub delay: Delay<Event>,
    pub key_value: KeyValue<Event>,
    pub linking: Linking<Event>,
}
