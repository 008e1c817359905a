//! In-process named-event bus
//!
//! Subscribers register against an event name and receive the property bag
//! of every `fire` of that name, in subscription order.

use std::collections::HashMap;

use log::trace;
use serde_json::{Map, Value};

use crate::rigid_body_system::{BodyHandle, ContactListener, TriggerHandle};

/// Opaque key/value bag passed with an event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedProperties(Map<String, Value>);

impl NamedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

pub type EventCallback = Box<dyn FnMut(&NamedProperties)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<String, Vec<(SubscriptionId, EventCallback)>>,
    next_id: u64,
    fired: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut(&NamedProperties) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(name.into())
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in self.subscribers.values_mut() {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscribers.get(name).is_some_and(|l| !l.is_empty())
    }

    /// Deliver `args` to every subscriber of `name`. Returns false when
    /// nobody listens.
    pub fn fire(&mut self, name: &str, args: &NamedProperties) -> bool {
        self.fired += 1;
        let Some(list) = self.subscribers.get_mut(name) else {
            trace!("event {name}: no subscribers");
            return false;
        };
        for (_, callback) in list.iter_mut() {
            callback(args);
        }
        !list.is_empty()
    }

    /// Events fired since creation, listened to or not.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl ContactListener for EventBus {
    fn on_collision(&mut self, event: &str, body: BodyHandle, other: BodyHandle) {
        let args = NamedProperties::new()
            .with("body", body.to_bits())
            .with("other", other.to_bits());
        self.fire(event, &args);
    }

    fn on_trigger(&mut self, event: &str, trigger: TriggerHandle, body: BodyHandle) {
        let args = NamedProperties::new()
            .with("trigger", trigger.to_bits())
            .with("body", body.to_bits());
        self.fire(event, &args);
    }
}
