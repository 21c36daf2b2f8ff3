//! In-memory port fakes shared by the unit tests of this crate.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use homedash_domain::control::{ControlInputs, ControlSnapshot};
use homedash_domain::display::Field;
use homedash_domain::error::RequestError;
use serde_json::Value;

use crate::ports::{ControlPanel, DisplaySink, JsonTransport};

/// A scripted reply: optional delay, then a body or an HTTP status failure.
#[derive(Clone)]
pub struct Reply {
    pub delay: Duration,
    pub result: Result<Value, u16>,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(body),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(status),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport answering from per-path reply queues. The last reply of a
/// queue repeats forever; unknown paths answer 404.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn reply(&self, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, method: &'static str, path: &str, body: Option<Value>) -> Reply {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.to_string(),
            body,
        });
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_else(|| Reply::status(404)),
            None => Reply::status(404),
        }
    }
}

async fn resolve(reply: Reply) -> Result<Value, RequestError> {
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    reply
        .result
        .map_err(|status| RequestError::Status { status })
}

impl JsonTransport for FakeTransport {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value, RequestError>> + Send {
        resolve(self.next_reply("GET", path, None))
    }

    fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send {
        resolve(self.next_reply("POST", path, Some(body)))
    }
}

/// Display remembering the last text of every field.
#[derive(Default)]
pub struct RecordingDisplay {
    fields: Mutex<BTreeMap<Field, String>>,
}

impl RecordingDisplay {
    pub fn get(&self, field: Field) -> Option<String> {
        self.fields.lock().unwrap().get(&field).cloned()
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_text(&self, field: Field, text: &str) {
        self.fields.lock().unwrap().insert(field, text.to_string());
    }
}

/// Control panel holding plain inputs.
#[derive(Default)]
pub struct FakePanel {
    inputs: Mutex<ControlInputs>,
}

impl FakePanel {
    pub fn with_inputs(inputs: ControlInputs) -> Self {
        Self {
            inputs: Mutex::new(inputs),
        }
    }

    pub fn inputs(&self) -> ControlInputs {
        self.inputs.lock().unwrap().clone()
    }
}

impl ControlPanel for FakePanel {
    fn read_controls(&self) -> ControlInputs {
        self.inputs()
    }

    fn apply_snapshot(&self, snapshot: &ControlSnapshot) {
        snapshot.apply_to(&mut self.inputs.lock().unwrap());
    }
}
