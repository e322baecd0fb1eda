//! In-memory fakes shared by unit tests.

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::popup::{PopupMode, StyleDeclaration};
use crate::domain::selection::{Point, Rect, Size};
use crate::infrastructure::llm_clients::LLMClient;
use crate::interfaces::content::page::{ListenerKind, OverlayHandle, Page, PageSelection};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub struct FakeOverlay {
    pub element_id: String,
    pub text: String,
    pub mode: Option<PopupMode>,
    pub position: Point,
    pub reveals: usize,
    pub style: HashMap<&'static str, String>,
}

impl FakeOverlay {
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }
}

/// Page double. Listener registrations are counted, not deduplicated, so
/// tests catch a controller that registers twice.
#[derive(Debug)]
pub struct FakePage {
    viewport: Size,
    overlay_size: Size,
    selection: Option<PageSelection>,
    listeners: HashMap<ListenerKind, usize>,
    pub overlays: HashMap<u64, FakeOverlay>,
    pub created: usize,
    next_id: u64,
}

impl FakePage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            overlay_size: Size::new(240.0, 60.0),
            selection: None,
            listeners: HashMap::new(),
            overlays: HashMap::new(),
            created: 0,
            next_id: 1,
        }
    }

    pub fn with_overlay_size(mut self, width: f64, height: f64) -> Self {
        self.overlay_size = Size::new(width, height);
        self
    }

    pub fn select(&mut self, text: &str, bounds: Rect) {
        self.selection = Some(PageSelection {
            text: text.to_string(),
            bounds,
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listener_count(kind) > 0
    }

    pub fn only_overlay(&self) -> Option<&FakeOverlay> {
        if self.overlays.len() == 1 {
            self.overlays.values().next()
        } else {
            None
        }
    }
}

impl Page for FakePage {
    fn selection(&self) -> Option<PageSelection> {
        self.selection.clone()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn add_listener(&mut self, kind: ListenerKind) {
        *self.listeners.entry(kind).or_insert(0) += 1;
    }

    fn remove_listener(&mut self, kind: ListenerKind) {
        if let Some(count) = self.listeners.get_mut(&kind) {
            *count = count.saturating_sub(1);
        }
    }

    fn create_overlay(&mut self, element_id: &str, style: &[StyleDeclaration]) -> OverlayHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;
        self.overlays.insert(
            id,
            FakeOverlay {
                element_id: element_id.to_string(),
                text: String::new(),
                mode: None,
                position: Point::default(),
                reveals: 0,
                style: style.iter().cloned().collect(),
            },
        );
        OverlayHandle(id)
    }

    fn set_overlay_text(&mut self, overlay: OverlayHandle, text: &str) {
        if let Some(entry) = self.overlays.get_mut(&overlay.0) {
            entry.text = text.to_string();
        }
    }

    fn set_overlay_mode(
        &mut self,
        overlay: OverlayHandle,
        mode: PopupMode,
        style: &[StyleDeclaration],
    ) {
        if let Some(entry) = self.overlays.get_mut(&overlay.0) {
            entry.mode = Some(mode);
            entry.style.extend(style.iter().cloned());
        }
    }

    fn measure_overlay(&self, _overlay: OverlayHandle) -> Size {
        self.overlay_size
    }

    fn move_overlay(&mut self, overlay: OverlayHandle, position: Point) {
        if let Some(entry) = self.overlays.get_mut(&overlay.0) {
            entry.position = position;
        }
    }

    fn reveal_overlay(&mut self, overlay: OverlayHandle) {
        if let Some(entry) = self.overlays.get_mut(&overlay.0) {
            entry.reveals += 1;
        }
    }

    fn remove_overlay(&mut self, overlay: OverlayHandle) {
        self.overlays.remove(&overlay.0);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api_key: String,
    pub prompt: String,
}

enum Reply {
    Now(Result<String>),
    Later(oneshot::Receiver<Result<String>>),
}

/// LLM double answering from a queue of scripted replies.
#[derive(Default)]
pub struct ScriptedLLMClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLLMClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, reply: Result<String>) {
        self.replies.lock().unwrap().push_back(Reply::Now(reply));
    }

    /// Queues a reply that resolves when the returned sender fires.
    pub fn reply_later(&self) -> oneshot::Sender<Result<String>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply::Later(rx));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for ScriptedLLMClient {
    async fn generate(&self, _config: &LLMConfig, api_key: &str, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.to_string(),
            prompt: prompt.to_string(),
        });
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Now(result)) => result,
            Some(Reply::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::Internal("scripted reply dropped".into()))),
            None => Err(AppError::Internal("no scripted reply".into())),
        }
    }
}
